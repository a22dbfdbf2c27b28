//! Rules rolled for ordinary floor bosses and the Warden.
//!
//! Integer arithmetic throughout: percentage effects floor, and anything meant
//! to be non-zero keeps a minimum of 1.

use crate::combat::{CombatModifiers, Exchange};

/// Halves incoming damage while the boss is above half health.
pub fn armored(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.boss.above_half() {
        out.reduce_to(out.damage / 2);
        out.say("Armor absorbs half the blow.");
    }
}

/// At or below half health: takes 25% more, hits the attacker harder.
pub fn enraged(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.boss.above_half() {
        return;
    }
    // round(d * 1.25), half-up
    let boosted = (u64::from(out.damage) * 5 + 2) / 4;
    out.damage = u32::try_from(boosted).unwrap_or(u32::MAX);
    out.hurt_player((x.player.hp_max / 10).max(1));
    out.say("It rages! Hits harder but more reckless.");
}

/// Blocks fleeing on the opening round only.
pub fn stalwart(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.round == 1 {
        out.flee_blocked = true;
        out.say("It blocks the exit!");
    }
}

/// Two-thirds damage until the attacker has found a secret on this floor.
pub fn warded(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if !x.player.floor_secret_found {
        let reduced = u64::from(out.damage) * 2 / 3;
        out.reduce_to(reduced as u32);
        out.say("A ward shields it. Find secrets on this floor.");
    }
}

/// Immune on even epoch days.
pub fn phasing(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.context.day % 2 == 0 {
        out.make_immune();
        out.say("It phases out of reality. Try tomorrow.");
    }
}

pub fn draining(_: &Exchange<'_>, out: &mut CombatModifiers) {
    let drain = (out.damage / 10).max(1);
    out.hurt_player(drain);
    out.say(format!("It drains {drain} HP from you!"));
}

/// Warning only; the clone itself is produced by `TrySplit`.
pub fn splitting(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.boss.is_alive() && !x.boss.above_half() {
        out.say("It shudders and begins to split!");
    }
}

/// Reduces damage in proportion to the attacker's dominant stat.
///
/// Reduction is `max(1, d * s / (s + K))` with `s` the highest base stat and
/// `K` the configured softness, so any non-zero stat strictly lowers a
/// positive hit.
pub fn rotating_resistance(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let (stat, value) = x.player.dominant_stat();
    if value == 0 || out.damage == 0 {
        return;
    }
    let d = u64::from(out.damage);
    let s = u64::from(value);
    let k = u64::from(x.config().rotating_resistance_softness);
    let reduction = (d * s / (s + k)).max(1).min(d);
    out.damage = (d - reduction) as u32;
    out.say(format!("It resists your {stat}!"));
}

pub fn retaliator(_: &Exchange<'_>, out: &mut CombatModifiers) {
    let reflected = (out.damage / 5).max(1);
    out.hurt_player(reflected);
    out.say(format!("It reflects {reflected} damage back!"));
}

/// Immune while any minion it summoned is alive.
pub fn summoner(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.context.living_minions > 0 {
        out.make_immune();
        out.say("Kill the minion first!");
    }
}
