//! Raid Boss rules. Magnitudes scale with the current phase.

use crate::combat::{CombatModifiers, Exchange};

fn pct_of(value: u32, pct: u64) -> u32 {
    u32::try_from(u64::from(value) * pct / 100).unwrap_or(u32::MAX)
}

/// Telegraphs a heavy blow every `max(2, 4 - phase)` rounds and lands it the round after.
pub fn windup_strike(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let interval = 4u32.saturating_sub(x.boss.phase).max(2);
    if x.round % interval == 0 {
        out.say("WIND-UP! Use DEFEND or DODGE next round!");
    }
    if x.round > 1 && (x.round - 1) % interval == 0 {
        out.hurt_player(x.player.hp_max / 3);
        out.say("The wind-up connects!");
    }
}

/// 5% of the attacker's max HP, times 1.5 / 1.75 / 2.0 by phase.
pub fn flat_damage_boost(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let mult_pct = 150 + 25 * u64::from(x.boss.phase.saturating_sub(1));
    let extra = u64::from(x.player.hp_max) * 5 * mult_pct / 10_000;
    out.hurt_player(u32::try_from(extra).unwrap_or(u32::MAX).max(1));
}

/// Bursts the attacker when this hit carries the boss across a 75/50/25% mark.
pub fn retribution(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.crossed_mark(out.damage).is_some() {
        let burst = pct_of(x.player.hp_max, 30 * u64::from(x.boss.phase));
        out.hurt_player(burst);
        out.say(format!("RETRIBUTION! It unleashes {burst} damage!"));
    }
}

pub fn aura_damage(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let aura = pct_of(x.player.hp_max, 5 * u64::from(x.boss.phase)).max(1);
    out.hurt_player(aura);
    out.say(format!("Its aura burns for {aura}."));
}

/// Halves damage until enough fighters have joined or a floor secret is known.
pub fn armor_phase(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let needed = x.config().armor_phase_fighters;
    if x.context.fighters < needed && !x.player.floor_secret_found {
        out.reduce_to(out.damage / 2);
        out.say(format!(
            "Armor holds! Need {needed} fighters or a floor secret."
        ));
    }
}

pub fn boss_flees(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.crossed_mark(out.damage).is_some() {
        out.boss_flees = true;
        out.say("BOSS FLEES! It relocates on this floor!");
    }
}

/// No fleeing once the boss is at or below a quarter of its health.
pub fn no_escape(x: &Exchange<'_>, out: &mut CombatModifiers) {
    if x.boss.hp_max > 0 && x.boss.at_or_below_pct(25) {
        out.flee_blocked = true;
        out.say("NO ESCAPE! Fight to the death!");
    }
}

/// Long fights escalate: past `max(3, 6 - phase)` rounds the extra damage doubles each round.
pub fn enrage_timer(x: &Exchange<'_>, out: &mut CombatModifiers) {
    let threshold = 6u32.saturating_sub(x.boss.phase).max(3);
    if x.round <= threshold {
        return;
    }
    let mult = 2u64.saturating_pow(x.round - threshold);
    let extra = (u64::from(x.player.hp_max) / 10).saturating_mul(mult);
    out.hurt_player(u32::try_from(extra).unwrap_or(u32::MAX));
    out.say(format!("ENRAGED! Damage x{mult}!"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EncounterContext;
    use crate::config::EngineConfig;
    use crate::mechanic::{MechanicKind, MechanicRule, MechanicSet};
    use crate::state::{Boss, BossId, PlayerId, PlayerSnapshot, RoomId};

    fn raid(hp: u32, phase: u32) -> Boss {
        let mut boss = Boss::dormant_raid(
            BossId(9),
            "Hollow King",
            RoomId(40),
            4,
            MechanicSet::single(MechanicKind::Lockout),
        );
        boss.hp_max = 1000;
        boss.hp = hp;
        boss.phase = phase;
        boss
    }

    fn run(rule: MechanicRule, boss: &Boss, damage: u32, round: u32) -> CombatModifiers {
        run_with(rule, boss, damage, round, 0, false)
    }

    fn run_with(
        rule: MechanicRule,
        boss: &Boss,
        damage: u32,
        round: u32,
        fighters: usize,
        secret: bool,
    ) -> CombatModifiers {
        let config = EngineConfig::default();
        let context = EncounterContext::new(1, &config).with_fighters(fighters);
        let player = PlayerSnapshot::new(PlayerId(1), 60, 8, 4, 4).with_floor_secret(secret);
        let exchange = Exchange {
            boss,
            player: &player,
            round,
            context: &context,
        };
        let mut out = CombatModifiers::passthrough(damage);
        rule(&exchange, &mut out);
        out
    }

    #[test]
    fn windup_warns_then_connects() {
        let boss = raid(1000, 1);
        let warn = run(windup_strike, &boss, 10, 3);
        assert_eq!(warn.extra_damage_to_player, 0);
        assert_eq!(warn.messages.len(), 1);

        let hit = run(windup_strike, &boss, 10, 4);
        assert_eq!(hit.extra_damage_to_player, 20);
    }

    #[test]
    fn flat_boost_scales_with_phase() {
        // 60 * 5% * 1.5 = 4.5 -> 4
        assert_eq!(
            run(flat_damage_boost, &raid(1000, 1), 10, 1).extra_damage_to_player,
            4
        );
        // 60 * 5% * 2.0 = 6
        assert_eq!(
            run(flat_damage_boost, &raid(1000, 3), 10, 1).extra_damage_to_player,
            6
        );
    }

    #[test]
    fn retribution_fires_only_on_crossing() {
        let boss = raid(760, 2);
        let crossing = run(retribution, &boss, 20, 1);
        assert_eq!(crossing.extra_damage_to_player, 36);

        let short = run(retribution, &boss, 5, 1);
        assert_eq!(short.extra_damage_to_player, 0);
    }

    #[test]
    fn armor_phase_lifts_with_fighters_or_secret() {
        let boss = raid(1000, 1);
        assert_eq!(run_with(armor_phase, &boss, 21, 1, 2, false).damage, 10);
        assert_eq!(run_with(armor_phase, &boss, 21, 1, 5, false).damage, 21);
        assert_eq!(run_with(armor_phase, &boss, 21, 1, 0, true).damage, 21);
    }

    #[test]
    fn boss_flees_sets_flag_on_crossing() {
        assert!(run(boss_flees, &raid(510, 1), 20, 1).boss_flees);
        assert!(!run(boss_flees, &raid(490, 1), 20, 1).boss_flees);
    }

    #[test]
    fn no_escape_below_quarter() {
        assert!(run(no_escape, &raid(250, 3), 1, 1).flee_blocked);
        assert!(!run(no_escape, &raid(251, 3), 1, 1).flee_blocked);
    }

    #[test]
    fn enrage_timer_doubles_after_threshold() {
        let boss = raid(1000, 1);
        assert_eq!(run(enrage_timer, &boss, 1, 5).extra_damage_to_player, 0);
        // threshold 5: round 6 -> x2, round 7 -> x4
        assert_eq!(run(enrage_timer, &boss, 1, 6).extra_damage_to_player, 12);
        assert_eq!(run(enrage_timer, &boss, 1, 7).extra_damage_to_player, 24);
    }
}
