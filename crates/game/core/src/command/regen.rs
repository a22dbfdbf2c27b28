//! Healing: per engagement for floor bosses and the Warden, wall-clock intervals
//! for the Raid Boss, plus the once-a-day `regen_burst`.
//!
//! The arithmetic lives in pure functions ([`engagement_heal`], [`raid_regen`])
//! taking `now` as an argument, so it is testable without real delays.

use super::{CommandError, CommandTransition, awake_raid_boss, boss_mut, boss_ref, check_hp_bounds};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::mechanic::MechanicKind;
use crate::state::{BossArena, BossId, Timestamp};

/// HP restored by one engagement heal: `max(1, floor(hp_max * rate))`, clamped to missing HP.
///
/// Returns 0 for a dead or full boss.
pub fn engagement_heal(hp: u32, hp_max: u32, rate_pct: u32) -> u32 {
    if hp == 0 || hp >= hp_max {
        return 0;
    }
    let heal = (u64::from(hp_max) * u64::from(rate_pct) / 100).max(1);
    heal.min(u64::from(hp_max - hp)) as u32
}

/// Result of one wall-clock regen evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaidRegen {
    pub healed: u32,
    /// Value to store as the new `last_regen_at`.
    pub last_regen_at: Option<Timestamp>,
}

/// Wall-clock regen as a pure function of `(now, last_regen_at, rate, interval)`.
///
/// - dead boss: nothing heals, the timestamp is left untouched
/// - missing timestamp: starts the clock at `now`, heals nothing
/// - full boss: restarts the clock at `now` so no regen is banked
/// - otherwise each whole elapsed interval heals `max(1, ceil(hp_max * rate))`
///   and the timestamp advances by the intervals consumed; the remainder carries
pub fn raid_regen(
    now: Timestamp,
    last_regen_at: Option<Timestamp>,
    hp: u32,
    hp_max: u32,
    rate_pct: u32,
    interval_secs: u64,
) -> RaidRegen {
    let unchanged = RaidRegen {
        healed: 0,
        last_regen_at,
    };
    if hp == 0 || interval_secs == 0 {
        return unchanged;
    }
    let Some(last) = last_regen_at else {
        return RaidRegen {
            healed: 0,
            last_regen_at: Some(now),
        };
    };
    if hp >= hp_max {
        return RaidRegen {
            healed: 0,
            last_regen_at: Some(now),
        };
    }

    let units = now.secs_since(last) / interval_secs;
    if units == 0 {
        return unchanged;
    }
    let per_unit = (u64::from(hp_max) * u64::from(rate_pct)).div_ceil(100).max(1);
    let missing = u64::from(hp_max - hp);
    let healed = per_unit.saturating_mul(units).min(missing) as u32;

    RaidRegen {
        healed,
        last_regen_at: Some(last + units * interval_secs),
    }
}

/// Per-engagement regen for ordinary floor bosses and the Warden.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenOnEngagement {
    pub boss: BossId,
}

impl RegenOnEngagement {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

impl CommandTransition for RegenOnEngagement {
    type Output = u32;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        if boss_ref(arena, self.boss)?.is_raid_boss() {
            return Err(CommandError::RaidBossNotAllowed { boss: self.boss });
        }
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        _events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let config = env.config();
        let boss = boss_mut(arena, self.boss)?;
        let rate = if boss.has(&MechanicKind::Regenerator) {
            config.regenerator_rate_pct
        } else if boss.is_warden() {
            config.warden_regen_rate_pct
        } else {
            config.floor_regen_rate(boss.floor)
        };
        let healed = engagement_heal(boss.hp, boss.hp_max, rate);
        boss.hp += healed;
        Ok(healed)
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)
    }
}

/// Wall-clock regen for the Raid Boss, evaluated lazily at `env.now()`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenRaidBoss {
    pub boss: BossId,
}

impl RegenRaidBoss {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

impl CommandTransition for RegenRaidBoss {
    type Output = u32;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        awake_raid_boss(arena, self.boss).map(|_| ())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        _events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let config = env.config();
        let boss = boss_mut(arena, self.boss)?;
        let rate = if boss.has(&MechanicKind::ExtraRegen) {
            config.extra_regen_rate_pct
        } else {
            config.raid_regen_rate_pct
        };
        let regen = raid_regen(
            env.now(),
            boss.regen.last_regen_at,
            boss.hp,
            boss.hp_max,
            rate,
            config.regen_interval_secs,
        );
        boss.hp += regen.healed;
        boss.regen.last_regen_at = regen.last_regen_at;
        Ok(regen.healed)
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)
    }
}

/// `regen_burst`: a large heal at most once per cooldown window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenBurst {
    pub boss: BossId,
}

impl RegenBurst {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

impl CommandTransition for RegenBurst {
    type Output = u32;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        boss_ref(arena, self.boss).map(|_| ())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let config = env.config();
        let now = env.now();
        let boss = boss_mut(arena, self.boss)?;

        if !boss.has(&MechanicKind::RegenBurst) || !boss.is_alive() || boss.is_full() {
            return Ok(0);
        }
        let cooling_down = boss
            .regen
            .last_burst_at
            .is_some_and(|last| now.secs_since(last) < config.regen_burst_cooldown_secs);
        if cooling_down {
            return Ok(0);
        }

        let heal = (u64::from(boss.hp_max) * u64::from(config.regen_burst_rate_pct)).div_ceil(100);
        let healed = heal.min(u64::from(boss.hp_max - boss.hp)) as u32;
        boss.hp += healed;
        boss.regen.last_burst_at = Some(now);

        events.push(BossEvent::new(
            boss.id,
            BossEventKind::RegenBurst { healed },
            format!("The {} surges with energy! It heals significantly.", boss.name),
            config.message_char_limit,
        ));
        Ok(healed)
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use crate::state::BossRole;
    use crate::test_support::*;

    const HOUR: u64 = 3600;

    #[test]
    fn regenerator_heals_ten_percent() {
        let config = config();
        let mut arena = arena_with(floor_boss(1, &["regenerator"], 100).with_hp(50));

        let (result, _) = run(&mut arena, &config, RegenOnEngagement::new(BossId(1))).unwrap();
        assert_eq!(result, CommandResult::Healed(10));
        assert_eq!(arena.boss(BossId(1)).unwrap().hp, 60);
    }

    #[test]
    fn engagement_regen_uses_warden_and_floor_rates() {
        let config = config().with_floor_regen_rate(2, 7);

        let warden = floor_boss(4, &["armored", "warded"], 200)
            .with_role(BossRole::FLOOR_BOSS | BossRole::WARDEN)
            .with_hp(100);
        let mut arena = arena_with(warden);
        let (result, _) = run(&mut arena, &config, RegenOnEngagement::new(BossId(4))).unwrap();
        assert_eq!(result.healed(), Some(6));

        let mut floor_two = floor_boss(2, &["phasing"], 100).with_hp(10);
        floor_two.floor = 2;
        let mut arena = arena_with(floor_two);
        let (result, _) = run(&mut arena, &config, RegenOnEngagement::new(BossId(2))).unwrap();
        assert_eq!(result.healed(), Some(7));
    }

    #[test]
    fn engagement_heal_clamps_and_keeps_minimum() {
        assert_eq!(engagement_heal(50, 100, 10), 10);
        assert_eq!(engagement_heal(98, 100, 10), 2);
        assert_eq!(engagement_heal(5, 10, 3), 1);
        assert_eq!(engagement_heal(0, 100, 10), 0);
        assert_eq!(engagement_heal(100, 100, 10), 0);
    }

    #[test]
    fn raid_regen_is_pure_over_elapsed_time() {
        let start = Timestamp(10_000);
        let interval = 8 * HOUR;

        let early = raid_regen(start + 7 * HOUR, Some(start), 500, 1000, 3, interval);
        assert_eq!(early.healed, 0);
        assert_eq!(early.last_regen_at, Some(start));

        // 17h elapsed: two units, one hour carried over
        let later = raid_regen(start + 17 * HOUR, Some(start), 500, 1000, 3, interval);
        assert_eq!(later.healed, 60);
        assert_eq!(later.last_regen_at, Some(start + 16 * HOUR));
    }

    #[test]
    fn raid_regen_edge_cases() {
        let now = Timestamp(50_000);
        let first = raid_regen(now, None, 400, 1000, 3, 3600);
        assert_eq!(first, RaidRegen { healed: 0, last_regen_at: Some(now) });

        let dead = raid_regen(now, Some(Timestamp(0)), 0, 1000, 3, 3600);
        assert_eq!(dead.healed, 0);
        assert_eq!(dead.last_regen_at, Some(Timestamp(0)));

        let capped = raid_regen(now, Some(Timestamp(0)), 990, 1000, 3, 3600);
        assert_eq!(capped.healed, 10);

        // ceil(101 * 3%) = 4 per unit
        let ceil = raid_regen(Timestamp(3600), Some(Timestamp(0)), 1, 101, 3, 3600);
        assert_eq!(ceil.healed, 4);
    }

    #[test]
    fn raid_boss_regen_honours_extra_regen() {
        let config = config();
        let mut boss = active_raid_boss(9, 1000);
        boss.mechanics = crate::mechanic::MechanicSet::parse(["extra_regen"]).unwrap();
        boss.hp = 100;
        boss.regen.last_regen_at = Some(Timestamp(now().0 - 8 * HOUR as i64));
        let mut arena = arena_with(boss);

        let (result, _) = run(&mut arena, &config, RegenRaidBoss::new(BossId(9))).unwrap();
        assert_eq!(result.healed(), Some(50));
        assert_eq!(
            arena.boss(BossId(9)).unwrap().regen.last_regen_at,
            Some(now())
        );
    }

    #[test]
    fn raid_regen_never_revives() {
        let config = config();
        let mut boss = active_raid_boss(9, 1000);
        boss.hp = 0;
        boss.regen.last_regen_at = Some(Timestamp(0));
        let mut arena = arena_with(boss);

        let (result, _) = run(&mut arena, &config, RegenRaidBoss::new(BossId(9))).unwrap();
        assert_eq!(result.healed(), Some(0));
        assert_eq!(arena.boss(BossId(9)).unwrap().hp, 0);
    }

    #[test]
    fn regen_burst_once_per_cooldown() {
        let config = config();
        let mut boss = active_raid_boss(9, 1000);
        boss.mechanics = crate::mechanic::MechanicSet::parse(["regen_burst", "lockout"]).unwrap();
        boss.hp = 500;
        let mut arena = arena_with(boss);

        let (result, events) = run(&mut arena, &config, RegenBurst::new(BossId(9))).unwrap();
        assert_eq!(result.healed(), Some(150));
        assert_eq!(events.len(), 1);
        assert!(events[0].message.contains("surges"));

        let (again, events) = run(&mut arena, &config, RegenBurst::new(BossId(9))).unwrap();
        assert_eq!(again.healed(), Some(0));
        assert!(events.is_empty());

        let tomorrow = now() + 24 * HOUR;
        let (next_day, _) = run_at(&mut arena, &config, tomorrow, RegenBurst::new(BossId(9))).unwrap();
        assert_eq!(next_day.healed(), Some(150));
    }

    #[test]
    fn raid_boss_uses_timer_regen_only() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 1000));
        let err = run(&mut arena, &config, RegenOnEngagement::new(BossId(9))).unwrap_err();
        assert_eq!(err.error(), &CommandError::RaidBossNotAllowed { boss: BossId(9) });
    }
}
