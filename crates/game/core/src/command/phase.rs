//! Raid Boss activation and the phase ratchet.

use super::{CommandError, CommandTransition, awake_raid_boss, boss_mut, boss_ref, check_hp_bounds};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::state::{Boss, BossArena, BossId};

/// Scales the dormant Raid Boss to the active player count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activate {
    pub boss: BossId,
    pub active_players: u32,
}

impl Activate {
    pub fn new(boss: BossId, active_players: u32) -> Self {
        Self {
            boss,
            active_players,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationOutcome {
    pub hp: u32,
    /// Player count actually used (at least 1).
    pub active_players: u32,
}

impl CommandTransition for Activate {
    type Output = ActivationOutcome;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        let boss = boss_ref(arena, self.boss)?;
        if !boss.is_raid_boss() {
            return Err(CommandError::NotRaidBoss { boss: self.boss });
        }
        if !boss.is_dormant() {
            return Err(CommandError::AlreadyActive { boss: self.boss });
        }
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let config = env.config();
        let players = self.active_players.max(1);
        let scaled = u64::from(config.raid_hp_per_player) * u64::from(players);
        let hp = scaled.min(u64::from(config.raid_hp_cap)) as u32;

        let boss = boss_mut(arena, self.boss)?;
        boss.hp = hp;
        boss.hp_max = hp;
        boss.phase = 1;
        boss.regen.last_regen_at = Some(env.now());
        boss.regen.last_burst_at = None;

        events.push(BossEvent::new(
            boss.id,
            BossEventKind::Activated {
                hp,
                active_players: players,
            },
            format!(
                "The {} stirs on Floor {}. HP: {}. The hunt begins.",
                boss.name, boss.floor, hp
            ),
            config.message_char_limit,
        ));

        Ok(ActivationOutcome {
            hp,
            active_players: players,
        })
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)
    }
}

/// Advances the Raid Boss phase when its HP has crossed a threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhase {
    pub boss: BossId,
}

impl TransitionPhase {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseOutcome {
    /// Phase after the check.
    pub phase: u32,
    /// Phases entered by this call, in order. Empty when nothing changed.
    pub entered: Vec<u32>,
}

impl CommandTransition for TransitionPhase {
    type Output = PhaseOutcome;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        awake_raid_boss(arena, self.boss).map(|_| ())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let boss = boss_mut(arena, self.boss)?;
        let entered = advance_phase(boss, env, events);
        Ok(PhaseOutcome {
            phase: boss.phase,
            entered,
        })
    }
}

/// Ratchets `boss.phase` past every threshold its HP has reached.
///
/// Thresholds are walked in order so one call can enter several phases; each
/// phase is announced exactly once because the ratchet never moves back.
/// Defeated bosses are left alone.
pub(crate) fn advance_phase(
    boss: &mut Boss,
    env: &EncounterEnv<'_>,
    events: &mut Vec<BossEvent>,
) -> Vec<u32> {
    let config = env.config();
    let mut entered = Vec::new();
    if !boss.is_alive() {
        return entered;
    }

    for (index, pct) in config.phase_thresholds_pct.iter().enumerate() {
        let next = index as u32 + 2;
        if boss.phase + 1 == next && boss.at_or_below_pct(*pct) {
            let from = boss.phase;
            boss.phase = next;
            entered.push(next);
            events.push(BossEvent::new(
                boss.id,
                BossEventKind::PhaseChanged { from, to: next },
                format!("The {} enters phase {}! It grows stronger.", boss.name, next),
                config.message_char_limit,
            ));
        }
    }
    entered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandResult};
    use crate::test_support::*;

    #[test]
    fn activation_scales_with_players() {
        let config = config();
        let mut arena = arena_with(raid_boss(9));

        let (result, events) = run(&mut arena, &config, Activate::new(BossId(9), 5)).unwrap();
        assert_eq!(
            result,
            CommandResult::Activated(ActivationOutcome {
                hp: 1500,
                active_players: 5
            })
        );
        let boss = arena.boss(BossId(9)).unwrap();
        assert_eq!((boss.hp, boss.hp_max, boss.phase), (1500, 1500, 1));
        assert_eq!(boss.regen.last_regen_at, Some(now()));
        assert_eq!(events.len(), 1);
        assert!(events[0].message.contains("1500"));
    }

    #[test]
    fn activation_respects_cap_and_minimum() {
        let config = config();
        let mut crowded = arena_with(raid_boss(9));
        run(&mut crowded, &config, Activate::new(BossId(9), 40)).unwrap();
        assert_eq!(crowded.boss(BossId(9)).unwrap().hp, 6000);

        let mut empty = arena_with(raid_boss(9));
        run(&mut empty, &config, Activate::new(BossId(9), 0)).unwrap();
        assert_eq!(empty.boss(BossId(9)).unwrap().hp, 300);
    }

    #[test]
    fn activation_is_one_shot() {
        let config = config();
        let mut arena = arena_with(raid_boss(9));
        run(&mut arena, &config, Activate::new(BossId(9), 2)).unwrap();

        let err = run(&mut arena, &config, Activate::new(BossId(9), 2)).unwrap_err();
        assert_eq!(err.error(), &CommandError::AlreadyActive { boss: BossId(9) });
    }

    #[test]
    fn phase_ratchets_and_never_regresses() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 1500));
        arena.boss_mut(BossId(9)).unwrap().hp = 980;

        let check = || Command::from(TransitionPhase::new(BossId(9)));
        let (result, events) = run(&mut arena, &config, check()).unwrap();
        assert_eq!(
            result,
            CommandResult::Phase(PhaseOutcome {
                phase: 2,
                entered: vec![2]
            })
        );
        assert_eq!(events.len(), 1);
        assert!(events[0].message.contains("phase"));

        // healing back above the threshold keeps phase 2 and stays silent
        arena.boss_mut(BossId(9)).unwrap().hp = 1500;
        let (_, events) = run(&mut arena, &config, check()).unwrap();
        assert!(events.is_empty());
        assert_eq!(arena.boss(BossId(9)).unwrap().phase, 2);
    }

    #[test]
    fn one_check_can_cross_both_thresholds() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 1500));
        arena.boss_mut(BossId(9)).unwrap().hp = 400;

        let (_, events) = run(&mut arena, &config, TransitionPhase::new(BossId(9))).unwrap();
        let phases: Vec<_> = events
            .iter()
            .map(|event| event.kind.clone())
            .collect();
        assert_eq!(
            phases,
            vec![
                BossEventKind::PhaseChanged { from: 1, to: 2 },
                BossEventKind::PhaseChanged { from: 2, to: 3 },
            ]
        );
    }

    #[test]
    fn dormant_boss_has_no_phase() {
        let config = config();
        let mut arena = arena_with(raid_boss(9));
        let err = run(&mut arena, &config, TransitionPhase::new(BossId(9))).unwrap_err();
        assert_eq!(err.error(), &CommandError::Dormant { boss: BossId(9) });
    }
}
