//! Damage application for bosses and their minions.

use super::phase::advance_phase;
use super::{CommandError, CommandTransition, boss_mut, boss_ref, check_hp_bounds};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::state::{Boss, BossArena, BossId, MinionId};

/// Subtracts resolved damage from a boss.
///
/// Raid bosses run the phase check in the same step so no reader ever sees the
/// HP drop without the matching phase. The `hp > 0 -> 0` transition emits the
/// single `Defeated` event; any later hit is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBoss {
    pub boss: BossId,
    pub amount: u32,
}

impl DamageBoss {
    pub fn new(boss: BossId, amount: u32) -> Self {
        Self { boss, amount }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// HP actually removed (never more than the boss had).
    pub dealt: u32,
    pub hp: u32,
    pub hp_max: u32,
    pub phase: u32,
    /// This hit was the killing blow.
    pub defeated: bool,
}

fn defeat_message(boss: &Boss) -> String {
    if boss.is_raid_boss() {
        format!("The {} has been slain! Victory belongs to the delvers!", boss.name)
    } else if boss.is_warden() {
        format!("The Warden {} has fallen! The depths are conquered!", boss.name)
    } else {
        format!("{} has been defeated!", boss.name)
    }
}

impl CommandTransition for DamageBoss {
    type Output = DamageOutcome;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        let boss = boss_ref(arena, self.boss)?;
        if boss.is_dormant() {
            return Err(CommandError::Dormant { boss: self.boss });
        }
        if boss.is_defeated() {
            return Err(CommandError::BossDefeated { boss: self.boss });
        }
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let limit = env.config().message_char_limit;
        let boss = boss_mut(arena, self.boss)?;

        let before = boss.hp;
        boss.hp = before.saturating_sub(self.amount);
        let defeated = before > 0 && boss.hp == 0;

        if boss.is_raid_boss() {
            advance_phase(boss, env, events);
        }
        if defeated {
            events.push(BossEvent::new(
                boss.id,
                BossEventKind::Defeated,
                defeat_message(boss),
                limit,
            ));
        }

        Ok(DamageOutcome {
            dealt: before - boss.hp,
            hp: boss.hp,
            hp_max: boss.hp_max,
            phase: boss.phase,
            defeated,
        })
    }

    fn post_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        check_hp_bounds(arena, self.boss)
    }
}

/// Damages a summoned minion. A minion at 0 HP lifts its summoner's immunity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageMinion {
    pub minion: MinionId,
    pub amount: u32,
}

impl DamageMinion {
    pub fn new(minion: MinionId, amount: u32) -> Self {
        Self { minion, amount }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionDamageOutcome {
    pub summoner: BossId,
    pub hp: u32,
    pub slain: bool,
}

impl CommandTransition for DamageMinion {
    type Output = MinionDamageOutcome;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        let minion = arena
            .minion(self.minion)
            .ok_or(CommandError::MinionNotFound {
                minion: self.minion,
            })?;
        if !minion.is_alive() {
            return Err(CommandError::MinionDefeated {
                minion: self.minion,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        _env: &EncounterEnv<'_>,
        _events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let minion = arena
            .minion_mut(self.minion)
            .ok_or(CommandError::MinionNotFound {
                minion: self.minion,
            })?;
        minion.hp = minion.hp.saturating_sub(self.amount);
        Ok(MinionDamageOutcome {
            summoner: minion.summoner,
            hp: minion.hp,
            slain: minion.hp == 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use crate::state::BossRole;
    use crate::test_support::*;

    #[test]
    fn killing_blow_reports_once() {
        let config = config();
        let mut arena = arena_with(floor_boss(1, &["armored"], 100).with_hp(15));

        let (result, events) = run(&mut arena, &config, DamageBoss::new(BossId(1), 40)).unwrap();
        let CommandResult::Damage(outcome) = result else {
            panic!("expected damage outcome, got {result:?}");
        };
        assert_eq!(outcome.dealt, 15);
        assert_eq!(outcome.hp, 0);
        assert!(outcome.defeated);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, BossEventKind::Defeated);

        let err = run(&mut arena, &config, DamageBoss::new(BossId(1), 5)).unwrap_err();
        assert_eq!(err.error(), &CommandError::BossDefeated { boss: BossId(1) });
    }

    #[test]
    fn defeat_wording_follows_role() {
        let config = config();
        let warden = floor_boss(4, &["armored", "retaliator"], 50)
            .with_role(BossRole::FLOOR_BOSS | BossRole::WARDEN)
            .with_hp(1);
        let mut arena = arena_with(warden);

        let (_, events) = run(&mut arena, &config, DamageBoss::new(BossId(4), 1)).unwrap();
        assert!(events[0].message.contains("Warden"));
    }

    #[test]
    fn raid_damage_runs_phase_check() {
        let config = config();
        let mut arena = arena_with(active_raid_boss(9, 1500));

        let (result, events) = run(&mut arena, &config, DamageBoss::new(BossId(9), 520)).unwrap();
        let CommandResult::Damage(outcome) = result else {
            panic!("expected damage outcome, got {result:?}");
        };
        assert_eq!(outcome.hp, 980);
        assert_eq!(outcome.phase, 2);
        let phase_events: Vec<_> = events
            .iter()
            .filter(|event| event.message.contains("phase"))
            .collect();
        assert_eq!(phase_events.len(), 1);
    }

    #[test]
    fn dormant_raid_boss_rejects_damage() {
        let config = config();
        let mut arena = arena_with(raid_boss(9));
        let err = run(&mut arena, &config, DamageBoss::new(BossId(9), 5)).unwrap_err();
        assert_eq!(err.error(), &CommandError::Dormant { boss: BossId(9) });
    }

    #[test]
    fn minion_damage_clamps_at_zero() {
        let config = config();
        let mut arena = arena_with(floor_boss(1, &["summoner"], 100));
        let (spawned, _) = run(&mut arena, &config, crate::command::SpawnAdd::new(BossId(1))).unwrap();
        let CommandResult::Spawned(Some(minion)) = spawned else {
            panic!("expected a minion, got {spawned:?}");
        };

        let (result, _) = run(&mut arena, &config, DamageMinion::new(minion, 500)).unwrap();
        assert_eq!(
            result,
            CommandResult::MinionDamage(MinionDamageOutcome {
                summoner: BossId(1),
                hp: 0,
                slain: true
            })
        );
        let err = run(&mut arena, &config, DamageMinion::new(minion, 1)).unwrap_err();
        assert_eq!(err.error(), &CommandError::MinionDefeated { minion });
    }
}
