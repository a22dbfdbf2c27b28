use super::{CommandError, CommandTransition, boss_ref};
use crate::env::EncounterEnv;
use crate::events::{BossEvent, BossEventKind};
use crate::state::{BossArena, BossId, Minion, MinionId};

/// Spawns a minion tied to a boss, up to the boss's summon cap.
///
/// Ordinary bosses and the Warden keep at most one living add; the Raid Boss
/// keeps as many as its current phase. Calls past the cap are no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnAdd {
    pub boss: BossId,
}

impl SpawnAdd {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

impl CommandTransition for SpawnAdd {
    type Output = Option<MinionId>;

    fn pre_validate(&self, arena: &BossArena, _env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        let boss = boss_ref(arena, self.boss)?;
        if boss.is_dormant() {
            return Err(CommandError::Dormant { boss: self.boss });
        }
        if !boss.is_alive() {
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
        let boss = boss_ref(arena, self.boss)?;
        let cap = if boss.is_raid_boss() {
            boss.phase as usize
        } else {
            1
        };
        if arena.living_minions(self.boss).count() >= cap {
            return Ok(None);
        }
        let (room, floor) = (boss.room, boss.floor);
        let message = format!("The {} calls a minion to its side! Kill it first.", boss.name);

        let id = arena.allocate_minion_id()?;
        arena.insert_minion(Minion::for_floor(id, self.boss, room, floor));
        events.push(BossEvent::new(
            self.boss,
            BossEventKind::Summoned { minion: id },
            message,
            env.config().message_char_limit,
        ));
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandResult, DamageMinion};
    use crate::test_support::*;

    fn spawned(result: CommandResult) -> Option<MinionId> {
        match result {
            CommandResult::Spawned(minion) => minion,
            other => panic!("expected spawn result, got {other:?}"),
        }
    }

    #[test]
    fn floor_boss_keeps_one_living_add() {
        let config = config();
        let mut arena = arena_with(floor_boss(2, &["summoner"], 80));

        let (first, events) = run(&mut arena, &config, SpawnAdd::new(BossId(2))).unwrap();
        let minion = spawned(first).expect("first add spawns");
        assert_eq!(events.len(), 1);

        let (second, _) = run(&mut arena, &config, SpawnAdd::new(BossId(2))).unwrap();
        assert_eq!(spawned(second), None);

        let stats = arena.minion(minion).unwrap();
        assert_eq!((stats.hp, stats.stats.pow), (15, 3));

        run(&mut arena, &config, DamageMinion::new(minion, 99)).unwrap();
        let (third, _) = run(&mut arena, &config, SpawnAdd::new(BossId(2))).unwrap();
        assert!(spawned(third).is_some());
    }

    #[test]
    fn raid_boss_cap_follows_phase() {
        let config = config();
        let mut boss = active_raid_boss(9, 1500);
        boss.phase = 2;
        let mut arena = arena_with(boss);

        for _ in 0..2 {
            let (result, _) = run(&mut arena, &config, SpawnAdd::new(BossId(9))).unwrap();
            assert!(spawned(result).is_some());
        }
        let (capped, _) = run(&mut arena, &config, SpawnAdd::new(BossId(9))).unwrap();
        assert_eq!(spawned(capped), None);
        assert_eq!(arena.living_minions(BossId(9)).count(), 2);
    }

    #[test]
    fn dead_boss_cannot_summon() {
        let config = config();
        let mut arena = arena_with(floor_boss(2, &["summoner"], 80).with_hp(0));
        let err = run(&mut arena, &config, SpawnAdd::new(BossId(2))).unwrap_err();
        assert_eq!(err.error(), &CommandError::BossDefeated { boss: BossId(2) });
    }
}
