use super::{CommandError, CommandTransition, awake_raid_boss, boss_mut};
use crate::env::{EncounterEnv, compute_seed};
use crate::events::{BossEvent, BossEventKind};
use crate::state::{BossArena, BossId, RoomId};

/// Moves the Raid Boss to another eligible room on its floor.
///
/// The target is drawn from the room oracle with the seeded RNG, so replays
/// relocate identically. Phase is untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relocate {
    pub boss: BossId,
}

impl Relocate {
    pub fn new(boss: BossId) -> Self {
        Self { boss }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relocation {
    pub from: RoomId,
    pub to: RoomId,
}

impl CommandTransition for Relocate {
    type Output = Relocation;

    fn pre_validate(&self, arena: &BossArena, env: &EncounterEnv<'_>) -> Result<(), CommandError> {
        let boss = awake_raid_boss(arena, self.boss)?;
        if !boss.is_alive() {
            return Err(CommandError::BossDefeated { boss: self.boss });
        }
        env.rooms()?;
        env.rng()?;
        Ok(())
    }

    fn apply(
        &self,
        arena: &mut BossArena,
        env: &EncounterEnv<'_>,
        events: &mut Vec<BossEvent>,
    ) -> Result<Self::Output, CommandError> {
        let seed = compute_seed(arena.seed, arena.nonce, self.boss.0, 0);
        let rooms = env.rooms()?;
        let rng = env.rng()?;
        let boss = boss_mut(arena, self.boss)?;

        let candidates: Vec<RoomId> = rooms
            .eligible_relocation_rooms(boss.floor)
            .into_iter()
            .filter(|room| *room != boss.room)
            .collect();
        if candidates.is_empty() {
            return Err(CommandError::NoEligibleRoom {
                boss: self.boss,
                floor: boss.floor,
            });
        }

        let from = boss.room;
        let to = candidates[rng.pick_index(seed, candidates.len())];
        boss.room = to;

        events.push(BossEvent::new(
            self.boss,
            BossEventKind::Fled { from, to },
            format!("The {} fled to somewhere on Floor {}!", boss.name, boss.floor),
            env.config().message_char_limit,
        ));
        Ok(Relocation { from, to })
    }
}
