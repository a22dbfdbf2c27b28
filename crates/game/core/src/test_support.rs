//! Fixtures shared by the in-crate unit tests.

use crate::command::{Command, CommandResult};
use crate::config::EngineConfig;
use crate::engine::{BossEngine, ExecuteError};
use crate::env::{EncounterEnv, EpochContext};
use crate::events::BossEvent;
use crate::mechanic::MechanicSet;
use crate::state::{Boss, BossArena, BossId, RoomId, Timestamp};

pub fn config() -> EngineConfig {
    EngineConfig::default()
}

pub fn now() -> Timestamp {
    Timestamp(1_700_000_000)
}

/// Dormant Raid Boss in room 40 on floor 4.
pub fn raid_boss(id: u32) -> Boss {
    Boss::dormant_raid(
        BossId(id),
        "Hollow King",
        RoomId(40),
        4,
        MechanicSet::parse(["windup_strike"]).unwrap(),
    )
}

/// Raid Boss already activated at full `hp`, regen clock started at [`now`].
pub fn active_raid_boss(id: u32, hp: u32) -> Boss {
    let mut boss = raid_boss(id);
    boss.hp = hp;
    boss.hp_max = hp;
    boss.phase = 1;
    boss.regen.last_regen_at = Some(now());
    boss
}

/// Floor-1 boss at full health, placed in `RoomId(id)`.
pub fn floor_boss(id: u32, mechanics: &[&str], hp_max: u32) -> Boss {
    Boss::new(
        BossId(id),
        "Gatekeeper",
        RoomId(id),
        1,
        hp_max,
        MechanicSet::parse(mechanics.iter().copied()).unwrap(),
    )
}

pub fn arena_with(boss: Boss) -> BossArena {
    let mut arena = BossArena::new(0xB055);
    arena.insert_boss(boss).unwrap();
    arena
}

pub fn run(
    arena: &mut BossArena,
    config: &EngineConfig,
    command: impl Into<Command>,
) -> Result<(CommandResult, Vec<BossEvent>), ExecuteError> {
    run_at(arena, config, now(), command)
}

/// Runs at `at` on day 1 without room or RNG oracles.
pub fn run_at(
    arena: &mut BossArena,
    config: &EngineConfig,
    at: Timestamp,
    command: impl Into<Command>,
) -> Result<(CommandResult, Vec<BossEvent>), ExecuteError> {
    let env = EncounterEnv::new(config, EpochContext::new(1, at));
    run_in(arena, &env, command)
}

pub fn run_in(
    arena: &mut BossArena,
    env: &EncounterEnv<'_>,
    command: impl Into<Command>,
) -> Result<(CommandResult, Vec<BossEvent>), ExecuteError> {
    let outcome = BossEngine::new(arena).execute(env, &command.into())?;
    Ok((outcome.result, outcome.events))
}
