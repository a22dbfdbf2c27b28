//! Command dispatch through the three-stage pipeline.

use crate::command::{Command, CommandError, CommandResult, CommandTransition};
use crate::env::EncounterEnv;
use crate::events::BossEvent;
use crate::state::BossArena;

use super::errors::{ExecuteError, PipelineStage, StageError};

/// Runs one transition through its stages:
///
/// 1. `pre_validate` - check preconditions before mutation
/// 2. `apply` - mutate the arena and collect events
/// 3. `post_validate` - verify postconditions after mutation
#[inline]
fn drive_command<T>(
    command: &T,
    arena: &mut BossArena,
    env: &EncounterEnv<'_>,
    events: &mut Vec<BossEvent>,
) -> Result<T::Output, StageError<CommandError>>
where
    T: CommandTransition,
{
    command
        .pre_validate(arena, env)
        .map_err(|error| StageError::new(PipelineStage::PreValidate, error))?;

    let output = command
        .apply(arena, env, events)
        .map_err(|error| StageError::new(PipelineStage::Apply, error))?;

    command
        .post_validate(arena, env)
        .map_err(|error| StageError::new(PipelineStage::PostValidate, error))?;

    Ok(output)
}

/// Routes each command to its transition and wraps the output in [`CommandResult`].
pub(super) fn execute_command(
    command: &Command,
    arena: &mut BossArena,
    env: &EncounterEnv<'_>,
    events: &mut Vec<BossEvent>,
) -> Result<CommandResult, ExecuteError> {
    let wrap = |source: StageError<CommandError>| ExecuteError::new(command.kind(), source);
    let result = match command {
        Command::DamageBoss(c) => {
            CommandResult::Damage(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::DamageMinion(c) => {
            CommandResult::MinionDamage(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::RegenOnEngagement(c) => {
            CommandResult::Healed(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::RegenRaidBoss(c) => {
            CommandResult::Healed(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::RegenBurst(c) => {
            CommandResult::Healed(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::Activate(c) => {
            CommandResult::Activated(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::TransitionPhase(c) => {
            CommandResult::Phase(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::RecordContribution(c) => {
            CommandResult::Contribution(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::TrySplit(c) => {
            CommandResult::Split(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::SpawnAdd(c) => {
            CommandResult::Spawned(drive_command(c, arena, env, events).map_err(wrap)?)
        }
        Command::Relocate(c) => {
            CommandResult::Relocated(drive_command(c, arena, env, events).map_err(wrap)?)
        }
    };
    Ok(result)
}
