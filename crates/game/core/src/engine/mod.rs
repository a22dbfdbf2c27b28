//! Command execution pipeline.
//!
//! The [`BossEngine`] is the authoritative reducer for [`BossArena`]. Every
//! mutation goes through `pre_validate -> apply -> post_validate`; a failure
//! in any stage rolls the arena back to where it was before the command.

mod errors;
mod transition;

pub use errors::{ExecuteError, PipelineStage, StageError};

use crate::command::{Command, CommandResult};
use crate::env::EncounterEnv;
use crate::events::BossEvent;
use crate::state::BossArena;

/// Complete outcome of one command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    pub result: CommandResult,
    /// Narrative events in emission order.
    pub events: Vec<BossEvent>,
}

/// Applies commands to a borrowed arena.
pub struct BossEngine<'a> {
    arena: &'a mut BossArena,
}

impl<'a> BossEngine<'a> {
    pub fn new(arena: &'a mut BossArena) -> Self {
        Self { arena }
    }

    /// Executes `command`, bumping the arena nonce on success.
    ///
    /// Errors leave the arena exactly as it was, including the nonce.
    pub fn execute(
        &mut self,
        env: &EncounterEnv<'_>,
        command: &Command,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.arena.clone();
        let mut events = Vec::new();

        match transition::execute_command(command, self.arena, env, &mut events) {
            Ok(result) => {
                self.arena.nonce = self.arena.nonce.wrapping_add(1);
                Ok(ExecutionOutcome { result, events })
            }
            Err(err) => {
                *self.arena = before;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandError, DamageBoss, TrySplit};
    use crate::config::EngineConfig;
    use crate::env::EpochContext;
    use crate::state::BossId;
    use crate::test_support::*;

    #[test]
    fn success_bumps_nonce() {
        let config = EngineConfig::default();
        let env = EncounterEnv::new(&config, EpochContext::new(1, now()));
        let mut arena = arena_with(floor_boss(1, &["armored"], 100));

        let outcome = BossEngine::new(&mut arena)
            .execute(&env, &DamageBoss::new(BossId(1), 10).into())
            .unwrap();
        assert!(matches!(outcome.result, CommandResult::Damage(_)));
        assert_eq!(arena.nonce, 1);
    }

    #[test]
    fn failure_rolls_back_everything() {
        let config = EngineConfig::default();
        let env = EncounterEnv::new(&config, EpochContext::new(1, now()));
        let mut arena = arena_with(floor_boss(1, &["armored"], 100).with_hp(0));
        let before = arena.clone();

        let err = BossEngine::new(&mut arena)
            .execute(&env, &DamageBoss::new(BossId(1), 10).into())
            .unwrap_err();
        assert_eq!(err.stage(), PipelineStage::PreValidate);
        assert_eq!(err.error(), &CommandError::BossDefeated { boss: BossId(1) });
        assert_eq!(arena, before);
    }

    #[test]
    fn unknown_boss_is_rejected_before_apply() {
        let config = EngineConfig::default();
        let env = EncounterEnv::new(&config, EpochContext::new(1, now()));
        let mut arena = BossArena::new(7);

        let err = BossEngine::new(&mut arena)
            .execute(&env, &TrySplit::new(BossId(3)).into())
            .unwrap_err();
        assert_eq!(err.command, crate::command::CommandKind::TrySplit);
        assert_eq!(arena.nonce, 0);
    }
}
