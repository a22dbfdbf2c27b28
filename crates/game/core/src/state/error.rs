//! Arena bookkeeping errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::BossId;

/// Errors raised while registering entities or allocating ids.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A boss with this id is already registered.
    #[error("boss {id} is already registered")]
    DuplicateBoss { id: BossId },

    /// Generation handed over a record violating `hp <= hp_max`.
    #[error("boss {id} has hp {hp} above hp_max {hp_max}")]
    HpAboveMax { id: BossId, hp: u32, hp_max: u32 },

    /// Id allocation overflow (all ids exhausted).
    #[error("entity id overflow (current: {current})")]
    IdOverflow { current: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            DuplicateBoss { .. } | HpAboveMax { .. } => ErrorSeverity::Validation,
            IdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DuplicateBoss { .. } => "STATE_DUPLICATE_BOSS",
            HpAboveMax { .. } => "STATE_HP_ABOVE_MAX",
            IdOverflow { .. } => "STATE_ID_OVERFLOW",
        }
    }
}
