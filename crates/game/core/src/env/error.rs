//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// A collaborator the command needs was not wired into the environment.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("RoomOracle not available")]
    RoomsNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoomsNotAvailable => "ORACLE_ROOMS_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
