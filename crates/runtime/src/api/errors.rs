//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, worker coordination and repositories so
//! clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use boss_core::{BossId, CommandError, ErrorSeverity, ExecuteError, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    /// Rejected read-only query (dispatch, engagement gate).
    #[error(transparent)]
    Query(#[from] CommandError),

    #[error("boss {boss} not found")]
    BossNotFound { boss: BossId },

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("arena snapshot task failed")]
    SnapshotTask(#[source] tokio::task::JoinError),

    #[error("runtime requires a boss arena (or a stored snapshot) before building")]
    MissingArena,

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("expected a {expected} result, got {found}")]
    UnexpectedResult {
        expected: &'static str,
        found: String,
    },
}

/// Extracts the expected [`boss_core::CommandResult`] variant from an outcome,
/// mapping any other variant to [`RuntimeError::UnexpectedResult`].
macro_rules! expect_result {
    ($outcome:expr, $variant:ident) => {
        match $outcome.result {
            ::boss_core::CommandResult::$variant(value) => Ok(value),
            other => Err($crate::api::RuntimeError::UnexpectedResult {
                expected: stringify!($variant),
                found: format!("{:?}", other),
            }),
        }
    };
}

pub(crate) use expect_result;

impl RuntimeError {
    /// Engine-side severity; infrastructure failures count as fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Execute(err) => err.severity(),
            Self::Query(err) => err.severity(),
            Self::BossNotFound { .. } | Self::InvalidEnv { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    /// The rule violation behind this error, when it came from the engine.
    pub fn command_error(&self) -> Option<&CommandError> {
        match self {
            Self::Execute(err) => Some(err.error()),
            Self::Query(err) => Some(err),
            _ => None,
        }
    }
}
