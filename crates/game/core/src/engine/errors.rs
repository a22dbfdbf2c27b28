//! Error types for the command pipeline.

use crate::command::{CommandError, CommandKind};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the command pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PipelineStage {
    PreValidate,
    Apply,
    PostValidate,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::PreValidate => "pre_validate",
            PipelineStage::Apply => "apply",
            PipelineStage::PostValidate => "post_validate",
        }
    }
}

/// Associates a pipeline stage with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageError<E> {
    pub stage: PipelineStage,
    pub error: E,
}

impl<E> StageError<E> {
    pub fn new(stage: PipelineStage, error: E) -> Self {
        Self { stage, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for StageError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.stage.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for StageError<E> {}

/// A command rejected by [`super::BossEngine::execute`]. The arena is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{command} command failed: {source}")]
pub struct ExecuteError {
    pub command: CommandKind,
    pub source: StageError<CommandError>,
}

impl ExecuteError {
    pub fn new(command: CommandKind, source: StageError<CommandError>) -> Self {
        Self { command, source }
    }

    pub fn error(&self) -> &CommandError {
        &self.source.error
    }

    pub fn stage(&self) -> PipelineStage {
        self.source.stage
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.source.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.source.error.error_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BossId;

    #[test]
    fn display_names_command_and_stage() {
        let err = ExecuteError::new(
            CommandKind::DamageBoss,
            StageError::new(
                PipelineStage::PreValidate,
                CommandError::Dormant { boss: BossId(9) },
            ),
        );
        let text = err.to_string();
        assert!(text.starts_with("damage_boss command failed: pre_validate failed"));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.stage(), PipelineStage::PreValidate);
    }
}
