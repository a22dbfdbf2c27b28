use serde::{Deserialize, Serialize};

use boss_core::{BossEvent, BossId, CommandKind, ErrorSeverity, PipelineStage, Timestamp};

/// Narrative event stamped with the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterEvent {
    /// Arena nonce of the command that emitted the event.
    pub nonce: u64,
    pub at: Timestamp,
    pub event: BossEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandEvent {
    Executed {
        nonce: u64,
        kind: CommandKind,
        boss: Option<BossId>,
    },
    Rejected {
        nonce: u64,
        kind: CommandKind,
        stage: PipelineStage,
        severity: ErrorSeverity,
        code: String,
        message: String,
    },
}
