use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BossId, MinionId, StateError};

/// Errors raised while validating or applying an encounter command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("boss {boss} not found")]
    BossNotFound { boss: BossId },

    #[error("minion {minion} not found")]
    MinionNotFound { minion: MinionId },

    #[error("boss {boss} is not the raid boss")]
    NotRaidBoss { boss: BossId },

    /// Per-engagement regen was requested for the raid boss, which heals on wall-clock intervals.
    #[error("boss {boss} regenerates on a timer, not per engagement")]
    RaidBossNotAllowed { boss: BossId },

    #[error("raid boss {boss} has not been activated")]
    Dormant { boss: BossId },

    #[error("raid boss {boss} is already active")]
    AlreadyActive { boss: BossId },

    #[error("boss {boss} has already been defeated")]
    BossDefeated { boss: BossId },

    #[error("minion {minion} is already dead")]
    MinionDefeated { minion: MinionId },

    #[error("no eligible room to relocate boss {boss} on floor {floor}")]
    NoEligibleRoom { boss: BossId, floor: u32 },

    #[error("boss {boss} has hp {hp} outside 0..={hp_max}")]
    HpOutOfBounds { boss: BossId, hp: u32, hp_max: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            BossNotFound { .. }
            | MinionNotFound { .. }
            | NotRaidBoss { .. }
            | RaidBossNotAllowed { .. }
            | Dormant { .. }
            | AlreadyActive { .. }
            | BossDefeated { .. }
            | MinionDefeated { .. } => ErrorSeverity::Validation,
            NoEligibleRoom { .. } => ErrorSeverity::Recoverable,
            HpOutOfBounds { .. } => ErrorSeverity::Internal,
            Oracle(error) => error.severity(),
            State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            BossNotFound { .. } => "BOSS_NOT_FOUND",
            MinionNotFound { .. } => "MINION_NOT_FOUND",
            NotRaidBoss { .. } => "BOSS_NOT_RAID_BOSS",
            RaidBossNotAllowed { .. } => "BOSS_RAID_REGEN_PATH",
            Dormant { .. } => "BOSS_DORMANT",
            AlreadyActive { .. } => "BOSS_ALREADY_ACTIVE",
            BossDefeated { .. } => "BOSS_DEFEATED",
            MinionDefeated { .. } => "MINION_DEFEATED",
            NoEligibleRoom { .. } => "BOSS_NO_ELIGIBLE_ROOM",
            HpOutOfBounds { .. } => "BOSS_HP_OUT_OF_BOUNDS",
            Oracle(error) => error.error_code(),
            State(error) => error.error_code(),
        }
    }
}
