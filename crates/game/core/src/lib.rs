//! Deterministic boss encounter rules for the MMUD endgame.
//!
//! `boss-core` owns the boss arena (floor bosses, the Warden, the Raid Boss,
//! minions and per-player contribution records) and the rules that change it.
//! Combat mechanics are evaluated read-only by [`combat::MechanicDispatcher`];
//! every mutation flows through [`engine::BossEngine`] as a [`Command`].
//! Time, day number, rooms and randomness are injected through
//! [`env::EncounterEnv`], so the same inputs always replay to the same arena.
pub mod combat;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod mechanic;
pub mod state;
pub mod status;

#[cfg(test)]
mod test_support;

pub use combat::{CombatModifiers, EncounterContext, Exchange, MechanicDispatcher};
pub use command::{
    Activate, ActivationOutcome, Command, CommandError, CommandKind, CommandResult,
    CommandTransition, ContributionOutcome, DamageBoss, DamageMinion, DamageOutcome, Engagement,
    MinionDamageOutcome, PhaseOutcome, RecordContribution, Relocate, Relocation, RegenBurst,
    RegenOnEngagement, RegenRaidBoss, SpawnAdd, TransitionPhase, TrySplit, can_engage,
};
pub use config::EngineConfig;
pub use engine::{BossEngine, ExecuteError, ExecutionOutcome, PipelineStage, StageError};
pub use env::{
    EncounterEnv, EpochContext, OracleError, PcgRng, RngOracle, RoomOracle, RoomTable,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{BossEvent, BossEventKind};
pub use mechanic::{MechanicCatalog, MechanicKind, MechanicRule, MechanicSet};
pub use state::{
    BaseStat, Boss, BossArena, BossId, BossRole, CombatStats, ContributionRecord, Minion,
    MinionId, PlayerId, PlayerSnapshot, RegenClock, RoomId, StateError, Timestamp,
};
pub use status::RaidStatus;
