//! Runtime orchestration for the boss encounter engine.
//!
//! This crate hosts one epoch's encounters behind an async API. A single
//! worker task owns the [`boss_core::BossArena`] and applies every command in
//! order, so concurrent players never interleave inside one boss update.
//! Consumers build an [`EncounterRuntime`], hand out [`EncounterHandle`]
//! clones, and subscribe to narrative events on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and [`RuntimeConfig`]
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`clock`] injects wall-clock time and the epoch calendar
//! - [`oracle`] and [`repository`] provide room/RNG adapters and arena snapshots
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{EncounterHandle, Result, RuntimeError, StrikeOutcome};
pub use clock::{Clock, EpochCalendar, ManualClock, SystemClock};
pub use events::{CommandEvent, EncounterEvent, Event, EventBus, Topic};
pub use oracle::OracleBundle;
pub use repository::{
    ArenaRepository, FileArenaRepository, InMemoryArenaRepo, RepositoryError,
};
pub use runtime::{EncounterRuntime, EncounterRuntimeBuilder, RuntimeConfig};
