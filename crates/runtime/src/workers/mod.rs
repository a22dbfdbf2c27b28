//! Worker tasks that back the runtime orchestration.
//!
//! A single encounter worker owns the arena, so every mutation is serialized
//! without locks.

mod encounter;

pub use encounter::{EncounterWorker, Request, StrikeRequest};
