//! Read-only facts and collaborators a command may consult.
//!
//! The engine never reads a clock, never walks the room graph and never owns a
//! random source. [`EncounterEnv`] bundles what the caller injects: the epoch
//! context (day number and `now`), the tunables, and optional room and RNG
//! oracles.
mod error;
mod rng;
mod rooms;

pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use rooms::{RoomOracle, RoomTable};

use crate::config::EngineConfig;
use crate::state::Timestamp;

/// Epoch-level context supplied by the day-tick scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpochContext {
    /// Current day number of the epoch (consumed by `phasing`).
    pub day: u32,
    /// Wall-clock instant of the command being executed.
    pub now: Timestamp,
}

impl EpochContext {
    pub const fn new(day: u32, now: Timestamp) -> Self {
        Self { day, now }
    }
}

/// Aggregates the injected collaborators for one command.
#[derive(Clone, Copy)]
pub struct EncounterEnv<'a> {
    epoch: EpochContext,
    config: &'a EngineConfig,
    rooms: Option<&'a dyn RoomOracle>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> EncounterEnv<'a> {
    pub fn new(config: &'a EngineConfig, epoch: EpochContext) -> Self {
        Self {
            epoch,
            config,
            rooms: None,
            rng: None,
        }
    }

    pub fn with_rooms(mut self, rooms: &'a dyn RoomOracle) -> Self {
        self.rooms = Some(rooms);
        self
    }

    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    pub fn epoch(&self) -> EpochContext {
        self.epoch
    }

    pub fn now(&self) -> Timestamp {
        self.epoch.now
    }

    pub fn day(&self) -> u32 {
        self.epoch.day
    }

    /// # Errors
    ///
    /// Returns `OracleError::RoomsNotAvailable` if no room oracle was provided.
    pub fn rooms(&self) -> Result<&'a dyn RoomOracle, OracleError> {
        self.rooms.ok_or(OracleError::RoomsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl std::fmt::Debug for EncounterEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterEnv")
            .field("epoch", &self.epoch)
            .field("rooms", &self.rooms.is_some())
            .field("rng", &self.rng.is_some())
            .finish_non_exhaustive()
    }
}
