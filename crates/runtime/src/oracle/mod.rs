//! Adapters that hand world-generator capabilities to the core rules.

use std::sync::Arc;

use boss_core::{EncounterEnv, EngineConfig, EpochContext, PcgRng, RngOracle, RoomOracle, RoomTable};

/// Shared collaborators the worker lends to every command.
#[derive(Clone)]
pub struct OracleBundle {
    rooms: Arc<dyn RoomOracle>,
    rng: Arc<dyn RngOracle>,
}

impl OracleBundle {
    pub fn new(rooms: Arc<dyn RoomOracle>, rng: Arc<dyn RngOracle>) -> Self {
        Self { rooms, rng }
    }

    /// Static room table with the seeded PCG generator.
    pub fn from_rooms(rooms: RoomTable) -> Self {
        Self::new(Arc::new(rooms), Arc::new(PcgRng))
    }

    /// Builds the per-command environment.
    pub fn env<'a>(&'a self, config: &'a EngineConfig, epoch: EpochContext) -> EncounterEnv<'a> {
        EncounterEnv::new(config, epoch)
            .with_rooms(self.rooms.as_ref())
            .with_rng(self.rng.as_ref())
    }
}

impl Default for OracleBundle {
    fn default() -> Self {
        Self::from_rooms(RoomTable::new())
    }
}

impl std::fmt::Debug for OracleBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleBundle").finish_non_exhaustive()
    }
}
