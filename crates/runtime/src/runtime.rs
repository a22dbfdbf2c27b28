//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up request/event channels, and
//! exposes a builder-based API for hosts to feed it content, a clock and a
//! snapshot store.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use boss_content::EncounterContent;
use boss_core::{BossArena, EngineConfig, RoomTable, Timestamp};

use crate::api::{EncounterHandle, Result, RuntimeError};
use crate::clock::{Clock, EpochCalendar, SystemClock};
use crate::events::EventBus;
use crate::oracle::OracleBundle;
use crate::repository::{ArenaRepository, FileArenaRepository};
use crate::workers::{EncounterWorker, Request};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Directory for arena snapshots. `None` keeps the arena in memory only.
    pub snapshot_dir: Option<PathBuf>,
    /// Start of the current epoch; day 1 begins here.
    pub epoch_start: Timestamp,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            command_buffer_size: 32,
            event_buffer_size: 100,
            snapshot_dir: None,
            epoch_start: Timestamp(0),
        }
    }
}

impl RuntimeConfig {
    pub const COMMAND_BUFFER_VAR: &'static str = "ENCOUNTER_COMMAND_BUFFER";
    pub const EVENT_BUFFER_VAR: &'static str = "ENCOUNTER_EVENT_BUFFER";
    pub const SNAPSHOT_DIR_VAR: &'static str = "ENCOUNTER_SNAPSHOT_DIR";
    /// Unix seconds.
    pub const EPOCH_START_VAR: &'static str = "ENCOUNTER_EPOCH_START";

    /// Defaults overridden by `ENCOUNTER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(capacity) = parse_var::<usize>(&lookup, Self::COMMAND_BUFFER_VAR)? {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, Self::EVENT_BUFFER_VAR)? {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(dir) = lookup(Self::SNAPSHOT_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            config.snapshot_dir = Some(PathBuf::from(dir));
        }
        if let Some(start) = parse_var::<i64>(&lookup, Self::EPOCH_START_VAR)? {
            config.epoch_start = Timestamp(start);
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>>
where
    T: std::str::FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| RuntimeError::InvalidEnv { key, value })
}

/// Main runtime hosting one epoch's boss encounters.
///
/// The runtime owns the worker task; [`EncounterHandle`] is the cloneable
/// façade every client talks through.
pub struct EncounterRuntime {
    handle: EncounterHandle,
    worker: JoinHandle<()>,
}

impl EncounterRuntime {
    /// Create a new runtime builder
    pub fn builder() -> EncounterRuntimeBuilder {
        EncounterRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> EncounterHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker drains queued requests and stops once every handle clone
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`EncounterRuntime`] with flexible configuration.
pub struct EncounterRuntimeBuilder {
    config: RuntimeConfig,
    arena: Option<BossArena>,
    oracles: Option<OracleBundle>,
    clock: Option<Arc<dyn Clock>>,
    repository: Option<Arc<dyn ArenaRepository>>,
    restore_latest: bool,
}

impl EncounterRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            arena: None,
            oracles: None,
            clock: None,
            repository: None,
            restore_latest: false,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the initial arena
    pub fn arena(mut self, arena: BossArena) -> Self {
        self.arena = Some(arena);
        self
    }

    /// Use loaded epoch content: engine tunables, roster arena and room table.
    pub fn content(mut self, content: EncounterContent) -> Self {
        self.config.engine = content.config;
        self.arena = Some(content.arena);
        self.oracles = Some(OracleBundle::from_rooms(content.rooms));
        self
    }

    /// Relocation rooms, with the standard seeded generator.
    pub fn rooms(mut self, rooms: RoomTable) -> Self {
        self.oracles = Some(OracleBundle::from_rooms(rooms));
        self
    }

    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Time source (defaults to [`SystemClock`])
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Snapshot store. Overrides `RuntimeConfig::snapshot_dir`.
    pub fn repository(mut self, repository: Arc<dyn ArenaRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Resume from the newest stored snapshot instead of the provided arena.
    pub fn restore_latest(mut self, restore: bool) -> Self {
        self.restore_latest = restore;
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<EncounterRuntime> {
        let repository = match (self.repository, &self.config.snapshot_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => {
                Some(Arc::new(FileArenaRepository::new(dir)?) as Arc<dyn ArenaRepository>)
            }
            (None, None) => None,
        };

        let restored = match (&repository, self.restore_latest) {
            (Some(repository), true) => {
                let repository = repository.clone();
                tokio::task::spawn_blocking(move || repository.latest())
                    .await
                    .map_err(RuntimeError::SnapshotTask)??
            }
            _ => None,
        };
        let arena = match restored {
            Some(arena) => {
                info!(nonce = arena.nonce, "restored arena from snapshot");
                arena
            }
            None => self.arena.ok_or(RuntimeError::MissingArena)?,
        };

        let (request_tx, request_rx) = mpsc::channel::<Request>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = EncounterHandle::new(request_tx, event_bus.clone());

        let worker = EncounterWorker::new(
            arena,
            self.config.engine,
            self.oracles.unwrap_or_default(),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            EpochCalendar::new(self.config.epoch_start),
            repository,
            request_rx,
            event_bus,
        );

        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(EncounterRuntime { handle, worker })
    }
}
