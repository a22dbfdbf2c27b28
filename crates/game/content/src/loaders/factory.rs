//! Content factory for loading a whole epoch's encounter data.

use std::path::{Path, PathBuf};

use anyhow::Context;
use boss_core::{BossArena, EngineConfig, RoomTable};

use crate::loaders::{ConfigLoader, LoadResult, RoomTableLoader, RosterLoader};

/// Everything the runtime needs to host an epoch's encounters.
#[derive(Clone, Debug)]
pub struct EncounterContent {
    pub config: EngineConfig,
    pub arena: BossArena,
    pub rooms: RoomTable,
}

/// Content factory that loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional, engine defaults otherwise)
/// ├── roster.ron
/// └── rooms.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine tunables from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the boss roster from `roster.ron` into a fresh arena.
    pub fn load_roster(&self) -> LoadResult<BossArena> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load relocation rooms from `rooms.ron`.
    pub fn load_rooms(&self) -> LoadResult<RoomTable> {
        RoomTableLoader::load(&self.data_dir.join("rooms.ron"))
    }

    pub fn load_all(&self) -> LoadResult<EncounterContent> {
        let config = self.load_config()?;
        let arena = self.load_roster()?;
        RosterLoader::check_final_floor(&arena, config.final_floor)
            .with_context(|| format!("Invalid roster in {}", self.data_dir.display()))?;

        Ok(EncounterContent {
            config,
            arena,
            rooms: self.load_rooms()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), EngineConfig::default());
        assert!(factory.load_roster().is_err());
    }

    #[test]
    fn warden_off_the_final_floor_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "final_floor = 5\n").unwrap();
        std::fs::write(
            dir.path().join("roster.ron"),
            r#"RosterSpec(seed: 1, bosses: [
                BossSpec(id: 4, name: "Warden", room: 44, floor: 4, role: Warden,
                         hp_max: 400, mechanics: ["armored", "retaliator"]),
            ])"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(format!("{err:#}").contains("final floor is 5"));
    }
}
