//! File-based ArenaRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use boss_core::BossArena;

use super::{ArenaRepository, RepositoryError, Result};

/// Stores arenas as individual bincode files indexed by nonce.
///
/// # File Format
///
/// Snapshots are stored as `arena_{nonce}.bin`. Writes go to a temp file that
/// is renamed into place, so a crash never leaves a half-written snapshot
/// under the final name.
pub struct FileArenaRepository {
    base_dir: PathBuf,
}

impl FileArenaRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn arena_path(&self, nonce: u64) -> PathBuf {
        self.base_dir.join(format!("arena_{nonce}.bin"))
    }

    fn parse_nonce(path: &Path) -> Option<u64> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix("arena_"))
            .and_then(|rest| rest.strip_suffix(".bin"))
            .and_then(|digits| digits.parse().ok())
    }
}

impl ArenaRepository for FileArenaRepository {
    fn save(&self, nonce: u64, arena: &BossArena) -> Result<()> {
        let path = self.arena_path(nonce);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(arena).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(nonce, path = %path.display(), "saved arena snapshot");
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<BossArena>> {
        let path = self.arena_path(nonce);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let arena: BossArena =
            bincode::deserialize(&bytes).map_err(|e| RepositoryError::CorruptedData {
                nonce,
                reason: e.to_string(),
            })?;

        tracing::debug!(nonce, path = %path.display(), "loaded arena snapshot");
        Ok(Some(arena))
    }

    fn exists(&self, nonce: u64) -> bool {
        self.arena_path(nonce).exists()
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let path = self.arena_path(nonce);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(nonce, "deleted arena snapshot");
        }
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let mut nonces = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            if let Some(nonce) = Self::parse_nonce(&entry?.path()) {
                nonces.push(nonce);
            }
        }
        nonces.sort_unstable();
        Ok(nonces)
    }
}
