//! In-memory ArenaRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use boss_core::BossArena;

use super::{ArenaRepository, RepositoryError, Result};

#[derive(Default)]
pub struct InMemoryArenaRepo {
    arenas: RwLock<BTreeMap<u64, BossArena>>,
}

impl InMemoryArenaRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArenaRepository for InMemoryArenaRepo {
    fn save(&self, nonce: u64, arena: &BossArena) -> Result<()> {
        let mut arenas = self
            .arenas
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        arenas.insert(nonce, arena.clone());
        Ok(())
    }

    fn load(&self, nonce: u64) -> Result<Option<BossArena>> {
        let arenas = self
            .arenas
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(arenas.get(&nonce).cloned())
    }

    fn exists(&self, nonce: u64) -> bool {
        self.arenas
            .read()
            .map(|arenas| arenas.contains_key(&nonce))
            .unwrap_or(false)
    }

    fn delete(&self, nonce: u64) -> Result<()> {
        let mut arenas = self
            .arenas
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        arenas.remove(&nonce);
        Ok(())
    }

    fn list_nonces(&self) -> Result<Vec<u64>> {
        let arenas = self
            .arenas
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(arenas.keys().copied().collect())
    }
}
