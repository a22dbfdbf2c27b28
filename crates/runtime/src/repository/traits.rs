//! Repository contract for saving and loading arena snapshots.

use boss_core::BossArena;

use super::Result;

/// Persistence for [`BossArena`] snapshots indexed by nonce.
pub trait ArenaRepository: Send + Sync {
    fn save(&self, nonce: u64, arena: &BossArena) -> Result<()>;

    fn load(&self, nonce: u64) -> Result<Option<BossArena>>;

    fn exists(&self, nonce: u64) -> bool;

    fn delete(&self, nonce: u64) -> Result<()>;

    /// All stored nonces, ascending.
    fn list_nonces(&self) -> Result<Vec<u64>>;

    /// Most recent snapshot, if any.
    fn latest(&self) -> Result<Option<BossArena>> {
        match self.list_nonces()?.last() {
            Some(&nonce) => self.load(nonce),
            None => Ok(None),
        }
    }

    /// Deletes every snapshot older than the newest `keep`. Returns how many were removed.
    fn prune(&self, keep: usize) -> Result<usize> {
        let nonces = self.list_nonces()?;
        let stale = nonces.len().saturating_sub(keep);
        for &nonce in &nonces[..stale] {
            self.delete(nonce)?;
        }
        Ok(stale)
    }
}
