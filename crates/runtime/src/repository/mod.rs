//! Repository layer for arena snapshots.
//!
//! Snapshots are keyed by the arena nonce, so a restored arena replays the
//! same RNG draws. Static content (rosters, rooms, config) is loaded by
//! `boss-content` and never stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileArenaRepository;
pub use memory::InMemoryArenaRepo;
pub use traits::ArenaRepository;
