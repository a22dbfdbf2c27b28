//! Data-driven encounter content and loaders.
//!
//! The world generator writes boss rosters and relocation room tables once per
//! epoch; operators tune the rules in a TOML file. This crate turns those
//! files into core types:
//! - Engine tunables (`config.toml`)
//! - Boss roster with rolled mechanics (`roster.ron`)
//! - Relocation rooms per floor (`rooms.ron`)
//!
//! Content is consumed by the runtime at startup and never read by the core rules.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BossRoleSpec, BossSpec, ConfigLoader, ContentFactory, EncounterContent, RoomTableLoader,
    RoomTableSpec, RosterLoader, RosterSpec,
};
