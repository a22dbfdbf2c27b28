//! Relocation room table loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, ensure};
use boss_core::{RoomId, RoomTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Rooms the generator marked eligible for boss relocation, keyed by floor.
///
/// Hubs, vaults and breach rooms are already filtered out upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTableSpec {
    pub floors: BTreeMap<u32, Vec<u32>>,
}

/// Loader for [`RoomTable`] from RON files.
pub struct RoomTableLoader;

impl RoomTableLoader {
    pub fn load(path: &Path) -> LoadResult<RoomTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid room table {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RoomTable> {
        let spec: RoomTableSpec =
            ron::from_str(content).context("Failed to parse room table RON")?;

        let mut table = RoomTable::new();
        for (floor, rooms) in spec.floors {
            ensure!(!rooms.is_empty(), "floor {floor} lists no eligible rooms");
            table.insert_floor(floor, rooms.into_iter().map(RoomId));
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boss_core::RoomOracle;

    #[test]
    fn parses_floors() {
        let table = RoomTableLoader::parse(
            "RoomTableSpec(floors: { 3: [30, 31], 4: [40, 41, 42, 41] })",
        )
        .unwrap();
        assert_eq!(
            table.eligible_relocation_rooms(4),
            vec![RoomId(40), RoomId(41), RoomId(42)]
        );
        assert!(table.eligible_relocation_rooms(9).is_empty());
    }

    #[test]
    fn empty_floor_is_rejected() {
        let err = RoomTableLoader::parse("RoomTableSpec(floors: { 2: [] })").unwrap_err();
        assert!(format!("{err:#}").contains("floor 2"));
    }
}
