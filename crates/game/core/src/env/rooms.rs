use std::collections::BTreeMap;

use crate::state::RoomId;

/// Room-graph capability owned by the world generator.
///
/// Eligibility (not a hub, vault or breach room) is decided by the generator;
/// the engine only asks for the resulting list.
pub trait RoomOracle: Send + Sync {
    /// Rooms on `floor` a boss may relocate to, in a stable order.
    fn eligible_relocation_rooms(&self, floor: u32) -> Vec<RoomId>;
}

/// Precomputed eligible rooms per floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomTable {
    floors: BTreeMap<u32, Vec<RoomId>>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor(mut self, floor: u32, rooms: impl IntoIterator<Item = RoomId>) -> Self {
        self.insert_floor(floor, rooms);
        self
    }

    /// Replaces the eligible rooms of `floor`. Duplicates are dropped, order is kept.
    pub fn insert_floor(&mut self, floor: u32, rooms: impl IntoIterator<Item = RoomId>) {
        let mut list: Vec<RoomId> = Vec::new();
        for room in rooms {
            if !list.contains(&room) {
                list.push(room);
            }
        }
        self.floors.insert(floor, list);
    }

    pub fn floors(&self) -> impl Iterator<Item = u32> + '_ {
        self.floors.keys().copied()
    }
}

impl RoomOracle for RoomTable {
    fn eligible_relocation_rooms(&self, floor: u32) -> Vec<RoomId> {
        self.floors.get(&floor).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_floor_has_no_rooms() {
        let table = RoomTable::new().with_floor(3, [RoomId(30), RoomId(31), RoomId(30)]);
        assert_eq!(
            table.eligible_relocation_rooms(3),
            vec![RoomId(30), RoomId(31)]
        );
        assert!(table.eligible_relocation_rooms(4).is_empty());
    }
}
