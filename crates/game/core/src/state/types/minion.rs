use super::{BossId, CombatStats, MinionId, RoomId};

/// Add spawned by a `summoner` boss.
///
/// The summoner stays immune while any of its minions has HP above zero. The
/// immunity is read live from this record, so a dead minion needs no cleanup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minion {
    pub id: MinionId,
    pub summoner: BossId,
    pub room: RoomId,
    pub hp: u32,
    pub hp_max: u32,
    pub stats: CombatStats,
}

impl Minion {
    /// Minion scaled to the summoner's floor.
    pub fn for_floor(id: MinionId, summoner: BossId, room: RoomId, floor: u32) -> Self {
        let hp = 10 + floor * 5;
        Self {
            id,
            summoner,
            room,
            hp,
            hp_max: hp,
            stats: CombatStats::new(2 + floor, 1 + floor, 2),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
