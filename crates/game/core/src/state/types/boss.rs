use bitflags::bitflags;

use super::{BossId, RoomId, Timestamp};
use crate::mechanic::{MechanicKind, MechanicSet};

bitflags! {
    /// Role flags assigned by the generation subsystem.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BossRole: u8 {
        const FLOOR_BOSS = 1 << 0;
        const RAID_BOSS  = 1 << 1;
        /// Final-floor boss rolling two mechanics.
        const WARDEN     = 1 << 2;
    }
}

/// Offensive and defensive stats. Mechanics never change these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub pow: u32,
    pub def: u32,
    pub spd: u32,
}

impl CombatStats {
    pub const fn new(pow: u32, def: u32, spd: u32) -> Self {
        Self { pow, def, spd }
    }
}

/// Wall-clock bookkeeping for time-driven healing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenClock {
    /// Start of the current unfinished regen interval (Raid Boss only).
    pub last_regen_at: Option<Timestamp>,
    /// Last `regen_burst` heal.
    pub last_burst_at: Option<Timestamp>,
}

/// Boss record: a monster specialization mutated exclusively through the engine.
///
/// # Invariants
///
/// - `hp <= hp_max`
/// - `hp == 0` on an activated boss is terminal; nothing in the engine raises it again
/// - `phase` starts at 1 and never decreases
/// - `split_child` is written at most once
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boss {
    pub id: BossId,
    pub name: String,
    pub room: RoomId,
    pub floor: u32,
    pub tier: u32,

    pub hp: u32,
    pub hp_max: u32,
    pub stats: CombatStats,

    pub mechanics: MechanicSet,
    pub role: BossRole,
    pub phase: u32,
    pub regen: RegenClock,

    /// Set on a parent once it has split.
    pub split_child: Option<BossId>,
    /// Set on a clone produced by splitting.
    pub split_parent: Option<BossId>,
}

impl Boss {
    /// Creates a boss at full health. Raid bosses should use [`Boss::dormant_raid`].
    pub fn new(
        id: BossId,
        name: impl Into<String>,
        room: RoomId,
        floor: u32,
        hp_max: u32,
        mechanics: MechanicSet,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            room,
            floor,
            tier: floor.min(5),
            hp: hp_max,
            hp_max,
            stats: CombatStats::default(),
            mechanics,
            role: BossRole::FLOOR_BOSS,
            phase: 1,
            regen: RegenClock::default(),
            split_child: None,
            split_parent: None,
        }
    }

    /// Creates the pre-rolled Raid Boss with zero HP, waiting for activation.
    pub fn dormant_raid(
        id: BossId,
        name: impl Into<String>,
        room: RoomId,
        floor: u32,
        mechanics: MechanicSet,
    ) -> Self {
        let mut boss = Self::new(id, name, room, floor, 0, mechanics);
        boss.role = BossRole::RAID_BOSS;
        boss
    }

    pub fn with_role(mut self, role: BossRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.hp_max);
        self
    }

    #[inline]
    pub fn is_raid_boss(&self) -> bool {
        self.role.contains(BossRole::RAID_BOSS)
    }

    #[inline]
    pub fn is_warden(&self) -> bool {
        self.role.contains(BossRole::WARDEN)
    }

    #[inline]
    pub fn is_floor_boss(&self) -> bool {
        self.role.contains(BossRole::FLOOR_BOSS)
    }

    /// Raid Boss that has not been activated yet.
    #[inline]
    pub fn is_dormant(&self) -> bool {
        self.is_raid_boss() && self.hp_max == 0
    }

    /// Activated boss with no HP left.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0 && self.hp_max > 0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.hp >= self.hp_max
    }

    pub fn has(&self, kind: &MechanicKind) -> bool {
        self.mechanics.contains(kind)
    }

    /// `hp > hp_max / 2`, computed without rounding.
    #[inline]
    pub fn above_half(&self) -> bool {
        u64::from(self.hp) * 2 > u64::from(self.hp_max)
    }

    /// `hp <= hp_max * pct / 100`, computed without rounding.
    #[inline]
    pub fn at_or_below_pct(&self, pct: u32) -> bool {
        u64::from(self.hp) * 100 <= u64::from(self.hp_max) * u64::from(pct)
    }

    /// Current HP as a whole percentage of max (0 when `hp_max == 0`).
    pub fn hp_pct(&self) -> u32 {
        if self.hp_max == 0 {
            return 0;
        }
        ((u64::from(self.hp) * 100 + u64::from(self.hp_max) / 2) / u64::from(self.hp_max)) as u32
    }
}
