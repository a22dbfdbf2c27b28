use std::collections::BTreeMap;

/// Boss engine tunables.
///
/// Percentages are whole numbers (`3` means 3%). Durations are in seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EngineConfig {
    /// Raid Boss HP granted per active player at activation.
    pub raid_hp_per_player: u32,
    /// Upper bound on Raid Boss HP regardless of player count.
    pub raid_hp_cap: u32,
    pub raid_regen_rate_pct: u32,
    /// Raid regen rate when `extra_regen` is rolled.
    pub extra_regen_rate_pct: u32,
    /// Length of one wall-clock regen unit for the Raid Boss.
    pub regen_interval_secs: u64,
    pub warden_regen_rate_pct: u32,
    pub regenerator_rate_pct: u32,
    /// Per-engagement regen rate keyed by floor number.
    pub floor_regen_rate_pct: BTreeMap<u32, u32>,
    /// Fallback for floors missing from `floor_regen_rate_pct`.
    pub default_floor_regen_rate_pct: u32,
    /// HP percentages at which the Raid Boss enters phase 2, 3, ...
    pub phase_thresholds_pct: Vec<u32>,
    pub lockout_secs: u64,
    /// Hard cap on every narrative string, in characters.
    pub message_char_limit: usize,
    pub regen_burst_rate_pct: u32,
    pub regen_burst_cooldown_secs: u64,
    /// `K` in the `rotating_resistance` curve `s / (s + K)`.
    pub rotating_resistance_softness: u32,
    /// Contributors needed before `armor_phase` stops halving damage.
    pub armor_phase_fighters: usize,
    /// Floor that hosts the Warden.
    pub final_floor: u32,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RAID_HP_PER_PLAYER: u32 = 300;
    pub const DEFAULT_RAID_HP_CAP: u32 = 6000;
    pub const DEFAULT_RAID_REGEN_RATE_PCT: u32 = 3;
    pub const DEFAULT_EXTRA_REGEN_RATE_PCT: u32 = 5;
    pub const DEFAULT_REGEN_INTERVAL_SECS: u64 = 8 * 3600;
    pub const DEFAULT_WARDEN_REGEN_RATE_PCT: u32 = 3;
    pub const DEFAULT_REGENERATOR_RATE_PCT: u32 = 10;
    pub const DEFAULT_FLOOR_REGEN_RATE_PCT: u32 = 3;
    pub const DEFAULT_PHASE_THRESHOLDS_PCT: [u32; 2] = [66, 33];
    pub const DEFAULT_LOCKOUT_SECS: u64 = 24 * 3600;
    pub const DEFAULT_MESSAGE_CHAR_LIMIT: usize = 150;
    pub const DEFAULT_REGEN_BURST_RATE_PCT: u32 = 15;
    pub const DEFAULT_REGEN_BURST_COOLDOWN_SECS: u64 = 24 * 3600;
    pub const DEFAULT_ROTATING_RESISTANCE_SOFTNESS: u32 = 10;
    pub const DEFAULT_ARMOR_PHASE_FIGHTERS: usize = 5;
    pub const DEFAULT_FINAL_FLOOR: u32 = 4;

    pub fn new() -> Self {
        Self {
            raid_hp_per_player: Self::DEFAULT_RAID_HP_PER_PLAYER,
            raid_hp_cap: Self::DEFAULT_RAID_HP_CAP,
            raid_regen_rate_pct: Self::DEFAULT_RAID_REGEN_RATE_PCT,
            extra_regen_rate_pct: Self::DEFAULT_EXTRA_REGEN_RATE_PCT,
            regen_interval_secs: Self::DEFAULT_REGEN_INTERVAL_SECS,
            warden_regen_rate_pct: Self::DEFAULT_WARDEN_REGEN_RATE_PCT,
            regenerator_rate_pct: Self::DEFAULT_REGENERATOR_RATE_PCT,
            floor_regen_rate_pct: BTreeMap::new(),
            default_floor_regen_rate_pct: Self::DEFAULT_FLOOR_REGEN_RATE_PCT,
            phase_thresholds_pct: Self::DEFAULT_PHASE_THRESHOLDS_PCT.to_vec(),
            lockout_secs: Self::DEFAULT_LOCKOUT_SECS,
            message_char_limit: Self::DEFAULT_MESSAGE_CHAR_LIMIT,
            regen_burst_rate_pct: Self::DEFAULT_REGEN_BURST_RATE_PCT,
            regen_burst_cooldown_secs: Self::DEFAULT_REGEN_BURST_COOLDOWN_SECS,
            rotating_resistance_softness: Self::DEFAULT_ROTATING_RESISTANCE_SOFTNESS,
            armor_phase_fighters: Self::DEFAULT_ARMOR_PHASE_FIGHTERS,
            final_floor: Self::DEFAULT_FINAL_FLOOR,
        }
    }

    /// Per-engagement regen rate for an ordinary floor boss on `floor`.
    pub fn floor_regen_rate(&self, floor: u32) -> u32 {
        self.floor_regen_rate_pct
            .get(&floor)
            .copied()
            .unwrap_or(self.default_floor_regen_rate_pct)
    }

    pub fn with_raid_scaling(mut self, hp_per_player: u32, hp_cap: u32) -> Self {
        self.raid_hp_per_player = hp_per_player;
        self.raid_hp_cap = hp_cap;
        self
    }

    pub fn with_floor_regen_rate(mut self, floor: u32, rate_pct: u32) -> Self {
        self.floor_regen_rate_pct.insert(floor, rate_pct);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
