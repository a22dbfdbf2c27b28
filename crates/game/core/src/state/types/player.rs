use super::PlayerId;

/// Base stat that dominates a player's build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BaseStat {
    Pow,
    Def,
    Spd,
}

/// Read-only view of the attacking player, owned by the session subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub hp: u32,
    pub hp_max: u32,
    pub pow: u32,
    pub def: u32,
    pub spd: u32,
    /// Whether a secret on the boss's floor has been discovered.
    pub floor_secret_found: bool,
}

impl PlayerSnapshot {
    pub fn new(id: PlayerId, hp_max: u32, pow: u32, def: u32, spd: u32) -> Self {
        Self {
            id,
            hp: hp_max,
            hp_max,
            pow,
            def,
            spd,
            floor_secret_found: false,
        }
    }

    pub fn with_floor_secret(mut self, found: bool) -> Self {
        self.floor_secret_found = found;
        self
    }

    /// Highest base stat and its value. Ties resolve in `pow`, `def`, `spd` order.
    pub fn dominant_stat(&self) -> (BaseStat, u32) {
        let mut best = (BaseStat::Pow, self.pow);
        for candidate in [(BaseStat::Def, self.def), (BaseStat::Spd, self.spd)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best
    }
}
