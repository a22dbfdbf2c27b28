use std::fmt;

/// Stable identifier of a boss record in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossId(pub u32);

impl fmt::Display for BossId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boss#{}", self.0)
    }
}

/// Identifier of a summoned minion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionId(pub u32);

impl fmt::Display for MinionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minion#{}", self.0)
    }
}

/// Identifier of a player, owned by the session subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Weak reference to a room produced by the world generator.
///
/// The engine never creates or destroys rooms; it only stores and compares ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Wall-clock instant in whole seconds since the Unix epoch.
///
/// The engine never reads a clock itself; callers inject `now` with every
/// time-dependent command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, saturating at zero when the clock went backwards.
    pub const fn secs_since(self, earlier: Timestamp) -> u64 {
        if self.0 <= earlier.0 {
            0
        } else {
            self.0.abs_diff(earlier.0)
        }
    }
}

/// Saturates at `i64::MAX` instead of wrapping into the past.
impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        let sum = i128::from(self.0) + i128::from(rhs);
        Timestamp(i64::try_from(sum).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Formats a remaining duration the way players read it: `"5h 12m"`, `"42m"`.
pub fn format_remaining(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600).div_ceil(60);
    let (hours, minutes) = if minutes == 60 {
        (hours + 1, 0)
    } else {
        (hours, minutes)
    };
    if hours == 0 {
        format!("{}m", minutes.max(1))
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secs_since_saturates() {
        assert_eq!(Timestamp(100).secs_since(Timestamp(40)), 60);
        assert_eq!(Timestamp(40).secs_since(Timestamp(100)), 0);
        assert_eq!(Timestamp(i64::MAX).secs_since(Timestamp(-1)), i64::MAX as u64 + 1);
    }

    #[test]
    fn adding_huge_durations_saturates_forward() {
        assert_eq!(Timestamp(10) + 86_400, Timestamp(86_410));
        assert_eq!(Timestamp(10) + u64::MAX, Timestamp(i64::MAX));
        assert_eq!(Timestamp(-5) + (i64::MAX as u64 + 7), Timestamp(i64::MAX));
    }

    #[test]
    fn remaining_time_rounds_up_to_minutes() {
        assert_eq!(format_remaining(24 * 3600), "24h 0m");
        assert_eq!(format_remaining(3599), "1h 0m");
        assert_eq!(format_remaining(61), "2m");
        assert_eq!(format_remaining(1), "1m");
        assert_eq!(format_remaining(3600 + 30 * 60), "1h 30m");
    }
}
