use super::Timestamp;

/// Cumulative damage one player has dealt to one boss, plus any lockout window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContributionRecord {
    pub total_damage: u64,
    pub last_engaged_at: Option<Timestamp>,
    pub lockout_until: Option<Timestamp>,
}

impl ContributionRecord {
    /// Remaining lockout in seconds at `now`, or `None` when the player may engage.
    pub fn lockout_remaining(&self, now: Timestamp) -> Option<u64> {
        match self.lockout_until {
            Some(until) if now < until => Some(until.secs_since(now)),
            _ => None,
        }
    }
}
