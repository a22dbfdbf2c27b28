pub mod boss;
pub mod common;
pub mod contribution;
pub mod minion;
pub mod player;

pub use boss::{Boss, BossRole, CombatStats, RegenClock};
pub use common::{BossId, MinionId, PlayerId, RoomId, Timestamp, format_remaining};
pub use contribution::ContributionRecord;
pub use minion::Minion;
pub use player::{BaseStat, PlayerSnapshot};
