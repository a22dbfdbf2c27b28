//! Topic-based event distribution.
//!
//! Narrative boss events go to [`Topic::Encounter`] for the broadcast
//! subsystem; command bookkeeping goes to [`Topic::Command`] for audit and
//! metrics consumers.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CommandEvent, EncounterEvent};
