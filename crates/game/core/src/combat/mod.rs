//! Per-round combat evaluation.
//!
//! The external combat resolver calls [`MechanicDispatcher`] once per round and
//! applies the returned [`CombatModifiers`]. Everything here is pure.
mod dispatcher;
mod exchange;
mod modifiers;

pub use dispatcher::MechanicDispatcher;
pub use exchange::{EncounterContext, Exchange};
pub use modifiers::CombatModifiers;
