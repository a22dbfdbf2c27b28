//! Public runtime API surface.
//!
//! Gathers the types consumers of the runtime interact with so the worker and
//! repository layers can stay internal.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub(crate) use errors::expect_result;
pub use handle::{EncounterHandle, StrikeOutcome};
