//! Mechanic identifiers and the rule catalog.
//!
//! A mechanic is a named combat rule baked into a boss by the generator. The
//! [`MechanicCatalog`] maps each identifier to a pure transform; the
//! [`crate::combat::MechanicDispatcher`] folds those transforms over one combat
//! round in list order.
mod catalog;
pub mod floor;
mod kind;
pub mod raid;
mod set;

pub use catalog::{MechanicCatalog, MechanicRule};
pub use kind::MechanicKind;
pub use set::MechanicSet;
