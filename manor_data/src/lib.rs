//! Shared data model for manor scenarios.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_scenario};
