//! Shared domain types for the property report tool.
//!
//! Every other crate in the workspace speaks in terms of the records defined
//! here: a `PropertyRecord` describing the building, a `FinancialRecord` with
//! its income and cost figures, and a `Deal` pairing the two so it can be
//! saved by one step and handed to the next.

pub mod error;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use records::{Deal, FinancialRecord, MAX_YEAR_BUILT, MIN_YEAR_BUILT, PropertyRecord};
