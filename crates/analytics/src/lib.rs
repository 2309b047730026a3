//! # Property Analytics Engine
//!
//! This crate turns a property and its financials into the standard set of
//! investment ratios used by the report.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of input surfaces, files or
//!   remote services. It depends only on `core-types`.
//! - **Stateless Calculation:** The `MetricsEngine` takes the two input records
//!   and produces a `MetricsResult`. It never fails: a ratio whose denominator
//!   is zero or negative is reported as zero.
//!
//! ## Public API
//!
//! - `MetricsEngine`: The struct that contains the calculation logic.
//! - `compute_metrics`: Convenience wrapper around a default engine.
//! - `MetricsResult`: The nine derived metrics.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod metrics;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{MetricsEngine, compute_metrics};
pub use metrics::MetricsResult;
