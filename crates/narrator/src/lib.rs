//! # Narrative Generation
//!
//! Asks an external text-generation service for a prose analysis of a report.
//! The service sits behind the `NarrativeGenerator` trait so the report code
//! never depends on a particular backend. `NarrativeService` adds retries and
//! turns any failure into an advisory, so a report is always shown.

use async_trait::async_trait;

pub mod error;
pub mod ollama;
pub mod prompt;
pub mod service;

pub use error::NarratorError;
pub use ollama::OllamaNarrator;
pub use service::NarrativeService;

/// A backend that turns a plain-text report brief into prose.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, brief: &str) -> Result<String, NarratorError>;
}
