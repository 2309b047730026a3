//! Thin renderers over an assembled `Report`.
//!
//! None of these recompute anything: they only lay out the `(label, value)`
//! lines the assembler already produced.

pub mod html;
pub mod markdown;
pub mod plain;
pub mod tabular;
pub mod text;

pub use html::render_html;
pub use markdown::render_markdown;
pub use plain::render_plain;
pub use tabular::{render_csv, write_csv};
pub use text::render_text;

/// Heading shown above the narrative in every format.
pub(crate) const NARRATIVE_HEADING: &str = "AI Investment Analysis";
/// Prefix of the advisory shown when no narrative could be produced.
pub(crate) const NARRATIVE_UNAVAILABLE: &str = "AI analysis unavailable";
