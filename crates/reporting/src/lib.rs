//! # Report Assembly
//!
//! Turns a deal and its metrics into a format-agnostic `Report`: an ordered
//! list of sections, each an ordered list of labelled, already-formatted
//! values. Renderers for the terminal, Markdown, HTML and CSV lay out that
//! same sequence without recomputing anything.
//!
//! ## Public API
//!
//! - `ReportAssembler` / `ReportOptions`: build a `Report`.
//! - `render`: one function per output format.
//! - `export_report`: write a report to a file, format chosen by extension.

pub mod error;
pub mod export;
pub mod format;
pub mod render;
pub mod report;

pub use error::ReportError;
pub use export::{ExportFormat, export_report};
pub use report::{
    NARRATIVE_DISCLAIMER, Narrative, Report, ReportAssembler, ReportLine, ReportOptions, Section,
    SectionKind,
};
