use crate::error::ReportError;
use crate::render;
use crate::report::Report;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// The output formats a report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Html,
    Csv,
}

impl ExportFormat {
    /// Infers the format from a file extension (`.csv`, `.md`, `.html`, `.txt`).
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ReportError::UnsupportedFormat(path.display().to_string()))?;
        extension.parse()
    }

    pub fn render(&self, report: &Report) -> Result<String, ReportError> {
        Ok(match self {
            ExportFormat::Text => render::render_text(report),
            ExportFormat::Markdown => render::render_markdown(report),
            ExportFormat::Html => render::render_html(report),
            ExportFormat::Csv => render::render_csv(report)?,
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
            ExportFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Writes the report to `path`, choosing the format from its extension.
///
/// Missing parent directories are created.
pub fn export_report(report: &Report, path: &Path) -> Result<ExportFormat, ReportError> {
    let format = ExportFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => {
            writer = render::write_csv(report, writer)?;
        }
        _ => writer.write_all(format.render(report)?.as_bytes())?,
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), %format, "Report exported.");
    Ok(format)
}
