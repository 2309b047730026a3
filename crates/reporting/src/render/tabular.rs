use crate::error::ReportError;
use crate::report::Report;
use std::io::Write;

/// Writes the report as a flat table: a header row of labels and a single
/// row of values.
///
/// Columns are the property overview followed by the financial metrics.
pub fn write_csv<W: Write>(report: &Report, writer: W) -> Result<W, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(report.tabular_lines().map(|l| l.label))?;
    csv_writer.write_record(report.tabular_lines().map(|l| l.value.as_str()))?;
    csv_writer
        .into_inner()
        .map_err(|e| ReportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

/// Renders the flat table into a string.
pub fn render_csv(report: &Report) -> Result<String, ReportError> {
    let bytes = write_csv(report, Vec::new())?;
    // The csv writer only emits the UTF-8 we gave it.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
