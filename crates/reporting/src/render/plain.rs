use crate::report::Report;
use std::fmt::Write;

/// Renders the report as `Label: value` lines, grouped under section headings.
///
/// This is the text handed to the narrative service, so it leaves out the
/// title, timestamp and any existing narrative.
pub fn render_plain(report: &Report) -> String {
    let mut out = String::new();
    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}:", section.heading());
        for line in &section.lines {
            let _ = writeln!(out, "{}: {}", line.label, line.value);
        }
    }
    out
}
