use crate::report::{NARRATIVE_DISCLAIMER, Narrative, Report};
use super::{NARRATIVE_HEADING, NARRATIVE_UNAVAILABLE};
use std::fmt::Write;

/// Renders the report as a Markdown document.
pub fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## {}", report.title);
    let _ = writeln!(
        out,
        "\n_Generated {}_",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out, "\n### {}\n", section.heading());
        for line in &section.lines {
            let _ = writeln!(out, "- **{}:** {}", line.label, line.value);
        }
    }

    match &report.narrative {
        Some(Narrative::Generated(text)) => {
            let _ = writeln!(out, "\n### {}\n", NARRATIVE_HEADING);
            let _ = writeln!(out, "{}", text.trim());
            let _ = writeln!(out, "\n_{}_", NARRATIVE_DISCLAIMER);
        }
        Some(Narrative::Unavailable(reason)) => {
            let _ = writeln!(out, "\n> **{}:** {}", NARRATIVE_UNAVAILABLE, reason);
        }
        None => {}
    }
    out
}
