use crate::report::{NARRATIVE_DISCLAIMER, Narrative, Report, Section};
use super::{NARRATIVE_HEADING, NARRATIVE_UNAVAILABLE};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::fmt::Write;

/// Renders the report for the terminal, one table per section.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(
        out,
        "Generated {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out, "\n{}", section_table(section));
    }

    match &report.narrative {
        Some(Narrative::Generated(text)) => {
            let _ = writeln!(out, "\n{}\n", NARRATIVE_HEADING);
            let _ = writeln!(out, "{}", text.trim());
            let _ = writeln!(out, "\n{}", NARRATIVE_DISCLAIMER);
        }
        Some(Narrative::Unavailable(reason)) => {
            let _ = writeln!(out, "\n{}: {}", NARRATIVE_UNAVAILABLE, reason);
        }
        None => {}
    }
    out
}

fn section_table(section: &Section) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(section.heading()), Cell::new("")]);

    for line in &section.lines {
        table.add_row(vec![
            Cell::new(line.label),
            Cell::new(&line.value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
