use crate::report::{NARRATIVE_DISCLAIMER, Narrative, Report};
use super::{NARRATIVE_HEADING, NARRATIVE_UNAVAILABLE};
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { font-size: 1.6em; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5em; }
th, td { border: 1px solid #ccc; padding: 6px 10px; text-align: left; }
td.value { text-align: right; }
.advisory { color: #8a5a00; }
@media print {
  section { page-break-after: always; }
  section:last-of-type { page-break-after: auto; }
}";

/// Renders the report as a standalone, printable HTML document.
///
/// Each section is a `<section>` that starts a new page when printed.
pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    let title = escape_html(&report.title);

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(
        out,
        "<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>",
        title, STYLE
    );
    let _ = writeln!(out, "<h1>{}</h1>", title);
    let _ = writeln!(
        out,
        "<p>Generated {}</p>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out, "<section>\n<h2>{}</h2>\n<table>", escape_html(section.heading()));
        for line in &section.lines {
            let _ = writeln!(
                out,
                "<tr><th>{}</th><td class=\"value\">{}</td></tr>",
                escape_html(line.label),
                escape_html(&line.value)
            );
        }
        let _ = writeln!(out, "</table>\n</section>");
    }

    match &report.narrative {
        Some(Narrative::Generated(text)) => {
            let _ = writeln!(out, "<section>\n<h2>{}</h2>", NARRATIVE_HEADING);
            for paragraph in text.trim().split("\n\n").filter(|p| !p.trim().is_empty()) {
                let escaped = escape_html(paragraph.trim()).replace('\n', "<br>");
                let _ = writeln!(out, "<p>{}</p>", escaped);
            }
            let _ = writeln!(
                out,
                "<p><em>{}</em></p>\n</section>",
                escape_html(NARRATIVE_DISCLAIMER)
            );
        }
        Some(Narrative::Unavailable(reason)) => {
            let _ = writeln!(
                out,
                "<p class=\"advisory\">{}: {}</p>",
                NARRATIVE_UNAVAILABLE,
                escape_html(reason)
            );
        }
        None => {}
    }

    let _ = writeln!(out, "</body>\n</html>");
    out
}

/// Escapes the characters that have special meaning in HTML text and attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
