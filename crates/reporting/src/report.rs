use crate::format;
use analytics::MetricsResult;
use chrono::{DateTime, Utc};
use core_types::{FinancialRecord, PropertyRecord};

/// Appended after every generated narrative.
pub const NARRATIVE_DISCLAIMER: &str =
    "Note: This AI analysis is based on the provided data and may require further market research.";

/// Identifies what a section holds, so renderers can pick sections without
/// matching on headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    PropertyOverview,
    FinancialInputs,
    FinancialMetrics,
}

impl SectionKind {
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::PropertyOverview => "Property Overview",
            SectionKind::FinancialInputs => "Financial Inputs",
            SectionKind::FinancialMetrics => "Financial Metrics",
        }
    }

    /// Whether the section's lines become columns of the flat tabular export.
    pub fn is_tabular(&self) -> bool {
        matches!(
            self,
            SectionKind::PropertyOverview | SectionKind::FinancialMetrics
        )
    }
}

/// A single labelled, already-formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Stable machine name of the field (e.g. `cap_rate`).
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<ReportLine>,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    /// Looks up a line by its key.
    pub fn line(&self, key: &str) -> Option<&ReportLine> {
        self.lines.iter().find(|l| l.key == key)
    }
}

/// The outcome of asking the narrative service for prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrative {
    Generated(String),
    /// The service could not be reached or failed; holds the advisory shown
    /// in place of the prose.
    Unavailable(String),
}

/// A fully assembled, format-agnostic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
    pub narrative: Option<Narrative>,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Looks up a line by key across all sections.
    pub fn line(&self, key: &str) -> Option<&ReportLine> {
        self.sections.iter().find_map(|s| s.line(key))
    }

    /// Lines that make up the flat tabular export, in column order.
    pub fn tabular_lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.sections
            .iter()
            .filter(|s| s.kind.is_tabular())
            .flat_map(|s| s.lines.iter())
    }

    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = Some(narrative);
        self
    }
}

/// Presentation settings for the assembler.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub currency_symbol: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Property Investment Analysis Report".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Builds the ordered (label, value) sections of a report.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    options: ReportOptions,
}

impl ReportAssembler {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Assembles a report stamped with the current time.
    pub fn assemble(
        &self,
        property: &PropertyRecord,
        financial: &FinancialRecord,
        metrics: &MetricsResult,
    ) -> Report {
        self.assemble_at(property, financial, metrics, Utc::now())
    }

    pub fn assemble_at(
        &self,
        property: &PropertyRecord,
        financial: &FinancialRecord,
        metrics: &MetricsResult,
        generated_at: DateTime<Utc>,
    ) -> Report {
        let sections = vec![
            self.property_section(property),
            self.inputs_section(financial),
            self.metrics_section(metrics),
        ];
        tracing::debug!(
            address = %property.address,
            sections = sections.len(),
            "Assembled report."
        );

        Report {
            title: self.options.title.clone(),
            generated_at,
            sections,
            narrative: None,
        }
    }

    fn money(&self, value: rust_decimal::Decimal) -> String {
        format::currency(value, &self.options.currency_symbol)
    }

    fn property_section(&self, p: &PropertyRecord) -> Section {
        Section {
            kind: SectionKind::PropertyOverview,
            lines: vec![
                line("address", "Property Address", p.address.clone()),
                line("price", "Price", self.money(p.price)),
                line("square_footage", "Square Footage", format::count(p.square_footage)),
                line("bedrooms", "Bedrooms", format::count(p.bedrooms)),
                line("bathrooms", "Bathrooms", format::one_decimal(p.bathrooms)),
                line("year_built", "Year Built", p.year_built.to_string()),
            ],
        }
    }

    fn inputs_section(&self, f: &FinancialRecord) -> Section {
        Section {
            kind: SectionKind::FinancialInputs,
            lines: vec![
                line(
                    "net_operating_income",
                    "Net Operating Income (NOI)",
                    self.money(f.net_operating_income),
                ),
                line("cash_invested", "Total Cash Invested", self.money(f.cash_invested)),
                line(
                    "gross_rental_income",
                    "Gross Rental Income",
                    self.money(f.gross_rental_income),
                ),
                line(
                    "operating_expenses",
                    "Operating Expenses",
                    self.money(f.operating_expenses),
                ),
                line(
                    "total_debt_service",
                    "Total Debt Service",
                    self.money(f.total_debt_service),
                ),
                line("occupied_units", "Occupied Units", format::count(f.occupied_units)),
                line("total_units", "Total Units", format::count(f.total_units)),
            ],
        }
    }

    fn metrics_section(&self, m: &MetricsResult) -> Section {
        Section {
            kind: SectionKind::FinancialMetrics,
            lines: vec![
                line("annual_cash_flow", "Annual Cash Flow", self.money(m.annual_cash_flow)),
                line(
                    "cash_on_cash_return",
                    "Cash on Cash Return",
                    format::percentage(m.cash_on_cash_return),
                ),
                line(
                    "cap_rate",
                    "Capitalization Rate (Cap Rate)",
                    format::percentage(m.cap_rate),
                ),
                line(
                    "dscr",
                    "Debt Service Coverage Ratio (DSCR)",
                    format::ratio(m.dscr),
                ),
                line(
                    "gross_rental_yield",
                    "Gross Rental Yield",
                    format::percentage(m.gross_rental_yield),
                ),
                line("price_per_sqft", "Price per Square Foot", self.money(m.price_per_sqft)),
                line(
                    "operating_expense_ratio",
                    "Operating Expense Ratio (OER)",
                    format::percentage(m.operating_expense_ratio),
                ),
                line("roi", "Return on Investment (ROI)", format::percentage(m.roi)),
                line(
                    "occupancy_rate",
                    "Occupancy Rate",
                    format::percentage(m.occupancy_rate),
                ),
            ],
        }
    }
}

fn line(key: &'static str, label: &'static str, value: String) -> ReportLine {
    ReportLine { key, label, value }
}
