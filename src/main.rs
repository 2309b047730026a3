use analytics::compute_metrics;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use configuration::{Config, LoggingSettings, NarrativeSettings, load_config};
use core_types::Deal;
use indicatif::{ProgressBar, ProgressStyle};
use narrator::{NarrativeService, OllamaNarrator};
use reporting::render::render_plain;
use reporting::{ExportFormat, Narrative, Report, ReportAssembler, ReportOptions, export_report};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the property report tool.
#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; it only feeds REALTY_* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Save(args) => handle_save(args),
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Metrics(args) => handle_metrics(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Derives investment metrics for a rental property and renders a report.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate property and financial details and save them to a deal file.
    Save(SaveArgs),
    /// Compute the metrics for a deal and render the investment report.
    Report(ReportArgs),
    /// Print the computed metrics for a deal as JSON.
    Metrics(MetricsArgs),
}

/// Where a deal comes from: an optional saved file, with individual fields
/// overridden on the command line. Fields given neither way take the
/// sample values the input form is prefilled with.
#[derive(Args, Debug, Default)]
struct DealSource {
    /// A deal file written by `save`.
    #[arg(long)]
    deal: Option<PathBuf>,

    #[command(flatten)]
    fields: DealFields,
}

#[derive(Args, Debug, Default)]
struct DealFields {
    /// Property address.
    #[arg(long, help_heading = "Property Details")]
    address: Option<String>,
    /// Purchase price.
    #[arg(long, help_heading = "Property Details")]
    price: Option<Decimal>,
    #[arg(long, help_heading = "Property Details")]
    square_footage: Option<u32>,
    #[arg(long, help_heading = "Property Details")]
    bedrooms: Option<u32>,
    /// Number of bathrooms, in steps of 0.5.
    #[arg(long, help_heading = "Property Details")]
    bathrooms: Option<Decimal>,
    #[arg(long, help_heading = "Property Details")]
    year_built: Option<i32>,

    /// Net operating income (NOI), per year.
    #[arg(long, help_heading = "Financial Details")]
    noi: Option<Decimal>,
    /// Total cash invested.
    #[arg(long, help_heading = "Financial Details")]
    cash_invested: Option<Decimal>,
    /// Gross rental income, per year.
    #[arg(long, help_heading = "Financial Details")]
    gross_rental_income: Option<Decimal>,
    /// Operating expenses, per year.
    #[arg(long, help_heading = "Financial Details")]
    operating_expenses: Option<Decimal>,
    /// Total debt service, per year.
    #[arg(long, help_heading = "Financial Details")]
    total_debt_service: Option<Decimal>,
    #[arg(long, help_heading = "Financial Details")]
    occupied_units: Option<u32>,
    #[arg(long, help_heading = "Financial Details")]
    total_units: Option<u32>,
}

#[derive(Args)]
struct SaveArgs {
    /// The file to write the deal to (JSON).
    #[arg(long, short)]
    output: PathBuf,

    #[command(flatten)]
    source: DealSource,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    source: DealSource,

    /// Format of the report printed to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the report to this file; the format follows the extension
    /// (.csv, .md, .html, .txt). May be repeated.
    #[arg(long, short)]
    export: Vec<PathBuf>,

    /// Ask the narrative service for an AI analysis.
    #[arg(long, conflicts_with = "no_narrative")]
    narrative: bool,

    /// Skip the AI analysis even if enabled in the configuration.
    #[arg(long)]
    no_narrative: bool,
}

#[derive(Args)]
struct MetricsArgs {
    #[command(flatten)]
    source: DealSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Html,
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ExportFormat::Text,
            OutputFormat::Markdown => ExportFormat::Markdown,
            OutputFormat::Html => ExportFormat::Html,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

impl DealSource {
    /// Builds the deal and checks it is fit for the metrics engine.
    fn resolve(self) -> Result<Deal> {
        let mut deal = match &self.deal {
            Some(path) => load_deal(path)?,
            None => Deal::default(),
        };
        self.fields.apply(&mut deal);
        deal.validate().context("Invalid deal")?;
        Ok(deal)
    }
}

impl DealFields {
    fn apply(self, deal: &mut Deal) {
        let property = &mut deal.property;
        if let Some(v) = self.address {
            property.address = v;
        }
        if let Some(v) = self.price {
            property.price = v;
        }
        if let Some(v) = self.square_footage {
            property.square_footage = v;
        }
        if let Some(v) = self.bedrooms {
            property.bedrooms = v;
        }
        if let Some(v) = self.bathrooms {
            property.bathrooms = v;
        }
        if let Some(v) = self.year_built {
            property.year_built = v;
        }

        let financial = &mut deal.financial;
        if let Some(v) = self.noi {
            financial.net_operating_income = v;
        }
        if let Some(v) = self.cash_invested {
            financial.cash_invested = v;
        }
        if let Some(v) = self.gross_rental_income {
            financial.gross_rental_income = v;
        }
        if let Some(v) = self.operating_expenses {
            financial.operating_expenses = v;
        }
        if let Some(v) = self.total_debt_service {
            financial.total_debt_service = v;
        }
        if let Some(v) = self.occupied_units {
            financial.occupied_units = v;
        }
        if let Some(v) = self.total_units {
            financial.total_units = v;
        }
    }
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. Logs never go to stdout, which carries the report.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log filter '{}'", settings.level))?;

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "realty.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the `save` command: the explicit hand-off to a later `report`.
fn handle_save(args: SaveArgs) -> Result<()> {
    let deal = args.source.resolve()?;
    save_deal(&deal, &args.output)?;

    tracing::info!(path = %args.output.display(), address = %deal.property.address, "Deal saved.");
    println!(
        "Property details saved to {}. Run `realty report --deal {}` to generate your report.",
        args.output.display(),
        args.output.display()
    );
    Ok(())
}

/// Handles the `report` command.
///
/// The report is printed before any export is attempted, so a failed export
/// never hides the numbers.
async fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let deal = args.source.resolve()?;
    let report = build_report(&deal, config);

    let want_narrative = (config.narrative.enabled || args.narrative) && !args.no_narrative;
    let report = if want_narrative {
        let narrative = generate_narrative(&report, &config.narrative).await;
        report.with_narrative(narrative)
    } else {
        report
    };

    let format = ExportFormat::from(args.format);
    print!("{}", format.render(&report)?);

    let mut failures = 0;
    for path in &args.export {
        let path = resolve_export_path(path, &config.export.directory);
        match export_report(&report, &path) {
            Ok(format) => eprintln!("Report exported to {} ({}).", path.display(), format),
            Err(e) => {
                failures += 1;
                tracing::error!(path = %path.display(), error = %e, "Export failed.");
                eprintln!("Could not export report to {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} export(s) failed", failures, args.export.len());
    }
    Ok(())
}

/// Handles the `metrics` command.
fn handle_metrics(args: MetricsArgs) -> Result<()> {
    let deal = args.source.resolve()?;
    let metrics = compute_metrics(&deal.property, &deal.financial);
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn build_report(deal: &Deal, config: &Config) -> Report {
    let metrics = compute_metrics(&deal.property, &deal.financial);
    let assembler = ReportAssembler::new(ReportOptions {
        title: config.report.title.clone(),
        currency_symbol: config.report.currency_symbol.clone(),
    });
    assembler.assemble(&deal.property, &deal.financial, &metrics)
}

/// Asks the configured service for prose. Never fails: any problem becomes
/// an advisory on the report.
async fn generate_narrative(report: &Report, settings: &NarrativeSettings) -> Narrative {
    let narrator = match OllamaNarrator::new(settings) {
        Ok(narrator) => narrator,
        Err(e) => {
            tracing::error!(error = %e, "Could not create narrative client.");
            return Narrative::Unavailable(e.to_string());
        }
    };
    let service = NarrativeService::new(Box::new(narrator), settings.max_attempts);

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Generating AI analysis with {}...", settings.model));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let narrative = service.narrate(&render_plain(report)).await;
    spinner.finish_and_clear();
    narrative
}

fn load_deal(path: &Path) -> Result<Deal> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read deal file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse deal file {}", path.display()))
}

fn save_deal(deal: &Deal, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(deal)?;
    fs::write(path, json).with_context(|| format!("Failed to write deal file {}", path.display()))
}

/// Relative export paths land in the configured export directory.
fn resolve_export_path(path: &Path, export_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        export_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_sample_values() {
        let cli = Cli::try_parse_from([
            "realty",
            "metrics",
            "--price",
            "500000",
            "--bathrooms",
            "1.5",
            "--total-units",
            "2",
        ])
        .unwrap();
        let Commands::Metrics(args) = cli.command else {
            panic!("expected metrics command");
        };

        let deal = args.source.resolve().unwrap();
        assert_eq!(deal.property.price, dec!(500000));
        assert_eq!(deal.property.bathrooms, dec!(1.5));
        assert_eq!(deal.financial.total_units, 2);
        assert_eq!(deal.property.address, "1234 Example St, Anytown, USA");
        assert_eq!(deal.financial.net_operating_income, dec!(30000));
    }

    #[test]
    fn invalid_flags_are_rejected_before_computing() {
        let source = DealSource {
            fields: DealFields {
                year_built: Some(1700),
                ..DealFields::default()
            },
            ..DealSource::default()
        };
        let err = source.resolve().unwrap_err();
        assert!(format!("{:#}", err).contains("year_built"));
    }

    #[test]
    fn saved_deal_is_reloaded_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deals").join("elm.json");

        let mut deal = Deal::default();
        deal.property.address = "9 Elm Rd".to_string();
        save_deal(&deal, &path).unwrap();

        let source = DealSource {
            deal: Some(path),
            fields: DealFields {
                noi: Some(dec!(31000)),
                ..DealFields::default()
            },
        };
        let loaded = source.resolve().unwrap();
        assert_eq!(loaded.property.address, "9 Elm Rd");
        assert_eq!(loaded.financial.net_operating_income, dec!(31000));
    }

    #[test]
    fn unreadable_deal_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_deal(&path).is_err());
        assert!(load_deal(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn narrative_flags_conflict() {
        let parsed = Cli::try_parse_from(["realty", "report", "--narrative", "--no-narrative"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn export_paths_resolve_against_directory() {
        let dir = Path::new("reports");
        assert_eq!(
            resolve_export_path(Path::new("deal.csv"), dir),
            Path::new("reports/deal.csv")
        );
        let absolute = std::env::temp_dir().join("deal.csv");
        assert_eq!(resolve_export_path(&absolute, dir), absolute);
    }

    #[test]
    fn report_uses_configured_currency() {
        let mut config = Config::default();
        config.report.currency_symbol = "£".to_string();
        let report = build_report(&Deal::default(), &config);
        assert_eq!(report.line("price").unwrap().value, "£350,000.00");
        assert_eq!(report.line("dscr").unwrap().value, "1.25");
    }
}
