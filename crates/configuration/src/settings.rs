use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty or missing
/// `config.toml` is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSettings,
    pub narrative: NarrativeSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

/// Presentation of the generated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    /// Prefix for every currency amount (e.g. "$", "€").
    pub currency_symbol: String,
}

/// The text-generation service used for the prose analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    /// Whether `report` asks for a narrative unless told otherwise on the command line.
    pub enabled: bool,
    /// Base URL of an Ollama-compatible server.
    pub endpoint: String,
    pub model: String,
    /// Per-attempt request timeout.
    pub timeout_secs: u64,
    /// Total attempts, including the first.
    pub max_attempts: u32,
}

/// Where exported report files go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Relative export paths are resolved against this directory.
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Property Investment Analysis Report".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:11434".to_string(),
            model: "llama2".to_string(),
            timeout_secs: 120,
            max_attempts: 2,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings that would only fail later, at report time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.title.trim().is_empty() {
            return Err(invalid("report.title must not be empty"));
        }
        if self.report.currency_symbol.is_empty() {
            return Err(invalid("report.currency_symbol must not be empty"));
        }

        let narrative = &self.narrative;
        if narrative.timeout_secs == 0 {
            return Err(invalid("narrative.timeout_secs must be greater than 0"));
        }
        if narrative.max_attempts == 0 {
            return Err(invalid("narrative.max_attempts must be at least 1"));
        }
        if narrative.model.trim().is_empty() {
            return Err(invalid("narrative.model must not be empty"));
        }
        let endpoint = &narrative.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(invalid(&format!(
                "narrative.endpoint '{}' must be an http(s) URL",
                narrative.endpoint
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(invalid("logging.level must not be empty"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
