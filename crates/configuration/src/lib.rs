use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, ExportSettings, LoggingSettings, NarrativeSettings, ReportSettings};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of the environment variables that override file settings,
/// e.g. `REALTY_NARRATIVE__MODEL=mistral`.
pub const ENV_PREFIX: &str = "REALTY";

/// Loads the application configuration.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults;
/// 2. `path` if given (must exist), otherwise `config.toml` in the working
///    directory if present;
/// 3. `REALTY_*` environment variables, with `__` separating nested keys.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, None)
}

/// Like `load_config`, but reads overrides from `env` instead of the process
/// environment when it is `Some`.
pub fn load_config_with_env(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = load_config_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.report.currency_symbol, "$");
        assert_eq!(config.narrative.model, "llama2");
        assert_eq!(config.narrative.max_attempts, 2);
        assert!(!config.narrative.enabled);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_overrides_defaults_per_key() {
        let file = write_config(
            r#"
            [report]
            currency_symbol = "€"

            [narrative]
            enabled = true
            model = "mistral"

            [export]
            directory = "out/reports"
            "#,
        );
        let config = load_config_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.report.currency_symbol, "€");
        assert_eq!(config.report.title, "Property Investment Analysis Report");
        assert!(config.narrative.enabled);
        assert_eq!(config.narrative.model, "mistral");
        assert_eq!(config.narrative.endpoint, "http://localhost:11434");
        assert_eq!(config.export.directory, Path::new("out/reports"));
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[narrative]\nmodel = \"mistral\"\n");
        let env = HashMap::from([
            ("REALTY_NARRATIVE__MODEL".to_string(), "llama3".to_string()),
            ("REALTY_NARRATIVE__TIMEOUT_SECS".to_string(), "30".to_string()),
        ]);
        let config = load_config_with_env(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.narrative.model, "llama3");
        assert_eq!(config.narrative.timeout_secs, 30);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config_with_env(Some(&missing), no_env()),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn rejects_invalid_values() {
        for contents in [
            "[narrative]\nmax_attempts = 0\n",
            "[narrative]\ntimeout_secs = 0\n",
            "[narrative]\nendpoint = \"localhost:11434\"\n",
            "[report]\ncurrency_symbol = \"\"\n",
        ] {
            let file = write_config(contents);
            let result = load_config_with_env(Some(file.path()), no_env());
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "expected validation error for {contents:?}"
            );
        }
    }
}
