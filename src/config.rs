/// Service configuration.
///
/// Settings load from an optional TOML file with per-field defaults; API
/// keys come from the environment (a `.env` file is honored via dotenv) so
/// they stay out of checked-in configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::logging::LogLevel;

/// Environment variable holding the weather API key.
pub const WEATHER_API_KEY_VAR: &str = "AQUAMON_WEATHER_API_KEY";

/// Environment variable holding the report-generation API key.
pub const REPORT_API_KEY_VAR: &str = "AQUAMON_REPORT_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the per-station historical CSV files.
    pub data_dir: PathBuf,
    /// Directory holding the pre-trained model artifacts.
    pub model_dir: PathBuf,
    pub report_api_url: Option<String>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: "debug", "info", "warn", or "error".
    pub level: String,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            model_dir: PathBuf::from("models"),
            report_api_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Parsed minimum log level; unknown strings fall back to `Info`.
    pub fn min_log_level(&self) -> LogLevel {
        match self.logging.level.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// Reads an API key from the environment. `None` when unset or empty.
pub fn api_key_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/aquamon.toml")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.min_log_level(), LogLevel::Info);
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            model_dir = "/opt/aquamon/models"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.model_dir, PathBuf::from("/opt/aquamon/models"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.min_log_level(), LogLevel::Debug);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert_eq!(config.min_log_level(), LogLevel::Info);
    }
}
