//! Configuration for the trade analytics binary.
//!
//! Loaded from YAML with `${VAR}` / `${VAR:-default}` environment variable
//! interpolation, then validated.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_analytics::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("journal: {}", config.journal.path);
//! ```

use std::sync::OnceLock;

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::{DEFAULT_RISK_FREE_RATE, Timeframe};

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Accepted values for `observability.logging.format`.
const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Trade journal input.
    #[serde(default)]
    pub journal: JournalConfig,
    /// Statistics parameters.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Report output.
    #[serde(default)]
    pub report: ReportConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Trade journal input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Path to the JSON trade journal.
    #[serde(default = "default_journal_path")]
    pub path: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
        }
    }
}

/// Parameters for the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Account balance before the first trade, base of the equity curve.
    #[serde(default = "default_initial_equity")]
    pub initial_equity: Decimal,
    /// Annual risk-free rate for the Sharpe ratio (fraction).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Period size for the report's calendar breakdown.
    #[serde(default)]
    pub timeframe: Timeframe,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            initial_equity: default_initial_equity(),
            risk_free_rate: default_risk_free_rate(),
            timeframe: Timeframe::default(),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Report output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
}

/// Observability configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `pretty`, `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Include the event target in log lines.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            with_target: true,
        }
    }
}

fn default_journal_path() -> String {
    "trades.json".to_string()
}

fn default_initial_equity() -> Decimal {
    Decimal::from(10_000)
}

const fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A missing or empty
/// variable without a default becomes the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    static ENV_VAR_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.journal.path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "journal.path must not be empty".to_string(),
        ));
    }

    let rate = config.analytics.risk_free_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::ValidationError(
            "analytics.risk_free_rate must be between 0.0 and 1.0".to_string(),
        ));
    }

    if config.analytics.initial_equity <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "analytics.initial_equity must be positive".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.journal.path, "trades.json");
        assert_eq!(config.analytics.initial_equity, dec!(10000));
        assert!((config.analytics.risk_free_rate - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.analytics.timeframe, Timeframe::Week);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert_eq!(config.observability.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_minimal_config() {
        let yaml = r"
journal:
  path: data/journal.json
analytics:
  timeframe: month
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.journal.path, "data/journal.json");
        assert_eq!(config.analytics.timeframe, Timeframe::Month);
        assert_eq!(config.analytics.initial_equity, dec!(10000)); // Default value
    }

    #[test]
    fn test_load_full_config() {
        let yaml = r"
journal:
  path: trades.json
analytics:
  initial_equity: 25000.50
  risk_free_rate: 0.04
  timeframe: day
report:
  format: json
observability:
  logging:
    level: debug
    format: json
    with_target: false
";

        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.analytics.initial_equity, dec!(25000.50));
        assert_eq!(config.analytics.timeframe, Timeframe::Day);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.observability.logging.format, "json");
        assert!(!config.observability.logging.with_target);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "path: ${TRADE_ANALYTICS_TEST_NONEXISTENT_VAR:-journal.json}";
        assert_eq!(interpolate_env_vars(input), "path: journal.json");
    }

    #[test]
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "path: ${TRADE_ANALYTICS_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "path: ");
    }

    #[test]
    fn test_validation_invalid_risk_free_rate() {
        let yaml = r"
analytics:
  risk_free_rate: 1.5
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid risk_free_rate");
        };
        assert!(err.to_string().contains("risk_free_rate"));
    }

    #[test]
    fn test_validation_non_positive_equity() {
        let yaml = r"
analytics:
  initial_equity: 0
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero initial_equity");
        };
        assert!(err.to_string().contains("initial_equity"));
    }

    #[test]
    fn test_validation_unknown_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unknown log format");
        };
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_unknown_timeframe_is_parse_error() {
        let yaml = r"
analytics:
  timeframe: year
";

        let result = load_config_from_string(yaml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Some("/nonexistent/trade-analytics.yaml"));
        let Err(ConfigError::ReadError { path, .. }) = result else {
            panic!("expected ReadError for missing file");
        };
        assert_eq!(path, "/nonexistent/trade-analytics.yaml");
    }
}
