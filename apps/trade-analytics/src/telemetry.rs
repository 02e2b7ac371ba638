//! Tracing setup.
//!
//! # Configuration
//!
//! - `observability.logging.level`: default filter directive (`info`)
//! - `observability.logging.format`: `pretty`, `compact` or `json`
//! - `RUST_LOG`: overrides the configured level when set
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_analytics::{config::LoggingConfig, telemetry::init_tracing};
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Boxed error from subscriber installation.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the env filter from the process `RUST_LOG`.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), config)
}

/// `rust_log` when it is set and parses, the configured level otherwise.
fn filter_from(rust_log: Option<&str>, config: &LoggingConfig) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InitError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target);

    match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    }
}
