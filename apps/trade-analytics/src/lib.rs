// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]

//! Trade Analytics - Rust Core Library
//!
//! Performance statistics for a trader's journal of closed trades.
//!
//! # Modules
//!
//! - **stats**: the statistics engine. Pure functions over trade records,
//!   return series and equity curves (win rate, profit factor, Sharpe,
//!   drawdown, calendar breakdowns).
//! - **report**: a [`TradingReport`] composed from the engine.
//! - **journal**: JSON trade journal loading.
//! - **config** / **telemetry**: YAML configuration and tracing setup for
//!   the `trade-analytics` binary.
//!
//! # Time handling
//!
//! Trade timestamps are naive local date-times. Day, week, month, weekday
//! and hour buckets use the recorded components as-is.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Error types.
pub mod error;

/// Trade journal loading.
pub mod journal;

/// Report composition.
pub mod report;

/// Trading statistics engine.
pub mod stats;

/// Tracing subscriber setup.
pub mod telemetry;

pub use config::{AnalyticsConfig, Config, ConfigError, load_config};
pub use error::AnalyticsError;
pub use journal::load_trades;
pub use report::TradingReport;
pub use stats::{StatsError, Timeframe, TradeRecord};
