//! Trade Analytics Binary
//!
//! Computes performance statistics for a trade journal.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin trade-analytics -- [CONFIG_PATH]
//! ```
//!
//! # Environment Variables
//!
//! - `TRADE_ANALYTICS_CONFIG`: config path when no argument is given
//!   (default: config.yaml)
//! - `RUST_LOG`: Log level override

use anyhow::{Context, Result};
use tracing::{error, info};

use trade_analytics::config::{self, Config, ReportFormat};
use trade_analytics::{TradingReport, journal, telemetry};

fn main() {
    load_dotenv();

    if let Err(err) = run() {
        // The subscriber may not be up if config loading failed
        error!(error = ?err, "trade-analytics failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = load_config()?;

    telemetry::init_tracing(&config.observability.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")?;

    info!(
        journal = %config.journal.path,
        timeframe = %config.analytics.timeframe,
        initial_equity = %config.analytics.initial_equity,
        "Starting trade analytics"
    );

    let trades = journal::load_trades(&config.journal.path)?;
    let report = TradingReport::build(&trades, &config.analytics);

    match config.report.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serializing report")?;
            println!("{json}");
        }
    }

    info!(
        total_trades = report.total_trades,
        net_pnl = %report.net_pnl,
        "Report complete"
    );

    Ok(())
}

/// Resolve the config path from the first argument or the environment.
fn load_config() -> Result<Config> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TRADE_ANALYTICS_CONFIG").ok())
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    config::load_config(Some(path.as_str())).with_context(|| format!("loading config from '{path}'"))
}

/// Load `.env` from the working directory if present.
fn load_dotenv() {
    // A missing .env is normal
    let _ = dotenvy::dotenv();
}
