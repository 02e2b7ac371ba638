//! Trade journal loading.
//!
//! A journal is a JSON array of [`TradeRecord`]s exported by the
//! bookkeeping side of the application. Records are taken as already
//! validated; this module only decodes them.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{AnalyticsError, Result};
use crate::stats::TradeRecord;

/// Read and decode a JSON trade journal from disk.
///
/// # Errors
///
/// [`AnalyticsError::Journal`] if the file cannot be read,
/// [`AnalyticsError::JournalFormat`] if it is not a trade list.
pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|source| AnalyticsError::Journal {
        path: shown.clone(),
        source,
    })?;

    let trades = parse_trades(&contents).map_err(|source| AnalyticsError::JournalFormat {
        path: shown.clone(),
        source,
    })?;

    if trades.is_empty() {
        warn!(path = %shown, "Trade journal is empty");
    } else {
        info!(path = %shown, trade_count = trades.len(), "Loaded trade journal");
    }

    Ok(trades)
}

/// Decode a JSON trade list.
///
/// # Errors
///
/// Returns the JSON error if `json` is not an array of trade records.
pub fn parse_trades(json: &str) -> std::result::Result<Vec<TradeRecord>, serde_json::Error> {
    let trades: Vec<TradeRecord> = serde_json::from_str(json)?;
    debug!(trade_count = trades.len(), "Decoded trade records");
    Ok(trades)
}
