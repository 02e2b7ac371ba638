//! Core types for trading statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::StatsError;

/// Position side of a closed trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// Long position.
    #[default]
    Long,
    /// Short position.
    Short,
}

/// A closed trade as recorded in the journal.
///
/// Only `pnl` and `traded_at` take part in any calculation. The remaining
/// fields travel with the record for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Journal trade identifier.
    #[serde(default)]
    pub trade_id: String,
    /// Instrument symbol.
    #[serde(default)]
    pub symbol: String,
    /// Position side.
    #[serde(default)]
    pub side: Side,
    /// Entry price.
    #[serde(default)]
    pub entry_price: Decimal,
    /// Exit price.
    #[serde(default)]
    pub exit_price: Decimal,
    /// Position size.
    #[serde(default)]
    pub quantity: Decimal,
    /// Realized profit and loss (signed).
    pub pnl: Decimal,
    /// Trade timestamp, naive local time.
    pub traded_at: NaiveDateTime,
}

impl TradeRecord {
    /// Create a record carrying only the fields the engine reads.
    #[must_use]
    pub fn new(pnl: Decimal, traded_at: NaiveDateTime) -> Self {
        Self {
            trade_id: String::new(),
            symbol: String::new(),
            side: Side::default(),
            entry_price: Decimal::ZERO,
            exit_price: Decimal::ZERO,
            quantity: Decimal::ZERO,
            pnl,
            traded_at,
        }
    }

    /// Strictly positive PnL.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    /// Strictly negative PnL.
    #[must_use]
    pub fn is_loser(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}

/// Calendar bucket size for [`group_by_timeframe`](super::group_by_timeframe).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Calendar day, keyed `YYYY-MM-DD`.
    Day,
    /// Sunday-start week, keyed by the Sunday's `YYYY-MM-DD`.
    #[default]
    Week,
    /// Calendar month, keyed `YYYY-MM`.
    Month,
}

impl Timeframe {
    /// Accepted spellings, for error messages.
    pub const EXPECTED: &'static str = "day, week, month";

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(StatsError::InvalidArgument {
                name: "timeframe",
                value: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Maximum peak-to-trough decline of an equity curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawdownResult {
    /// Largest absolute decline from a running peak.
    pub max_drawdown: Decimal,
    /// That decline as a percentage of its peak.
    pub max_drawdown_pct: f64,
    /// Index of the peak that started the maximum drawdown.
    #[serde(with = "sentinel_index")]
    pub start_index: Option<usize>,
    /// Index of the trough that ended the maximum drawdown.
    #[serde(with = "sentinel_index")]
    pub end_index: Option<usize>,
}

/// One day of realized PnL with the running total up to and including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPnl {
    /// Calendar day (serialized `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Sum of PnL closed on this day.
    pub pnl: Decimal,
    /// Sum of PnL for this day and every earlier day.
    pub cumulative_pnl: Decimal,
}

/// Aggregate statistics for one weekday/hour/period bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BucketStats {
    /// Sum of PnL in the bucket.
    pub total_pnl: Decimal,
    /// Number of trades in the bucket.
    pub trade_count: u64,
    /// `total_pnl / trade_count`, zero for an empty bucket.
    pub average_pnl: Decimal,
    /// Win rate of the bucket's trades.
    pub win_rate: f64,
}

/// Trades partitioned by bucket key, in first-seen key order.
pub type TradeGroups<'a> = IndexMap<String, Vec<&'a TradeRecord>>;

/// Statistics for every weekday, Sunday first.
pub type WeekdayStats = IndexMap<Weekday, BucketStats>;

/// Statistics for every hour of the day, 0 through 23.
pub type HourlyStats = IndexMap<u32, BucketStats>;

/// Serializes a missing index as `-1`, the sentinel presentation layers expect.
mod sentinel_index {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match index {
            Some(i) => serializer.serialize_u64(*i as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(None);
        }
        usize::try_from(raw).map(Some).map_err(D::Error::custom)
    }
}
