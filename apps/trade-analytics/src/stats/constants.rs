//! Numeric constants for trading statistics.

/// Trading days per year, used for risk-free rate de-annualization and
/// Sharpe annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default annual risk-free rate (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Multiplier from a fraction to a percentage.
pub const HUNDRED: f64 = 100.0;

/// Decimal places kept by [`average_loss`](super::average_loss).
pub const AVERAGE_LOSS_DP: u32 = 2;

/// Days in a week (weekday buckets).
pub const DAYS_PER_WEEK: u32 = 7;

/// Hours in a day (hourly buckets).
pub const HOURS_PER_DAY: u32 = 24;
