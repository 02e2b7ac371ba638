//! Trading statistics engine.
//!
//! Pure aggregation functions over closed trades and equity curves:
//! - Win rate, profit factor, expectancy, average win/loss
//! - Sharpe ratio (annualized by 252 trading days)
//! - Maximum drawdown with its peak/trough span
//! - Day/week/month grouping, daily PnL, weekday and hourly breakdowns
//!
//! Nothing here performs I/O or keeps state between calls; every function
//! borrows its input and returns a fresh value, so calls may run
//! concurrently on shared data.
//!
//! Money stays in [`rust_decimal::Decimal`], whose range is about
//! ±7.9 × 10²⁸. Sums clamp at that range instead of panicking, and ratios
//! whose exact quotient would leave it are divided in `f64`.

mod constants;
mod error;
mod format;
mod grouping;
mod math;
mod risk;
mod trade;
mod types;

pub use constants::{DEFAULT_RISK_FREE_RATE, TRADING_DAYS_PER_YEAR};
pub use error::StatsError;
pub use format::{format_decimal, format_pct, format_ratio};
pub use grouping::{
    bucket_stats, calculate_daily_pnl, calculate_hourly_stats, calculate_weekday_stats, group_by,
    group_by_timeframe, timeframe_breakdown,
};
pub use risk::{equity_curve, max_drawdown, period_returns, sharpe_ratio};
pub use trade::{
    average_loss, average_win, consecutive_streaks, expectancy, gross_loss, gross_profit,
    largest_loss, largest_win, net_pnl, profit_factor, win_rate,
};
pub use types::{
    BucketStats, DailyPnl, DrawdownResult, HourlyStats, Side, Timeframe, TradeGroups, TradeRecord,
    WeekdayStats,
};
