//! Trading report composed from the statistics engine.

use std::fmt::Write;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::stats::{
    self, BucketStats, DailyPnl, DrawdownResult, HourlyStats, Timeframe, TradeRecord, WeekdayStats,
    format_decimal, format_pct, format_ratio,
};

/// Every statistic for one trade journal.
///
/// Infinite ratios serialize as `null` in JSON; use [`render_text`](Self::render_text)
/// for a human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingReport {
    /// Number of trades.
    pub total_trades: u64,
    /// Trades with positive PnL.
    pub winning_trades: u64,
    /// Trades with negative PnL.
    pub losing_trades: u64,
    /// Win rate (0 to 1).
    pub win_rate: f64,
    /// Gross profit / gross loss.
    pub profit_factor: f64,
    /// Average PnL per trade.
    pub expectancy: Decimal,
    /// Average winning trade.
    pub average_win: Decimal,
    /// Average losing trade (negative, 2 decimal places).
    pub average_loss: Decimal,
    /// Sum of winning PnL.
    pub gross_profit: Decimal,
    /// Absolute sum of losing PnL.
    pub gross_loss: Decimal,
    /// Sum of all PnL.
    pub net_pnl: Decimal,
    /// Best single trade.
    pub largest_win: Decimal,
    /// Worst single trade.
    pub largest_loss: Decimal,
    /// Longest run of winners.
    pub max_consecutive_wins: u64,
    /// Longest run of losers.
    pub max_consecutive_losses: u64,
    /// Starting balance of the equity curve.
    pub initial_equity: Decimal,
    /// Balance after the last trading day.
    pub final_equity: Decimal,
    /// Annualized Sharpe ratio of daily equity returns.
    pub sharpe_ratio: f64,
    /// Maximum drawdown of the daily equity curve.
    pub drawdown: DrawdownResult,
    /// Period size used for `breakdown`.
    pub timeframe: Timeframe,
    /// Statistics per calendar period, chronological.
    pub breakdown: IndexMap<String, BucketStats>,
    /// Daily PnL with running total.
    pub daily_pnl: Vec<DailyPnl>,
    /// Statistics per weekday.
    pub weekday: WeekdayStats,
    /// Statistics per hour of day.
    pub hourly: HourlyStats,
}

impl TradingReport {
    /// Compute the full report for a trade list.
    ///
    /// The equity curve starts at `initial_equity` and steps once per
    /// trading day; Sharpe and drawdown are measured on it.
    #[must_use]
    pub fn build(trades: &[TradeRecord], config: &AnalyticsConfig) -> Self {
        let daily_pnl = stats::calculate_daily_pnl(trades);
        let curve = stats::equity_curve(config.initial_equity, &daily_pnl);
        let returns = stats::period_returns(&curve);
        let (max_consecutive_wins, max_consecutive_losses) = stats::consecutive_streaks(trades);

        debug!(
            trade_count = trades.len(),
            trading_days = daily_pnl.len(),
            return_count = returns.len(),
            "Computing trading report"
        );

        Self {
            total_trades: trades.len() as u64,
            winning_trades: trades.iter().filter(|t| t.is_winner()).count() as u64,
            losing_trades: trades.iter().filter(|t| t.is_loser()).count() as u64,
            win_rate: stats::win_rate(trades),
            profit_factor: stats::profit_factor(trades),
            expectancy: stats::expectancy(trades),
            average_win: stats::average_win(trades),
            average_loss: stats::average_loss(trades),
            gross_profit: stats::gross_profit(trades),
            gross_loss: stats::gross_loss(trades),
            net_pnl: stats::net_pnl(trades),
            largest_win: stats::largest_win(trades),
            largest_loss: stats::largest_loss(trades),
            max_consecutive_wins,
            max_consecutive_losses,
            initial_equity: config.initial_equity,
            final_equity: curve.last().copied().unwrap_or(config.initial_equity),
            sharpe_ratio: stats::sharpe_ratio(&returns, config.risk_free_rate),
            drawdown: stats::max_drawdown(&curve),
            timeframe: config.timeframe,
            breakdown: stats::timeframe_breakdown(trades, config.timeframe),
            daily_pnl,
            weekday: stats::calculate_weekday_stats(trades),
            hourly: stats::calculate_hourly_stats(trades),
        }
    }

    /// Render the report as plain-text tables.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "== Summary ==");
        let _ = writeln!(
            out,
            "Trades:            {} ({} won, {} lost)",
            self.total_trades, self.winning_trades, self.losing_trades
        );
        let _ = writeln!(out, "Win rate:          {}", format_pct(self.win_rate));
        let _ = writeln!(out, "Profit factor:     {}", format_ratio(self.profit_factor));
        let _ = writeln!(out, "Expectancy:        {}", format_decimal(self.expectancy));
        let _ = writeln!(out, "Average win:       {}", format_decimal(self.average_win));
        let _ = writeln!(out, "Average loss:      {}", format_decimal(self.average_loss));
        let _ = writeln!(out, "Net PnL:           {}", format_decimal(self.net_pnl));
        let _ = writeln!(
            out,
            "Largest win/loss:  {} / {}",
            format_decimal(self.largest_win),
            format_decimal(self.largest_loss)
        );
        let _ = writeln!(
            out,
            "Streaks (W/L):     {} / {}",
            self.max_consecutive_wins, self.max_consecutive_losses
        );

        let _ = writeln!(out, "\n== Risk ==");
        let _ = writeln!(
            out,
            "Equity:            {} -> {}",
            format_decimal(self.initial_equity),
            format_decimal(self.final_equity)
        );
        let _ = writeln!(out, "Sharpe ratio:      {}", format_ratio(self.sharpe_ratio));
        let span = match (self.drawdown.start_index, self.drawdown.end_index) {
            (Some(start), Some(end)) => format!(" (points {start}..{end})"),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "Max drawdown:      {} / {:.2}%{}",
            format_decimal(self.drawdown.max_drawdown),
            self.drawdown.max_drawdown_pct,
            span
        );

        let _ = writeln!(out, "\n== By {} ==", self.timeframe);
        for (key, bucket) in &self.breakdown {
            write_bucket_row(&mut out, key, bucket);
        }

        let _ = writeln!(out, "\n== By weekday ==");
        for (day, bucket) in &self.weekday {
            write_bucket_row(&mut out, &day.to_string(), bucket);
        }

        let _ = writeln!(out, "\n== By hour ==");
        for (hour, bucket) in self.hourly.iter().filter(|(_, b)| b.trade_count > 0) {
            write_bucket_row(&mut out, &format!("{hour:02}:00"), bucket);
        }

        out
    }
}

fn write_bucket_row(out: &mut String, label: &str, bucket: &BucketStats) {
    let _ = writeln!(
        out,
        "{label:<12} trades {:>4}  pnl {:>12}  avg {:>10}  win {:>7}",
        bucket.trade_count,
        format_decimal(bucket.total_pnl),
        format_decimal(bucket.average_pnl),
        format_pct(bucket.win_rate),
    );
}
