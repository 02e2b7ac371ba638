//! Trade-level aggregators.
//!
//! Win rate and profit factor are ratios and return `f64` so that the
//! no-loss sentinel (`f64::INFINITY`) is representable. Money-valued
//! aggregates stay in [`Decimal`].

use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::AVERAGE_LOSS_DP;
use super::math::{decimal_mean, decimal_ratio, saturating_sum};
use super::types::TradeRecord;

/// Fraction of trades with strictly positive PnL.
///
/// Break-even trades count toward the total but not the wins. Returns 0 for
/// no trades.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    wins as f64 / trades.len() as f64
}

/// Gross profit divided by the absolute gross loss.
///
/// ## Special Cases
///
/// - No trades: `0.0`
/// - Gross loss of zero: `f64::INFINITY`, even when gross profit is also
///   zero (an all-break-even journal reports infinity)
/// - Losses but no profit: `0.0`
pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }

    let loss = gross_loss(trades);
    if loss.is_zero() {
        return f64::INFINITY;
    }

    decimal_ratio(gross_profit(trades), loss)
}

/// Average PnL per trade, zero for no trades.
pub fn expectancy(trades: &[TradeRecord]) -> Decimal {
    decimal_mean(trades.iter().map(|t| &t.pnl))
}

/// Mean PnL of winning trades, zero without winners. Not rounded.
pub fn average_win(trades: &[TradeRecord]) -> Decimal {
    decimal_mean(trades.iter().filter(|t| t.is_winner()).map(|t| &t.pnl))
}

/// Mean PnL of losing trades (negative), rounded to 2 decimal places.
///
/// Zero without losers. Midpoints round away from zero.
pub fn average_loss(trades: &[TradeRecord]) -> Decimal {
    decimal_mean(trades.iter().filter(|t| t.is_loser()).map(|t| &t.pnl))
        .round_dp_with_strategy(AVERAGE_LOSS_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of winning PnL.
pub fn gross_profit(trades: &[TradeRecord]) -> Decimal {
    saturating_sum(trades.iter().filter(|t| t.is_winner()).map(|t| t.pnl))
}

/// Absolute sum of losing PnL.
pub fn gross_loss(trades: &[TradeRecord]) -> Decimal {
    saturating_sum(trades.iter().filter(|t| t.is_loser()).map(|t| t.pnl)).abs()
}

/// Sum of all PnL, clamped to the `Decimal` range.
pub fn net_pnl(trades: &[TradeRecord]) -> Decimal {
    saturating_sum(trades.iter().map(|t| t.pnl))
}

/// Best single trade, zero without winners.
pub fn largest_win(trades: &[TradeRecord]) -> Decimal {
    trades
        .iter()
        .map(|t| t.pnl)
        .filter(|pnl| *pnl > Decimal::ZERO)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Worst single trade (negative), zero without losers.
pub fn largest_loss(trades: &[TradeRecord]) -> Decimal {
    trades
        .iter()
        .map(|t| t.pnl)
        .filter(|pnl| *pnl < Decimal::ZERO)
        .min()
        .unwrap_or(Decimal::ZERO)
}

/// Longest runs of consecutive winners and losers, in input order.
///
/// A break-even trade neither extends nor breaks a run.
pub fn consecutive_streaks(trades: &[TradeRecord]) -> (u64, u64) {
    let mut max_wins = 0u64;
    let mut max_losses = 0u64;
    let mut current_wins = 0u64;
    let mut current_losses = 0u64;

    for trade in trades {
        if trade.is_winner() {
            current_wins += 1;
            current_losses = 0;
            max_wins = max_wins.max(current_wins);
        } else if trade.is_loser() {
            current_losses += 1;
            current_wins = 0;
            max_losses = max_losses.max(current_losses);
        }
    }

    (max_wins, max_losses)
}
