//! Risk-adjusted return and equity-curve analysis.

use rust_decimal::Decimal;

use super::constants::{HUNDRED, TRADING_DAYS_PER_YEAR};
use super::math::{decimal_ratio, mean, population_std_dev, to_f64};
use super::types::{DailyPnl, DrawdownResult};

/// Annualized Sharpe ratio of a per-period return series.
///
/// `Sharpe = (mean - rf / 252) / σ × √252`, where σ is the population
/// standard deviation of `returns`.
///
/// ## Special Cases
///
/// - Empty series: `0.0`
/// - Zero deviation: `f64::INFINITY`, whatever the sign of the excess return
pub fn sharpe_ratio(returns: &[f64], annual_risk_free_rate: f64) -> f64 {
    let (Some(avg), Some(std)) = (mean(returns), population_std_dev(returns)) else {
        return 0.0;
    };

    if std == 0.0 {
        return f64::INFINITY;
    }

    let excess_return = avg - annual_risk_free_rate / TRADING_DAYS_PER_YEAR;
    excess_return / std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Largest peak-to-trough decline of an equity curve.
///
/// The curve is scanned once in the given order. Only a strictly larger
/// decline replaces the recorded one, so the earliest of equal drawdowns
/// is reported. A curve that never falls below its running peak reports a
/// zero drawdown with no indices.
pub fn max_drawdown(equity_curve: &[Decimal]) -> DrawdownResult {
    let mut result = DrawdownResult::default();
    let Some(&first) = equity_curve.first() else {
        return result;
    };

    let mut peak = first;
    let mut peak_idx = 0usize;

    for (idx, &value) in equity_curve.iter().enumerate() {
        if value > peak {
            peak = value;
            peak_idx = idx;
        } else if value < peak {
            let drawdown = peak.saturating_sub(value);
            if drawdown > result.max_drawdown {
                result.max_drawdown = drawdown;
                result.max_drawdown_pct = to_f64(drawdown) / to_f64(peak) * HUNDRED;
                result.start_index = Some(peak_idx);
                result.end_index = Some(idx);
            }
        }
    }

    result
}

/// Equity curve from a starting balance and a daily PnL series.
///
/// The first point is `initial_equity`; each day adds one point at
/// `initial_equity + cumulative_pnl`.
pub fn equity_curve(initial_equity: Decimal, daily: &[DailyPnl]) -> Vec<Decimal> {
    std::iter::once(initial_equity)
        .chain(
            daily
                .iter()
                .map(|d| initial_equity.saturating_add(d.cumulative_pnl)),
        )
        .collect()
}

/// Simple returns between consecutive equity points.
///
/// Steps whose starting equity is not positive are skipped.
pub fn period_returns(equity_curve: &[Decimal]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .filter(|w| w[0] > Decimal::ZERO)
        .map(|w| decimal_ratio(w[1].saturating_sub(w[0]), w[0]))
        .collect()
}
