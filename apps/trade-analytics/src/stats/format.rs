//! Formatting utilities for statistics display.
//!
//! The engine returns raw sentinels (`f64::INFINITY`, zero); these helpers
//! turn them into table-ready strings.

use rust_decimal::Decimal;

use super::constants::HUNDRED;

/// Format a ratio with 2 decimal places, `∞` for the infinite sentinel.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        "N/A".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "∞" } else { "-∞" }.to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Format a fraction as percentage string.
#[must_use]
pub fn format_pct(fraction: f64) -> String {
    if fraction.is_finite() {
        format!("{:.2}%", fraction * HUNDRED)
    } else {
        format_ratio(fraction)
    }
}

/// Format a decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{value:.2}")
}
