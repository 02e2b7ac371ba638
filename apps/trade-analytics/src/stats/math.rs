//! Statistical math utilities for trading statistics.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Calculate mean of a slice of floats.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N - 1).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Sum that clamps at `Decimal::MAX`/`Decimal::MIN` instead of panicking.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |sum, v| sum.saturating_add(v))
}

/// Mean of a slice of decimals, zero when empty.
///
/// The running sum saturates at the `Decimal` range.
pub fn decimal_mean<'a, I>(values: I) -> Decimal
where
    I: IntoIterator<Item = &'a Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), v| {
            (sum.saturating_add(*v), count + 1)
        });

    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

/// Lossy conversion to `f64` for ratio outputs.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `numerator / denominator` as `f64`.
///
/// Divides in `Decimal` when the quotient fits, otherwise in `f64`.
pub fn decimal_ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    numerator
        .checked_div(denominator)
        .map_or_else(|| to_f64(numerator) / to_f64(denominator), to_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10.0, 20.0, 30.0, 40.0]), Some(25.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_population_std_dev() {
        // Population variance of 2,4,4,4,5,5,7,9 is exactly 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(population_std_dev(&values), Some(2.0));
        assert_eq!(population_std_dev(&[3.0, 3.0, 3.0]), Some(0.0));
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn test_decimal_mean() {
        let values = [dec!(100), dec!(-50), dec!(200), dec!(-30), dec!(80)];
        assert_eq!(decimal_mean(&values), dec!(60));
        let empty: [Decimal; 0] = [];
        assert_eq!(decimal_mean(&empty), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_mean_saturates_near_range_limit() {
        let values = [
            dec!(70000000000000000000000000000),
            dec!(70000000000000000000000000000),
        ];
        let avg = decimal_mean(&values);
        assert!(avg > Decimal::ZERO);
        assert_eq!(avg, Decimal::MAX / dec!(2));
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([dec!(1.5), dec!(-0.5), dec!(2)]), dec!(3));
        assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
        assert_eq!(saturating_sum(std::iter::empty::<Decimal>()), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_ratio_falls_back_to_f64_on_overflow() {
        assert_eq!(decimal_ratio(dec!(300), dec!(80)), 3.75);
        let huge = decimal_ratio(dec!(7000000000000000000000000000), dec!(0.001));
        assert!(huge.is_finite());
        assert!(huge > 6.9e30 && huge < 7.1e30);
    }
}
