//! Temporal grouping of trades.
//!
//! Every bucket is derived from the naive `traded_at` components exactly as
//! recorded. No time-zone conversion happens anywhere, so a trade closed at
//! 23:30 local time always lands on that local calendar day.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDateTime, Timelike, Weekday};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use super::constants::{DAYS_PER_WEEK, HOURS_PER_DAY};
use super::error::StatsError;
use super::types::{
    BucketStats, DailyPnl, HourlyStats, Timeframe, TradeGroups, TradeRecord, WeekdayStats,
};

/// Weekdays in bucket order, indexed by `num_days_from_sunday`.
const WEEKDAYS: [Weekday; DAYS_PER_WEEK as usize] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

impl Timeframe {
    /// Canonical bucket key for a timestamp.
    ///
    /// - `Day`: `YYYY-MM-DD`
    /// - `Week`: `YYYY-MM-DD` of the Sunday on or before the timestamp
    /// - `Month`: `YYYY-MM`
    pub fn bucket_key(self, at: NaiveDateTime) -> String {
        let date = at.date();
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => {
                let back = Days::new(u64::from(date.weekday().num_days_from_sunday()));
                date.checked_sub_days(back)
                    .unwrap_or(date)
                    .format("%Y-%m-%d")
                    .to_string()
            }
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }
}

/// Partition trades into calendar buckets.
///
/// Keys appear in the order their first trade appears; trades keep their
/// relative order inside a bucket.
pub fn group_by(trades: &[TradeRecord], timeframe: Timeframe) -> TradeGroups<'_> {
    let mut groups = TradeGroups::new();
    for trade in trades {
        groups
            .entry(timeframe.bucket_key(trade.traded_at))
            .or_default()
            .push(trade);
    }
    groups
}

/// [`group_by`] with a timeframe given by name (`day`, `week` or `month`).
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] for any other timeframe name.
pub fn group_by_timeframe<'a>(
    trades: &'a [TradeRecord],
    timeframe: &str,
) -> Result<TradeGroups<'a>, StatsError> {
    let timeframe: Timeframe = timeframe.parse()?;
    Ok(group_by(trades, timeframe))
}

/// Per-day PnL in ascending date order with a running cumulative total.
pub fn calculate_daily_pnl(trades: &[TradeRecord]) -> Vec<DailyPnl> {
    let mut by_day: BTreeMap<_, Decimal> = BTreeMap::new();
    for trade in trades {
        let day_pnl = by_day.entry(trade.traded_at.date()).or_default();
        *day_pnl = day_pnl.saturating_add(trade.pnl);
    }

    let mut cumulative_pnl = Decimal::ZERO;
    by_day
        .into_iter()
        .map(|(date, pnl)| {
            cumulative_pnl = cumulative_pnl.saturating_add(pnl);
            DailyPnl {
                date,
                pnl,
                cumulative_pnl,
            }
        })
        .collect()
}

/// Statistics for all seven weekdays, Sunday first.
///
/// Weekdays without trades are present with zeroed statistics.
pub fn calculate_weekday_stats(trades: &[TradeRecord]) -> WeekdayStats {
    let mut buckets = [BucketAccumulator::default(); DAYS_PER_WEEK as usize];
    for trade in trades {
        buckets[trade.traded_at.weekday().num_days_from_sunday() as usize].add(trade);
    }

    WEEKDAYS
        .into_iter()
        .zip(buckets)
        .map(|(day, bucket)| (day, bucket.finish()))
        .collect()
}

/// Statistics for all 24 hours of the day, 0 through 23.
///
/// Hours without trades are present with zeroed statistics.
pub fn calculate_hourly_stats(trades: &[TradeRecord]) -> HourlyStats {
    let mut buckets = [BucketAccumulator::default(); HOURS_PER_DAY as usize];
    for trade in trades {
        buckets[trade.traded_at.hour() as usize].add(trade);
    }

    (0..HOURS_PER_DAY)
        .zip(buckets)
        .map(|(hour, bucket)| (hour, bucket.finish()))
        .collect()
}

/// Aggregate statistics over any set of trades.
pub fn bucket_stats<'a, I>(trades: I) -> BucketStats
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    trades
        .into_iter()
        .fold(BucketAccumulator::default(), |mut acc, trade| {
            acc.add(trade);
            acc
        })
        .finish()
}

/// Bucket statistics per calendar period, in chronological key order.
pub fn timeframe_breakdown(
    trades: &[TradeRecord],
    timeframe: Timeframe,
) -> IndexMap<String, BucketStats> {
    let mut breakdown: IndexMap<String, BucketStats> = group_by(trades, timeframe)
        .into_iter()
        .map(|(key, bucket)| (key, bucket_stats(bucket)))
        .collect();
    breakdown.sort_keys();
    breakdown
}

#[derive(Debug, Clone, Copy, Default)]
struct BucketAccumulator {
    total_pnl: Decimal,
    trade_count: u64,
    wins: u64,
}

impl BucketAccumulator {
    fn add(&mut self, trade: &TradeRecord) {
        self.total_pnl = self.total_pnl.saturating_add(trade.pnl);
        self.trade_count += 1;
        if trade.is_winner() {
            self.wins += 1;
        }
    }

    fn finish(self) -> BucketStats {
        if self.trade_count == 0 {
            return BucketStats::default();
        }

        BucketStats {
            total_pnl: self.total_pnl,
            trade_count: self.trade_count,
            average_pnl: self.total_pnl / Decimal::from(self.trade_count),
            win_rate: self.wins as f64 / self.trade_count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{at, trade_at};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(Timeframe::Day, "2024-03-14 09:30", "2024-03-14" ; "day")]
    #[test_case(Timeframe::Week, "2024-03-14 09:30", "2024-03-10" ; "thursday maps to previous sunday")]
    #[test_case(Timeframe::Week, "2024-03-10 23:59", "2024-03-10" ; "sunday maps to itself")]
    #[test_case(Timeframe::Week, "2024-03-02 12:00", "2024-02-25" ; "saturday crosses month boundary")]
    #[test_case(Timeframe::Week, "2025-01-01 08:00", "2024-12-29" ; "week crosses year boundary")]
    #[test_case(Timeframe::Month, "2024-03-14 09:30", "2024-03" ; "month")]
    fn test_bucket_key(timeframe: Timeframe, timestamp: &str, expected: &str) {
        assert_eq!(timeframe.bucket_key(at(timestamp)), expected);
    }

    #[test]
    fn test_group_by_day() {
        let trades = vec![
            trade_at(dec!(100), "2024-01-15 10:00"),
            trade_at(dec!(-50), "2024-01-16 11:00"),
            trade_at(dec!(25), "2024-01-15 15:00"),
        ];

        let groups = group_by_timeframe(&trades, "day").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["2024-01-15"].len(), 2);
        assert_eq!(groups["2024-01-16"].len(), 1);

        // Stable within a bucket
        assert_eq!(groups["2024-01-15"][0].pnl, dec!(100));
        assert_eq!(groups["2024-01-15"][1].pnl, dec!(25));
    }

    #[test]
    fn test_group_keys_follow_first_seen_order() {
        let trades = vec![
            trade_at(dec!(1), "2024-05-02 10:00"),
            trade_at(dec!(1), "2024-03-02 10:00"),
            trade_at(dec!(1), "2024-05-20 10:00"),
        ];

        let groups = group_by(&trades, Timeframe::Month);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2024-05", "2024-03"]);
    }

    #[test]
    fn test_group_by_invalid_timeframe() {
        let trades = vec![trade_at(dec!(1), "2024-05-02 10:00")];
        let Err(err) = group_by_timeframe(&trades, "year") else {
            panic!("expected InvalidArgument for unknown timeframe");
        };
        assert!(matches!(
            err,
            StatsError::InvalidArgument { name: "timeframe", ref value, .. } if value == "year"
        ));
    }

    #[test]
    fn test_daily_pnl_sorted_with_running_total() {
        let trades = vec![
            trade_at(dec!(80), "2024-01-17 10:00"),
            trade_at(dec!(100), "2024-01-15 10:00"),
            trade_at(dec!(-30), "2024-01-16 10:00"),
            trade_at(dec!(50), "2024-01-15 14:00"),
        ];

        let daily = calculate_daily_pnl(&trades);
        let dates: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-15", "2024-01-16", "2024-01-17"]);

        let pnl: Vec<Decimal> = daily.iter().map(|d| d.pnl).collect();
        assert_eq!(pnl, [dec!(150), dec!(-30), dec!(80)]);

        let cumulative: Vec<Decimal> = daily.iter().map(|d| d.cumulative_pnl).collect();
        assert_eq!(cumulative, [dec!(150), dec!(120), dec!(200)]);

        assert!(calculate_daily_pnl(&[]).is_empty());
    }

    #[test]
    fn test_bucket_totals_saturate_near_range_limit() {
        let big = dec!(70000000000000000000000000000);
        let trades = vec![
            trade_at(big, "2024-01-15 10:00"),
            trade_at(big, "2024-01-15 11:00"),
            trade_at(big, "2024-01-16 10:00"),
        ];

        let daily = calculate_daily_pnl(&trades);
        assert_eq!(daily[0].pnl, Decimal::MAX);
        assert_eq!(daily[1].cumulative_pnl, Decimal::MAX);

        let monday = &calculate_weekday_stats(&trades)[&Weekday::Mon];
        assert_eq!(monday.total_pnl, Decimal::MAX);
        assert_eq!(monday.trade_count, 2);
        assert_eq!(calculate_hourly_stats(&trades)[&10].trade_count, 2);
    }

    #[test]
    fn test_weekday_stats() {
        // 2024-01-15 is a Monday
        let trades = vec![
            trade_at(dec!(100), "2024-01-15 10:00"),
            trade_at(dec!(-40), "2024-01-15 11:00"),
            trade_at(dec!(30), "2024-01-19 09:00"),
        ];

        let stats = calculate_weekday_stats(&trades);
        assert_eq!(stats.len(), 7);
        assert_eq!(stats.get_index(0).map(|(d, _)| *d), Some(Weekday::Sun));
        assert_eq!(stats.get_index(6).map(|(d, _)| *d), Some(Weekday::Sat));

        let monday = &stats[&Weekday::Mon];
        assert_eq!(monday.total_pnl, dec!(60));
        assert_eq!(monday.trade_count, 2);
        assert_eq!(monday.average_pnl, dec!(30));
        assert_eq!(monday.win_rate, 0.5);

        assert_eq!(stats[&Weekday::Fri].trade_count, 1);
        assert_eq!(stats[&Weekday::Sun], BucketStats::default());
    }

    #[test]
    fn test_hourly_stats() {
        let trades = vec![
            trade_at(dec!(10), "2024-01-15 00:05"),
            trade_at(dec!(-20), "2024-01-16 23:59"),
            trade_at(dec!(30), "2024-01-17 23:00"),
        ];

        let stats = calculate_hourly_stats(&trades);
        assert_eq!(stats.len(), 24);
        assert_eq!(stats.keys().copied().collect::<Vec<_>>(), (0..24u32).collect::<Vec<_>>());

        assert_eq!(stats[&0u32].total_pnl, dec!(10));
        assert_eq!(stats[&23u32].trade_count, 2);
        assert_eq!(stats[&23u32].average_pnl, dec!(5));
        assert_eq!(stats[&23u32].win_rate, 0.5);
        assert_eq!(stats[&12u32], BucketStats::default());

        let empty = calculate_hourly_stats(&[]);
        assert_eq!(empty.len(), 24);
        assert!(empty.values().all(|b| b.trade_count == 0));
    }

    #[test]
    fn test_timeframe_breakdown_is_chronological() {
        let trades = vec![
            trade_at(dec!(10), "2024-05-02 10:00"),
            trade_at(dec!(-4), "2024-03-02 10:00"),
            trade_at(dec!(6), "2024-05-20 10:00"),
        ];

        let breakdown = timeframe_breakdown(&trades, Timeframe::Month);
        let keys: Vec<&str> = breakdown.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2024-03", "2024-05"]);
        assert_eq!(breakdown["2024-05"].total_pnl, dec!(16));
        assert_eq!(breakdown["2024-05"].win_rate, 1.0);
    }
}
