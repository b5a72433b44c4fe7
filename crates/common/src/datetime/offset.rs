//! Day, week and month boundaries for `DateTime<FixedOffset>`.
//!
//! Boundaries are computed on the instant's local clock. The `OffsetMode`
//! chosen by the caller is applied once, in `start_of_day`, and every other
//! boundary derives from that start-of-day.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::bounds::{at_local, saturating_add, saturating_add_months, saturating_sub, NANOS_PER_DAY};
use super::naive::{days_since, end_of, weeks_to_nanos};

/// How the UTC offset of an instant is treated when computing boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMode {
    /// Keep the instant's own offset
    #[default]
    Preserve,
    /// Keep the local calendar fields but force a zero offset
    IgnoreOffset,
}

impl OffsetMode {
    /// Maps an `ignore_utc_offset` flag to a mode.
    pub fn from_ignore_flag(ignore_utc_offset: bool) -> Self {
        if ignore_utc_offset {
            Self::IgnoreOffset
        } else {
            Self::Preserve
        }
    }

    fn resolve(self, offset: FixedOffset) -> FixedOffset {
        match self {
            Self::Preserve => offset,
            Self::IgnoreOffset => Utc.fix(),
        }
    }
}

/// Boundary calculations for instants carrying a UTC offset.
///
/// Implemented for `DateTime<FixedOffset>` and its `Option`; the optional form
/// maps `None` to `None`.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Weekday};
/// use extkit_common::datetime::{OffsetDateTimeExt, OffsetMode};
///
/// let dt = DateTime::parse_from_rfc3339("2022-07-07T01:01:01+05:00").unwrap();
///
/// let kept = dt.start_of_week(Weekday::Mon, OffsetMode::Preserve);
/// assert_eq!(kept.to_rfc3339(), "2022-07-04T00:00:00+05:00");
///
/// let zeroed = dt.start_of_day(OffsetMode::IgnoreOffset);
/// assert_eq!(zeroed.to_rfc3339(), "2022-07-07T00:00:00+00:00");
/// ```
pub trait OffsetDateTimeExt: Sized {
    /// Midnight on the same local calendar date.
    fn start_of_day(self, mode: OffsetMode) -> Self;

    /// One millisecond before the next local midnight.
    fn end_of_day(self, mode: OffsetMode) -> Self;

    /// Midnight on the first day of the local month.
    fn start_of_month(self, mode: OffsetMode) -> Self;

    /// One millisecond before the first day of the next month.
    fn end_of_month(self, mode: OffsetMode) -> Self;

    /// Midnight on the most recent `first_day` (today included).
    fn start_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self;

    /// One millisecond before the week following `start_of_week`.
    fn end_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self;

    /// Move by a (possibly fractional or negative) number of weeks.
    fn add_weeks(self, weeks: f64) -> Self;
}

impl OffsetDateTimeExt for DateTime<FixedOffset> {
    fn start_of_day(self, mode: OffsetMode) -> Self {
        let midnight = self.naive_local().date().and_time(NaiveTime::MIN);
        at_local(midnight, mode.resolve(*self.offset()))
    }

    fn end_of_day(self, mode: OffsetMode) -> Self {
        end_of(saturating_add(self.start_of_day(mode), NANOS_PER_DAY))
    }

    fn start_of_month(self, mode: OffsetMode) -> Self {
        let elapsed_days = i128::from(self.day() - 1);
        saturating_sub(self.start_of_day(mode), elapsed_days * NANOS_PER_DAY)
    }

    fn end_of_month(self, mode: OffsetMode) -> Self {
        end_of(saturating_add_months(self.start_of_month(mode), 1))
    }

    fn start_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self {
        let elapsed_days = i128::from(days_since(self.weekday(), first_day));
        saturating_sub(self.start_of_day(mode), elapsed_days * NANOS_PER_DAY)
    }

    fn end_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self {
        end_of(self.start_of_week(first_day, mode).add_weeks(1.0))
    }

    fn add_weeks(self, weeks: f64) -> Self {
        saturating_add(self, weeks_to_nanos(weeks))
    }
}

impl OffsetDateTimeExt for Option<DateTime<FixedOffset>> {
    fn start_of_day(self, mode: OffsetMode) -> Self {
        self.map(|dt| dt.start_of_day(mode))
    }

    fn end_of_day(self, mode: OffsetMode) -> Self {
        self.map(|dt| dt.end_of_day(mode))
    }

    fn start_of_month(self, mode: OffsetMode) -> Self {
        self.map(|dt| dt.start_of_month(mode))
    }

    fn end_of_month(self, mode: OffsetMode) -> Self {
        self.map(|dt| dt.end_of_month(mode))
    }

    fn start_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self {
        self.map(|dt| dt.start_of_week(first_day, mode))
    }

    fn end_of_week(self, first_day: Weekday, mode: OffsetMode) -> Self {
        self.map(|dt| dt.end_of_week(first_day, mode))
    }

    fn add_weeks(self, weeks: f64) -> Self {
        self.map(|dt| dt.add_weeks(weeks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::bounds::{max_value, min_value};
    use chrono::{TimeDelta, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, mi, s)
            .unwrap()
    }

    fn fmt(dt: DateTime<FixedOffset>) -> String {
        dt.format("%d-%m-%Y %H:%M:%S%.3f").to_string()
    }

    #[test]
    fn test_start_of_day() {
        let dt = utc(2020, 1, 1, 1, 1, 1);
        assert_eq!(fmt(dt.start_of_day(OffsetMode::Preserve)), "01-01-2020 00:00:00.000");
    }

    #[test]
    fn test_end_of_day() {
        let dt = utc(2020, 1, 1, 1, 1, 1);
        assert_eq!(fmt(dt.end_of_day(OffsetMode::Preserve)), "01-01-2020 23:59:59.999");
    }

    #[test]
    fn test_start_and_end_of_month() {
        let dt = utc(2020, 1, 12, 1, 1, 1);
        assert_eq!(fmt(dt.start_of_month(OffsetMode::Preserve)), "01-01-2020 00:00:00.000");
        assert_eq!(fmt(dt.end_of_month(OffsetMode::Preserve)), "31-01-2020 23:59:59.999");
    }

    #[test]
    fn test_start_and_end_of_week() {
        let thursday = utc(2022, 7, 7, 1, 1, 1);
        assert_eq!(
            fmt(thursday.start_of_week(Weekday::Mon, OffsetMode::Preserve)),
            "04-07-2022 00:00:00.000"
        );
        let monday = utc(2022, 7, 4, 1, 1, 1);
        assert_eq!(
            fmt(monday.end_of_week(Weekday::Mon, OffsetMode::Preserve)),
            "10-07-2022 23:59:59.999"
        );
    }

    #[test]
    fn test_preserve_keeps_local_fields_and_offset() {
        let plus_ten = FixedOffset::east_opt(10 * 3600).unwrap();
        // 23:30 local on the 1st is 13:30 UTC; the local date wins.
        let dt = plus_ten.with_ymd_and_hms(2021, 5, 1, 23, 30, 0).unwrap();
        let start = dt.start_of_day(OffsetMode::Preserve);
        assert_eq!(start.offset(), &plus_ten);
        assert_eq!(fmt(start), "01-05-2021 00:00:00.000");
    }

    #[test]
    fn test_ignore_offset_threads_through_chain() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = minus_five.with_ymd_and_hms(2022, 7, 7, 22, 0, 0).unwrap();
        let zero = FixedOffset::east_opt(0).unwrap();

        let week_end = dt.end_of_week(Weekday::Mon, OffsetMode::IgnoreOffset);
        assert_eq!(week_end.offset(), &zero);
        assert_eq!(fmt(week_end), "10-07-2022 23:59:59.999");

        let month_start = dt.start_of_month(OffsetMode::IgnoreOffset);
        assert_eq!(month_start.offset(), &zero);
        assert_eq!(fmt(month_start), "01-07-2022 00:00:00.000");
    }

    #[test]
    fn test_from_ignore_flag() {
        assert_eq!(OffsetMode::from_ignore_flag(true), OffsetMode::IgnoreOffset);
        assert_eq!(OffsetMode::from_ignore_flag(false), OffsetMode::Preserve);
    }

    #[test]
    fn test_none_maps_to_none() {
        let missing: Option<DateTime<FixedOffset>> = None;
        assert_eq!(missing.start_of_day(OffsetMode::Preserve), None);
        assert_eq!(missing.end_of_day(OffsetMode::Preserve), None);
        assert_eq!(missing.start_of_month(OffsetMode::Preserve), None);
        assert_eq!(missing.end_of_month(OffsetMode::IgnoreOffset), None);
        assert_eq!(missing.start_of_week(Weekday::Mon, OffsetMode::Preserve), None);
        assert_eq!(missing.end_of_week(Weekday::Mon, OffsetMode::Preserve), None);
        assert_eq!(missing.add_weeks(2.0), None);
    }

    #[test]
    fn test_add_weeks_exact() {
        let dt = utc(2022, 1, 1, 12, 0, 0);
        for count in 1..52 {
            let moved = dt.add_weeks(f64::from(count));
            assert_eq!(moved - dt, TimeDelta::days(i64::from(count) * 7));
        }
    }

    #[test]
    fn test_week_window_is_seven_days() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = plus_two.with_ymd_and_hms(2024, 2, 29, 6, 45, 0).unwrap();
        for first in [Weekday::Sun, Weekday::Wed, Weekday::Sat] {
            let start = dt.start_of_week(first, OffsetMode::Preserve);
            let end = dt.end_of_week(first, OffsetMode::Preserve);
            assert!(start <= dt && dt <= end);
            assert_eq!(end - start, TimeDelta::days(7) - TimeDelta::milliseconds(1));
        }
    }

    #[test]
    fn test_end_boundaries_saturate_at_max() {
        let zero = FixedOffset::east_opt(0).unwrap();
        for offset in [
            FixedOffset::east_opt(5 * 3600).unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap(),
        ] {
            let last_day = offset.with_ymd_and_hms(9999, 12, 31, 10, 0, 0).unwrap();
            for (mode, expected_offset) in [
                (OffsetMode::Preserve, offset),
                (OffsetMode::IgnoreOffset, zero),
            ] {
                let ends = [
                    last_day.end_of_day(mode),
                    last_day.end_of_month(mode),
                    last_day.end_of_week(Weekday::Sun, mode),
                ];
                for end in ends {
                    assert_eq!(end.naive_local(), max_value());
                    assert_eq!(end.offset(), &expected_offset);
                }
            }
        }
    }

    #[test]
    fn test_start_of_week_saturates_at_min() {
        // 0001-01-01 is a Monday; a Sunday week start would precede the range.
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let first_day = plus_three.with_ymd_and_hms(1, 1, 1, 10, 0, 0).unwrap();

        let kept = first_day.start_of_week(Weekday::Sun, OffsetMode::Preserve);
        assert_eq!(kept.naive_local(), min_value());
        assert_eq!(kept.offset(), &plus_three);

        let zeroed = first_day.start_of_week(Weekday::Sun, OffsetMode::IgnoreOffset);
        assert_eq!(zeroed.naive_local(), min_value());
        assert_eq!(zeroed.offset(), &FixedOffset::east_opt(0).unwrap());
    }
}
