//! Representable range and saturating arithmetic for instants.
//!
//! Both instant types are measured in "ticks": nanoseconds of local clock time
//! since 1970-01-01T00:00:00, held in an `i128` so that no addition in this
//! crate can overflow. Results outside `0001-01-01T00:00:00` ..=
//! `9999-12-31T23:59:59.999999999` saturate to the nearest bound.

use chrono::{DateTime, FixedOffset, Months, NaiveDateTime, TimeDelta};

pub(crate) const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub(crate) const NANOS_PER_MILLI: i128 = 1_000_000;
pub(crate) const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

/// Ticks of 0001-01-01T00:00:00.
pub(crate) const MIN_TICKS: i128 = -62_135_596_800 * NANOS_PER_SECOND;
/// Ticks of 9999-12-31T23:59:59.999999999.
pub(crate) const MAX_TICKS: i128 = 253_402_300_800 * NANOS_PER_SECOND - 1;

/// Earliest representable instant (`0001-01-01T00:00:00`).
pub fn min_value() -> NaiveDateTime {
    naive_from_ticks(MIN_TICKS)
}

/// Latest representable instant (`9999-12-31T23:59:59.999999999`).
pub fn max_value() -> NaiveDateTime {
    naive_from_ticks(MAX_TICKS)
}

/// An instant that can be moved along its local clock without changing offset.
///
/// Lives in a private module, so it cannot be named or implemented downstream.
pub trait TickClock: Copy {
    /// Local clock nanoseconds since the Unix epoch.
    fn ticks(&self) -> i128;

    /// Position on the UTC timeline, used to measure distances between instants.
    fn utc_ticks(&self) -> i128;

    /// Rebuild the instant at `ticks` local clock time, keeping any offset.
    /// `ticks` must already be inside `MIN_TICKS..=MAX_TICKS`.
    fn with_ticks(&self, ticks: i128) -> Self;
}

impl TickClock for NaiveDateTime {
    fn ticks(&self) -> i128 {
        naive_ticks(self)
    }

    fn utc_ticks(&self) -> i128 {
        naive_ticks(self)
    }

    fn with_ticks(&self, ticks: i128) -> Self {
        naive_from_ticks(ticks)
    }
}

impl TickClock for DateTime<FixedOffset> {
    fn ticks(&self) -> i128 {
        naive_ticks(&self.naive_local())
    }

    fn utc_ticks(&self) -> i128 {
        naive_ticks(&self.naive_utc())
    }

    fn with_ticks(&self, ticks: i128) -> Self {
        at_local(naive_from_ticks(ticks), *self.offset())
    }
}

/// Attach `offset` to a local clock time.
pub(crate) fn at_local(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    let utc = local.checked_sub_signed(shift).unwrap_or(local);
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Add `delta` nanoseconds, saturating at the representable bounds.
pub(crate) fn saturating_add<T: TickClock>(instant: T, delta: i128) -> T {
    let target = instant.ticks().saturating_add(delta);
    instant.with_ticks(target.clamp(MIN_TICKS, MAX_TICKS))
}

/// Subtract `delta` nanoseconds, saturating at the representable bounds.
pub(crate) fn saturating_sub<T: TickClock>(instant: T, delta: i128) -> T {
    let target = instant.ticks().saturating_sub(delta);
    instant.with_ticks(target.clamp(MIN_TICKS, MAX_TICKS))
}

/// Add calendar months, saturating at the representable bounds.
pub(crate) fn saturating_add_months<T: TickClock>(instant: T, months: u32) -> T {
    let local = naive_from_ticks(instant.ticks());
    match local.checked_add_months(Months::new(months)) {
        Some(moved) => instant.with_ticks(naive_ticks(&moved).clamp(MIN_TICKS, MAX_TICKS)),
        None => instant.with_ticks(MAX_TICKS),
    }
}

/// `true` when the instant sits on the latest representable tick.
pub(crate) fn is_max<T: TickClock>(instant: &T) -> bool {
    instant.ticks() >= MAX_TICKS
}

/// Convert a `TimeDelta` to nanoseconds without the 292-year limit of
/// `TimeDelta::num_nanoseconds`.
pub(crate) fn delta_nanos(delta: TimeDelta) -> i128 {
    let seconds = i128::from(delta.num_seconds());
    let remainder = delta - TimeDelta::seconds(delta.num_seconds());
    seconds * NANOS_PER_SECOND + i128::from(remainder.num_nanoseconds().unwrap_or(0))
}

fn naive_ticks(naive: &NaiveDateTime) -> i128 {
    let utc = naive.and_utc();
    i128::from(utc.timestamp()) * NANOS_PER_SECOND + i128::from(utc.timestamp_subsec_nanos())
}

fn naive_from_ticks(ticks: i128) -> NaiveDateTime {
    let clamped = ticks.clamp(MIN_TICKS, MAX_TICKS);
    let seconds = clamped.div_euclid(NANOS_PER_SECOND) as i64;
    let nanos = clamped.rem_euclid(NANOS_PER_SECOND) as u32;
    DateTime::from_timestamp(seconds, nanos)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    #[test]
    fn test_bounds_match_calendar_range() {
        let min = min_value();
        assert_eq!((min.year(), min.month(), min.day()), (1, 1, 1));
        assert_eq!(min.hour(), 0);

        let max = max_value();
        assert_eq!((max.year(), max.month(), max.day()), (9999, 12, 31));
        assert_eq!((max.hour(), max.minute(), max.second()), (23, 59, 59));
        assert_eq!(max.nanosecond(), 999_999_999);
    }

    #[test]
    fn test_ticks_round_trip_naive() {
        let dt = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_milli_opt(13, 14, 15, 678)
            .unwrap();
        assert_eq!(dt.with_ticks(dt.ticks()), dt);
    }

    #[test]
    fn test_saturating_add_clamps_to_max() {
        let near_end = NaiveDate::from_ymd_opt(9999, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let moved = saturating_add(near_end, NANOS_PER_DAY);
        assert_eq!(moved, max_value());
        assert!(is_max(&moved));
    }

    #[test]
    fn test_saturating_sub_clamps_to_min() {
        let near_start = NaiveDate::from_ymd_opt(1, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(saturating_sub(near_start, 10 * NANOS_PER_DAY), min_value());
    }

    #[test]
    fn test_saturating_add_months_past_end() {
        let december = NaiveDate::from_ymd_opt(9999, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(saturating_add_months(december, 1), max_value());
    }

    #[test]
    fn test_offset_with_ticks_keeps_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let local = NaiveDate::from_ymd_opt(2022, 7, 4)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        let dt = at_local(local, offset);
        assert_eq!(dt.naive_local(), local);

        let moved = saturating_add(dt, NANOS_PER_DAY);
        assert_eq!(moved.offset(), &offset);
        assert_eq!(moved.naive_local(), local + TimeDelta::days(1));
        assert_eq!(moved.utc_ticks() - dt.utc_ticks(), NANOS_PER_DAY);
    }

    #[test]
    fn test_delta_nanos_handles_negative_and_fractional() {
        assert_eq!(delta_nanos(TimeDelta::milliseconds(-1)), -NANOS_PER_MILLI);
        assert_eq!(
            delta_nanos(TimeDelta::days(200_000)),
            200_000 * NANOS_PER_DAY
        );
    }
}
