//! Day, week and month boundaries for `NaiveDateTime`.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

use super::bounds::{
    is_max, saturating_add, saturating_add_months, saturating_sub, NANOS_PER_DAY,
    NANOS_PER_MILLI,
};

/// Boundary calculations for instants without a UTC offset.
///
/// Implemented for `NaiveDateTime` and `Option<NaiveDateTime>`; the optional
/// form maps `None` to `None`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use extkit_common::datetime::NaiveDateTimeExt;
///
/// let dt = NaiveDate::from_ymd_opt(2022, 7, 7).unwrap().and_hms_opt(1, 1, 1).unwrap();
/// let start = dt.start_of_week(Weekday::Mon);
/// assert_eq!(start.to_string(), "2022-07-04 00:00:00");
///
/// let missing: Option<chrono::NaiveDateTime> = None;
/// assert_eq!(missing.end_of_day(), None);
/// ```
pub trait NaiveDateTimeExt: Sized {
    /// Midnight on the same calendar date.
    fn start_of_day(self) -> Self;

    /// One millisecond before the next midnight.
    fn end_of_day(self) -> Self;

    /// Midnight on the first day of the month.
    fn start_of_month(self) -> Self;

    /// One millisecond before the first day of the next month.
    fn end_of_month(self) -> Self;

    /// Midnight on the most recent `first_day` (today included).
    fn start_of_week(self, first_day: Weekday) -> Self;

    /// One millisecond before the week following `start_of_week`.
    fn end_of_week(self, first_day: Weekday) -> Self;

    /// Move by a (possibly fractional or negative) number of weeks.
    fn add_weeks(self, weeks: f64) -> Self;
}

impl NaiveDateTimeExt for NaiveDateTime {
    fn start_of_day(self) -> Self {
        self.date().and_time(NaiveTime::MIN)
    }

    fn end_of_day(self) -> Self {
        end_of(saturating_add(self.start_of_day(), NANOS_PER_DAY))
    }

    fn start_of_month(self) -> Self {
        let elapsed_days = i128::from(self.day() - 1);
        saturating_sub(self.start_of_day(), elapsed_days * NANOS_PER_DAY)
    }

    fn end_of_month(self) -> Self {
        end_of(saturating_add_months(self.start_of_month(), 1))
    }

    fn start_of_week(self, first_day: Weekday) -> Self {
        let elapsed_days = i128::from(days_since(self.weekday(), first_day));
        saturating_sub(self.start_of_day(), elapsed_days * NANOS_PER_DAY)
    }

    fn end_of_week(self, first_day: Weekday) -> Self {
        end_of(self.start_of_week(first_day).add_weeks(1.0))
    }

    fn add_weeks(self, weeks: f64) -> Self {
        saturating_add(self, weeks_to_nanos(weeks))
    }
}

impl NaiveDateTimeExt for Option<NaiveDateTime> {
    fn start_of_day(self) -> Self {
        self.map(NaiveDateTimeExt::start_of_day)
    }

    fn end_of_day(self) -> Self {
        self.map(NaiveDateTimeExt::end_of_day)
    }

    fn start_of_month(self) -> Self {
        self.map(NaiveDateTimeExt::start_of_month)
    }

    fn end_of_month(self) -> Self {
        self.map(NaiveDateTimeExt::end_of_month)
    }

    fn start_of_week(self, first_day: Weekday) -> Self {
        self.map(|dt| dt.start_of_week(first_day))
    }

    fn end_of_week(self, first_day: Weekday) -> Self {
        self.map(|dt| dt.end_of_week(first_day))
    }

    fn add_weeks(self, weeks: f64) -> Self {
        self.map(|dt| dt.add_weeks(weeks))
    }
}

/// Days between `first_day` and `day`, walking forward (0..=6).
pub(crate) fn days_since(day: Weekday, first_day: Weekday) -> u32 {
    (day.num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7
}

/// Weeks to nanoseconds at millisecond resolution.
pub(crate) fn weeks_to_nanos(weeks: f64) -> i128 {
    let millis = (weeks * 7.0 * 86_400_000.0).round() as i64;
    i128::from(millis) * NANOS_PER_MILLI
}

/// Step back one millisecond from an exclusive upper boundary, unless the
/// boundary already saturated to the latest instant.
pub(crate) fn end_of<T: super::bounds::TickClock>(exclusive: T) -> T {
    if is_max(&exclusive) {
        exclusive
    } else {
        saturating_sub(exclusive, NANOS_PER_MILLI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::bounds::max_value;
    use chrono::{NaiveDate, TimeDelta};

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn fmt(dt: NaiveDateTime) -> String {
        dt.format("%d-%m-%Y %H:%M:%S%.3f").to_string()
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(fmt(at(2020, 1, 1, 1, 1, 1).start_of_day()), "01-01-2020 00:00:00.000");
    }

    #[test]
    fn test_end_of_day() {
        assert_eq!(fmt(at(2020, 1, 1, 1, 1, 1).end_of_day()), "01-01-2020 23:59:59.999");
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(fmt(at(2020, 1, 12, 1, 1, 1).start_of_month()), "01-01-2020 00:00:00.000");
    }

    #[test]
    fn test_end_of_month() {
        assert_eq!(fmt(at(2020, 1, 1, 1, 1, 1).end_of_month()), "31-01-2020 23:59:59.999");
        assert_eq!(fmt(at(2020, 2, 10, 8, 0, 0).end_of_month()), "29-02-2020 23:59:59.999");
    }

    #[test]
    fn test_start_of_week() {
        assert_eq!(
            fmt(at(2022, 7, 7, 1, 1, 1).start_of_week(Weekday::Mon)),
            "04-07-2022 00:00:00.000"
        );
        // 2022-07-07 is a Thursday; the Sunday before is 2022-07-03.
        assert_eq!(
            fmt(at(2022, 7, 7, 1, 1, 1).start_of_week(Weekday::Sun)),
            "03-07-2022 00:00:00.000"
        );
    }

    #[test]
    fn test_end_of_week() {
        assert_eq!(
            fmt(at(2022, 7, 4, 1, 1, 1).end_of_week(Weekday::Mon)),
            "10-07-2022 23:59:59.999"
        );
    }

    #[test]
    fn test_none_maps_to_none() {
        let missing: Option<NaiveDateTime> = None;
        assert_eq!(missing.start_of_day(), None);
        assert_eq!(missing.end_of_day(), None);
        assert_eq!(missing.start_of_month(), None);
        assert_eq!(missing.end_of_month(), None);
        assert_eq!(missing.start_of_week(Weekday::Mon), None);
        assert_eq!(missing.end_of_week(Weekday::Mon), None);
        assert_eq!(missing.add_weeks(1.0), None);
    }

    #[test]
    fn test_some_delegates() {
        let dt = Some(at(2020, 1, 1, 1, 1, 1));
        assert_eq!(dt.start_of_day(), Some(at(2020, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_add_weeks() {
        let dt = at(2022, 7, 4, 1, 1, 1);
        assert_eq!(dt.add_weeks(1.0), dt + TimeDelta::days(7));
        assert_eq!(dt.add_weeks(-2.0), dt - TimeDelta::days(14));
        assert_eq!(dt.add_weeks(0.5), dt + TimeDelta::hours(84));
    }

    #[test]
    fn test_day_window_contains_instant() {
        let mut dt = at(2021, 3, 14, 0, 0, 0);
        for _ in 0..200 {
            let start = dt.start_of_day();
            assert!(start <= dt);
            assert!(dt < start + TimeDelta::days(1));
            assert_eq!(
                dt.end_of_day(),
                start + TimeDelta::days(1) - TimeDelta::milliseconds(1)
            );
            dt += TimeDelta::minutes(173);
        }
    }

    #[test]
    fn test_week_window_contains_instant_for_every_first_day() {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let mut dt = at(2023, 12, 27, 5, 30, 0);
        for _ in 0..30 {
            for first in days {
                let start = dt.start_of_week(first);
                let end = dt.end_of_week(first);
                assert!(start <= dt && dt <= end);
                assert_eq!(start.weekday(), first);
                assert_eq!(end - start, TimeDelta::days(7) - TimeDelta::milliseconds(1));
            }
            dt += TimeDelta::hours(19);
        }
    }

    #[test]
    fn test_end_boundaries_saturate_at_max() {
        let last_day = at(9999, 12, 31, 10, 0, 0);
        assert_eq!(last_day.end_of_day(), max_value());
        assert_eq!(last_day.end_of_month(), max_value());
        assert_eq!(last_day.end_of_week(Weekday::Sun), max_value());
        assert_eq!(last_day.add_weeks(10.0), max_value());
    }

    #[test]
    fn test_start_boundaries_saturate_at_min() {
        // 0001-01-01 is a Monday; a Sunday week start would precede the range.
        let first_day = at(1, 1, 1, 10, 0, 0);
        assert_eq!(first_day.start_of_week(Weekday::Sun), at(1, 1, 1, 0, 0, 0));
    }
}
