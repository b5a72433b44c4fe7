//! Lenient date/time parsing.
//!
//! [`parse_date_time`] accepts the loose shapes people type into query strings
//! and config maps, and is what the string and map helpers use.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-and-time layouts tried in order after RFC3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts; a match is taken at midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Lenient parse into a local clock time.
///
/// Tries RFC3339 first (keeping the written clock fields and dropping the
/// offset), then a fixed list of ISO and US layouts, then date-only layouts at
/// midnight. Surrounding whitespace is ignored. Returns `None` when nothing
/// matches.
///
/// # Examples
///
/// ```
/// use extkit_common::datetime::parse_date_time;
///
/// assert!(parse_date_time("2024-01-15").is_some());
/// assert!(parse_date_time("01/15/2024 10:30:00").is_some());
/// assert!(parse_date_time("soon").is_none());
/// ```
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
