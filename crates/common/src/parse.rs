//! Lenient scalar parsing shared by the string, map and query helpers.
//!
//! Each function returns `None` for input it cannot read; none of them fail.

pub use crate::datetime::parse_date_time;

/// `true`/`false` in any letter case, surrounding whitespace ignored.
///
/// ```
/// use extkit_common::parse::parse_bool;
///
/// assert_eq!(parse_bool(" TRUE "), Some(true));
/// assert_eq!(parse_bool("yes"), None);
/// ```
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A 32-bit integer, surrounding whitespace ignored.
pub fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

/// A finite or infinite float, surrounding whitespace ignored. `NaN` is rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}
