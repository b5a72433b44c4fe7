//! The same helpers on `Option<&str>`, for values that may be absent.
//!
//! Predicates answer `false` for `None` (the `is_null*` family and the
//! `does_not_*` pair answer `true`). Transforms return `None` or an empty
//! string as noted on each method.

use super::ext::StrExt;

/// Extension methods for optional string slices.
///
/// # Examples
///
/// ```
/// use extkit_common::string::OptionStrExt;
///
/// let missing: Option<&str> = None;
/// assert!(!missing.is_email_address());
/// assert_eq!(missing.get_default_if_empty("n/a"), "n/a");
/// assert_eq!(Some("  id-7 ").get_null_if_empty_string(), Some("id-7"));
/// ```
pub trait OptionStrExt<'a> {
    /// `None` stays `None`.
    fn append_prefix_if_missing(self, prefix: &str, ignore_case: bool) -> Option<String>;

    /// `None` stays `None`.
    fn append_suffix_if_missing(self, suffix: &str, ignore_case: bool) -> Option<String>;

    /// `true` when either side is absent.
    fn does_not_end_with(self, suffix: Option<&str>) -> bool;

    /// `true` when either side is absent.
    fn does_not_start_with(self, prefix: Option<&str>) -> bool;

    fn first_character(self) -> Option<char>;

    fn last_character(self) -> Option<char>;

    fn get_default_if_empty(self, default: &'a str) -> &'a str;

    /// Trimmed value, `""` when absent.
    fn get_empty_string_if_null(self) -> &'a str;

    fn get_length(self) -> Option<usize>;

    fn get_null_if_empty_string(self) -> Option<&'a str>;

    fn is_alpha(self) -> bool;

    fn is_alpha_numeric(self) -> bool;

    fn is_date(self) -> bool;

    fn is_date_time(self, format: &str) -> bool;

    fn is_email_address(self) -> bool;

    fn is_int(self) -> bool;

    fn is_numeric(self) -> bool;

    fn is_length(self, min: usize, max: usize) -> bool;

    fn is_max_length(self, max: usize) -> bool;

    fn is_min_length(self, min: usize) -> bool;

    fn is_null(self) -> bool;

    fn is_null_or_empty(self) -> bool;

    fn is_null_or_whitespace(self) -> bool;

    fn remove_characters(self, chars: &[char]) -> Option<String>;

    fn remove_prefix(self, prefix: &str, ignore_case: bool) -> Option<&'a str>;

    fn remove_suffix(self, suffix: &str, ignore_case: bool) -> Option<&'a str>;

    /// `""` when absent.
    fn truncate_to(self, max: usize) -> &'a str;

    fn try_get_date_time(self, format: &str) -> Option<String>;
}

impl<'a> OptionStrExt<'a> for Option<&'a str> {
    fn append_prefix_if_missing(self, prefix: &str, ignore_case: bool) -> Option<String> {
        self.map(|value| value.append_prefix_if_missing(prefix, ignore_case))
    }

    fn append_suffix_if_missing(self, suffix: &str, ignore_case: bool) -> Option<String> {
        self.map(|value| value.append_suffix_if_missing(suffix, ignore_case))
    }

    fn does_not_end_with(self, suffix: Option<&str>) -> bool {
        match (self, suffix) {
            (Some(value), Some(suffix)) => value.does_not_end_with(suffix),
            _ => true,
        }
    }

    fn does_not_start_with(self, prefix: Option<&str>) -> bool {
        match (self, prefix) {
            (Some(value), Some(prefix)) => value.does_not_start_with(prefix),
            _ => true,
        }
    }

    fn first_character(self) -> Option<char> {
        self.and_then(StrExt::first_character)
    }

    fn last_character(self) -> Option<char> {
        self.and_then(StrExt::last_character)
    }

    fn get_default_if_empty(self, default: &'a str) -> &'a str {
        self.map_or(default, |value| value.get_default_if_empty(default))
    }

    fn get_empty_string_if_null(self) -> &'a str {
        self.map_or("", str::trim)
    }

    fn get_length(self) -> Option<usize> {
        self.map(StrExt::get_length)
    }

    fn get_null_if_empty_string(self) -> Option<&'a str> {
        self.and_then(StrExt::get_null_if_empty_string)
    }

    fn is_alpha(self) -> bool {
        self.is_some_and(StrExt::is_alpha)
    }

    fn is_alpha_numeric(self) -> bool {
        self.is_some_and(StrExt::is_alpha_numeric)
    }

    fn is_date(self) -> bool {
        self.is_some_and(StrExt::is_date)
    }

    fn is_date_time(self, format: &str) -> bool {
        self.is_some_and(|value| value.is_date_time(format))
    }

    fn is_email_address(self) -> bool {
        self.is_some_and(StrExt::is_email_address)
    }

    fn is_int(self) -> bool {
        self.is_some_and(StrExt::is_int)
    }

    fn is_numeric(self) -> bool {
        self.is_some_and(StrExt::is_numeric)
    }

    fn is_length(self, min: usize, max: usize) -> bool {
        self.is_some_and(|value| value.is_length(min, max))
    }

    fn is_max_length(self, max: usize) -> bool {
        self.is_some_and(|value| value.is_max_length(max))
    }

    fn is_min_length(self, min: usize) -> bool {
        self.is_some_and(|value| value.is_min_length(min))
    }

    fn is_null(self) -> bool {
        self.is_none()
    }

    fn is_null_or_empty(self) -> bool {
        self.map_or(true, str::is_empty)
    }

    fn is_null_or_whitespace(self) -> bool {
        self.map_or(true, |value| value.trim().is_empty())
    }

    fn remove_characters(self, chars: &[char]) -> Option<String> {
        self.and_then(|value| value.remove_characters(chars))
    }

    fn remove_prefix(self, prefix: &str, ignore_case: bool) -> Option<&'a str> {
        self.map(|value| value.remove_prefix(prefix, ignore_case))
    }

    fn remove_suffix(self, suffix: &str, ignore_case: bool) -> Option<&'a str> {
        self.map(|value| value.remove_suffix(suffix, ignore_case))
    }

    fn truncate_to(self, max: usize) -> &'a str {
        self.map_or("", |value| value.truncate_to(max))
    }

    fn try_get_date_time(self, format: &str) -> Option<String> {
        self.and_then(|value| value.try_get_date_time(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Option<&str> = None;

    #[test]
    fn test_absent_input_predicates_are_false() {
        assert!(!NONE.is_alpha());
        assert!(!NONE.is_alpha_numeric());
        assert!(!NONE.is_date());
        assert!(!NONE.is_date_time("%Y"));
        assert!(!NONE.is_email_address());
        assert!(!NONE.is_int());
        assert!(!NONE.is_numeric());
        assert!(!NONE.is_length(0, 10));
        assert!(!NONE.is_max_length(10));
        assert!(!NONE.is_min_length(0));
    }

    #[test]
    fn test_absent_input_null_checks_are_true() {
        assert!(NONE.is_null());
        assert!(NONE.is_null_or_empty());
        assert!(NONE.is_null_or_whitespace());
        assert!(!Some("").is_null());
        assert!(Some("").is_null_or_empty());
        assert!(!Some(" ").is_null_or_empty());
        assert!(Some(" \t").is_null_or_whitespace());
        assert!(!Some("x").is_null_or_whitespace());
    }

    #[test]
    fn test_absent_input_transforms() {
        assert_eq!(NONE.append_prefix_if_missing("pre", true), None);
        assert_eq!(NONE.append_suffix_if_missing("suf", true), None);
        assert_eq!(NONE.first_character(), None);
        assert_eq!(NONE.last_character(), None);
        assert_eq!(NONE.get_length(), None);
        assert_eq!(NONE.get_null_if_empty_string(), None);
        assert_eq!(NONE.get_empty_string_if_null(), "");
        assert_eq!(NONE.get_default_if_empty("d"), "d");
        assert_eq!(NONE.remove_characters(&['a']), None);
        assert_eq!(NONE.remove_prefix("a", true), None);
        assert_eq!(NONE.remove_suffix("a", true), None);
        assert_eq!(NONE.truncate_to(3), "");
        assert_eq!(NONE.try_get_date_time("%Y"), None);
    }

    #[test]
    fn test_does_not_start_or_end_with_absent_sides() {
        assert!(NONE.does_not_end_with(Some("suffix")));
        assert!(Some("value").does_not_end_with(None));
        assert!(!Some("valuesuffix").does_not_end_with(Some("suffix")));
        assert!(NONE.does_not_start_with(Some("prefix")));
        assert!(Some("value").does_not_start_with(None));
        assert!(!Some("prefixvalue").does_not_start_with(Some("prefix")));
    }

    #[test]
    fn test_present_input_delegates() {
        assert_eq!(
            Some("value").append_prefix_if_missing("pre", true),
            Some("prevalue".to_string())
        );
        assert_eq!(Some("").get_length(), Some(0));
        assert_eq!(Some("  x  ").get_empty_string_if_null(), "x");
        assert_eq!(Some("   ").get_default_if_empty("d"), "d");
        assert_eq!(Some("").first_character(), None);
        assert_eq!(Some("abcdef").truncate_to(2), "ab");
        assert!(Some("jane@example.com").is_email_address());
    }
}
