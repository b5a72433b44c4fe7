//! Predicates and transforms on `str`.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::hash;
use super::none_if_empty;
use crate::error::ExtensionError;
use crate::parse::{parse_date_time, parse_int, parse_number};

static EMAIL_ADDRESS: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z][\w\.-]*[a-zA-Z0-9]@[a-zA-Z0-9][\w\.-]*[a-zA-Z0-9]\.[a-zA-Z][a-zA-Z\.]*[a-zA-Z]$",
    )
    .ok()
});

/// Extension methods for string slices.
///
/// Lengths and positions are counted in chars. Methods that can be asked
/// for something impossible (`left`, `right`, the SHA digests) return
/// `Result`; everything else is total.
///
/// # Examples
///
/// ```
/// use extkit_common::string::StrExt;
///
/// assert_eq!("invoice".append_prefix_if_missing("Tax", true), "Taxinvoice");
/// assert_eq!("HelloWorld".to_spaced_words(), "Hello World");
/// assert_eq!("crème brûlée".remove_diacritics(), "creme brulee");
/// assert_eq!("abcdef".left(2).unwrap(), "ab");
/// ```
pub trait StrExt {
    /// `prefix + self` unless `self` is empty or already starts with `prefix`.
    fn append_prefix_if_missing(&self, prefix: &str, ignore_case: bool) -> String;

    /// `self + suffix` unless `self` is empty or already ends with `suffix`.
    fn append_suffix_if_missing(&self, suffix: &str, ignore_case: bool) -> String;

    /// First char uppercased, the rest lowercased.
    fn capitalize(&self) -> String;

    /// Non-overlapping, case-insensitive matches of the literal `needle`.
    /// An empty needle counts zero.
    fn count_occurrences(&self, needle: &str) -> usize;

    /// Uppercase hex MD5 of the ASCII bytes (non-ASCII chars become `?`).
    fn create_hash_md5(&self) -> String;

    /// Lowercase hex SHA-256 of the UTF-16LE bytes.
    fn create_hash_sha256(&self) -> Result<String, ExtensionError>;

    /// Lowercase hex SHA-512 of the UTF-16LE bytes.
    fn create_hash_sha512(&self) -> Result<String, ExtensionError>;

    fn does_not_end_with(&self, suffix: &str) -> bool;

    fn does_not_start_with(&self, prefix: &str) -> bool;

    fn ends_with_ignore_case(&self, suffix: &str) -> bool;

    fn starts_with_ignore_case(&self, prefix: &str) -> bool;

    fn first_character(&self) -> Option<char>;

    fn last_character(&self) -> Option<char>;

    /// The trimmed value, or `default` when that is empty.
    fn get_default_if_empty<'a>(&'a self, default: &'a str) -> &'a str;

    /// A hash that is stable across runs and platforms.
    fn get_deterministic_hash_code(&self) -> i32;

    /// Length in chars.
    fn get_length(&self) -> usize;

    /// The trimmed value, or `None` when that is empty.
    fn get_null_if_empty_string(&self) -> Option<&str>;

    /// Non-empty and, ignoring spaces, only letters.
    fn is_alpha(&self) -> bool;

    /// Non-empty and, ignoring spaces, only letters and digits.
    fn is_alpha_numeric(&self) -> bool;

    /// At least 8 chars and readable by [`parse_date_time`].
    fn is_date(&self) -> bool;

    /// Matches the chrono `format` exactly.
    fn is_date_time(&self, format: &str) -> bool;

    fn is_email_address(&self) -> bool;

    /// Parses as an `i32`.
    fn is_int(&self) -> bool;

    /// Parses as an `f64` after trimming surrounding whitespace.
    ///
    /// Accepted: an optional sign, digits with an optional `.` fraction, an
    /// optional `e`/`E` exponent, and `inf`/`infinity` in any case. Rejected:
    /// `NaN`, group separators (`1,000`), parenthesized negatives (`(5)`),
    /// currency symbols and hex.
    fn is_numeric(&self) -> bool;

    fn is_length(&self, min: usize, max: usize) -> bool;

    fn is_max_length(&self, max: usize) -> bool;

    fn is_min_length(&self, min: usize) -> bool;

    /// The first `length` chars.
    ///
    /// # Errors
    ///
    /// `Missing` for an empty string, `OutOfRange` when `length` exceeds it.
    fn left(&self, length: usize) -> Result<&str, ExtensionError>;

    /// The last `length` chars.
    ///
    /// # Errors
    ///
    /// `Missing` for an empty string, `OutOfRange` when `length` exceeds it.
    fn right(&self, length: usize) -> Result<&str, ExtensionError>;

    /// Drop every char in `chars`; `None` for a blank input.
    fn remove_characters(&self, chars: &[char]) -> Option<String>;

    /// Decompose, drop combining marks, recompose.
    fn remove_diacritics(&self) -> String;

    fn remove_prefix(&self, prefix: &str, ignore_case: bool) -> &str;

    fn remove_suffix(&self, suffix: &str, ignore_case: bool) -> &str;

    /// Drop every char in `chars`.
    fn strip_chars(&self, chars: &[char]) -> String;

    /// Chars in reverse order.
    fn reverse(&self) -> String;

    /// Insert a space before each uppercase letter; leading spaces are dropped.
    fn to_spaced_words(&self) -> String;

    /// At most `max` chars.
    fn truncate_to(&self, max: usize) -> &str;

    /// Leniently parse and re-render with the chrono `format`.
    fn try_get_date_time(&self, format: &str) -> Option<String>;

    /// Trimmed `FromStr` parse, or `default`.
    fn parse_or<T: FromStr>(&self, default: T) -> T;

    /// UTF-16LE encoding.
    fn to_utf16_bytes(&self) -> Vec<u8>;
}

impl StrExt for str {
    fn append_prefix_if_missing(&self, prefix: &str, ignore_case: bool) -> String {
        if self.is_empty() || has_prefix(self, prefix, ignore_case) {
            self.to_string()
        } else {
            format!("{prefix}{self}")
        }
    }

    fn append_suffix_if_missing(&self, suffix: &str, ignore_case: bool) -> String {
        if self.is_empty() || has_suffix(self, suffix, ignore_case) {
            self.to_string()
        } else {
            format!("{self}{suffix}")
        }
    }

    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    fn count_occurrences(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
            .map_or(0, |re| re.find_iter(self).count())
    }

    fn create_hash_md5(&self) -> String {
        hash::md5_hex(self)
    }

    fn create_hash_sha256(&self) -> Result<String, ExtensionError> {
        hash::sha256_hex(self)
    }

    fn create_hash_sha512(&self) -> Result<String, ExtensionError> {
        hash::sha512_hex(self)
    }

    fn does_not_end_with(&self, suffix: &str) -> bool {
        !self.ends_with(suffix)
    }

    fn does_not_start_with(&self, prefix: &str) -> bool {
        !self.starts_with(prefix)
    }

    fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        strip_suffix_ignore_case(self, suffix).is_some()
    }

    fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        strip_prefix_ignore_case(self, prefix).is_some()
    }

    fn first_character(&self) -> Option<char> {
        self.chars().next()
    }

    fn last_character(&self) -> Option<char> {
        self.chars().next_back()
    }

    fn get_default_if_empty<'a>(&'a self, default: &'a str) -> &'a str {
        none_if_empty(self.trim()).unwrap_or(default)
    }

    fn get_deterministic_hash_code(&self) -> i32 {
        hash::deterministic_hash(self)
    }

    fn get_length(&self) -> usize {
        self.chars().count()
    }

    fn get_null_if_empty_string(&self) -> Option<&str> {
        none_if_empty(self.trim())
    }

    fn is_alpha(&self) -> bool {
        !self.is_empty() && self.trim().chars().filter(|c| *c != ' ').all(char::is_alphabetic)
    }

    fn is_alpha_numeric(&self) -> bool {
        !self.is_empty()
            && self
                .trim()
                .chars()
                .filter(|c| *c != ' ')
                .all(char::is_alphanumeric)
    }

    fn is_date(&self) -> bool {
        self.get_length() >= 8 && parse_date_time(self).is_some()
    }

    fn is_date_time(&self, format: &str) -> bool {
        NaiveDateTime::parse_from_str(self, format).is_ok()
            || NaiveDate::parse_from_str(self, format).is_ok()
    }

    fn is_email_address(&self) -> bool {
        EMAIL_ADDRESS.as_ref().is_some_and(|re| re.is_match(self))
    }

    fn is_int(&self) -> bool {
        parse_int(self).is_some()
    }

    fn is_numeric(&self) -> bool {
        parse_number(self).is_some()
    }

    fn is_length(&self, min: usize, max: usize) -> bool {
        let length = self.get_length();
        length >= min && length <= max
    }

    fn is_max_length(&self, max: usize) -> bool {
        self.get_length() <= max
    }

    fn is_min_length(&self, min: usize) -> bool {
        self.get_length() >= min
    }

    fn left(&self, length: usize) -> Result<&str, ExtensionError> {
        let end = checked_char_boundary(self, length)?;
        Ok(&self[..end])
    }

    fn right(&self, length: usize) -> Result<&str, ExtensionError> {
        let total = self.get_length();
        checked_char_boundary(self, length)?;
        let start = byte_offset(self, total - length);
        Ok(&self[start..])
    }

    fn remove_characters(&self, chars: &[char]) -> Option<String> {
        if self.trim().is_empty() {
            return None;
        }
        Some(self.strip_chars(chars))
    }

    fn remove_diacritics(&self) -> String {
        self.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
    }

    fn remove_prefix(&self, prefix: &str, ignore_case: bool) -> &str {
        if ignore_case {
            strip_prefix_ignore_case(self, prefix).unwrap_or(self)
        } else {
            self.strip_prefix(prefix).unwrap_or(self)
        }
    }

    fn remove_suffix(&self, suffix: &str, ignore_case: bool) -> &str {
        if ignore_case {
            strip_suffix_ignore_case(self, suffix).unwrap_or(self)
        } else {
            self.strip_suffix(suffix).unwrap_or(self)
        }
    }

    fn strip_chars(&self, chars: &[char]) -> String {
        self.chars().filter(|c| !chars.contains(c)).collect()
    }

    fn reverse(&self) -> String {
        self.chars().rev().collect()
    }

    fn to_spaced_words(&self) -> String {
        let mut spaced = String::with_capacity(self.len() + 8);
        for c in self.chars() {
            if c.is_uppercase() {
                spaced.push(' ');
            }
            spaced.push(c);
        }
        spaced.trim_start_matches(' ').to_string()
    }

    fn truncate_to(&self, max: usize) -> &str {
        &self[..byte_offset(self, max)]
    }

    fn try_get_date_time(&self, format: &str) -> Option<String> {
        let parsed = parse_date_time(self)?;
        let mut rendered = String::new();
        write!(rendered, "{}", parsed.format(format)).ok()?;
        Some(rendered)
    }

    fn parse_or<T: FromStr>(&self, default: T) -> T {
        self.trim().parse().unwrap_or(default)
    }

    fn to_utf16_bytes(&self) -> Vec<u8> {
        hash::utf16_le_bytes(self)
    }
}

fn has_prefix(value: &str, prefix: &str, ignore_case: bool) -> bool {
    if ignore_case {
        strip_prefix_ignore_case(value, prefix).is_some()
    } else {
        value.starts_with(prefix)
    }
}

fn has_suffix(value: &str, suffix: &str, ignore_case: bool) -> bool {
    if ignore_case {
        strip_suffix_ignore_case(value, suffix).is_some()
    } else {
        value.ends_with(suffix)
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// `value` without a leading `prefix`, compared char by char ignoring case.
pub(crate) fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = value.char_indices();
    for expected in prefix.chars() {
        match rest.next() {
            Some((_, actual)) if chars_eq_ignore_case(actual, expected) => {}
            _ => return None,
        }
    }
    let start = rest.next().map_or(value.len(), |(index, _)| index);
    Some(&value[start..])
}

/// `value` without a trailing `suffix`, compared char by char ignoring case.
pub(crate) fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let mut rest = value.char_indices().rev();
    let mut end = value.len();
    for expected in suffix.chars().rev() {
        match rest.next() {
            Some((index, actual)) if chars_eq_ignore_case(actual, expected) => end = index,
            _ => return None,
        }
    }
    Some(&value[..end])
}

/// Byte offset of the `chars`-th char, or the end of the string.
fn byte_offset(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map_or(value.len(), |(index, _)| index)
}

fn checked_char_boundary(value: &str, length: usize) -> Result<usize, ExtensionError> {
    if value.is_empty() {
        return Err(ExtensionError::missing("value"));
    }
    let total = value.get_length();
    if length > total {
        return Err(ExtensionError::out_of_range(
            "length",
            format!("{length} exceeds string length {total}"),
        ));
    }
    Ok(byte_offset(value, length))
}
