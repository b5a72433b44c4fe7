//! String predicates, transforms and hashing.
//!
//! [`StrExt`] works on `&str`; [`OptionStrExt`] carries the same helpers over
//! to `Option<&str>` with explicit answers for absent input.

mod ext;
mod hash;
mod option;
mod random;

pub use ext::StrExt;
pub use option::OptionStrExt;
pub use random::generate_random_string;

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// Whitespace is not empty; trim first if that matters.
///
/// # Examples
///
/// ```
/// use extkit_common::string::none_if_empty;
///
/// assert_eq!(none_if_empty("hello"), Some("hello"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty(" "), Some(" "));
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
