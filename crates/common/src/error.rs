//! Unified error type for invalid-argument conditions
//!
//! Every helper in this crate follows one of two policies. Programmer errors
//! (an absent required input, a size or length outside its allowed range)
//! return `Err(ExtensionError)`. Data conditions (an unparsable value, no
//! predicate match) return `None` or an empty result instead.

use thiserror::Error;

/// Error returned when a helper is called with an invalid argument
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// A required input was absent or empty
    #[error("Argument is missing or empty: {0}")]
    Missing(&'static str),

    /// A size or length argument is outside its allowed range
    #[error("Argument out of range: {name} ({message})")]
    OutOfRange {
        name: &'static str,
        message: String,
    },

    /// A pair of bounds is inverted
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl ExtensionError {
    /// Creates a missing-argument error for the named parameter.
    ///
    /// # Example
    /// ```ignore
    /// if value.is_empty() {
    ///     return Err(ExtensionError::missing("value"));
    /// }
    /// ```
    pub fn missing(name: &'static str) -> Self {
        Self::Missing(name)
    }

    /// Create an out-of-range error
    pub fn out_of_range(name: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            name,
            message: message.into(),
        }
    }

    /// Create an inverted-range error
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }
}
