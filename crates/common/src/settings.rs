//! Date boundary settings
//!
//! Loaded from environment variables with defaults for anything missing or
//! unparsable:
//!
//! - `EXTKIT_FIRST_DAY_OF_WEEK`: weekday name, e.g. `mon` or `Monday` (default Sunday)
//! - `EXTKIT_IGNORE_UTC_OFFSET`: `true` to compute boundaries at a zero offset

use chrono::{DateTime, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::{OffsetDateTimeExt, OffsetMode};

/// Week start and offset policy applied by [`DateSettings::week_window`] and
/// [`DateSettings::month_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSettings {
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: Weekday,

    #[serde(default)]
    pub offset_mode: OffsetMode,
}

fn default_first_day_of_week() -> Weekday {
    Weekday::Sun
}

impl Default for DateSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: default_first_day_of_week(),
            offset_mode: OffsetMode::default(),
        }
    }
}

impl DateSettings {
    /// Load settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ignore_offset = env_or(
            "EXTKIT_IGNORE_UTC_OFFSET",
            defaults.offset_mode == OffsetMode::IgnoreOffset,
        );
        Self {
            first_day_of_week: env_or("EXTKIT_FIRST_DAY_OF_WEEK", defaults.first_day_of_week),
            offset_mode: OffsetMode::from_ignore_flag(ignore_offset),
        }
    }

    /// `(start_of_week, end_of_week)` around `instant`.
    pub fn week_window(
        &self,
        instant: DateTime<FixedOffset>,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (
            instant.start_of_week(self.first_day_of_week, self.offset_mode),
            instant.end_of_week(self.first_day_of_week, self.offset_mode),
        )
    }

    /// `(start_of_month, end_of_month)` around `instant`.
    pub fn month_window(
        &self,
        instant: DateTime<FixedOffset>,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (
            instant.start_of_month(self.offset_mode),
            instant.end_of_month(self.offset_mode),
        )
    }
}

/// Parse `key` from the environment, or `default` when unset or unparsable.
pub fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
