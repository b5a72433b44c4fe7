//! Date and time helpers.
//!
//! - [`NaiveDateTimeExt`] and [`OffsetDateTimeExt`]: day, week and month
//!   boundaries, saturating at [`min_value`] / [`max_value`]
//! - [`random_between`]: uniform instants between two bounds
//! - [`parse_date_time`]: lenient parsing of typed-in dates and times

mod bounds;
mod naive;
mod offset;
mod parse;
mod random;

pub use bounds::{max_value, min_value};
pub use naive::NaiveDateTimeExt;
pub use offset::{OffsetDateTimeExt, OffsetMode};
pub use parse::parse_date_time;
pub use random::{random_between, RandomInstant};
