//! General-purpose extension traits for strings, dates, iterators and maps.
//!
//! This crate holds the synchronous helpers of the extkit workspace. The
//! async parallel for-each lives in `extkit-parallel` and the query-string
//! helpers in `extkit-http`.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no I/O; the only shared state is [`collections::SyncMap`]
//! - **No async runtime** - nothing here depends on tokio or futures
//! - **Explicit randomness** - every random helper takes a caller-owned `rand::Rng`
//! - **Two error policies** - bad arguments return [`ExtensionError`]; bad data returns `None`

pub mod collections;
pub mod datetime;
pub mod error;
pub mod parse;
pub mod settings;
pub mod string;

// Re-export commonly used items at crate root for convenience
pub use collections::{IteratorExt, MapExt, OptionMapExt, StringMapExt, SyncMap, VecExt};
pub use datetime::{NaiveDateTimeExt, OffsetDateTimeExt, OffsetMode};
pub use error::ExtensionError;
pub use settings::DateSettings;
pub use string::{OptionStrExt, StrExt};
