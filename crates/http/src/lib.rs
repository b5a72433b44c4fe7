//! extkit Http - Query string helpers
//!
//! Request URIs are plain [`url::Url`] values. No HTTP client or server
//! types are involved, and nothing here is async.

pub mod query;

pub use query::QueryStringExt;
