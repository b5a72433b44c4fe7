//! Query string lookups on a request URI.
//!
//! Keys match ASCII case-insensitively, and a key given more than once has
//! its values joined with `,` in the order they appear.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use extkit_common::parse::{parse_bool, parse_date_time, parse_int};
use url::Url;

/// Query string access for anything that may carry a request URI.
///
/// An absent URI behaves like one without a query: lookups fall back to
/// their default.
///
/// # Examples
///
/// ```
/// use extkit_http::QueryStringExt;
/// use url::Url;
///
/// let uri = Url::parse("https://example.com/items?Page=2&tag=a&tag=b").unwrap();
/// assert_eq!(uri.query_string_int("page"), Some(2));
/// assert_eq!(uri.try_query_value("TAG").as_deref(), Some("a,b"));
///
/// let missing: Option<&Url> = None;
/// assert_eq!(missing.query_string_value("page", Some("1")).as_deref(), Some("1"));
/// ```
pub trait QueryStringExt {
    fn request_uri(&self) -> Option<&Url>;

    /// `true` when there is a URI and its query is non-empty.
    fn has_query(&self) -> bool {
        self.request_uri()
            .and_then(Url::query)
            .is_some_and(|query| !query.is_empty())
    }

    /// Distinct keys in first-seen order, duplicate values joined with `,`.
    fn query_pairs_combined(&self) -> Vec<(String, String)> {
        grouped_pairs(self.request_uri())
            .into_iter()
            .map(|(key, values)| (key, values.join(",")))
            .collect()
    }

    /// Every value of every key.
    fn query_lookup(&self) -> HashMap<String, Vec<String>> {
        grouped_pairs(self.request_uri()).into_iter().collect()
    }

    /// The combined value for `key`, or `default` when the URI, the query, or
    /// the key is missing.
    fn query_string_value(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.query_pairs_combined()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
            .or_else(|| default.map(str::to_string))
    }

    fn try_query_value(&self, key: &str) -> Option<String> {
        self.query_string_value(key, None)
    }

    /// `true`/`false` in any case; anything else is `None`.
    fn query_string_bool(&self, key: &str) -> Option<bool> {
        self.try_query_value(key).as_deref().and_then(parse_bool)
    }

    fn query_string_int(&self, key: &str) -> Option<i32> {
        self.try_query_value(key).as_deref().and_then(parse_int)
    }

    /// Parsed with the lenient date/time formats of
    /// [`parse_date_time`](extkit_common::parse::parse_date_time).
    fn query_string_date_time(&self, key: &str) -> Option<NaiveDateTime> {
        self.try_query_value(key).as_deref().and_then(parse_date_time)
    }
}

impl QueryStringExt for Url {
    fn request_uri(&self) -> Option<&Url> {
        Some(self)
    }
}

impl QueryStringExt for Option<&Url> {
    fn request_uri(&self) -> Option<&Url> {
        *self
    }
}

/// Decoded pairs grouped by case-insensitive key. The first spelling of a
/// key is the one kept.
fn grouped_pairs(uri: Option<&Url>) -> Vec<(String, Vec<String>)> {
    let Some(uri) = uri else {
        return Vec::new();
    };

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (key, value) in uri.query_pairs() {
        match slots.get(&key.to_ascii_lowercase()) {
            Some(&slot) => groups[slot].1.push(value.into_owned()),
            None => {
                slots.insert(key.to_ascii_lowercase(), groups.len());
                groups.push((key.into_owned(), vec![value.into_owned()]));
            }
        }
    }
    tracing::trace!(keys = groups.len(), "Parsed query string");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_has_query() {
        assert!(uri("https://example.com/?a=1").has_query());
        assert!(!uri("https://example.com/").has_query());
        assert!(!uri("https://example.com/?").has_query());

        let missing: Option<&Url> = None;
        assert!(!missing.has_query());
        assert!(Some(&uri("https://example.com/?a=1")).has_query());
    }

    #[test]
    fn test_pairs_combined_keep_first_seen_order() {
        let request = uri("https://example.com/?b=2&a=1&B=3&c=");
        assert_eq!(
            request.query_pairs_combined(),
            vec![
                ("b".to_string(), "2,3".to_string()),
                ("a".to_string(), "1".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_lookup_lists_every_value() {
        let lookup = uri("https://example.com/?tag=x&tag=y%20z&id=7").query_lookup();
        assert_eq!(lookup["tag"], vec!["x".to_string(), "y z".to_string()]);
        assert_eq!(lookup["id"], vec!["7".to_string()]);
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn test_value_lookup_ignores_case_and_falls_back() {
        let request = uri("https://example.com/?Name=Ada%20Lovelace");
        assert_eq!(
            request.query_string_value("name", None).as_deref(),
            Some("Ada Lovelace")
        );
        assert_eq!(
            request.query_string_value("missing", Some("none")).as_deref(),
            Some("none")
        );
        assert_eq!(request.try_query_value("missing"), None);

        let bare = uri("https://example.com/");
        assert_eq!(
            bare.query_string_value("name", Some("anon")).as_deref(),
            Some("anon")
        );

        let missing: Option<&Url> = None;
        assert_eq!(missing.try_query_value("name"), None);
    }

    #[test]
    fn test_typed_lookups() {
        let request = uri(
            "https://example.com/?active=TRUE&count=42&bad=forty&when=2022-06-24%2013:45:00",
        );
        assert_eq!(request.query_string_bool("active"), Some(true));
        assert_eq!(request.query_string_bool("count"), None);
        assert_eq!(request.query_string_int("count"), Some(42));
        assert_eq!(request.query_string_int("bad"), None);
        assert_eq!(request.query_string_int("absent"), None);

        let when = request.query_string_date_time("when").unwrap();
        assert_eq!(when.format("%Y-%m-%d %H:%M:%S").to_string(), "2022-06-24 13:45:00");
        assert_eq!(request.query_string_date_time("bad"), None);
    }

    #[test]
    fn test_duplicate_int_values_do_not_parse() {
        let request = uri("https://example.com/?page=1&page=2");
        assert_eq!(request.try_query_value("page").as_deref(), Some("1,2"));
        assert_eq!(request.query_string_int("page"), None);
    }
}
