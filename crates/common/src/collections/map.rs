//! Accessors for `HashMap`.
//!
//! [`MapExt`] relies on the `&mut` borrow for exclusion. [`OptionMapExt`]
//! wraps the same mutations for a map that may be absent, and
//! [`StringMapExt`] reads typed values out of string-to-string maps.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use chrono::NaiveDateTime;

use crate::error::ExtensionError;
use crate::parse::{parse_bool, parse_date_time, parse_int};

/// Extension methods for `HashMap`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use extkit_common::collections::MapExt;
///
/// let mut totals: HashMap<&str, u32> = HashMap::new();
/// *totals.find_or_add("apples", || 1) += 2;
/// assert_eq!(totals.find(&"apples"), Some(&3));
///
/// totals.add_if_not_contains("apples", 0).add_or_update("pears", 4);
/// assert_eq!(totals.get_value_or(&"pears", 0), 4);
/// ```
pub trait MapExt<K, V> {
    /// The stored value for `key`, or `factory()` stored and returned when the
    /// key is missing or holds `V::default()`.
    fn find_or_add<F>(&mut self, key: K, factory: F) -> &mut V
    where
        V: Default + PartialEq,
        F: FnOnce() -> V;

    /// Like [`find_or_add`](MapExt::find_or_add) with a factory that sees the key.
    fn find_or_add_with<F>(&mut self, key: K, factory: F) -> &mut V
    where
        V: Default + PartialEq,
        F: FnOnce(&K) -> V;

    /// Like [`find_or_add`](MapExt::find_or_add), but `is_vacant` decides
    /// whether a stored value gets replaced.
    fn find_or_add_unless<F, P>(&mut self, key: K, factory: F, is_vacant: P) -> &mut V
    where
        F: FnOnce() -> V,
        P: FnOnce(&V) -> bool;

    fn add_if_not_contains(&mut self, key: K, value: V) -> &mut Self;

    fn add_or_update(&mut self, key: K, value: V) -> &mut Self;

    fn find(&self, key: &K) -> Option<&V>;

    /// Value of the first key (in iteration order) matching `predicate`.
    fn find_by<P>(&self, predicate: P) -> Option<&V>
    where
        P: FnMut(&K) -> bool;

    fn try_find(&self, key: &K) -> Option<&V>;

    /// Remove `key`; `true` when something was removed.
    fn try_remove(&mut self, key: &K) -> bool;

    fn get_value_or(&self, key: &K, default: V) -> V
    where
        V: Clone;
}

impl<K, V, S> MapExt<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn find_or_add<F>(&mut self, key: K, factory: F) -> &mut V
    where
        V: Default + PartialEq,
        F: FnOnce() -> V,
    {
        find_or_insert(self, key, |_| factory(), is_default)
    }

    fn find_or_add_with<F>(&mut self, key: K, factory: F) -> &mut V
    where
        V: Default + PartialEq,
        F: FnOnce(&K) -> V,
    {
        find_or_insert(self, key, factory, is_default)
    }

    fn find_or_add_unless<F, P>(&mut self, key: K, factory: F, is_vacant: P) -> &mut V
    where
        F: FnOnce() -> V,
        P: FnOnce(&V) -> bool,
    {
        find_or_insert(self, key, |_| factory(), is_vacant)
    }

    fn add_if_not_contains(&mut self, key: K, value: V) -> &mut Self {
        self.entry(key).or_insert(value);
        self
    }

    fn add_or_update(&mut self, key: K, value: V) -> &mut Self {
        self.insert(key, value);
        self
    }

    fn find(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn find_by<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&K) -> bool,
    {
        self.iter()
            .find_map(|(key, value)| predicate(key).then_some(value))
    }

    fn try_find(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn try_remove(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    fn get_value_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }
}

pub(crate) fn is_default<V: Default + PartialEq>(value: &V) -> bool {
    *value == V::default()
}

/// Single read-check-write pass over one entry.
pub(crate) fn find_or_insert<K, V, S, F, P>(
    map: &mut HashMap<K, V, S>,
    key: K,
    factory: F,
    is_vacant: P,
) -> &mut V
where
    K: Eq + Hash,
    S: BuildHasher,
    F: FnOnce(&K) -> V,
    P: FnOnce(&V) -> bool,
{
    match map.entry(key) {
        Entry::Occupied(entry) => {
            if is_vacant(entry.get()) {
                let value = factory(entry.key());
                let slot = entry.into_mut();
                *slot = value;
                slot
            } else {
                entry.into_mut()
            }
        }
        Entry::Vacant(entry) => {
            let value = factory(entry.key());
            entry.insert(value)
        }
    }
}

/// Map mutations on a map that may be absent.
///
/// Every method fails with `ExtensionError::Missing("map")` for `None`.
///
/// ```
/// use std::collections::HashMap;
/// use extkit_common::collections::OptionMapExt;
///
/// let mut map = HashMap::new();
/// assert_eq!(*Some(&mut map).find_or_add("k", || 5).unwrap(), 5);
///
/// let absent: Option<&mut HashMap<&str, i32>> = None;
/// assert!(absent.find_or_add("k", || 5).is_err());
/// ```
pub trait OptionMapExt<'a, K, V> {
    fn find_or_add<F>(self, key: K, factory: F) -> Result<&'a mut V, ExtensionError>
    where
        V: Default + PartialEq,
        F: FnOnce() -> V;

    fn find_or_add_unless<F, P>(
        self,
        key: K,
        factory: F,
        is_vacant: P,
    ) -> Result<&'a mut V, ExtensionError>
    where
        F: FnOnce() -> V,
        P: FnOnce(&V) -> bool;

    fn add_if_not_contains(self, key: K, value: V)
        -> Result<&'a mut HashMap<K, V>, ExtensionError>;

    fn add_or_update(self, key: K, value: V) -> Result<&'a mut HashMap<K, V>, ExtensionError>;

    fn find(self, key: &K) -> Result<Option<&'a V>, ExtensionError>;

    /// Same lookup as [`find`](Self::find).
    fn try_find(self, key: &K) -> Result<Option<&'a V>, ExtensionError>;

    fn try_remove(self, key: &K) -> Result<bool, ExtensionError>;
}

impl<'a, K, V> OptionMapExt<'a, K, V> for Option<&'a mut HashMap<K, V>>
where
    K: Eq + Hash,
{
    fn find_or_add<F>(self, key: K, factory: F) -> Result<&'a mut V, ExtensionError>
    where
        V: Default + PartialEq,
        F: FnOnce() -> V,
    {
        Ok(present(self)?.find_or_add(key, factory))
    }

    fn find_or_add_unless<F, P>(
        self,
        key: K,
        factory: F,
        is_vacant: P,
    ) -> Result<&'a mut V, ExtensionError>
    where
        F: FnOnce() -> V,
        P: FnOnce(&V) -> bool,
    {
        Ok(present(self)?.find_or_add_unless(key, factory, is_vacant))
    }

    fn add_if_not_contains(
        self,
        key: K,
        value: V,
    ) -> Result<&'a mut HashMap<K, V>, ExtensionError> {
        Ok(present(self)?.add_if_not_contains(key, value))
    }

    fn add_or_update(self, key: K, value: V) -> Result<&'a mut HashMap<K, V>, ExtensionError> {
        Ok(present(self)?.add_or_update(key, value))
    }

    fn find(self, key: &K) -> Result<Option<&'a V>, ExtensionError> {
        let map: &'a HashMap<K, V> = present(self)?;
        Ok(map.get(key))
    }

    fn try_find(self, key: &K) -> Result<Option<&'a V>, ExtensionError> {
        self.find(key)
    }

    fn try_remove(self, key: &K) -> Result<bool, ExtensionError> {
        Ok(present(self)?.try_remove(key))
    }
}

fn present<T>(map: Option<T>) -> Result<T, ExtensionError> {
    map.ok_or_else(|| ExtensionError::missing("map"))
}

/// Typed reads from string-to-string maps.
///
/// A missing key and an unparsable value both come back as `None`.
///
/// ```
/// use std::collections::HashMap;
/// use extkit_common::collections::StringMapExt;
///
/// let mut config = HashMap::new();
/// config.insert("retries".to_string(), "3".to_string());
/// config.insert("verbose".to_string(), "TRUE".to_string());
///
/// assert_eq!(config.get_integer_value("retries"), Some(3));
/// assert_eq!(config.get_bool_value("verbose"), Some(true));
/// assert_eq!(config.get_string_value("mode", Some("fast")), Some("fast"));
/// ```
pub trait StringMapExt {
    fn get_string_value<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str>;

    fn get_bool_value(&self, key: &str) -> Option<bool>;

    fn get_integer_value(&self, key: &str) -> Option<i32>;

    fn get_date_time_value(&self, key: &str) -> Option<NaiveDateTime>;
}

impl<S: BuildHasher> StringMapExt for HashMap<String, String, S> {
    fn get_string_value<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.get(key).map(String::as_str).or(default)
    }

    fn get_bool_value(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|value| parse_bool(value))
    }

    fn get_integer_value(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(|value| parse_int(value))
    }

    fn get_date_time_value(&self, key: &str) -> Option<NaiveDateTime> {
        self.get(key).and_then(|value| parse_date_time(value))
    }
}
