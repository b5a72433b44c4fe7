//! A `HashMap` that owns its lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use super::map::{find_or_insert, is_default};

/// A map shared between threads.
///
/// Every method holds the lock for its whole read-check-write sequence, so
/// concurrent `find_or_add` calls for one key run the factory at most once.
/// Values are handed out by clone.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use extkit_common::collections::SyncMap;
///
/// let sessions: Arc<SyncMap<u32, String>> = Arc::new(SyncMap::new());
/// let name = sessions.find_or_add(7, || "guest".to_string());
/// assert_eq!(name, "guest");
/// assert_eq!(sessions.try_find(&7).as_deref(), Some("guest"));
/// ```
#[derive(Debug)]
pub struct SyncMap<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> Default for SyncMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> SyncMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Wrap an existing map.
    pub fn from_map(entries: HashMap<K, V>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// The stored value for `key`, or `factory()` stored and returned when the
    /// key is missing or holds `V::default()`.
    pub fn find_or_add<F>(&self, key: K, factory: F) -> V
    where
        V: Clone + Default + PartialEq,
        F: FnOnce() -> V,
    {
        self.find_or_add_with(key, |_| factory())
    }

    /// Like [`find_or_add`](Self::find_or_add) with a factory that sees the key.
    pub fn find_or_add_with<F>(&self, key: K, factory: F) -> V
    where
        V: Clone + Default + PartialEq,
        F: FnOnce(&K) -> V,
    {
        let mut entries = self.lock();
        let before = entries.len();
        let value = find_or_insert(&mut *entries, key, factory, is_default).clone();
        if entries.len() > before {
            tracing::trace!(len = entries.len(), "SyncMap inserted new key");
        }
        value
    }

    /// Like [`find_or_add`](Self::find_or_add), but `is_vacant` decides
    /// whether a stored value gets replaced.
    pub fn find_or_add_unless<F, P>(&self, key: K, factory: F, is_vacant: P) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
        P: FnOnce(&V) -> bool,
    {
        let mut entries = self.lock();
        find_or_insert(&mut *entries, key, |_| factory(), is_vacant).clone()
    }

    /// Insert unless the key is present. Returns whether it was inserted.
    pub fn add_if_not_contains(&self, key: K, value: V) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, value);
        true
    }

    /// Insert or overwrite, returning the previous value.
    pub fn add_or_update(&self, key: K, value: V) -> Option<V> {
        self.lock().insert(key, value)
    }

    pub fn try_find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    /// Value of the first key matching `predicate`.
    pub fn find_by<P>(&self, mut predicate: P) -> Option<V>
    where
        V: Clone,
        P: FnMut(&K) -> bool,
    {
        self.lock()
            .iter()
            .find_map(|(key, value)| predicate(key).then(|| value.clone()))
    }

    /// Remove `key`; `true` when something was removed.
    pub fn try_remove(&self, key: &K) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` against the map while holding the lock.
    pub fn with_map<R>(&self, f: impl FnOnce(&mut HashMap<K, V>) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn into_inner(self) -> HashMap<K, V> {
        self.entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("SyncMap lock was poisoned; recovering entries");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_find_or_add_runs_factory_once_across_threads() {
        let map: Arc<SyncMap<&str, usize>> = Arc::new(SyncMap::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let map = Arc::clone(&map);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    map.find_or_add("shared", || calls.fetch_add(1, Ordering::SeqCst) + 100)
                })
            })
            .collect();

        let results: Vec<usize> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|value| *value == 100));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_find_or_add_reuses_stored_value() {
        let map = SyncMap::new();
        assert_eq!(map.find_or_add("k", || 1), 1);
        assert_eq!(map.find_or_add("k", || 2), 1);
    }

    #[test]
    fn test_find_or_add_with_and_unless() {
        let map: SyncMap<String, usize> = SyncMap::new();
        assert_eq!(map.find_or_add_with("abc".to_string(), |key| key.len()), 3);

        map.add_or_update("zero".to_string(), 0);
        assert_eq!(map.find_or_add_unless("zero".to_string(), || 5, |v| *v == 0), 5);
        assert_eq!(map.find_or_add_unless("zero".to_string(), || 9, |v| *v == 0), 5);
    }

    #[test]
    fn test_add_if_not_contains_and_add_or_update() {
        let map = SyncMap::new();
        assert!(map.add_if_not_contains(1, "a"));
        assert!(!map.add_if_not_contains(1, "b"));
        assert_eq!(map.try_find(&1), Some("a"));

        assert_eq!(map.add_or_update(1, "c"), Some("a"));
        assert_eq!(map.try_find(&1), Some("c"));
    }

    #[test]
    fn test_try_remove_len_and_is_empty() {
        let map = SyncMap::new();
        assert!(map.is_empty());
        map.add_or_update("a", 1);
        map.add_or_update("b", 2);
        assert_eq!(map.len(), 2);
        assert!(map.try_remove(&"a"));
        assert!(!map.try_remove(&"a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_find_by_and_with_map() {
        let mut seed = HashMap::new();
        seed.insert("alpha".to_string(), 1);
        seed.insert("beta".to_string(), 2);
        let map = SyncMap::from_map(seed);

        assert_eq!(map.find_by(|key| key.starts_with('b')), Some(2));
        let total: i32 = map.with_map(|entries| entries.values().sum());
        assert_eq!(total, 3);
        assert_eq!(map.into_inner().len(), 2);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let map = Arc::new(SyncMap::new());
        map.add_or_update("kept", 1);

        let poisoner = Arc::clone(&map);
        let result = thread::spawn(move || {
            poisoner.with_map(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(map.try_find(&"kept"), Some(1));
        map.add_or_update("after", 2);
        assert_eq!(map.len(), 2);
    }
}
