//! Key/value decorator.
//!
//! Lifts a key-only [`Cache`] into a `K -> V` store by keeping a
//! parallel value map whose key-set always equals the inner cache's
//! membership.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::cache::Cache;

/// Wraps a key-only [`Cache`] to hold a value alongside every key.
///
/// Unlike [`crate::decorators::RandomAdmission`], this decorator does
/// not implement [`Cache`] itself: its `put`/`get`/`dump` operations
/// have a different shape (they carry a value). It exposes its own
/// `put_name`/`get_name`/`dump_name`/`clear_name` (and matching `_doc`)
/// pairs instead of forwarding the inner cache's, since the inner
/// cache's `put` documents a key-only contract that no longer
/// describes what this wrapper's `put` does.
#[derive(Debug, Clone)]
pub struct KeyValueCache<K, V, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Cache<K>,
{
    inner: C,
    values: FxHashMap<K, V>,
    _marker: std::marker::PhantomData<V>,
}

impl<K, V, C> KeyValueCache<K, V, C>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    C: Cache<K>,
{
    /// Wraps `inner` as a key/value store.
    pub fn new(inner: C) -> Self {
        tracing::debug!("constructing KeyValueCache");
        Self {
            inner,
            values: FxHashMap::default(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Capacity upper bound, delegated to the inner cache.
    pub fn maxlen(&self) -> usize {
        self.inner.maxlen()
    }

    /// Current number of entries, delegated to the inner cache.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Membership test; no side effect.
    pub fn has(&self, key: &K) -> bool {
        self.inner.has(key)
    }

    /// Stores `value` under `key` and admits `key` into the inner
    /// cache. Returns the evicted `(key, value)` pair, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.values.insert(key.clone(), value);
        let evicted_key = self.inner.put(key)?;
        let evicted_value = self
            .values
            .remove(&evicted_key)
            .expect("value map domain tracks inner cache membership");
        Some((evicted_key, evicted_value))
    }

    /// Returns a clone of the value stored under `key` on a hit, or
    /// `None` on a miss. May reorder per the inner cache's policy.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if self.inner.get(key) {
            self.values.get(key).cloned()
        } else {
            None
        }
    }

    /// Removes `key` (and its value) if present; returns whether a
    /// removal occurred.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.inner.remove(key);
        if removed {
            self.values.remove(key);
        }
        removed
    }

    /// Empties the store.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.values.clear();
    }

    /// Materializes `(key, value)` pairs in the inner cache's dump
    /// order. Only defined when the inner cache's dump is a flat
    /// sequence (`Cache::Dump = Vec<K>`), which covers LRU, FIFO, LFU,
    /// and Random; Segmented-LRU's tiered dump is not representable as
    /// a single ordered sequence and is exposed via [`Self::inner`]
    /// instead.
    pub fn dump(&self) -> Vec<(K, V)>
    where
        C: Cache<K, Dump = Vec<K>>,
    {
        self.inner
            .dump()
            .into_iter()
            .map(|k| {
                let v = self.values[&k].clone();
                (k, v)
            })
            .collect()
    }

    /// A reference to the wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The name of this wrapper's `put` operation.
    pub const fn put_name(&self) -> &'static str {
        "put"
    }

    /// The documentation string of this wrapper's `put` operation.
    pub const fn put_doc(&self) -> &'static str {
        "Stores a value under a key and admits the key into the wrapped \
         cache, returning the evicted (key, value) pair if eviction \
         occurred."
    }

    /// The name of this wrapper's `get` operation.
    pub const fn get_name(&self) -> &'static str {
        "get"
    }

    /// The documentation string of this wrapper's `get` operation.
    pub const fn get_doc(&self) -> &'static str {
        "Returns the value stored under a key on a hit, or nothing on a miss."
    }

    /// The name of this wrapper's `dump` operation.
    pub const fn dump_name(&self) -> &'static str {
        "dump"
    }

    /// The documentation string of this wrapper's `dump` operation.
    pub const fn dump_doc(&self) -> &'static str {
        "Materializes (key, value) pairs in the wrapped cache's dump order."
    }

    /// The name of this wrapper's `clear` operation.
    pub const fn clear_name(&self) -> &'static str {
        "clear"
    }

    /// The documentation string of this wrapper's `clear` operation.
    pub const fn clear_doc(&self) -> &'static str {
        "Empties the store and its wrapped cache."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LruCache;

    fn fresh() -> KeyValueCache<i32, &'static str, LruCache<i32>> {
        KeyValueCache::new(LruCache::new(2).unwrap())
    }

    #[test]
    fn put_get_roundtrip() {
        let mut c = fresh();
        assert_eq!(c.put(1, "one"), None);
        assert_eq!(c.get(&1), Some("one"));
        assert_eq!(c.get(&2), None);
    }

    #[test]
    fn eviction_returns_evicted_pair() {
        let mut c = fresh();
        c.put(1, "one");
        c.put(2, "two");
        let evicted = c.put(3, "three");
        assert_eq!(evicted, Some((1, "one")));
        assert!(!c.has(&1));
        assert_eq!(c.get(&3), Some("three"));
    }

    #[test]
    fn remove_drops_value_too() {
        let mut c = fresh();
        c.put(1, "one");
        assert!(c.remove(&1));
        assert_eq!(c.get(&1), None);
        assert!(!c.remove(&1));
    }

    #[test]
    fn dump_pairs_follow_inner_order() {
        let mut c = fresh();
        c.put(1, "one");
        c.put(2, "two");
        c.get(&1);
        assert_eq!(c.dump(), vec![(1, "one"), (2, "two")]);
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut c = fresh();
        c.put(1, "one");
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.get(&1), None);
    }

    #[test]
    fn operation_metadata_uses_stable_names() {
        let c = fresh();
        assert_eq!(c.get_name(), "get");
        assert_eq!(c.put_name(), "put");
        assert_eq!(c.dump_name(), "dump");
        assert_eq!(c.clear_name(), "clear");
        assert!(!c.put_doc().is_empty());
        assert!(!c.get_doc().is_empty());
        assert!(!c.dump_doc().is_empty());
        assert!(!c.clear_doc().is_empty());
    }
}
