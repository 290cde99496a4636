//! Least-frequently-used eviction policy.
//!
//! Tracks a hit frequency and a monotonic insertion sequence per key.
//! Eviction chooses the member with the smallest `(frequency,
//! sequence)` pair, so that among equally-frequent members the
//! earliest inserted is evicted first. `dump()` returns members in
//! that same eviction order: only the front of the dump (the next
//! eviction candidate) is a documented contract.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::cache::Cache;
use crate::error::{Error, Result};

/// LFU cache of capacity `maxlen`.
#[derive(Debug, Clone)]
pub struct LfuCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    maxlen: usize,
    freq: FxHashMap<K, u64>,
    seq: FxHashMap<K, u64>,
    counter: u64,
}

impl<K> LfuCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an LFU cache. `maxlen` must be at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `maxlen == 0`.
    pub fn new(maxlen: usize) -> Result<Self> {
        if maxlen == 0 {
            return Err(Error::InvalidConfig("maxlen must be at least 1".to_string()));
        }
        tracing::debug!(maxlen, "constructing LfuCache");
        Ok(Self {
            maxlen,
            freq: FxHashMap::default(),
            seq: FxHashMap::default(),
            counter: 0,
        })
    }

    fn victim(&self) -> Option<K> {
        self.freq
            .iter()
            .min_by_key(|(k, &f)| (f, self.seq[*k]))
            .map(|(k, _)| k.clone())
    }
}

impl<K> Cache<K> for LfuCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    type Dump = Vec<K>;

    fn maxlen(&self) -> usize {
        self.maxlen
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn has(&self, key: &K) -> bool {
        self.freq.contains_key(key)
    }

    fn get(&mut self, key: &K) -> bool {
        if let Some(f) = self.freq.get_mut(key) {
            *f += 1;
            true
        } else {
            false
        }
    }

    fn put(&mut self, key: K) -> Option<K> {
        if let Some(f) = self.freq.get_mut(&key) {
            *f += 1;
            return None;
        }
        let evicted = if self.freq.len() >= self.maxlen {
            let victim = self.victim().expect("full cache has a victim");
            trace!(?victim, "lfu evicting");
            self.freq.remove(&victim);
            self.seq.remove(&victim);
            Some(victim)
        } else {
            None
        };
        self.counter += 1;
        self.seq.insert(key.clone(), self.counter);
        self.freq.insert(key, 1);
        evicted
    }

    fn remove(&mut self, key: &K) -> bool {
        self.seq.remove(key);
        self.freq.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.freq.clear();
        self.seq.clear();
    }

    fn dump(&self) -> Self::Dump {
        let mut entries: Vec<&K> = self.freq.keys().collect();
        entries.sort_by_key(|k| (self.freq[*k], self.seq[*k]));
        entries.into_iter().cloned().collect()
    }

    fn put_name(&self) -> &'static str {
        "put"
    }

    fn put_doc(&self) -> &'static str {
        "Admits a key with frequency 1, or increments the frequency of an \
         already-present key; evicts the least-frequently-used key \
         (ties broken by earliest insertion) if the cache is at capacity."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_maxlen() {
        assert!(LfuCache::<i32>::new(0).is_err());
    }

    #[test]
    fn lfu_4_scenario() {
        let mut c = LfuCache::new(4).unwrap();
        c.put(1);
        c.put(2);
        c.put(3);
        c.put(4);

        assert!(c.get(&1));
        assert!(c.get(&1));
        assert!(c.get(&1));
        assert!(c.get(&2));
        assert!(c.get(&2));
        assert!(c.get(&3));

        assert_eq!(c.put(5), Some(4));
        assert_eq!(c.dump(), vec![5, 3, 2, 1]);
    }

    #[test]
    fn get_is_not_idempotent() {
        let mut c = LfuCache::new(2).unwrap();
        c.put(1);
        c.get(&1);
        let once = c.dump();
        c.get(&1);
        let twice = c.dump();
        assert_eq!(once, twice);
        assert_eq!(*c.freq.get(&1).unwrap(), 3);
    }

    #[test]
    fn remove_drops_bookkeeping() {
        let mut c = LfuCache::new(2).unwrap();
        c.put(1);
        c.put(2);
        assert!(c.remove(&1));
        assert!(!c.has(&1));
        assert_eq!(c.len(), 1);
        assert!(!c.remove(&1));
    }
}
