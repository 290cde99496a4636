//! Uniform-random eviction policy.
//!
//! Maintains membership in a dense vector plus a `K -> index` map so
//! that eviction can sample a victim uniformly and remove it in O(1)
//! via swap-then-pop, without ever shifting more than the displaced
//! tail element.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::cache::Cache;
use crate::error::{Error, Result};

/// Random-eviction cache of capacity `maxlen`.
#[derive(Debug, Clone)]
pub struct RandomCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    maxlen: usize,
    members: Vec<K>,
    index: FxHashMap<K, usize>,
}

impl<K> RandomCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates a random-eviction cache. `maxlen` must be at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `maxlen == 0`.
    pub fn new(maxlen: usize) -> Result<Self> {
        if maxlen == 0 {
            return Err(Error::InvalidConfig("maxlen must be at least 1".to_string()));
        }
        tracing::debug!(maxlen, "constructing RandomCache");
        Ok(Self {
            maxlen,
            members: Vec::with_capacity(maxlen),
            index: FxHashMap::default(),
        })
    }

    fn push(&mut self, key: K) {
        self.index.insert(key.clone(), self.members.len());
        self.members.push(key);
    }

    fn swap_remove_at(&mut self, idx: usize) -> K {
        let last = self.members.len() - 1;
        self.members.swap(idx, last);
        let value = self.members.pop().expect("non-empty");
        self.index.remove(&value);
        if idx != last {
            let moved = self.members[idx].clone();
            if let Some(slot) = self.index.get_mut(&moved) {
                *slot = idx;
            }
        }
        value
    }
}

impl<K> Cache<K> for RandomCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    type Dump = Vec<K>;

    fn maxlen(&self) -> usize {
        self.maxlen
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn has(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn get(&mut self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.index.contains_key(&key) {
            return None;
        }
        let evicted = if self.members.len() >= self.maxlen {
            let victim_idx = rand::thread_rng().gen_range(0..self.members.len());
            let victim = self.swap_remove_at(victim_idx);
            trace!(victim = ?victim, "random evicting");
            Some(victim)
        } else {
            None
        };
        self.push(key);
        evicted
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.index.get(key).copied() {
            Some(idx) => {
                self.swap_remove_at(idx);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.members.clear();
        self.index.clear();
    }

    fn dump(&self) -> Self::Dump {
        self.members.clone()
    }

    fn put_name(&self) -> &'static str {
        "put"
    }

    fn put_doc(&self) -> &'static str {
        "Admits a key; evicts a uniformly-random key if the cache is at \
         capacity."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_zero_maxlen() {
        assert!(RandomCache::<i32>::new(0).is_err());
    }

    #[test]
    fn admits_up_to_capacity_without_eviction() {
        let mut c = RandomCache::new(3).unwrap();
        assert_eq!(c.put(1), None);
        assert_eq!(c.put(2), None);
        assert_eq!(c.put(3), None);
        assert_eq!(c.len(), 3);
        assert!(c.has(&1) && c.has(&2) && c.has(&3));
    }

    #[test]
    fn repeated_put_is_noop() {
        let mut c = RandomCache::new(3).unwrap();
        c.put(1);
        assert_eq!(c.put(1), None);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn eviction_keeps_size_at_capacity() {
        let mut c = RandomCache::new(3).unwrap();
        c.put(1);
        c.put(2);
        c.put(3);
        let evicted = c.put(4).expect("cache was full");
        assert_eq!(c.len(), 3);
        let members: HashSet<_> = c.dump().into_iter().collect();
        assert!(members.contains(&4));
        assert!(!members.contains(&evicted));
    }

    #[test]
    fn remove_and_clear() {
        let mut c = RandomCache::new(3).unwrap();
        c.put(1);
        c.put(2);
        assert!(c.remove(&1));
        assert!(!c.remove(&1));
        assert_eq!(c.len(), 1);
        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn swap_remove_preserves_remaining_membership() {
        let mut c = RandomCache::new(5).unwrap();
        for k in 0..5 {
            c.put(k);
        }
        assert!(c.remove(&2));
        let remaining: HashSet<_> = c.dump().into_iter().collect();
        assert_eq!(remaining, HashSet::from([0, 1, 3, 4]));
        for k in &remaining {
            assert!(c.has(k));
        }
    }
}
