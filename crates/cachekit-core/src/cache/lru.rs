//! Least-recently-used eviction policy.
//!
//! A single [`OrderedSet`] whose top is the most-recently-used entry and
//! whose bottom is the eviction candidate. Both `get` on a hit and a
//! repeated `put` of a present key promote the entry to the top.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{Cache, Positional};
use crate::error::Result;
use crate::ordered_set::OrderedSet;

/// LRU cache of capacity `maxlen`.
#[derive(Debug, Clone)]
pub struct LruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    maxlen: usize,
    order: OrderedSet<K>,
}

impl<K> LruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an LRU cache. `maxlen` must be at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidConfig`] if `maxlen == 0`.
    pub fn new(maxlen: usize) -> Result<Self> {
        if maxlen == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "maxlen must be at least 1".to_string(),
            ));
        }
        tracing::debug!(maxlen, "constructing LruCache");
        Ok(Self {
            maxlen,
            order: OrderedSet::new(),
        })
    }
}

impl<K> Cache<K> for LruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    type Dump = Vec<K>;

    fn maxlen(&self) -> usize {
        self.maxlen
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn has(&self, key: &K) -> bool {
        self.order.contains(key)
    }

    fn get(&mut self, key: &K) -> bool {
        if self.order.contains(key) {
            self.order.move_to_top(key).expect("present key");
            true
        } else {
            false
        }
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.order.contains(&key) {
            self.order.move_to_top(&key).expect("present key");
            return None;
        }
        let evicted = if self.order.len() >= self.maxlen {
            let victim = self.order.pop_bottom();
            if let Some(v) = &victim {
                trace!(victim = ?v, "lru evicting");
            }
            victim
        } else {
            None
        };
        self.order.append_top(key).expect("vacated slot");
        evicted
    }

    fn remove(&mut self, key: &K) -> bool {
        self.order.remove(key)
    }

    fn clear(&mut self) {
        self.order.clear();
    }

    fn dump(&self) -> Self::Dump {
        self.order.to_vec()
    }

    fn put_name(&self) -> &'static str {
        "put"
    }

    fn put_doc(&self) -> &'static str {
        "Admits a key, promoting it to most-recently-used; evicts the \
         least-recently-used key if the cache is at capacity."
    }
}

impl<K> Positional<K> for LruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn position(&self, key: &K) -> Result<usize> {
        self.order.position(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_maxlen() {
        assert!(LruCache::<i32>::new(0).is_err());
    }

    #[test]
    fn lru_4_scenario() {
        let mut c = LruCache::new(4).unwrap();
        assert_eq!(c.put(0), None);
        assert_eq!(c.put(2), None);
        assert_eq!(c.put(3), None);
        assert_eq!(c.put(4), None);
        assert_eq!(c.dump(), vec![4, 3, 2, 0]);

        assert_eq!(c.put(5), Some(0));
        assert_eq!(c.dump(), vec![5, 4, 3, 2]);

        assert_eq!(c.put(5), None);
        assert_eq!(c.dump(), vec![5, 4, 3, 2]);

        assert!(c.get(&2));
        assert_eq!(c.dump(), vec![2, 5, 4, 3]);

        assert!(c.get(&4));
        assert_eq!(c.dump(), vec![4, 2, 5, 3]);
    }

    #[test]
    fn remove_and_position() {
        let mut c = LruCache::new(4).unwrap();
        c.put(1);
        c.put(2);
        c.put(3);
        assert_eq!(c.position(&3).unwrap(), 0);
        assert_eq!(c.position(&1).unwrap(), 2);
        assert!(c.remove(&2));
        assert!(!c.remove(&2));
        assert_eq!(c.dump(), vec![3, 1]);
    }

    #[test]
    fn get_on_hit_moves_to_position_zero() {
        let mut c = LruCache::new(4).unwrap();
        c.put(1);
        c.put(2);
        c.put(3);
        assert!(c.get(&1));
        assert_eq!(c.position(&1).unwrap(), 0);
    }

    #[test]
    fn clear_empties_cache() {
        let mut c = LruCache::new(2).unwrap();
        c.put(1);
        c.put(2);
        c.clear();
        assert!(c.is_empty());
        assert!(!c.has(&1));
    }
}
