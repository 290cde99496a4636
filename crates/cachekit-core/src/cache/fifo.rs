//! First-in-first-out eviction policy.
//!
//! Identical structure to [`crate::cache::LruCache`] but without any
//! reordering on hit: `get` never moves an entry, and a repeated `put`
//! of an already-present key is a no-op.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{Cache, Positional};
use crate::error::Result;
use crate::ordered_set::OrderedSet;

/// FIFO cache of capacity `maxlen`.
#[derive(Debug, Clone)]
pub struct FifoCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    maxlen: usize,
    order: OrderedSet<K>,
}

impl<K> FifoCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates a FIFO cache. `maxlen` must be at least 1.
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
        tracing::debug!(maxlen, "constructing FifoCache");
        Ok(Self {
            maxlen,
            order: OrderedSet::new(),
        })
    }
}

impl<K> Cache<K> for FifoCache<K>
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
        self.order.contains(key)
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.order.contains(&key) {
            return None;
        }
        let evicted = if self.order.len() >= self.maxlen {
            let victim = self.order.pop_bottom();
            if let Some(v) = &victim {
                trace!(victim = ?v, "fifo evicting");
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
        "Admits a key at the newest end; never reorders an already-present \
         key; evicts the oldest key if the cache is at capacity."
    }
}

impl<K> Positional<K> for FifoCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn position(&self, key: &K) -> Result<usize> {
        self.order.position(key)
    }
}
