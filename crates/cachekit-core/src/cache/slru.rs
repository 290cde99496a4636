//! Segmented-LRU eviction policy.
//!
//! A fixed sequence of equally-sized tiers, tier 0 most protected and
//! tier `segments - 1` the admission tier. A hit promotes one step
//! toward tier 0; if the receiving tier overflows, its bottom element
//! is demoted one step the other way (a "demotion exchange").
//!
//! A repeated `put` of an already-present key promotes it exactly like
//! `get` rather than leaving it in place; see `DESIGN.md` for why.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{Cache, Positional};
use crate::error::{Error, Result};
use crate::ordered_set::OrderedSet;

/// Segmented-LRU cache with `segments` equal-capacity tiers summing to
/// `maxlen`.
#[derive(Debug, Clone)]
pub struct SlruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    maxlen: usize,
    segments: usize,
    tier_cap: usize,
    tiers: Vec<OrderedSet<K>>,
}

impl<K> SlruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates a Segmented-LRU cache. `maxlen` must be divisible by
    /// `segments`, and both must be at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `maxlen == 0`, `segments ==
    /// 0`, or `maxlen % segments != 0`.
    pub fn new(maxlen: usize, segments: usize) -> Result<Self> {
        if maxlen == 0 {
            return Err(Error::InvalidConfig("maxlen must be at least 1".to_string()));
        }
        if segments == 0 {
            return Err(Error::InvalidConfig(
                "segments must be at least 1".to_string(),
            ));
        }
        if maxlen % segments != 0 {
            return Err(Error::InvalidConfig(format!(
                "maxlen ({maxlen}) must be divisible by segments ({segments})"
            )));
        }
        tracing::debug!(maxlen, segments, "constructing SlruCache");
        Ok(Self {
            maxlen,
            segments,
            tier_cap: maxlen / segments,
            tiers: (0..segments).map(|_| OrderedSet::new()).collect(),
        })
    }

    fn admission_tier(&self) -> usize {
        self.segments - 1
    }

    fn locate(&self, key: &K) -> Option<usize> {
        self.tiers.iter().position(|t| t.contains(key))
    }

    /// Promotes `key` one tier toward tier 0, cascading a single
    /// demotion exchange if the receiving tier overflows. Panics if
    /// `key` is absent from every tier (callers must check first).
    fn promote(&mut self, key: &K) {
        let t = self.locate(key).expect("promote called on present key");
        if t == 0 {
            self.tiers[0].move_to_top(key).expect("present key");
            return;
        }
        self.tiers[t].remove(key);
        self.tiers[t - 1]
            .append_top(key.clone())
            .expect("vacated slot");
        if self.tiers[t - 1].len() > self.tier_cap {
            let victim = self.tiers[t - 1]
                .pop_bottom()
                .expect("tier over capacity has a bottom");
            trace!(?victim, from_tier = t - 1, to_tier = t, "slru demotion exchange");
            self.tiers[t].append_top(victim).expect("vacated slot");
        }
    }
}

impl<K> Cache<K> for SlruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    type Dump = Vec<Vec<K>>;

    fn maxlen(&self) -> usize {
        self.maxlen
    }

    fn len(&self) -> usize {
        self.tiers.iter().map(OrderedSet::len).sum()
    }

    fn has(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    fn get(&mut self, key: &K) -> bool {
        if self.locate(key).is_some() {
            self.promote(key);
            true
        } else {
            false
        }
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.locate(&key).is_some() {
            self.promote(&key);
            return None;
        }
        let admission = self.admission_tier();
        self.tiers[admission].append_top(key).expect("vacated slot");
        if self.tiers[admission].len() > self.tier_cap {
            let victim = self.tiers[admission].pop_bottom();
            if let Some(v) = &victim {
                trace!(victim = ?v, "slru evicting from admission tier");
            }
            victim
        } else {
            None
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.locate(key) {
            Some(t) => self.tiers[t].remove(key),
            None => false,
        }
    }

    fn clear(&mut self) {
        for tier in &mut self.tiers {
            tier.clear();
        }
    }

    fn dump(&self) -> Self::Dump {
        self.tiers.iter().map(OrderedSet::to_vec).collect()
    }

    fn put_name(&self) -> &'static str {
        "put"
    }

    fn put_doc(&self) -> &'static str {
        "Admits a key into the admission tier, or promotes it toward the \
         most protected tier if already present; evicts from the \
         admission tier if the cache is at capacity."
    }
}

impl<K> Positional<K> for SlruCache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn position(&self, key: &K) -> Result<usize> {
        let mut offset = 0;
        for tier in &self.tiers {
            if let Ok(p) = tier.position(key) {
                return Ok(offset + p);
            }
            offset += tier.len();
        }
        Err(Error::missing_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_indivisible_maxlen() {
        assert!(SlruCache::<i32>::new(10, 3).is_err());
        assert!(SlruCache::<i32>::new(0, 1).is_err());
        assert!(SlruCache::<i32>::new(9, 0).is_err());
    }

    #[test]
    fn slru_9_3_scenario() {
        let mut c = SlruCache::new(9, 3).unwrap();
        c.put(1);
        c.put(2);
        c.put(3);
        assert_eq!(c.dump(), vec![vec![], vec![], vec![3, 2, 1]]);

        assert!(c.get(&2));
        assert_eq!(c.dump(), vec![vec![], vec![2], vec![3, 1]]);

        assert!(c.get(&2));
        assert_eq!(c.dump(), vec![vec![2], vec![], vec![3, 1]]);

        c.put(4);
        assert_eq!(c.dump(), vec![vec![2], vec![], vec![4, 3, 1]]);

        assert_eq!(c.put(5), Some(1));
        assert_eq!(c.dump(), vec![vec![2], vec![], vec![5, 4, 3]]);

        assert!(c.get(&5));
        assert_eq!(c.dump(), vec![vec![2], vec![5], vec![4, 3]]);

        c.put(6);
        assert_eq!(c.dump(), vec![vec![2], vec![5], vec![6, 4, 3]]);

        assert!(c.get(&6));
        assert_eq!(c.dump(), vec![vec![2], vec![6, 5], vec![4, 3]]);

        assert!(c.get(&3));
        assert_eq!(c.dump(), vec![vec![2], vec![3, 6, 5], vec![4]]);

        assert!(c.get(&4));
        assert_eq!(c.dump(), vec![vec![2], vec![4, 3, 6], vec![5]]);

        assert!(c.get(&4));
        assert_eq!(c.dump(), vec![vec![4, 2], vec![3, 6], vec![5]]);
    }

    #[test]
    fn repeated_put_promotes_like_get() {
        let mut c = SlruCache::new(4, 2).unwrap();
        c.put(2);
        c.put(2);
        c.put(1);
        c.put(1);
        c.put(4);
        c.put(3);
        assert_eq!(c.dump(), vec![vec![1, 2], vec![3, 4]]);

        assert_eq!(c.position(&1).unwrap(), 0);
        assert_eq!(c.position(&2).unwrap(), 1);
        assert_eq!(c.position(&3).unwrap(), 2);
        assert_eq!(c.position(&4).unwrap(), 3);
    }

    #[test]
    fn remove_drains_tier_by_tier() {
        let mut c = SlruCache::new(4, 2).unwrap();
        c.put(2);
        c.put(2);
        c.put(1);
        c.put(1);
        c.put(4);
        c.put(3);

        assert!(c.remove(&2));
        assert_eq!(c.dump(), vec![vec![1], vec![3, 4]]);
        assert!(c.remove(&1));
        assert_eq!(c.dump(), vec![vec![], vec![3, 4]]);
        assert!(c.remove(&4));
        assert_eq!(c.dump(), vec![vec![], vec![3]]);
        assert!(c.remove(&3));
        assert_eq!(c.dump(), vec![vec![], vec![]]);
        assert!(!c.remove(&3));
    }

    #[test]
    fn per_tier_capacity_never_exceeded() {
        let mut c = SlruCache::new(9, 3).unwrap();
        for k in 0..20 {
            c.put(k);
            for tier in &c.tiers {
                assert!(tier.len() <= c.tier_cap);
            }
            assert!(c.len() <= c.maxlen());
        }
    }
}
