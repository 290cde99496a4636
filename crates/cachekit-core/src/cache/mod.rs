//! Eviction-policy cache implementations.
//!
//! Every policy shares the [`Cache`] contract; [`Positional`] is an
//! optional extension implemented only by policies with a well-defined
//! total order (LRU, FIFO, Segmented-LRU).

mod fifo;
mod lfu;
mod lru;
mod random;
mod slru;

pub use fifo::FifoCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use random::RandomCache;
pub use slru::SlruCache;

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

/// The uniform operational contract shared by every eviction policy.
///
/// `Dump` is an associated type rather than a fixed `Vec<K>` because
/// Segmented-LRU's dump is naturally a list of per-tier lists
/// (`Vec<Vec<K>>`); every other policy's `Dump` is `Vec<K>`.
pub trait Cache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// The shape `dump()` materializes into.
    type Dump;

    /// Capacity upper bound.
    fn maxlen(&self) -> usize;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test; no side effect.
    fn has(&self, key: &K) -> bool;

    /// Hit: returns whether `key` is present; may reorder per policy.
    /// Must never insert.
    fn get(&mut self, key: &K) -> bool;

    /// Admits `key`. Returns the evicted key, if any eviction was
    /// required to make room; returns `None` if `key` was already
    /// present (in which case only reordering, per policy, occurs) or
    /// if the cache had spare capacity.
    fn put(&mut self, key: K) -> Option<K>;

    /// Removes `key` if present; returns whether a removal occurred.
    fn remove(&mut self, key: &K) -> bool;

    /// Empties the cache.
    fn clear(&mut self);

    /// A deterministic materialization of current contents, in the
    /// policy's defined order. See each policy's module docs.
    fn dump(&self) -> Self::Dump;

    /// The name of the `put` operation, as exposed by this cache.
    ///
    /// Concrete policies return `"put"`; decorators must forward to
    /// the wrapped cache's own `put_name()` rather than hard-coding
    /// their own, so that wrapping a cache never changes what a caller
    /// observes of the inner `put` operation's identity.
    fn put_name(&self) -> &'static str;

    /// The documentation string of the `put` operation, as exposed by
    /// this cache. Concrete policies return a fixed, non-empty string;
    /// decorators forward to the wrapped cache, exactly as `put_name`.
    fn put_doc(&self) -> &'static str;
}

/// Extension trait for policies with a well-defined total order:
/// LRU, FIFO, and Segmented-LRU implement it; LFU and Random do not,
/// since neither exposes a single linear position for a member.
pub trait Positional<K>: Cache<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// 0-based index of `key` in dump order. Fails if `key` is absent.
    /// O(n): unlike every other operation on this trait, there is no
    /// O(1) way to recover a rank from the underlying ordered set(s)
    /// without a dedicated order-statistics structure.
    fn position(&self, key: &K) -> Result<usize>;
}
