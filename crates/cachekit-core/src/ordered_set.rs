//! Intrusive doubly-linked ordered set.
//!
//! `OrderedSet<V>` holds unique values in a total order with a distinct
//! top and bottom end, and supports O(1) insert/move/remove by value.
//! [`OrderedSet::position`] is the exception: it has no rank-augmented
//! structure to consult, so it walks from the top in O(n). Every cache
//! policy in this crate is built on one or more instances of this
//! primitive; see the per-policy modules under [`crate::cache`].
//!
//! Nodes live in an arena (`Vec<Option<Node<V>>>`) addressed by stable
//! slot indices rather than pointers, with a free-list of vacated slots
//! so long eviction churn does not grow the arena unboundedly. A
//! `FxHashMap<V, usize>` resolves a value to its slot in O(1).

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Node<V> {
    value: V,
    up: Option<usize>,
    down: Option<usize>,
}

/// An intrusive doubly-linked set of unique values.
///
/// `top()` and `bottom()` name the two ends; policies built on top of
/// this primitive assign MRU/LRU, newest/oldest, or protected/admission
/// semantics to those ends as appropriate.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet<V> {
    arena: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    index: FxHashMap<V, usize>,
    top: Option<usize>,
    bottom: Option<usize>,
    len: usize,
}

impl<V: Eq + Hash + Clone + std::fmt::Debug> OrderedSet<V> {
    /// Creates an empty ordered set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            index: FxHashMap::default(),
            top: None,
            bottom: None,
            len: 0,
        }
    }

    /// Builds an ordered set from an iterator, top to bottom in
    /// iteration order. Fails if the iterator yields a duplicate value.
    pub fn from_iter_checked<I: IntoIterator<Item = V>>(iter: I) -> Result<Self> {
        let mut set = Self::new();
        for value in iter {
            set.append_bottom(value)?;
        }
        Ok(set)
    }

    /// Current number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.index.clear();
        self.top = None;
        self.bottom = None;
        self.len = 0;
    }

    fn alloc(&mut self, node: Node<V>) -> usize {
        if let Some(slot) = self.free.pop() {
            self.arena[slot] = Some(node);
            slot
        } else {
            self.arena.push(Some(node));
            self.arena.len() - 1
        }
    }

    fn dealloc(&mut self, slot: usize) -> V {
        let node = self.arena[slot].take().expect("slot occupied");
        self.free.push(slot);
        node.value
    }

    fn slot_of(&self, value: &V) -> Result<usize> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| Error::missing_key(value))
    }

    /// Inserts `value` at the top. Fails if already present.
    pub fn append_top(&mut self, value: V) -> Result<()> {
        if self.index.contains_key(&value) {
            return Err(Error::key_conflict(&value));
        }
        let old_top = self.top;
        let slot = self.alloc(Node {
            value: value.clone(),
            up: None,
            down: old_top,
        });
        if let Some(t) = old_top {
            self.arena[t].as_mut().expect("top occupied").up = Some(slot);
        } else {
            self.bottom = Some(slot);
        }
        self.top = Some(slot);
        self.index.insert(value, slot);
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` at the bottom. Fails if already present.
    pub fn append_bottom(&mut self, value: V) -> Result<()> {
        if self.index.contains_key(&value) {
            return Err(Error::key_conflict(&value));
        }
        let old_bottom = self.bottom;
        let slot = self.alloc(Node {
            value: value.clone(),
            up: old_bottom,
            down: None,
        });
        if let Some(b) = old_bottom {
            self.arena[b].as_mut().expect("bottom occupied").down = Some(slot);
        } else {
            self.top = Some(slot);
        }
        self.bottom = Some(slot);
        self.index.insert(value, slot);
        self.len += 1;
        Ok(())
    }

    /// Unlinks the node at `slot` from the chain without deallocating it.
    fn unlink(&mut self, slot: usize) {
        let (up, down) = {
            let node = self.arena[slot].as_ref().expect("linked node");
            (node.up, node.down)
        };
        match up {
            Some(u) => self.arena[u].as_mut().expect("neighbor").down = down,
            None => self.top = down,
        }
        match down {
            Some(d) => self.arena[d].as_mut().expect("neighbor").up = up,
            None => self.bottom = up,
        }
    }

    fn link_as_top(&mut self, slot: usize) {
        let old_top = self.top;
        {
            let node = self.arena[slot].as_mut().expect("linked node");
            node.up = None;
            node.down = old_top;
        }
        if let Some(t) = old_top {
            self.arena[t].as_mut().expect("top occupied").up = Some(slot);
        } else {
            self.bottom = Some(slot);
        }
        self.top = Some(slot);
    }

    fn link_as_bottom(&mut self, slot: usize) {
        let old_bottom = self.bottom;
        {
            let node = self.arena[slot].as_mut().expect("linked node");
            node.down = None;
            node.up = old_bottom;
        }
        if let Some(b) = old_bottom {
            self.arena[b].as_mut().expect("bottom occupied").down = Some(slot);
        } else {
            self.top = Some(slot);
        }
        self.bottom = Some(slot);
    }

    /// Moves `value` to the top. Fails if absent.
    pub fn move_to_top(&mut self, value: &V) -> Result<()> {
        let slot = self.slot_of(value)?;
        if self.top == Some(slot) {
            return Ok(());
        }
        self.unlink(slot);
        self.link_as_top(slot);
        Ok(())
    }

    /// Moves `value` to the bottom. Fails if absent.
    pub fn move_to_bottom(&mut self, value: &V) -> Result<()> {
        let slot = self.slot_of(value)?;
        if self.bottom == Some(slot) {
            return Ok(());
        }
        self.unlink(slot);
        self.link_as_bottom(slot);
        Ok(())
    }

    /// Swaps two adjacent slots, `upper` currently above `lower`.
    fn swap_adjacent(&mut self, upper: usize, lower: usize) {
        let above_upper = self.arena[upper].as_ref().expect("upper").up;
        let below_lower = self.arena[lower].as_ref().expect("lower").down;

        if let Some(a) = above_upper {
            self.arena[a].as_mut().expect("above").down = Some(lower);
        } else {
            self.top = Some(lower);
        }
        if let Some(b) = below_lower {
            self.arena[b].as_mut().expect("below").up = Some(upper);
        } else {
            self.bottom = Some(upper);
        }

        {
            let lower_node = self.arena[lower].as_mut().expect("lower");
            lower_node.up = above_upper;
            lower_node.down = Some(upper);
        }
        {
            let upper_node = self.arena[upper].as_mut().expect("upper");
            upper_node.up = Some(lower);
            upper_node.down = below_lower;
        }
    }

    /// Swaps `value` with its upward neighbor. No-op at the top. Fails if absent.
    pub fn move_up(&mut self, value: &V) -> Result<()> {
        let slot = self.slot_of(value)?;
        let up = self.arena[slot].as_ref().expect("node").up;
        if let Some(upper) = up {
            self.swap_adjacent(upper, slot);
        }
        Ok(())
    }

    /// Swaps `value` with its downward neighbor. No-op at the bottom. Fails if absent.
    pub fn move_down(&mut self, value: &V) -> Result<()> {
        let slot = self.slot_of(value)?;
        let down = self.arena[slot].as_ref().expect("node").down;
        if let Some(lower) = down {
            self.swap_adjacent(slot, lower);
        }
        Ok(())
    }

    /// Splices `value` directly above `anchor`. Fails if `anchor` is
    /// absent or `value` is already present.
    pub fn insert_above(&mut self, anchor: &V, value: V) -> Result<()> {
        let anchor_slot = self.slot_of(anchor)?;
        if self.index.contains_key(&value) {
            return Err(Error::key_conflict(&value));
        }
        let above = self.arena[anchor_slot].as_ref().expect("anchor").up;
        let slot = self.alloc(Node {
            value: value.clone(),
            up: above,
            down: Some(anchor_slot),
        });
        match above {
            Some(a) => self.arena[a].as_mut().expect("above").down = Some(slot),
            None => self.top = Some(slot),
        }
        self.arena[anchor_slot].as_mut().expect("anchor").up = Some(slot);
        self.index.insert(value, slot);
        self.len += 1;
        Ok(())
    }

    /// Splices `value` directly below `anchor`. Fails if `anchor` is
    /// absent or `value` is already present.
    pub fn insert_below(&mut self, anchor: &V, value: V) -> Result<()> {
        let anchor_slot = self.slot_of(anchor)?;
        if self.index.contains_key(&value) {
            return Err(Error::key_conflict(&value));
        }
        let below = self.arena[anchor_slot].as_ref().expect("anchor").down;
        let slot = self.alloc(Node {
            value: value.clone(),
            up: Some(anchor_slot),
            down: below,
        });
        match below {
            Some(b) => self.arena[b].as_mut().expect("below").up = Some(slot),
            None => self.bottom = Some(slot),
        }
        self.arena[anchor_slot].as_mut().expect("anchor").down = Some(slot);
        self.index.insert(value, slot);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the top value, or `None` if empty.
    pub fn pop_top(&mut self) -> Option<V> {
        let slot = self.top?;
        self.unlink(slot);
        let value = self.dealloc(slot);
        self.index.remove(&value);
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the bottom value, or `None` if empty.
    pub fn pop_bottom(&mut self) -> Option<V> {
        let slot = self.bottom?;
        self.unlink(slot);
        let value = self.dealloc(slot);
        self.index.remove(&value);
        self.len -= 1;
        Some(value)
    }

    /// Removes `value` if present; returns whether a removal occurred.
    pub fn remove(&mut self, value: &V) -> bool {
        let Some(&slot) = self.index.get(value) else {
            return false;
        };
        self.unlink(slot);
        self.dealloc(slot);
        self.index.remove(value);
        self.len -= 1;
        true
    }

    /// 0-based index of `value` from the top. Fails if absent. O(n):
    /// walks from the top, since no rank is tracked per slot.
    pub fn position(&self, value: &V) -> Result<usize> {
        let mut cur = self.top;
        let mut idx = 0;
        while let Some(slot) = cur {
            let node = self.arena[slot].as_ref().expect("linked node");
            if &node.value == value {
                return Ok(idx);
            }
            cur = node.down;
            idx += 1;
        }
        Err(Error::missing_key(value))
    }

    /// Iterates top to bottom.
    pub fn iter(&self) -> OrderedSetIter<'_, V> {
        OrderedSetIter {
            set: self,
            cur: self.top,
        }
    }

    /// Materializes the set top to bottom.
    #[must_use]
    pub fn to_vec(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }
}

/// Top-to-bottom iterator over an [`OrderedSet`].
pub struct OrderedSetIter<'a, V> {
    set: &'a OrderedSet<V>,
    cur: Option<usize>,
}

impl<'a, V> Iterator for OrderedSetIter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cur?;
        let node = self.set.arena[slot].as_ref().expect("linked node");
        self.cur = node.down;
        Some(&node.value)
    }
}
