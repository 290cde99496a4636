//! Random-admission decorator.
//!
//! Gates `put` of a not-yet-present key behind a Bernoulli trial with
//! probability `p`; every other operation, and a `put` of an
//! already-present key, forwards unchanged.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use crate::cache::{Cache, Positional};
use crate::error::{Error, Result};

/// Wraps a [`Cache`] and admits new keys with probability `probability`.
#[derive(Debug, Clone)]
pub struct RandomAdmission<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Cache<K>,
{
    inner: C,
    probability: f64,
    _marker: std::marker::PhantomData<K>,
}

impl<K, C> RandomAdmission<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Cache<K>,
{
    /// Wraps `inner`, admitting new keys with probability `probability`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `probability` is outside
    /// `(0, 1]`.
    pub fn new(inner: C, probability: f64) -> Result<Self> {
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "admission probability must be in (0, 1], got {probability}"
            )));
        }
        tracing::debug!(probability, "constructing RandomAdmission");
        Ok(Self {
            inner,
            probability,
            _marker: std::marker::PhantomData,
        })
    }

    /// Returns a reference to the wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Consumes the decorator, returning the wrapped cache.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<K, C> Cache<K> for RandomAdmission<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Cache<K>,
{
    type Dump = C::Dump;

    fn maxlen(&self) -> usize {
        self.inner.maxlen()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn has(&self, key: &K) -> bool {
        self.inner.has(key)
    }

    fn get(&mut self, key: &K) -> bool {
        self.inner.get(key)
    }

    fn put(&mut self, key: K) -> Option<K> {
        if self.inner.has(&key) {
            return self.inner.put(key);
        }
        if rand::thread_rng().gen::<f64>() < self.probability {
            self.inner.put(key)
        } else {
            None
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        self.inner.remove(key)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn dump(&self) -> Self::Dump {
        self.inner.dump()
    }

    fn put_name(&self) -> &'static str {
        self.inner.put_name()
    }

    fn put_doc(&self) -> &'static str {
        self.inner.put_doc()
    }
}

impl<K, C> Positional<K> for RandomAdmission<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Positional<K>,
{
    fn position(&self, key: &K) -> Result<usize> {
        self.inner.position(key)
    }
}
