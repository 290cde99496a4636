//! Error types for `cachekit`.
//!
//! This module provides a unified error type for every cache and
//! `OrderedSet` operation that can fail. Error codes follow the pattern
//! `CACHE-XXX` for easy debugging.

use thiserror::Error;

/// Result type alias for `cachekit` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `cachekit` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value is already present where uniqueness was required (CACHE-001).
    #[error("[CACHE-001] key already present: {value}")]
    KeyConflict {
        /// Debug rendering of the offending key.
        value: String,
    },

    /// An operation required a key to be present but it was absent (CACHE-002).
    #[error("[CACHE-002] key not found: {value}")]
    MissingKey {
        /// Debug rendering of the missing key.
        value: String,
    },

    /// A construction parameter violated its precondition (CACHE-003).
    #[error("[CACHE-003] invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Builds a [`Error::KeyConflict`] from any `Debug` key.
    #[must_use]
    pub fn key_conflict<K: std::fmt::Debug>(key: &K) -> Self {
        Self::KeyConflict {
            value: format!("{key:?}"),
        }
    }

    /// Builds a [`Error::MissingKey`] from any `Debug` key.
    #[must_use]
    pub fn missing_key<K: std::fmt::Debug>(key: &K) -> Self {
        Self::MissingKey {
            value: format!("{key:?}"),
        }
    }

    /// Returns the error code (e.g., "CACHE-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::KeyConflict { .. } => "CACHE-001",
            Self::MissingKey { .. } => "CACHE-002",
            Self::InvalidConfig(_) => "CACHE-003",
        }
    }

    /// Returns true if a caller could plausibly retry after adjusting
    /// its own state (all current error kinds are of this sort: none of
    /// them indicate corruption).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}
