//! Declarative cache configuration.
//!
//! `CacheConfig` describes a policy's construction parameters so a
//! caller can load them from a `cache.toml` file and/or environment
//! variables instead of constructing a policy directly in code.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`CACHE_*`)
//! 2. Configuration file (`cache.toml`)
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// Which eviction policy a [`CacheConfig`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Least-recently-used.
    #[default]
    Lru,
    /// First-in-first-out.
    Fifo,
    /// Segmented least-recently-used.
    Slru,
    /// Least-frequently-used.
    Lfu,
    /// Uniform-random eviction.
    Random,
}

/// A validated, serializable description of a cache's construction
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Which policy to construct.
    pub kind: PolicyKind,
    /// Capacity upper bound.
    pub maxlen: usize,
    /// Number of tiers; only meaningful when `kind == Slru`.
    pub segments: Option<usize>,
    /// Random-admission probability in `(0, 1]`; only meaningful when
    /// the constructed policy is wrapped in
    /// [`crate::decorators::RandomAdmission`].
    pub admission_probability: Option<f64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::default(),
            maxlen: 1024,
            segments: None,
            admission_probability: None,
        }
    }
}

impl CacheConfig {
    /// Loads configuration layering a `cache.toml` file (if present)
    /// under `CACHE_*`-prefixed environment variables, environment
    /// taking precedence, over this struct's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the file cannot be parsed,
    /// the environment variables cannot be coerced to this struct's
    /// shape, or the resulting configuration fails [`Self::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("CACHE_"))
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every construction precondition for the selected policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first violated
    /// precondition.
    pub fn validate(&self) -> Result<(), Error> {
        if self.maxlen == 0 {
            return Err(Error::InvalidConfig("maxlen must be at least 1".to_string()));
        }
        match self.kind {
            PolicyKind::Slru => {
                let segments = self.segments.ok_or_else(|| {
                    Error::InvalidConfig("slru requires segments to be set".to_string())
                })?;
                if segments == 0 {
                    return Err(Error::InvalidConfig(
                        "segments must be at least 1".to_string(),
                    ));
                }
                if self.maxlen % segments != 0 {
                    return Err(Error::InvalidConfig(format!(
                        "maxlen ({}) must be divisible by segments ({segments})",
                        self.maxlen
                    )));
                }
            }
            _ => {
                if self.segments.is_some() {
                    return Err(Error::InvalidConfig(
                        "segments is only meaningful for the slru policy".to_string(),
                    ));
                }
            }
        }
        if let Some(p) = self.admission_probability {
            if !(p > 0.0 && p <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "admission_probability must be in (0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}
