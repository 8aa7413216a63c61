//! Configuration and error types for phrase fingerprinting.
//!
//! The fingerprint of a text is a pure function of `(text, FingerprintConfig)`;
//! nothing here reads the environment.

use canonical::{CanonicalError, NormalizeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default polynomial base for the Karp-Rabin hash.
pub const DEFAULT_BASE: u64 = 158;

/// Default modulus: the largest positive signed 64-bit integer. Realistic
/// phrase lengths never wrap around it.
pub const DEFAULT_MODULUS: u64 = i64::MAX as u64;

/// Configuration for k-gram hashing and winnowing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect fingerprints must bump this
    /// version so persisted fingerprints stay comparable.
    pub version: u32,
    /// Characters per k-gram.
    ///
    /// Larger values are more specific; smaller values tolerate more edits.
    pub kgram_len: usize,
    /// Number of consecutive k-gram hashes per winnowing window.
    pub window_len: usize,
    /// Polynomial base of the rolling hash.
    pub base: u64,
    /// Every hash is reduced into `[0, modulus)`.
    pub modulus: u64,
    /// Normalization applied before hashing.
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl FingerprintConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive k-gram and window lengths from the shortest phrase a caller
    /// wants to detect: both become half its length, never less than one.
    pub fn for_shortest_phrase(shortest_len: usize) -> Self {
        let half = (shortest_len / 2).max(1);
        Self::default().with_kgram_len(half).with_window_len(half)
    }

    pub fn with_kgram_len(mut self, kgram_len: usize) -> Self {
        self.kgram_len = kgram_len;
        self
    }

    pub fn with_window_len(mut self, window_len: usize) -> Self {
        self.window_len = window_len;
        self
    }

    pub fn with_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    pub fn with_modulus(mut self, modulus: u64) -> Self {
        self.modulus = modulus;
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeConfig) -> Self {
        self.normalize = normalize;
        self
    }

    /// Shortest normalized text that yields at least one fingerprint.
    pub fn min_text_len(&self) -> usize {
        self.kgram_len + self.window_len.saturating_sub(1)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.version < 1 {
            return Err(FingerprintError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.kgram_len < 1 {
            return Err(FingerprintError::InvalidConfigKgram { k: self.kgram_len });
        }
        if self.window_len < 1 {
            return Err(FingerprintError::InvalidConfigWindow { w: self.window_len });
        }
        if self.base < 1 {
            return Err(FingerprintError::InvalidConfigBase { base: self.base });
        }
        if self.modulus < 2 || self.modulus > DEFAULT_MODULUS {
            return Err(FingerprintError::InvalidConfigModulus {
                modulus: self.modulus,
            });
        }
        self.normalize.validate()?;
        Ok(())
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            version: 1,
            kgram_len: 5,
            window_len: 4,
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
            normalize: NormalizeConfig::default(),
        }
    }
}

/// Errors returned when a fingerprint configuration is rejected.
///
/// Fingerprint generation itself never fails; short or empty text simply
/// yields no fingerprints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("invalid config: kgram_len must be >= 1 (got {k})")]
    InvalidConfigKgram { k: usize },

    #[error("invalid config: window_len must be >= 1 (got {w})")]
    InvalidConfigWindow { w: usize },

    #[error("invalid config: base must be >= 1 (got {base})")]
    InvalidConfigBase { base: u64 },

    #[error("invalid config: modulus must be in [2, i64::MAX] (got {modulus})")]
    InvalidConfigModulus { modulus: u64 },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("normalization config rejected: {0}")]
    Canonical(#[from] CanonicalError),
}
