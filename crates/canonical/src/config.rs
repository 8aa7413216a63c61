//! Configuration types for text normalization.
//!
//! [`NormalizeConfig`] controls which characters survive normalization before
//! text is cut into k-grams.
//!
//! # Versioning
//!
//! Any change to normalization behavior must bump `version`. Fingerprints
//! persisted by callers are only comparable when they were produced under the
//! same normalization version.
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.allow_space);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for [`normalize`](crate::normalize).
///
/// Serializes as:
///
/// ```json
/// {
///   "version": 1,
///   "allow_space": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Semantic version of the normalization rules. Must be >= 1.
    #[serde(default = "NormalizeConfig::default_version")]
    pub version: u32,

    /// Keep ASCII space characters in the normalized output.
    ///
    /// When `false` (the default) spaces are deleted along with punctuation,
    /// so `"hello world"` and `"helloworld"` normalize identically and k-grams
    /// span word boundaries.
    #[serde(default)]
    pub allow_space: bool,
}

impl NormalizeConfig {
    fn default_version() -> u32 {
        1
    }

    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or drop ASCII spaces.
    pub fn with_allow_space(mut self, allow_space: bool) -> Self {
        self.allow_space = allow_space;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            allow_space: false,
        }
    }
}
