//! # Phrase Fingerprinting
//!
//! Converts free text into a compact, order-preserving set of
//! `(hash, position)` pairs that survives small edits. Short reference
//! phrases and long message bodies go through the same pipeline so their
//! fingerprints can be compared by the `matcher` crate.
//!
//! ## Contract
//!
//! - The API is a pure function of `(text, config)` with no I/O and no global
//!   state.
//! - Text shorter than `kgram_len + window_len - 1` characters after
//!   normalization yields an empty fingerprint, never an error.
//! - Every hash lies in `[0, modulus)`.
//!
//! ## Pipeline
//!
//! 1.  **Normalization**: URLs, punctuation and non-ASCII characters are
//!     removed and the rest is lowercased (see the `canonical` crate).
//!
//! 2.  **Rolling hash**: every character k-gram is hashed with a Karp-Rabin
//!     polynomial hash, updated in O(1) per character.
//!
//! 3.  **Winnowing**: one minimum per window of `window_len` consecutive
//!     k-gram hashes is kept, with rightmost tie-breaking and suppression of
//!     repeated picks.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{Fingerprinter, FingerprintConfig};
//!
//! let cfg = FingerprintConfig::new().with_kgram_len(2).with_window_len(2);
//! let fingerprinter = Fingerprinter::new(cfg).unwrap();
//!
//! let fps = fingerprinter.generate("hello world");
//! assert_eq!(fps[0].hash, 802);
//! assert_eq!(fps[0].position, 1);
//! ```
//!
pub mod config;
pub mod fingerprint;
mod rolling;
mod winnow;

use std::time::Instant;

use canonical::normalize;
use tracing::debug;

pub use crate::config::{FingerprintConfig, FingerprintError, DEFAULT_BASE, DEFAULT_MODULUS};
pub use crate::fingerprint::{hash_sequence, Fingerprint, FingerprintMeta, TextFingerprint};
pub use crate::rolling::{char_value, hash_kgram, hash_kgrams};
pub use crate::winnow::winnow;

/// Current fingerprint algorithm version for this crate.
pub const FINGERPRINT_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const FINGERPRINT_ALGORITHM: &str = "karprabin_winnow_v1";

/// Validated fingerprint generator.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads and reused for every phrase and message.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprinter {
    cfg: FingerprintConfig,
}

impl Fingerprinter {
    /// Validate `cfg` and build a generator. Fails fast on bad settings.
    pub fn new(cfg: FingerprintConfig) -> Result<Self, FingerprintError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.cfg
    }

    /// Normalize `text` with this generator's normalization settings.
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.cfg.normalize)
    }

    /// Winnowed fingerprints of `text`, in window-processing order.
    pub fn generate(&self, text: &str) -> Vec<Fingerprint> {
        self.fingerprint(text).fingerprints
    }

    /// Fingerprint `text` and keep the intermediates.
    pub fn fingerprint(&self, text: &str) -> TextFingerprint {
        let start = Instant::now();
        let normalized = self.normalize(text);
        let fp = self.fingerprint_normalized(normalized);
        debug!(
            normalized_len = fp.normalized.len(),
            kgram_count = fp.kgram_hashes.len(),
            fingerprint_count = fp.fingerprints.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "fingerprint_generated"
        );
        fp
    }

    /// Fingerprint text that has already been normalized.
    pub fn fingerprint_normalized(&self, normalized: String) -> TextFingerprint {
        let cfg = &self.cfg;
        let kgram_hashes = hash_kgrams(&normalized, cfg.kgram_len, cfg.base, cfg.modulus);
        let fingerprints = winnow(&kgram_hashes, cfg.window_len);

        TextFingerprint {
            normalized,
            kgram_hashes,
            fingerprints,
            meta: self.meta(),
        }
    }

    fn meta(&self) -> FingerprintMeta {
        FingerprintMeta {
            fingerprint_version: FINGERPRINT_VERSION,
            algorithm_name: FINGERPRINT_ALGORITHM.to_string(),
            kgram_len: self.cfg.kgram_len,
            window_len: self.cfg.window_len,
            base: self.cfg.base,
            modulus: self.cfg.modulus,
            normalize_version: self.cfg.normalize.version,
            allow_space: self.cfg.normalize.allow_space,
            config_version: self.cfg.version,
        }
    }
}

/// One-shot helper: validate `cfg` and fingerprint `text`.
pub fn fingerprint_text(
    text: &str,
    cfg: &FingerprintConfig,
) -> Result<TextFingerprint, FingerprintError> {
    Ok(Fingerprinter::new(cfg.clone())?.fingerprint(text))
}
