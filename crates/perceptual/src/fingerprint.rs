//! Fingerprint types produced by the winnowing stage.
//!
//! The fingerprint schema and metadata are part of the public contract: any
//! incompatible change must result in a new `fingerprint_version`.

use serde::{Deserialize, Serialize};

/// A winnowed k-gram hash together with its index in the k-gram hash sequence.
///
/// `position` counts k-grams (the first k-gram is position 0), not characters
/// of the original text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub hash: u64,
    pub position: usize,
}

impl Fingerprint {
    pub fn new(hash: u64, position: usize) -> Self {
        Self { hash, position }
    }
}

impl From<(u64, usize)> for Fingerprint {
    fn from((hash, position): (u64, usize)) -> Self {
        Self { hash, position }
    }
}

/// Project fingerprints onto their hash values ordered by position.
///
/// The sort is stable, so fingerprints sharing a position keep their
/// generation order. This is the form the sequence matcher consumes and the
/// form callers should persist when they index phrases.
pub fn hash_sequence(fingerprints: &[Fingerprint]) -> Vec<u64> {
    let mut ordered: Vec<&Fingerprint> = fingerprints.iter().collect();
    ordered.sort_by_key(|fp| fp.position);
    ordered.into_iter().map(|fp| fp.hash).collect()
}

/// Full fingerprinting artifact for one text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextFingerprint {
    /// Text after normalization; this is what was cut into k-grams.
    pub normalized: String,
    /// Every k-gram hash, in left-to-right order.
    pub kgram_hashes: Vec<u64>,
    /// Winnowed fingerprints in window-processing order.
    pub fingerprints: Vec<Fingerprint>,
    pub meta: FingerprintMeta,
}

impl TextFingerprint {
    /// Hash-only view ordered by position. See [`hash_sequence`].
    pub fn hashes(&self) -> Vec<u64> {
        hash_sequence(&self.fingerprints)
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintMeta {
    /// Algorithm version owned by this crate.
    pub fingerprint_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    pub kgram_len: usize,
    pub window_len: usize,
    pub base: u64,
    pub modulus: u64,
    /// Version of the normalization rules applied before hashing.
    pub normalize_version: u32,
    pub allow_space: bool,
    /// Configuration schema version that was supplied.
    pub config_version: u32,
}
