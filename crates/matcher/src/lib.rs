//! # Phrase Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides whether a short reference phrase, verbatim or lightly
//! edited, occurs inside a longer message. It consumes fingerprints produced
//! by the `perceptual` crate and never touches storage or the network.
//!
//! ## Core Types
//!
//! - [`SequenceMatcher`]: greedy single-pass search for noisy occurrences of
//!   a template hash sequence inside a source hash sequence; returns
//!   [`MatchRange`]s over the source.
//! - [`PhraseDetector`]: fingerprints a phrase list once and checks messages
//!   against it, trying an exact normalized substring first and falling back
//!   to the configured [`DetectionStrategy`] for multi-token phrases.
//! - [`DetectorConfig`]: threshold, strategy and fingerprint tunables.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{match_hashes, MatchRange};
//!
//! let template = [171, 808];
//! let source = [1442, 2938, 1107, 171, 808, 2780, 3169, 1435];
//! let ranges = match_hashes(&template, &source, 0.6).unwrap();
//! assert_eq!(ranges, vec![MatchRange::new(3, 5)]);
//! ```
//!
//! ```
//! use matcher::{DetectorConfig, PhraseDetector};
//!
//! let cfg = DetectorConfig::default().with_kgram_len(3).with_window_len(3);
//! let detector = PhraseDetector::new(["never gonna give you up"], &cfg).unwrap();
//! assert!(detector.is_match("lol never gonna giv you up!!"));
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-detection latency and hit counts.

pub mod detector;
pub mod metrics;
pub mod overlap;
pub mod sequence;
pub mod types;

pub use crate::detector::{DetectorConfig, PhraseDetector};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::overlap::{overlap_accepts, shared_hash_count};
pub use crate::sequence::{match_hashes, match_template, SequenceMatcher};
pub use crate::types::{
    validate_match_percent, DetectionStrategy, MatchError, MatchKind, MatchRange, PhraseMatch,
};
