//! Phrase detection policy on top of fingerprinting and sequence matching.
//!
//! Each registered phrase is normalized and fingerprinted once. A message is
//! then checked phrase by phrase:
//!
//! 1. an exact occurrence of the normalized phrase in the normalized message
//!    is always a hit;
//! 2. single-token phrases stop there;
//! 3. multi-token phrases fall back to the configured [`DetectionStrategy`].

use std::time::Instant;

use canonical::{count_occurrences, is_single_token, NormalizeConfig};
use perceptual::{
    hash_sequence, Fingerprint, FingerprintConfig, Fingerprinter, DEFAULT_BASE, DEFAULT_MODULUS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

use crate::metrics::metrics_recorder;
use crate::overlap::{overlap_accepts, shared_hash_count};
use crate::sequence::SequenceMatcher;
use crate::types::{
    validate_match_percent, DetectionStrategy, MatchError, MatchKind, PhraseMatch,
};

/// Tunables for a [`PhraseDetector`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorConfig {
    /// Acceptance threshold in `(0, 1]`.
    #[serde(default = "DetectorConfig::default_match_percent")]
    pub match_percent: f64,
    #[serde(default)]
    pub strategy: DetectionStrategy,
    /// Characters per k-gram. Derived from the shortest phrase when unset.
    #[serde(default)]
    pub kgram_len: Option<usize>,
    /// Hashes per winnowing window. Derived from the shortest phrase when unset.
    #[serde(default)]
    pub window_len: Option<usize>,
    #[serde(default = "DetectorConfig::default_base")]
    pub base: u64,
    #[serde(default = "DetectorConfig::default_modulus")]
    pub modulus: u64,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl DetectorConfig {
    pub(crate) fn default_match_percent() -> f64 {
        0.8
    }

    fn default_base() -> u64 {
        DEFAULT_BASE
    }

    fn default_modulus() -> u64 {
        DEFAULT_MODULUS
    }

    pub fn with_match_percent(mut self, match_percent: f64) -> Self {
        self.match_percent = match_percent;
        self
    }

    pub fn with_strategy(mut self, strategy: DetectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_kgram_len(mut self, kgram_len: usize) -> Self {
        self.kgram_len = Some(kgram_len);
        self
    }

    pub fn with_window_len(mut self, window_len: usize) -> Self {
        self.window_len = Some(window_len);
        self
    }

    /// Resolve the fingerprint configuration for a phrase set whose shortest
    /// phrase has `shortest_len` characters.
    pub fn fingerprint_config(&self, shortest_len: usize) -> FingerprintConfig {
        let derived = FingerprintConfig::for_shortest_phrase(shortest_len);
        let kgram_len = self.kgram_len.unwrap_or(derived.kgram_len);
        let window_len = self.window_len.unwrap_or(derived.window_len);
        derived
            .with_kgram_len(kgram_len)
            .with_window_len(window_len)
            .with_base(self.base)
            .with_modulus(self.modulus)
            .with_normalize(self.normalize.clone())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            match_percent: Self::default_match_percent(),
            strategy: DetectionStrategy::default(),
            kgram_len: None,
            window_len: None,
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
            normalize: NormalizeConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct PhraseEntry {
    text: String,
    normalized: String,
    single_token: bool,
    fingerprints: Vec<Fingerprint>,
    hashes: Vec<u64>,
}

/// Detects registered phrases inside free-text messages.
///
/// Immutable after construction; share it freely between threads.
#[derive(Debug, Clone)]
pub struct PhraseDetector {
    phrases: Vec<PhraseEntry>,
    fingerprinter: Fingerprinter,
    sequence: SequenceMatcher,
    strategy: DetectionStrategy,
}

impl PhraseDetector {
    /// Fingerprint every phrase and validate the configuration.
    pub fn new<I, S>(phrases: I, cfg: &DetectorConfig) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_match_percent(cfg.match_percent)?;
        let texts: Vec<String> = phrases.into_iter().map(Into::into).collect();
        let shortest = texts
            .iter()
            .map(|t| t.chars().count())
            .min()
            .ok_or(MatchError::NoPhrases)?;

        let fingerprinter = Fingerprinter::new(cfg.fingerprint_config(shortest))?;
        let sequence = SequenceMatcher::new(cfg.match_percent)?;

        let mut entries = Vec::with_capacity(texts.len());
        for (index, text) in texts.into_iter().enumerate() {
            let fp = fingerprinter.fingerprint(&text);
            if fp.normalized.is_empty() {
                return Err(MatchError::EmptyPhrase { index });
            }
            entries.push(PhraseEntry {
                single_token: is_single_token(&text),
                hashes: fp.hashes(),
                normalized: fp.normalized,
                fingerprints: fp.fingerprints,
                text,
            });
        }

        let fp_cfg = fingerprinter.config();
        info!(
            phrase_count = entries.len(),
            kgram_len = fp_cfg.kgram_len,
            window_len = fp_cfg.window_len,
            strategy = ?cfg.strategy,
            match_percent = cfg.match_percent,
            "phrase_detector_ready"
        );

        Ok(Self {
            phrases: entries,
            fingerprinter,
            sequence,
            strategy: cfg.strategy,
        })
    }

    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    pub fn strategy(&self) -> DetectionStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Registered phrases in id order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|p| p.text.as_str())
    }

    /// Cached fingerprints of phrase `phrase_id`, for callers that persist or
    /// index them.
    pub fn phrase_fingerprints(&self, phrase_id: usize) -> Option<&[Fingerprint]> {
        self.phrases
            .get(phrase_id)
            .map(|p| p.fingerprints.as_slice())
    }

    /// True when at least one phrase is present in `message`.
    pub fn is_match(&self, message: &str) -> bool {
        !self.detect(message).is_empty()
    }

    /// Every registered phrase found in `message`, in phrase order.
    pub fn detect(&self, message: &str) -> Vec<PhraseMatch> {
        let start = Instant::now();
        let span = tracing::span!(Level::DEBUG, "matcher.detect", message_len = message.len());
        let _guard = span.enter();

        let normalized = self.fingerprinter.normalize(message);
        let mut message_hashes: Option<Vec<u64>> = None;
        let mut hits = Vec::new();

        for (phrase_id, phrase) in self.phrases.iter().enumerate() {
            let count = count_occurrences(&normalized, &phrase.normalized);
            let kind = if count > 0 {
                Some(MatchKind::Exact { count })
            } else if phrase.single_token {
                None
            } else {
                let source = message_hashes.get_or_insert_with(|| {
                    let fp = self.fingerprinter.fingerprint_normalized(normalized.clone());
                    hash_sequence(&fp.fingerprints)
                });
                self.fuzzy(phrase, source)
            };

            if let Some(kind) = kind {
                debug!(phrase_id, kind = ?kind, "phrase_detected");
                hits.push(PhraseMatch {
                    phrase_id,
                    phrase: phrase.text.clone(),
                    kind,
                });
            }
        }

        if let Some(recorder) = metrics_recorder() {
            recorder.record_detection(start.elapsed(), self.phrases.len(), hits.len());
        }
        hits
    }

    fn fuzzy(&self, phrase: &PhraseEntry, source: &[u64]) -> Option<MatchKind> {
        match self.strategy {
            DetectionStrategy::Sequence => {
                let ranges = self.sequence.match_hashes(&phrase.hashes, source);
                (!ranges.is_empty()).then_some(MatchKind::Sequence { ranges })
            }
            DetectionStrategy::Overlap => {
                let shared = shared_hash_count(&phrase.hashes, source);
                overlap_accepts(
                    shared,
                    phrase.fingerprints.len(),
                    self.sequence.match_percent(),
                )
                .then_some(MatchKind::Overlap { shared })
            }
        }
    }
}
