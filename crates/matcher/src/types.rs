use std::ops::Range;

use perceptual::FingerprintError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Half-open interval `[start, end)` over a source hash sequence that is
/// judged to contain one noisy occurrence of a template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for MatchRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// How multi-token phrases are tested once no exact occurrence is found.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Ordered approximate matching over hash sequences.
    #[default]
    Sequence,
    /// Unordered set overlap between phrase and message hashes.
    Overlap,
}

/// Why a phrase was reported as present in a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchKind {
    /// The normalized phrase occurs verbatim `count` times.
    Exact { count: usize },
    /// The sequence matcher accepted these ranges of the message hashes.
    Sequence { ranges: Vec<MatchRange> },
    /// `shared` distinct phrase hashes were found in the message.
    Overlap { shared: usize },
}

/// A phrase found in a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Index of the phrase in the order it was registered.
    pub phrase_id: usize,
    pub phrase: String,
    pub kind: MatchKind,
}

/// Errors that can occur while building or running a matcher.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("match_percent must be in (0, 1] (got {value})")]
    InvalidMatchPercent { value: f64 },
    #[error("phrase {index} is empty after normalization")]
    EmptyPhrase { index: usize },
    #[error("at least one phrase is required")]
    NoPhrases,
    #[error("fingerprint configuration rejected: {0}")]
    Fingerprint(#[from] FingerprintError),
}

/// Reject thresholds outside `(0, 1]`, NaN included.
pub fn validate_match_percent(value: f64) -> Result<(), MatchError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MatchError::InvalidMatchPercent { value })
    }
}
