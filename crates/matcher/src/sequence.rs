//! Approximate ordered matching of a short template hash sequence inside a
//! longer source hash sequence.
//!
//! The scan is greedy and single-pass. Every source index an attempt visits is
//! consumed for the rest of the call, so later attempts cannot reuse it. All
//! of that bookkeeping lives in one [`Scan`] value per call; nothing is shared
//! between calls.

use std::collections::HashMap;

use perceptual::{hash_sequence, Fingerprint};
use tracing::debug;

use crate::types::{validate_match_percent, MatchError, MatchRange};


/// Matcher with a validated acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceMatcher {
    match_percent: f64,
}

impl SequenceMatcher {
    /// Fails when `match_percent` is outside `(0, 1]`.
    pub fn new(match_percent: f64) -> Result<Self, MatchError> {
        validate_match_percent(match_percent)?;
        Ok(Self { match_percent })
    }

    pub fn match_percent(&self) -> f64 {
        self.match_percent
    }

    /// Order both fingerprint sequences by position and match their hashes.
    pub fn match_fingerprints(
        &self,
        template: &[Fingerprint],
        source: &[Fingerprint],
    ) -> Vec<MatchRange> {
        self.match_hashes(&hash_sequence(template), &hash_sequence(source))
    }

    /// Find ranges of `source` that plausibly contain `template`.
    ///
    /// Ranges come back in attempt order: template start positions ascending,
    /// and source start indices ascending within each.
    pub fn match_hashes(&self, template: &[u64], source: &[u64]) -> Vec<MatchRange> {
        if template.is_empty() || source.is_empty() {
            return Vec::new();
        }
        let ranges = Scan::new(template, source, self.match_percent).run();
        debug!(
            template_len = template.len(),
            source_len = source.len(),
            range_count = ranges.len(),
            "sequence_match"
        );
        ranges
    }
}

/// Validate `match_percent`, then match `template` inside `source`.
pub fn match_template(
    template: &[Fingerprint],
    source: &[Fingerprint],
    match_percent: f64,
) -> Result<Vec<MatchRange>, MatchError> {
    Ok(SequenceMatcher::new(match_percent)?.match_fingerprints(template, source))
}

/// Hash-sequence form of [`match_template`].
pub fn match_hashes(
    template: &[u64],
    source: &[u64],
    match_percent: f64,
) -> Result<Vec<MatchRange>, MatchError> {
    Ok(SequenceMatcher::new(match_percent)?.match_hashes(template, source))
}

/// Source indices already used by some attempt in the current call.
#[derive(Debug)]
struct VisitedSet {
    seen: Vec<bool>,
}

impl VisitedSet {
    fn with_len(len: usize) -> Self {
        Self {
            seen: vec![false; len],
        }
    }

    #[inline]
    fn contains(&self, idx: usize) -> bool {
        self.seen[idx]
    }

    #[inline]
    fn insert(&mut self, idx: usize) {
        self.seen[idx] = true;
    }
}

/// For every template hash, the template indices holding it, ascending.
#[derive(Debug)]
struct TemplateIndex {
    positions: HashMap<u64, Vec<usize>>,
}

impl TemplateIndex {
    fn new(template: &[u64]) -> Self {
        let mut positions: HashMap<u64, Vec<usize>> = HashMap::new();
        for (idx, &hash) in template.iter().enumerate() {
            positions.entry(hash).or_default().push(idx);
        }
        Self { positions }
    }

    /// First template index `>= from` holding `hash`.
    fn next_at_or_after(&self, hash: u64, from: usize) -> Option<usize> {
        let indices = self.positions.get(&hash)?;
        let at = indices.partition_point(|&idx| idx < from);
        indices.get(at).copied()
    }

    fn contains(&self, hash: u64) -> bool {
        self.positions.contains_key(&hash)
    }
}

/// Working state of one matching call.
struct Scan<'a> {
    template: &'a [u64],
    source: &'a [u64],
    match_percent: f64,
    index: TemplateIndex,
    /// Source indices of every hash that also appears in the template.
    locations: HashMap<u64, Vec<usize>>,
    consumed: VisitedSet,
}

/// Outcome of scanning forward from one start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attempt {
    matched: usize,
    counted: usize,
    /// Last source index examined (inclusive).
    last: usize,
}

impl<'a> Scan<'a> {
    fn new(template: &'a [u64], source: &'a [u64], match_percent: f64) -> Self {
        let index = TemplateIndex::new(template);
        let mut locations: HashMap<u64, Vec<usize>> = HashMap::new();
        for (idx, &hash) in source.iter().enumerate() {
            if index.contains(hash) {
                locations.entry(hash).or_default().push(idx);
            }
        }
        Self {
            template,
            source,
            match_percent,
            index,
            locations,
            consumed: VisitedSet::with_len(source.len()),
        }
    }

    fn run(mut self) -> Vec<MatchRange> {
        let template_len = self.template.len();
        // only the first half of the template may anchor an attempt
        let eligible = template_len.div_ceil(2);
        let mut ranges = Vec::new();

        for start_pos in 0..eligible {
            let anchor = self.template[start_pos];
            let Some(starts) = self.locations.get(&anchor).cloned() else {
                continue;
            };
            for start_idx in starts {
                if self.consumed.contains(start_idx) {
                    continue;
                }
                let attempt = self.attempt(start_pos, start_idx);
                if self.accepts(&attempt) {
                    ranges.push(MatchRange::new(start_idx, attempt.last + 1));
                }
            }
        }
        ranges
    }

    fn attempt(&mut self, start_pos: usize, start_idx: usize) -> Attempt {
        let template_len = self.template.len();
        let anchor = self.template[start_pos];
        let final_hash = self.template[template_len - 1];
        // ceil(template_len * 1.8) in integers
        let span = (template_len * 9).div_ceil(5);
        let stop = self.source.len().min(start_idx + span);

        let mut template_idx = start_pos;
        let mut matched = 0usize;
        let mut counted = 0usize;
        let mut last = start_idx;

        for j in start_idx..stop {
            let hash = self.source[j];
            last = j;
            if !self.consumed.contains(j) {
                if let Some(next) = self.index.next_at_or_after(hash, template_idx) {
                    template_idx = next;
                    matched += 1;
                }
            }
            counted += 1;

            // end of the template reached, or another instance starts here;
            // the breaking index stays available to later attempts
            if hash == final_hash || (hash == anchor && j != start_idx) {
                break;
            }
            self.consumed.insert(j);
        }

        Attempt {
            matched,
            counted,
            last,
        }
    }

    fn accepts(&self, attempt: &Attempt) -> bool {
        let ratio = attempt.matched as f64 / attempt.counted as f64;
        ratio >= self.match_percent
            && attempt.counted as f64 >= self.template.len() as f64 * self.match_percent
    }
}
