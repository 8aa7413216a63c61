//! Workspace umbrella crate for phrasefp.
//!
//! This crate stitches normalization, winnowing fingerprints and phrase
//! matching together so callers can load a YAML config, build a detector and
//! scan messages through a single API entry point.

pub mod config;

pub use canonical::{
    CanonicalError, NormalizeConfig, count_occurrences, is_single_token, normalize,
};
pub use config::{
    ConfigLoadError, FingerprintYamlConfig, MatchYamlConfig, NormalizeYamlConfig, PhrasefpConfig,
};
pub use matcher::{
    DetectionStrategy, DetectorConfig, MatchError, MatchKind, MatchMetrics, MatchRange,
    PhraseDetector, PhraseMatch, SequenceMatcher, match_hashes, match_template,
    set_match_metrics,
};
pub use perceptual::{
    Fingerprint, FingerprintConfig, FingerprintError, FingerprintMeta, Fingerprinter,
    TextFingerprint, fingerprint_text, hash_sequence, winnow,
};

use serde::{Deserialize, Serialize};

/// Outcome of scanning a single message against a detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Zero-based position of the message in the scanned batch.
    pub line: usize,
    pub message: String,
    pub matched: bool,
    pub matches: Vec<PhraseMatch>,
}

/// Run one message through `detector`.
pub fn scan_message(detector: &PhraseDetector, line: usize, message: &str) -> ScanReport {
    let matches = detector.detect(message);
    ScanReport {
        line,
        message: message.to_string(),
        matched: !matches.is_empty(),
        matches,
    }
}

/// Scan every message in order, one report per message.
pub fn scan_messages<'a, I>(detector: &PhraseDetector, messages: I) -> Vec<ScanReport>
where
    I: IntoIterator<Item = &'a str>,
{
    messages
        .into_iter()
        .enumerate()
        .map(|(line, message)| scan_message(detector, line, message))
        .collect()
}

/// Load `path`, build its detector and scan `messages` with it.
pub fn scan_with_config_file<'a, P, I>(
    path: P,
    messages: I,
) -> Result<Vec<ScanReport>, ConfigLoadError>
where
    P: AsRef<std::path::Path>,
    I: IntoIterator<Item = &'a str>,
{
    let detector = PhrasefpConfig::from_file(path)?.build_detector()?;
    Ok(scan_messages(&detector, messages))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PhraseDetector {
        let cfg = DetectorConfig::default().with_kgram_len(3).with_window_len(3);
        PhraseDetector::new(["never gonna give you up", "gg"], &cfg).expect("valid detector")
    }

    #[test]
    fn scan_message_reports_hits() {
        let report = scan_message(&detector(), 4, "lol never gonna giv you up!!");
        assert_eq!(report.line, 4);
        assert!(report.matched);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].phrase_id, 0);
    }

    #[test]
    fn scan_messages_keeps_order() {
        let reports = scan_messages(&detector(), ["hello there", "GG! gg", ""]);
        assert_eq!(reports.len(), 3);
        assert!(!reports[0].matched);
        assert!(reports[1].matched);
        assert_eq!(reports[1].matches[0].kind, MatchKind::Exact { count: 2 });
        assert!(!reports[2].matched);
        assert_eq!(
            reports.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn scan_report_serializes_as_json() {
        let report = scan_message(&detector(), 0, "gg");
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["matched"], true);
        assert_eq!(json["matches"][0]["kind"]["type"], "exact");
        assert_eq!(json["matches"][0]["kind"]["count"], 1);
    }
}
