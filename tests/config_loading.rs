use std::io::Write;

use phrasefp::{ConfigLoadError, DetectionStrategy, PhrasefpConfig, scan_with_config_file};
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    file
}

#[test]
fn minimal_file_uses_defaults() {
    let file = write_config("version: \"1\"\nphrases: [\"good game well played\"]\n");
    let config = PhrasefpConfig::from_file(file.path()).unwrap();

    assert_eq!(config.matcher.match_percent, 0.8);
    assert_eq!(config.matcher.strategy, DetectionStrategy::Sequence);
    assert!(!config.normalize.allow_space);

    let detector = config.build_detector().unwrap();
    // k = w = 21 / 2
    assert_eq!(detector.fingerprinter().config().kgram_len, 10);
    assert_eq!(detector.fingerprinter().config().window_len, 10);
}

#[test]
fn scan_with_config_file_end_to_end() {
    let file = write_config(
        r#"
version: "1.0"
fingerprint:
  kgram_len: 3
  window_len: 3
matcher:
  match_percent: 0.6
  strategy: sequence
phrases:
  - "never gonna give you up"
"#,
    );

    let reports = scan_with_config_file(
        file.path(),
        ["nevr gonna give u up", "completely unrelated chatter"],
    )
    .unwrap();
    assert!(reports[0].matched);
    assert!(!reports[1].matched);
}

#[test]
fn invalid_file_is_rejected_before_scanning() {
    let file = write_config("version: \"1.0\"\nmatcher:\n  match_percent: 2.0\n");
    let err = scan_with_config_file(file.path(), ["anything"]).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Validation(_)));
}

#[test]
fn config_round_trips_through_yaml() {
    let mut config = PhrasefpConfig::default();
    config.name = Some("round trip".into());
    config.phrases = vec!["all your base are belong to us".into()];
    config.matcher.strategy = DetectionStrategy::Overlap;
    config.fingerprint.kgram_len = Some(4);

    let yaml = serde_yaml::to_string(&config).unwrap();
    let file = write_config(&yaml);
    let loaded = PhrasefpConfig::from_file(file.path()).unwrap();

    assert_eq!(loaded.name.as_deref(), Some("round trip"));
    assert_eq!(loaded.phrases, config.phrases);
    assert_eq!(loaded.to_detector_config(), config.to_detector_config());
}
