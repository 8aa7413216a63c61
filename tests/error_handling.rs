use phrasefp::{
    CanonicalError, ConfigLoadError, DetectorConfig, FingerprintConfig, FingerprintError,
    MatchError, NormalizeConfig, PhraseDetector, PhrasefpConfig, fingerprint_text, match_hashes,
};

#[test]
fn zero_kgram_len_is_rejected() {
    let result = fingerprint_text("hello world", &FingerprintConfig::new().with_kgram_len(0));
    assert_eq!(result, Err(FingerprintError::InvalidConfigKgram { k: 0 }));
}

#[test]
fn zero_window_len_is_rejected() {
    let result = fingerprint_text("hello world", &FingerprintConfig::new().with_window_len(0));
    assert_eq!(result, Err(FingerprintError::InvalidConfigWindow { w: 0 }));
}

#[test]
fn modulus_out_of_range_is_rejected() {
    for modulus in [0, 1, u64::MAX] {
        let result = fingerprint_text("hello", &FingerprintConfig::new().with_modulus(modulus));
        assert_eq!(result, Err(FingerprintError::InvalidConfigModulus { modulus }));
    }
}

#[test]
fn bad_normalize_version_surfaces_as_canonical_error() {
    let normalize = NormalizeConfig {
        version: 0,
        ..NormalizeConfig::default()
    };
    let result = fingerprint_text("hello", &FingerprintConfig::new().with_normalize(normalize));
    assert!(matches!(
        result,
        Err(FingerprintError::Canonical(CanonicalError::InvalidConfig(_)))
    ));
}

#[test]
fn short_text_is_not_an_error() {
    let fp = fingerprint_text("hi", &FingerprintConfig::default()).unwrap();
    assert_eq!(fp.normalized, "hi");
    assert!(fp.kgram_hashes.is_empty());
    assert!(fp.is_empty());
}

#[test]
fn match_percent_outside_unit_interval_is_rejected() {
    for p in [0.0, -0.5, 1.01, f64::NAN] {
        assert!(matches!(
            match_hashes(&[1, 2], &[1, 2], p),
            Err(MatchError::InvalidMatchPercent { .. })
        ));
        assert!(matches!(
            PhraseDetector::new(["a phrase"], &DetectorConfig::default().with_match_percent(p)),
            Err(MatchError::InvalidMatchPercent { .. })
        ));
    }
}

#[test]
fn detector_requires_usable_phrases() {
    let none: Vec<String> = Vec::new();
    assert_eq!(
        PhraseDetector::new(none, &DetectorConfig::default()).unwrap_err(),
        MatchError::NoPhrases
    );
    assert_eq!(
        PhraseDetector::new(["fine", "!!!"], &DetectorConfig::default()).unwrap_err(),
        MatchError::EmptyPhrase { index: 1 }
    );
}

#[test]
fn config_errors_carry_context() {
    let err = PhrasefpConfig::from_yaml("version: \"3\"\n").unwrap_err();
    assert_eq!(err.to_string(), "unsupported config version: 3");

    let err = PhrasefpConfig::from_yaml("version: [1, 2]\n").unwrap_err();
    assert!(matches!(err, ConfigLoadError::YamlParse(_)));

    let err = PhrasefpConfig::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigLoadError::FileRead(_)));

    let config = PhrasefpConfig::from_yaml("version: \"1\"\nphrases: [\"?!\"]\n").unwrap();
    let err = config.build_detector().unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::Match(MatchError::EmptyPhrase { index: 0 })
    ));
}
