//! YAML configuration file support for phrasefp.
//!
//! A single YAML file carries the normalization rules, fingerprint tunables,
//! matcher threshold and the phrase list. Every section is optional except
//! `version`; omitted fields fall back to the library defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "chat filter"
//!
//! normalize:
//!   allow_space: false
//!
//! fingerprint:
//!   kgram_len: 3     # derived from the shortest phrase when omitted
//!   window_len: 3
//!   base: 158
//!   modulus: 9223372036854775807
//!
//! matcher:
//!   match_percent: 0.8
//!   strategy: sequence   # or "overlap"
//!
//! phrases:
//!   - "never gonna give you up"
//!   - "all your base are belong to us"
//! ```

use std::fs;
use std::path::Path;

use canonical::NormalizeConfig;
use matcher::{
    DetectionStrategy, DetectorConfig, MatchError, PhraseDetector, validate_match_percent,
};
use perceptual::{DEFAULT_BASE, DEFAULT_MODULUS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("failed to build detector: {0}")]
    Match(#[from] MatchError),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PhrasefpConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub normalize: NormalizeYamlConfig,

    #[serde(default)]
    pub fingerprint: FingerprintYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    /// Reference phrases to detect
    #[serde(default)]
    pub phrases: Vec<String>,
}

impl PhrasefpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PhrasefpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section. Called by the loaders; call it again after
    /// mutating a loaded config by hand.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.normalize.validate()?;
        self.fingerprint.validate()?;
        self.matcher.validate()?;

        if let Some(idx) = self.phrases.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigLoadError::Validation(format!(
                "phrases[{idx}] must not be blank"
            )));
        }

        Ok(())
    }

    /// Flatten the YAML sections into the matcher's [`DetectorConfig`].
    pub fn to_detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            match_percent: self.matcher.match_percent,
            strategy: self.matcher.strategy,
            kgram_len: self.fingerprint.kgram_len,
            window_len: self.fingerprint.window_len,
            base: self.fingerprint.base,
            modulus: self.fingerprint.modulus,
            normalize: NormalizeConfig {
                version: self.normalize.version,
                allow_space: self.normalize.allow_space,
            },
        }
    }

    /// Build a detector over the configured phrase list.
    pub fn build_detector(&self) -> Result<PhraseDetector, ConfigLoadError> {
        let detector = PhraseDetector::new(&self.phrases, &self.to_detector_config())?;
        Ok(detector)
    }
}

impl Default for PhrasefpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            normalize: NormalizeYamlConfig::default(),
            fingerprint: FingerprintYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            phrases: Vec::new(),
        }
    }
}

/// Normalization YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Keep ASCII spaces in normalized text
    #[serde(default)]
    pub allow_space: bool,
}

impl NormalizeYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "normalize.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeYamlConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            allow_space: false,
        }
    }
}

/// Fingerprint YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintYamlConfig {
    #[serde(default)]
    pub kgram_len: Option<usize>,

    #[serde(default)]
    pub window_len: Option<usize>,

    #[serde(default = "default_base")]
    pub base: u64,

    #[serde(default = "default_modulus")]
    pub modulus: u64,
}

impl FingerprintYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.kgram_len == Some(0) {
            return Err(ConfigLoadError::Validation(
                "fingerprint.kgram_len must be >= 1".to_string(),
            ));
        }
        if self.window_len == Some(0) {
            return Err(ConfigLoadError::Validation(
                "fingerprint.window_len must be >= 1".to_string(),
            ));
        }
        if self.base == 0 {
            return Err(ConfigLoadError::Validation(
                "fingerprint.base must be >= 1".to_string(),
            ));
        }
        if self.modulus < 2 || self.modulus > i64::MAX as u64 {
            return Err(ConfigLoadError::Validation(
                "fingerprint.modulus must be in [2, 9223372036854775807]".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FingerprintYamlConfig {
    fn default() -> Self {
        Self {
            kgram_len: None,
            window_len: None,
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_match_percent")]
    pub match_percent: f64,

    #[serde(default)]
    pub strategy: DetectionStrategy,
}

impl MatchYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        validate_match_percent(self.match_percent).map_err(|_| {
            ConfigLoadError::Validation(format!(
                "matcher.match_percent must be in (0, 1] (got {})",
                self.match_percent
            ))
        })
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            match_percent: default_match_percent(),
            strategy: DetectionStrategy::default(),
        }
    }
}

fn default_version() -> u32 {
    1
}
fn default_base() -> u64 {
    DEFAULT_BASE
}
fn default_modulus() -> u64 {
    DEFAULT_MODULUS
}
fn default_match_percent() -> f64 {
    0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
matcher:
  match_percent: 0.6
  strategy: overlap
phrases:
  - "never gonna give you up"
"#;

        let config = PhrasefpConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.matcher.match_percent, 0.6);
        assert_eq!(config.matcher.strategy, DetectionStrategy::Overlap);
        assert_eq!(config.phrases.len(), 1);
        assert_eq!(config.fingerprint.base, 158);
        assert!(config.fingerprint.kgram_len.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
phrases: ["gg"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PhrasefpConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.phrases, vec!["gg".to_string()]);
    }

    #[test]
    fn test_default_config() {
        let config = PhrasefpConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.to_detector_config(), DetectorConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let err = PhrasefpConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_fingerprint_validation() {
        let yaml = r#"
version: "1.0"
fingerprint:
  kgram_len: 0
"#;

        let result = PhrasefpConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("kgram_len must be >= 1"));
    }

    #[test]
    fn test_modulus_validation() {
        let yaml = r#"
version: "1.0"
fingerprint:
  modulus: 1
"#;

        let err = PhrasefpConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("modulus"));
    }

    #[test]
    fn test_match_percent_validation() {
        for bad in ["0", "1.5", "-0.2"] {
            let yaml = format!("version: \"1.0\"\nmatcher:\n  match_percent: {bad}\n");
            let err = PhrasefpConfig::from_yaml(&yaml).unwrap_err();
            assert!(err.to_string().contains("match_percent"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_blank_phrase_rejected() {
        let yaml = r#"
version: "1.0"
phrases: ["ok", "   "]
"#;

        let err = PhrasefpConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("phrases[1]"));
    }

    #[test]
    fn test_unknown_strategy_is_parse_error() {
        let yaml = r#"
version: "1.0"
matcher:
  strategy: "semantic"
"#;

        let err = PhrasefpConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::YamlParse(_)));
    }

    #[test]
    fn test_full_yaml_to_detector() {
        let yaml = r#"
version: "1.0"
name: "production"

normalize:
  version: 1
  allow_space: false

fingerprint:
  kgram_len: 3
  window_len: 3
  base: 158
  modulus: 9223372036854775807

matcher:
  match_percent: 0.8
  strategy: sequence

phrases:
  - "never gonna give you up"
  - "all your base are belong to us"
"#;

        let config = PhrasefpConfig::from_yaml(yaml).unwrap();
        let detector_cfg = config.to_detector_config();
        assert_eq!(detector_cfg.kgram_len, Some(3));
        assert_eq!(detector_cfg.window_len, Some(3));
        assert_eq!(detector_cfg.strategy, DetectionStrategy::Sequence);

        let detector = config.build_detector().unwrap();
        assert_eq!(detector.len(), 2);
        assert!(detector.is_match("lol never gonna giv you up!!"));
        assert!(!detector.is_match("nothing to see here"));
    }

    #[test]
    fn test_build_detector_without_phrases() {
        let err = PhrasefpConfig::default().build_detector().unwrap_err();
        assert!(matches!(err, ConfigLoadError::Match(MatchError::NoPhrases)));
    }
}
