//! YAML configuration file support.
//!
//! The enclosing service usually picks a preset in code, but deployments can
//! tune the matcher without a rebuild by loading an [`AutocatConfig`].
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "bulk-import"
//!
//! matcher:
//!   mode: "ensemble"          # or "direct"
//!   confidence_threshold: 0.15
//!   weights:                  # overrides on top of the mode's preset
//!     keyword: 0.9
//!     cosine_tfidf: 0.3
//!   matchers: ["jaccard", "levenshtein", "cosine_tfidf"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use categorizer::{CategorizeError, MatcherConfig, MatcherKind, ScoringMode, SimilarityType};
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

    #[error("unknown scoring mode: {0}")]
    UnknownMode(String),

    #[error(transparent)]
    Matcher(#[from] CategorizeError),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AutocatConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Matcher configuration.
    #[serde(default)]
    pub matcher: MatcherYamlConfig,
}

impl AutocatConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AutocatConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.matcher.to_matcher_config().map(|_| ())
    }

    /// Validated [`MatcherConfig`] described by the `matcher` section.
    pub fn matcher_config(&self) -> Result<MatcherConfig, ConfigLoadError> {
        self.matcher.to_matcher_config()
    }
}

impl Default for AutocatConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatcherYamlConfig::default(),
        }
    }
}

/// Matcher YAML configuration.
///
/// Fields left out fall back to the preset selected by `mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default)]
    pub confidence_threshold: Option<f32>,

    /// Weight overrides keyed by method tag.
    #[serde(default)]
    pub weights: BTreeMap<String, f32>,

    /// Similarity matchers to run, by method tag.
    #[serde(default)]
    pub matchers: Option<Vec<String>>,
}

impl MatcherYamlConfig {
    fn scoring_mode(&self) -> Result<ScoringMode, ConfigLoadError> {
        match self.mode.to_ascii_lowercase().as_str() {
            "ensemble" => Ok(ScoringMode::Ensemble),
            "direct" => Ok(ScoringMode::Direct),
            other => Err(ConfigLoadError::UnknownMode(other.to_string())),
        }
    }

    fn to_matcher_config(&self) -> Result<MatcherConfig, ConfigLoadError> {
        let mut config = MatcherConfig::for_mode(self.scoring_mode()?);

        if let Some(threshold) = self.confidence_threshold {
            config = config.with_threshold(threshold);
        }

        for (tag, weight) in &self.weights {
            let method = parse_method(tag)?;
            config = config.with_weight(method, *weight);
        }

        if let Some(matchers) = &self.matchers {
            let kinds = matchers
                .iter()
                .map(|tag| parse_matcher(tag))
                .collect::<Result<Vec<_>, _>>()?;
            config = config.with_matchers(kinds);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            confidence_threshold: None,
            weights: BTreeMap::new(),
            matchers: None,
        }
    }
}

fn parse_method(tag: &str) -> Result<SimilarityType, ConfigLoadError> {
    match tag {
        "keyword" => Ok(SimilarityType::Keyword),
        other => parse_matcher(other)
            .map(SimilarityType::from)
            .map_err(|_| {
                ConfigLoadError::Validation(format!("matcher.weights: unknown method '{tag}'"))
            }),
    }
}

fn parse_matcher(tag: &str) -> Result<MatcherKind, ConfigLoadError> {
    MatcherKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == tag)
        .ok_or_else(|| ConfigLoadError::Validation(format!("unknown matcher '{tag}'")))
}

// Helper functions for serde defaults
fn default_mode() -> String {
    "ensemble".to_string()
}
