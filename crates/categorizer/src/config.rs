//! Matcher configuration and the two scoring presets.
//!
//! A [`MatcherConfig`] is a plain value, built at call time and never mutated
//! while a match runs. The two canonical presets are:
//!
//! | Preset | Threshold | Weighting | Weights |
//! |--------|-----------|-----------|---------|
//! | [`MatcherConfig::ensemble`] | 0.1 | per method | keyword 0.8, jaccard 0.2, levenshtein 0.15, cosine_tfidf 0.25 |
//! | [`MatcherConfig::direct`] | 0.1 | none | all 1.0 |
//!
//! ```rust
//! use categorizer::{MatcherConfig, ScoringMode, SimilarityType};
//!
//! let cfg = MatcherConfig::ensemble().with_threshold(0.2);
//! assert_eq!(cfg.mode(), ScoringMode::Ensemble);
//! assert_eq!(cfg.weight_for(SimilarityType::Keyword), 0.8);
//! assert!(cfg.validate().is_ok());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use similarity::MatcherKind;

use crate::types::{CategorizeError, SimilarityType};

/// Weight used for a method tag missing from [`MatcherConfig::weights`].
pub const DEFAULT_METHOD_WEIGHT: f32 = 0.1;

/// Threshold shared by both presets.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.1;

/// How collected match records are reduced to one result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Weight each method, merge per category, keep the best weighted score.
    #[default]
    Ensemble,
    /// Highest raw confidence across every record, no weighting.
    Direct,
}

/// Scoring configuration for one matching call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Minimum final score for a match to be returned.
    #[serde(default = "MatcherConfig::default_threshold")]
    pub confidence_threshold: f32,
    /// Ensemble scoring when true, direct scoring otherwise.
    #[serde(default = "MatcherConfig::default_use_ensemble")]
    pub use_ensemble_scoring: bool,
    /// Per-method weights for ensemble scoring.
    #[serde(default = "MatcherConfig::ensemble_weights")]
    pub weights: BTreeMap<SimilarityType, f32>,
    /// Similarity matchers to run after the keyword pass, in order.
    #[serde(default = "MatcherConfig::default_matchers")]
    pub matchers: Vec<MatcherKind>,
}

impl MatcherConfig {
    pub(crate) fn default_threshold() -> f32 {
        DEFAULT_CONFIDENCE_THRESHOLD
    }

    pub(crate) fn default_use_ensemble() -> bool {
        true
    }

    pub(crate) fn default_matchers() -> Vec<MatcherKind> {
        MatcherKind::ALL.to_vec()
    }

    fn ensemble_weights() -> BTreeMap<SimilarityType, f32> {
        BTreeMap::from([
            (SimilarityType::Keyword, 0.8),
            (SimilarityType::Jaccard, 0.2),
            (SimilarityType::Levenshtein, 0.15),
            (SimilarityType::CosineTfidf, 0.25),
        ])
    }

    fn unit_weights() -> BTreeMap<SimilarityType, f32> {
        BTreeMap::from([
            (SimilarityType::Keyword, 1.0),
            (SimilarityType::Jaccard, 1.0),
            (SimilarityType::Levenshtein, 1.0),
            (SimilarityType::CosineTfidf, 1.0),
        ])
    }

    /// Preset for batch categorization with per-method weighting.
    pub fn ensemble() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            use_ensemble_scoring: true,
            weights: Self::ensemble_weights(),
            matchers: Self::default_matchers(),
        }
    }

    /// Preset for single lookups that take the best raw confidence.
    pub fn direct() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            use_ensemble_scoring: false,
            weights: Self::unit_weights(),
            matchers: Self::default_matchers(),
        }
    }

    pub fn for_mode(mode: ScoringMode) -> Self {
        match mode {
            ScoringMode::Ensemble => Self::ensemble(),
            ScoringMode::Direct => Self::direct(),
        }
    }

    /// Scoring mode selected by `use_ensemble_scoring`.
    pub fn mode(&self) -> ScoringMode {
        if self.use_ensemble_scoring {
            ScoringMode::Ensemble
        } else {
            ScoringMode::Direct
        }
    }

    /// Weight for `method`, or [`DEFAULT_METHOD_WEIGHT`] if unset.
    pub fn weight_for(&self, method: SimilarityType) -> f32 {
        self.weights
            .get(&method)
            .copied()
            .unwrap_or(DEFAULT_METHOD_WEIGHT)
    }

    pub fn with_threshold(mut self, confidence_threshold: f32) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    pub fn with_weight(mut self, method: SimilarityType, weight: f32) -> Self {
        self.weights.insert(method, weight);
        self
    }

    /// Replace the similarity matcher list. An empty list leaves only the
    /// keyword pass.
    pub fn with_matchers<I>(mut self, matchers: I) -> Self
    where
        I: IntoIterator<Item = MatcherKind>,
    {
        self.matchers = matchers.into_iter().collect();
        self
    }

    /// Check threshold range, weight sanity and matcher uniqueness.
    pub fn validate(&self) -> Result<(), CategorizeError> {
        if !self.confidence_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.confidence_threshold)
        {
            return Err(CategorizeError::InvalidConfig(format!(
                "confidence_threshold must be within [0.0, 1.0], got {}",
                self.confidence_threshold
            )));
        }
        for (method, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(CategorizeError::InvalidConfig(format!(
                    "weight for {method} must be a finite value >= 0.0, got {weight}"
                )));
            }
        }
        for (idx, kind) in self.matchers.iter().enumerate() {
            if self.matchers[..idx].contains(kind) {
                return Err(CategorizeError::InvalidConfig(format!(
                    "matcher {kind} listed more than once"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig::ensemble()
    }
}
