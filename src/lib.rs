//! Workspace umbrella crate for transaction auto-categorization.
//!
//! This crate re-exports the tokenizer, the similarity matchers and the
//! categorizer so callers can depend on a single crate. It adds YAML
//! configuration loading on top.
//!
//! ```rust
//! use autocat::{Categorizer, Category, MatchType};
//!
//! let categories = vec![
//!     Category::new("dining", "Dining").with_keywords(["starbucks", "costa coffee"]),
//!     Category::new("groceries", "Groceries").with_keywords(["tesco", "asda"]),
//! ];
//!
//! let hit = Categorizer::direct()
//!     .categorize("COSTA COFFEE", &categories)
//!     .expect("keyword hit");
//! assert_eq!(hit.category_id.as_str(), "dining");
//! assert_eq!(hit.match_type, MatchType::ExactKeyword);
//! ```

pub mod config;

pub use categorizer::{
    match_batch, match_category, matching_stats, merchant_stats, score_keyword,
    set_categorize_metrics, visible_candidates, BatchResult, CategorizeError, CategorizeMetrics,
    Category, CategoryId, CategoryMatch, CategoryScope, Categorizer, EnhancedCategory,
    KeywordHit, MatchSession, MatchType, MatcherConfig, MatcherKind, MatchingStats, MethodStats,
    ScoringMode, SimilarityType, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_METHOD_WEIGHT,
    HIGH_CONFIDENCE_KEYWORD,
};
pub use similarity::{
    levenshtein_distance, CosineTfidfMatcher, JaccardMatcher, LevenshteinMatcher, Similarity,
    SimilarityMatcher, Vocabulary,
};
pub use tokenize::{cosine_tokens, jaccard_tokens, split_words, trigrams, DELIMITERS};

pub use crate::config::{AutocatConfig, ConfigLoadError, MatcherYamlConfig};

use std::path::Path;

use tracing::info;

/// Build a [`Categorizer`] from a parsed configuration.
pub fn categorizer_from_config(config: &AutocatConfig) -> Result<Categorizer, ConfigLoadError> {
    let matcher = config.matcher_config()?;
    let categorizer = Categorizer::new(matcher)?;
    info!(
        config_name = config.name.as_deref().unwrap_or("unnamed"),
        mode = ?categorizer.mode(),
        threshold = categorizer.config().confidence_threshold,
        "categorizer_configured"
    );
    Ok(categorizer)
}

/// Load a YAML file and build the [`Categorizer`] it describes.
pub fn load_categorizer<P: AsRef<Path>>(path: P) -> Result<Categorizer, ConfigLoadError> {
    let config = AutocatConfig::from_file(path)?;
    categorizer_from_config(&config)
}
