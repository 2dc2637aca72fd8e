//! # Autocat categorizer (`categorizer`)
//!
//! ## Purpose
//!
//! Given a merchant or transaction description and a user's candidate
//! spending categories, predict the category the transaction belongs to,
//! with a confidence score, or report that nothing is confident enough.
//!
//! The data layer resolves candidates into an in-memory `&[Category]`
//! before the engine runs; this crate does no I/O.
//!
//! ## Pipeline
//!
//! 1. **Enrichment**: each active [`Category`] becomes an
//!    [`EnhancedCategory`] whose text is the name followed by its keywords.
//! 2. **Preparation**: the configured similarity matchers are created and the
//!    TF-IDF vocabulary is fitted on the category texts ([`MatchSession`]).
//! 3. **Collection**: the keyword pass, then every matcher against every
//!    category, yields a flat list of [`CategoryMatch`] records.
//! 4. **Scoring**: [`ScoringMode::Direct`] takes the highest raw confidence;
//!    [`ScoringMode::Ensemble`] weights each record by method, keeps the best
//!    weighted score per category and takes the best category. Both gate on
//!    [`MatcherConfig::confidence_threshold`].
//!
//! ## Core Types
//!
//! - [`Categorizer`]: entry point holding a validated [`MatcherConfig`].
//! - [`MatchSession`]: prepared categories and matchers, reusable across
//!   queries and threads.
//! - [`CategoryMatch`]: the per-method record and the final result.
//! - [`MatchingStats`]: best score per method, for tuning.
//!
//! ## Example Usage
//!
//! ```
//! use categorizer::{match_category, Category, MatchType, ScoringMode};
//!
//! let categories = vec![
//!     Category::new("dining", "Dining").with_keywords(["starbucks", "costa"]),
//!     Category::new("groceries", "Groceries").with_keywords(["tesco", "asda"]),
//! ];
//!
//! let hit = match_category("STARBUCKS", &categories, ScoringMode::Ensemble)
//!     .expect("exact keyword clears the threshold");
//! assert_eq!(hit.category_id.as_str(), "dining");
//! assert_eq!(hit.match_type, MatchType::ExactKeyword);
//! assert_eq!(hit.confidence, 1.0);
//!
//! assert!(match_category("", &categories, ScoringMode::Direct).is_none());
//! ```
//!
//! ## Concurrency
//!
//! Matching is synchronous and side-effect free. A [`MatchSession`] is
//! read-only once built, so [`Categorizer::par_categorize_batch`] shares one
//! session across the rayon pool.
//!
//! ## Observability
//!
//! Install a [`CategorizeMetrics`] implementation via
//! [`set_categorize_metrics`] to record latency and hit rates.

pub mod config;
pub mod engine;
pub mod keyword;
pub mod metrics;
pub mod scoring;
pub mod stats;
pub mod types;

pub use crate::config::{
    MatcherConfig, ScoringMode, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_METHOD_WEIGHT,
};
pub use crate::engine::{
    match_batch, match_category, merchant_stats, BatchResult, Categorizer, MatchSession,
};
pub use crate::keyword::{score_keyword, KeywordHit};
pub use crate::metrics::{set_categorize_metrics, CategorizeMetrics};
pub use crate::scoring::HIGH_CONFIDENCE_KEYWORD;
pub use crate::stats::matching_stats;
pub use crate::types::{
    visible_candidates, CategorizeError, Category, CategoryId, CategoryMatch, CategoryScope,
    EnhancedCategory, MatchType, MatchingStats, MethodStats, SimilarityType,
};
pub use similarity::MatcherKind;
