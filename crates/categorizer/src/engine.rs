use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use similarity::{Similarity, SimilarityMatcher};
use tracing::{debug, info, trace, warn, Level};

use crate::config::{MatcherConfig, ScoringMode};
use crate::keyword::keyword_pass;
use crate::metrics::metrics_recorder;
use crate::scoring::score;
use crate::stats::matching_stats;
use crate::types::{
    CategorizeError, Category, CategoryMatch, EnhancedCategory, MatchType, MatchingStats,
    SimilarityType,
};

#[cfg(test)]
mod tests;

/// Best match (or none) for every distinct query string.
pub type BatchResult = HashMap<String, Option<CategoryMatch>>;

/// Enriched categories plus matchers fitted on them.
///
/// Building a session is the per-request setup: category texts are
/// assembled and the TF-IDF vocabulary is fitted once. Scoring a query
/// afterwards only reads the session, so one session can serve many queries,
/// including from several threads at once.
#[derive(Debug, Clone)]
pub struct MatchSession<'a> {
    categories: Vec<EnhancedCategory<'a>>,
    matchers: Vec<SimilarityMatcher>,
    config: MatcherConfig,
}

impl<'a> MatchSession<'a> {
    /// Enrich the active categories and prepare the configured matchers.
    pub fn new(categories: &'a [Category], config: &MatcherConfig) -> Self {
        let categories: Vec<EnhancedCategory<'a>> = categories
            .iter()
            .filter(|category| category.is_active)
            .map(EnhancedCategory::new)
            .collect();

        let documents: Vec<&str> = categories
            .iter()
            .map(|enhanced| enhanced.text_representation.as_str())
            .collect();

        let matchers = config
            .matchers
            .iter()
            .map(|&kind| {
                let mut matcher = SimilarityMatcher::new(kind);
                matcher.prepare(&documents);
                matcher
            })
            .collect();

        Self {
            categories,
            matchers,
            config: config.clone(),
        }
    }

    /// Categories taking part in matching.
    pub fn categories(&self) -> &[EnhancedCategory<'a>] {
        &self.categories
    }

    pub fn matchers(&self) -> &[SimilarityMatcher] {
        &self.matchers
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every match record for `query`: keyword pass first, then each
    /// matcher over every category. Zero scores are dropped.
    pub fn collect(&self, query: &str) -> Vec<CategoryMatch> {
        let mut records = Vec::new();
        if is_blank(query) || self.is_empty() {
            return records;
        }

        keyword_pass(query, &self.categories, &mut records);

        for matcher in &self.matchers {
            let method = SimilarityType::from(matcher.kind());
            for enhanced in &self.categories {
                let confidence = matcher.score(query, &enhanced.text_representation);
                if confidence > 0.0 {
                    records.push(CategoryMatch {
                        category_id: enhanced.category.id.clone(),
                        category_name: enhanced.category.name.clone(),
                        match_type: MatchType::Similarity,
                        similarity_type: method,
                        matched_text: enhanced.text_representation.clone(),
                        confidence,
                    });
                }
            }
        }

        records
    }

    /// Best category for `query` under the session's scoring mode.
    pub fn best_match(&self, query: &str) -> Option<CategoryMatch> {
        if is_blank(query) || self.is_empty() {
            return None;
        }
        score(&self.collect(query), &self.config)
    }

    /// Per-method diagnostics for `query`.
    pub fn stats(&self, query: &str) -> MatchingStats {
        matching_stats(query, &self.collect(query))
    }
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Categorization entry point bound to one validated [`MatcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    config: MatcherConfig,
}

impl Categorizer {
    /// Validate `config` and wrap it.
    pub fn new(config: MatcherConfig) -> Result<Self, CategorizeError> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "categorizer_config_rejected");
            return Err(err);
        }
        Ok(Self { config })
    }

    /// Categorizer using the ensemble preset.
    pub fn ensemble() -> Self {
        Self {
            config: MatcherConfig::ensemble(),
        }
    }

    /// Categorizer using the direct preset.
    pub fn direct() -> Self {
        Self {
            config: MatcherConfig::direct(),
        }
    }

    pub fn for_mode(mode: ScoringMode) -> Self {
        Self {
            config: MatcherConfig::for_mode(mode),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn mode(&self) -> ScoringMode {
        self.config.mode()
    }

    /// Prepare a reusable session over `categories`.
    pub fn session<'a>(&self, categories: &'a [Category]) -> MatchSession<'a> {
        MatchSession::new(categories, &self.config)
    }

    /// Best category for `query`, or `None` when nothing clears the threshold.
    ///
    /// A blank query or an empty category list returns `None` without
    /// running any matcher.
    pub fn categorize(&self, query: &str, categories: &[Category]) -> Option<CategoryMatch> {
        let mode = self.mode();
        if is_blank(query) || categories.is_empty() {
            trace!(mode = ?mode, candidates = categories.len(), "categorize_short_circuit");
            return None;
        }

        let start = Instant::now();
        let span = tracing::span!(
            Level::DEBUG,
            "categorizer.categorize",
            mode = ?mode,
            candidates = categories.len()
        );
        let _guard = span.enter();

        let result = self.session(categories).best_match(query);
        let latency = start.elapsed();

        match &result {
            Some(hit) => debug!(
                category_id = %hit.category_id,
                confidence = hit.confidence,
                match_type = ?hit.match_type,
                elapsed_micros = latency.as_micros(),
                "categorize_match"
            ),
            None => debug!(elapsed_micros = latency.as_micros(), "categorize_no_match"),
        }

        if let Some(recorder) = metrics_recorder() {
            recorder.record_categorize(mode, latency, categories.len(), result.is_some());
        }

        result
    }

    /// Categorize many queries against one category set.
    ///
    /// The session, and with it the TF-IDF vocabulary, is built once and
    /// shared by every query. Results are keyed by the literal query string.
    pub fn categorize_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        categories: &[Category],
    ) -> BatchResult {
        self.run_batch(queries, categories, |session| {
            queries
                .iter()
                .map(|query| {
                    let query = query.as_ref();
                    (query.to_string(), session.best_match(query))
                })
                .collect()
        })
    }

    /// Like [`categorize_batch`](Self::categorize_batch), scoring queries on
    /// the rayon pool. Produces the same map as the sequential version.
    pub fn par_categorize_batch<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        categories: &[Category],
    ) -> BatchResult {
        self.run_batch(queries, categories, |session| {
            queries
                .par_iter()
                .map(|query| {
                    let query = query.as_ref();
                    (query.to_string(), session.best_match(query))
                })
                .collect()
        })
    }

    fn run_batch<S, F>(&self, queries: &[S], categories: &[Category], score_all: F) -> BatchResult
    where
        S: AsRef<str>,
        F: FnOnce(&MatchSession<'_>) -> BatchResult,
    {
        let mode = self.mode();
        let start = Instant::now();

        let results = if categories.is_empty() {
            queries
                .iter()
                .map(|query| (query.as_ref().to_string(), None))
                .collect()
        } else {
            score_all(&self.session(categories))
        };

        let latency = start.elapsed();
        let matched = results.values().filter(|hit| hit.is_some()).count();
        info!(
            mode = ?mode,
            queries = queries.len(),
            candidates = categories.len(),
            matched,
            elapsed_micros = latency.as_micros(),
            "categorize_batch_complete"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_batch(mode, latency, queries.len(), matched);
        }

        results
    }

    /// Per-method diagnostics for `query`; never affects matching.
    pub fn matching_stats(&self, query: &str, categories: &[Category]) -> MatchingStats {
        self.session(categories).stats(query)
    }
}

/// Categorize one query with the preset for `mode`.
pub fn match_category(
    query: &str,
    categories: &[Category],
    mode: ScoringMode,
) -> Option<CategoryMatch> {
    Categorizer::for_mode(mode).categorize(query, categories)
}

/// Categorize many queries with the ensemble preset, fitting the vocabulary
/// once.
pub fn match_batch<S: AsRef<str>>(queries: &[S], categories: &[Category]) -> BatchResult {
    Categorizer::ensemble().categorize_batch(queries, categories)
}

/// Per-method diagnostics for `query` against `categories`.
pub fn merchant_stats(query: &str, categories: &[Category]) -> MatchingStats {
    Categorizer::ensemble().matching_stats(query, categories)
}
