use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use similarity::{MatcherKind, SimilarityMatcher};

use crate::metrics::{set_categorize_metrics, CategorizeMetrics};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn sample_categories() -> Vec<Category> {
    vec![
        Category::new("groceries", "Groceries").with_keywords(["tesco", "asda", "sainsburys"]),
        Category::new("dining", "Dining").with_keywords(["starbucks", "costa coffee"]),
        Category::new("fuel", "Fuel").with_keywords(["shell", "esso"]),
        Category::new("transport", "Transport").with_keywords(["uber", "trainline"]),
    ]
}

#[test]
fn substring_keyword_scenario() {
    let categories = vec![Category::new("g", "Groceries").with_keywords(["tesco", "asda"])];
    let hit = match_category("TESCO STORES 1234", &categories, ScoringMode::Ensemble)
        .expect("keyword substring clears the threshold");

    assert_eq!(hit.category_id.as_str(), "g");
    assert_eq!(hit.match_type, MatchType::Keyword);
    assert_eq!(hit.matched_text, "tesco");
    assert_eq!(hit.similarity_type, SimilarityType::Ensemble);
    assert!(approx(hit.confidence, 5.0 / 17.0 * 0.8), "got {}", hit.confidence);
    assert!(hit.confidence >= 0.1);
}

#[test]
fn exact_keyword_scenario() {
    let categories = vec![Category::new("d", "Dining").with_keywords(["starbucks"])];
    let hit = match_category("STARBUCKS", &categories, ScoringMode::Ensemble).expect("exact match");
    assert_eq!(hit.category_name, "Dining");
    assert_eq!(hit.match_type, MatchType::ExactKeyword);
    assert_eq!(hit.confidence, 1.0);
}

#[test]
fn no_candidates_is_no_match() {
    for mode in [ScoringMode::Ensemble, ScoringMode::Direct] {
        assert!(match_category("TESCO", &[], mode).is_none());
    }
}

#[test]
fn empty_query_is_no_match() {
    let categories = sample_categories();
    for mode in [ScoringMode::Ensemble, ScoringMode::Direct] {
        assert!(match_category("", &categories, mode).is_none());
        assert!(match_category("   ", &categories, mode).is_none());
    }
    let session = Categorizer::direct().session(&categories);
    assert!(session.collect("").is_empty());
}

#[test]
fn direct_mode_reports_raw_confidence() {
    let categories = vec![Category::new("d", "Dining").with_keywords(["starbucks coffee"])];
    let query = "starbucks coffee 12";

    let session = Categorizer::direct().session(&categories);
    let records = session.collect(query);
    let max_raw = records
        .iter()
        .map(|r| r.confidence)
        .fold(f32::MIN, f32::max);

    let hit = session.best_match(query).expect("direct match");
    // 16 / 19 × 1.2 is capped at 0.95.
    assert_eq!(hit.confidence, 0.95);
    assert_eq!(hit.confidence, max_raw);
    assert_eq!(hit.similarity_type, SimilarityType::Keyword);
    assert!(records
        .iter()
        .any(|r| r.similarity_type == SimilarityType::Jaccard && r.confidence < 0.95));
}

#[test]
fn direct_and_ensemble_can_disagree() {
    let categories = vec![
        Category::new("coffee", "Coffee"),
        Category::new("transport", "Transport").with_keywords(["uber"]),
    ];
    let query = "coffee uber trip";

    let direct = match_category(query, &categories, ScoringMode::Direct).expect("direct match");
    assert_eq!(direct.category_id.as_str(), "coffee");
    assert_eq!(direct.similarity_type, SimilarityType::CosineTfidf);

    // Keyword 4/16 × 0.8 = 0.2 beats cosine 0.707 × 0.25.
    let ensemble =
        match_category(query, &categories, ScoringMode::Ensemble).expect("ensemble match");
    assert_eq!(ensemble.category_id.as_str(), "transport");
    assert_eq!(ensemble.match_type, MatchType::Keyword);
    assert!(approx(ensemble.confidence, 0.2));
}

#[test]
fn ensemble_result_clears_threshold_or_is_none() {
    let categories = sample_categories();
    let categorizer = Categorizer::ensemble();
    for query in ["TESCO STORES", "zzz qqq", "costa", "SHELL 0042", "rent payment"] {
        if let Some(hit) = categorizer.categorize(query, &categories) {
            assert!(hit.confidence >= categorizer.config().confidence_threshold);
        }
    }
}

#[test]
fn raising_threshold_suppresses_weak_match() {
    let categories = vec![Category::new("g", "Groceries").with_keywords(["tesco", "asda"])];
    let strict = Categorizer::new(MatcherConfig::ensemble().with_threshold(0.5))
        .expect("valid config");
    assert!(strict.categorize("TESCO STORES 1234", &categories).is_none());
}

#[test]
fn invalid_config_rejected_by_constructor() {
    let err = Categorizer::new(MatcherConfig::direct().with_threshold(2.0))
        .expect_err("threshold out of range");
    assert!(matches!(err, CategorizeError::InvalidConfig(_)));
}

#[test]
fn collect_runs_keyword_pass_before_matchers() {
    let categories = sample_categories();
    let session = Categorizer::ensemble().session(&categories);
    let records = session.collect("Tesco Express");

    let first_similarity = records
        .iter()
        .position(|r| r.match_type == MatchType::Similarity)
        .expect("similarity records present");
    assert!(records[..first_similarity]
        .iter()
        .all(|r| r.similarity_type == SimilarityType::Keyword));
    assert!(records.iter().all(|r| r.confidence > 0.0));
    assert!(records
        .iter()
        .filter(|r| r.match_type == MatchType::Similarity)
        .all(|r| r.matched_text.starts_with(&r.category_name)));
}

#[test]
fn vocabulary_is_fitted_on_active_categories_only() {
    let mut categories = sample_categories();
    categories.push(Category::new("old", "Archived").with_active(false));
    let session = Categorizer::ensemble().session(&categories);

    assert_eq!(session.categories().len(), 4);
    let tfidf = session
        .matchers()
        .iter()
        .find_map(|m| match m {
            SimilarityMatcher::CosineTfidf(inner) => Some(inner),
            _ => None,
        })
        .expect("tfidf matcher configured");
    assert_eq!(tfidf.vocabulary().total_docs(), 4);
    assert_eq!(tfidf.vocabulary().index_of("archived"), None);
}

#[test]
fn inactive_category_never_matches() {
    let categories = vec![Category::new("d", "Dining")
        .with_keywords(["starbucks"])
        .with_active(false)];
    assert!(match_category("starbucks", &categories, ScoringMode::Direct).is_none());
}

#[test]
fn keyword_only_configuration() {
    let categorizer =
        Categorizer::new(MatcherConfig::direct().with_matchers(Vec::<MatcherKind>::new()))
            .expect("valid config");
    let categories = sample_categories();
    let records = categorizer.session(&categories).collect("shell garage");
    assert!(!records.is_empty());
    assert!(records
        .iter()
        .all(|r| r.similarity_type == SimilarityType::Keyword));
}

#[test]
fn batch_matches_per_query_loop() {
    let categories = sample_categories();
    let queries = [
        "TESCO STORES 1234",
        "STARBUCKS",
        "Shell Garage 12",
        "UBER *TRIP",
        "unknown merchant",
        "",
    ];

    let batch = match_batch(&queries, &categories);
    assert_eq!(batch.len(), queries.len());
    for query in queries {
        assert_eq!(
            batch[query],
            match_category(query, &categories, ScoringMode::Ensemble),
            "mismatch for {query:?}"
        );
    }
    assert!(batch[""].is_none());
}

#[test]
fn parallel_batch_matches_sequential_batch() {
    let categories = sample_categories();
    let queries: Vec<String> = (0..64)
        .map(|i| match i % 4 {
            0 => format!("TESCO {i}"),
            1 => format!("costa coffee #{i}"),
            2 => format!("esso station {i}"),
            _ => format!("misc {i}"),
        })
        .collect();

    let categorizer = Categorizer::ensemble();
    assert_eq!(
        categorizer.par_categorize_batch(&queries, &categories),
        categorizer.categorize_batch(&queries, &categories)
    );
}

#[test]
fn batch_without_categories_maps_every_query_to_none() {
    let batch = match_batch(&["TESCO", "SHELL"], &[]);
    assert_eq!(batch.len(), 2);
    assert!(batch.values().all(Option::is_none));
}

#[test]
fn batch_keys_are_case_sensitive() {
    let categories = sample_categories();
    let batch = match_batch(&["tesco", "TESCO", "tesco"], &categories);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch["tesco"], batch["TESCO"]);
}

#[test]
fn stats_report_each_method() {
    let categories = sample_categories();
    let stats = merchant_stats("Tesco Express", &categories);

    assert_eq!(stats.merchant_name, "Tesco Express");
    let keyword = &stats.methods[&SimilarityType::Keyword];
    assert_eq!(keyword.best_category, "Groceries");
    assert_eq!(keyword.match_count, 1);
    assert!(stats.methods.contains_key(&SimilarityType::Jaccard));
    assert!(stats.methods.contains_key(&SimilarityType::Levenshtein));
    assert!(!stats.methods.contains_key(&SimilarityType::Ensemble));
}

#[test]
fn stats_do_not_change_the_match() {
    let categories = sample_categories();
    let categorizer = Categorizer::ensemble();
    let before = categorizer.categorize("Tesco Express", &categories);
    let _ = categorizer.matching_stats("Tesco Express", &categories);
    assert_eq!(before, categorizer.categorize("Tesco Express", &categories));
}

#[derive(Default)]
struct CountingMetrics {
    singles: AtomicUsize,
    batches: AtomicUsize,
}

impl CategorizeMetrics for CountingMetrics {
    fn record_categorize(
        &self,
        _mode: ScoringMode,
        _latency: Duration,
        _candidate_count: usize,
        _matched: bool,
    ) {
        self.singles.fetch_add(1, Ordering::SeqCst);
    }

    fn record_batch(
        &self,
        _mode: ScoringMode,
        _latency: Duration,
        _query_count: usize,
        _matched_count: usize,
    ) {
        self.batches.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn metrics_recorder_observes_calls() {
    let recorder = Arc::new(CountingMetrics::default());
    set_categorize_metrics(Some(recorder.clone()));

    let categories = sample_categories();
    let categorizer = Categorizer::ensemble();
    let _ = categorizer.categorize("STARBUCKS", &categories);
    let _ = categorizer.categorize_batch(&["ESSO"], &categories);

    // Other tests may report through the same global recorder concurrently.
    assert!(recorder.singles.load(Ordering::SeqCst) >= 1);
    assert!(recorder.batches.load(Ordering::SeqCst) >= 1);

    set_categorize_metrics(None);
}
