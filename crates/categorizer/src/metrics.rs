// Metrics hooks for the `categorizer` crate.
//
// Callers install a global `CategorizeMetrics` implementation via
// [`set_categorize_metrics`]; every `Categorizer` call then reports its
// latency and outcome.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::config::ScoringMode;

/// Metrics observer for categorization calls.
pub trait CategorizeMetrics: Send + Sync {
    /// Record a single categorization.
    ///
    /// `candidate_count` is the number of categories offered, `matched`
    /// whether a category cleared the threshold.
    fn record_categorize(
        &self,
        mode: ScoringMode,
        latency: Duration,
        candidate_count: usize,
        matched: bool,
    );

    /// Record a batch categorization over `query_count` queries.
    fn record_batch(
        &self,
        mode: ScoringMode,
        latency: Duration,
        query_count: usize,
        matched_count: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn CategorizeMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn CategorizeMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn CategorizeMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global categorization metrics recorder.
pub fn set_categorize_metrics(recorder: Option<Arc<dyn CategorizeMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
