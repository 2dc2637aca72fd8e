//! Per-method diagnostics over a collected record list.
//!
//! Purely observational: the stats are computed from the same records the
//! scorer sees and never feed back into scoring.

use std::collections::BTreeMap;

use crate::types::{CategoryMatch, MatchingStats, MethodStats};

/// Group `records` by method and report the best confidence of each group.
///
/// Within a method, the first record with the highest confidence names the
/// best category.
pub fn matching_stats(merchant_name: &str, records: &[CategoryMatch]) -> MatchingStats {
    let mut methods: BTreeMap<_, MethodStats> = BTreeMap::new();

    for record in records {
        methods
            .entry(record.similarity_type)
            .and_modify(|stats| {
                stats.match_count += 1;
                if record.confidence > stats.best_score {
                    stats.best_score = record.confidence;
                    stats.best_category.clone_from(&record.category_name);
                }
            })
            .or_insert_with(|| MethodStats {
                best_score: record.confidence,
                match_count: 1,
                best_category: record.category_name.clone(),
            });
    }

    MatchingStats {
        merchant_name: merchant_name.to_string(),
        methods,
    }
}
