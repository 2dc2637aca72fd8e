//! Reduce collected match records to a single result.

use std::collections::HashMap;

use crate::config::MatcherConfig;
use crate::types::{CategoryId, CategoryMatch, SimilarityType};

/// Keyword confidence at or above which the keyword weight is doubled.
pub const HIGH_CONFIDENCE_KEYWORD: f32 = 0.9;

/// Highest raw confidence across all records; earlier records win ties.
///
/// Weights are ignored. The record is returned unchanged when it clears the
/// threshold.
pub fn score_direct(records: &[CategoryMatch], config: &MatcherConfig) -> Option<CategoryMatch> {
    let mut best: Option<&CategoryMatch> = None;
    for record in records {
        if best.map_or(true, |current| record.confidence > current.confidence) {
            best = Some(record);
        }
    }
    best.filter(|record| record.confidence >= config.confidence_threshold)
        .cloned()
}

/// Weight applied to `record` in ensemble scoring.
pub fn effective_weight(record: &CategoryMatch, config: &MatcherConfig) -> f32 {
    let weight = config.weight_for(record.similarity_type);
    if record.similarity_type == SimilarityType::Keyword
        && record.confidence >= HIGH_CONFIDENCE_KEYWORD
    {
        (weight * 2.0).min(1.0)
    } else {
        weight
    }
}

/// Best weighted record per category, in first-seen category order.
///
/// Each returned record carries the weighted score as its confidence and is
/// tagged [`SimilarityType::Ensemble`].
pub fn merge_by_category(records: &[CategoryMatch], config: &MatcherConfig) -> Vec<CategoryMatch> {
    let mut slots: HashMap<&CategoryId, usize> = HashMap::new();
    let mut merged: Vec<CategoryMatch> = Vec::new();

    for record in records {
        let weighted = record.confidence * effective_weight(record, config);
        match slots.get(&record.category_id) {
            Some(&slot) => {
                let current = &mut merged[slot];
                if weighted > current.confidence {
                    current.confidence = weighted;
                    current.match_type = record.match_type;
                    current.matched_text.clone_from(&record.matched_text);
                }
            }
            None => {
                slots.insert(&record.category_id, merged.len());
                merged.push(CategoryMatch {
                    similarity_type: SimilarityType::Ensemble,
                    confidence: weighted,
                    ..record.clone()
                });
            }
        }
    }

    merged
}

/// Best merged category by weighted score; earlier categories win ties.
pub fn score_ensemble(
    records: &[CategoryMatch],
    config: &MatcherConfig,
) -> Option<CategoryMatch> {
    let merged = merge_by_category(records, config);
    let mut best: Option<CategoryMatch> = None;
    for candidate in merged {
        if best
            .as_ref()
            .map_or(true, |current| candidate.confidence > current.confidence)
        {
            best = Some(candidate);
        }
    }
    best.filter(|candidate| candidate.confidence >= config.confidence_threshold)
}

/// Dispatch on the configured scoring mode.
pub fn score(records: &[CategoryMatch], config: &MatcherConfig) -> Option<CategoryMatch> {
    if config.use_ensemble_scoring {
        score_ensemble(records, config)
    } else {
        score_direct(records, config)
    }
}
