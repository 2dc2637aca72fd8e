//! Keyword pass: exact and substring heuristics per (query, keyword) pair.
//!
//! Unlike the similarity matchers this is not a general text measure. Each
//! rule has its own confidence formula:
//!
//! | Rule | Confidence | Match type |
//! |------|-----------|------------|
//! | keyword == query | `1.0` | `exact_keyword` |
//! | keyword ⊂ query | `k/q`, or `min(k/q × 1.2, 0.95)` when `k/q > 0.5` | `keyword` |
//! | query ⊂ keyword, `q > 3` | `min(q/k × 0.8, 0.9)` | `reverse_keyword` |
//!
//! `k` and `q` are character lengths; every comparison ignores case.

use crate::types::{CategoryMatch, EnhancedCategory, MatchType, SimilarityType};

/// Ratio above which a substring keyword is considered dominant.
const DOMINANT_RATIO: f32 = 0.5;
const DOMINANT_BOOST: f32 = 1.2;
/// Keeps boosted substring hits strictly below an exact match.
const SUBSTRING_CAP: f32 = 0.95;
const REVERSE_FACTOR: f32 = 0.8;
const REVERSE_CAP: f32 = 0.9;
/// Queries this short are too ambiguous to match inside a keyword.
const REVERSE_MIN_QUERY_LEN: usize = 3;

/// Outcome of one keyword rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordHit {
    pub match_type: MatchType,
    pub confidence: f32,
}

/// Apply the keyword rules to one pair. `None` when no rule fires or the
/// keyword is blank.
pub fn score_keyword(query: &str, keyword: &str) -> Option<KeywordHit> {
    if keyword.trim().is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    let keyword = keyword.to_lowercase();
    let query_len = query.chars().count();
    let keyword_len = keyword.chars().count();

    if query == keyword {
        return Some(KeywordHit {
            match_type: MatchType::ExactKeyword,
            confidence: 1.0,
        });
    }

    if query.contains(&keyword) {
        let ratio = keyword_len as f32 / query_len as f32;
        let confidence = if ratio > DOMINANT_RATIO {
            (ratio * DOMINANT_BOOST).min(SUBSTRING_CAP)
        } else {
            ratio
        };
        return Some(KeywordHit {
            match_type: MatchType::Keyword,
            confidence,
        });
    }

    if query_len > REVERSE_MIN_QUERY_LEN && keyword.contains(&query) {
        let confidence = (query_len as f32 / keyword_len as f32 * REVERSE_FACTOR).min(REVERSE_CAP);
        return Some(KeywordHit {
            match_type: MatchType::ReverseKeyword,
            confidence,
        });
    }

    None
}

/// Run the keyword rules over every non-empty keyword of every category,
/// appending one record per firing rule.
pub(crate) fn keyword_pass(
    query: &str,
    categories: &[EnhancedCategory<'_>],
    out: &mut Vec<CategoryMatch>,
) {
    for enhanced in categories {
        let category = enhanced.category;
        for keyword in category.non_empty_keywords() {
            let Some(hit) = score_keyword(query, keyword) else {
                continue;
            };
            if hit.confidence <= 0.0 {
                continue;
            }
            out.push(CategoryMatch {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                match_type: hit.match_type,
                similarity_type: SimilarityType::Keyword,
                matched_text: keyword.to_string(),
                confidence: hit.confidence,
            });
        }
    }
}
