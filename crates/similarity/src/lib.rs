//! # Similarity matchers
//!
//! The categorizer scores a merchant string against each candidate
//! category's text with a small, closed family of similarity measures. Each
//! measure returns a score in `[0, 1]` and carries a method tag.
//!
//! | Matcher | Tag | State | Empty-vs-empty |
//! |---------|-----|-------|----------------|
//! | [`JaccardMatcher`] | `jaccard` | none | `0.0` |
//! | [`LevenshteinMatcher`] | `levenshtein` | none | `1.0` |
//! | [`CosineTfidfMatcher`] | `cosine_tfidf` | [`Vocabulary`] built per category set | `0.0` |
//!
//! [`Similarity`] is the capability every matcher implements;
//! [`SimilarityMatcher`] is the tagged enum the engine stores, so matchers
//! with and without internal state live in one `Vec`.
//!
//! ```
//! use similarity::{MatcherKind, Similarity, SimilarityMatcher};
//!
//! let mut tfidf = SimilarityMatcher::new(MatcherKind::CosineTfidf);
//! tfidf.prepare(&["Groceries tesco asda", "Dining starbucks costa"]);
//! assert!(tfidf.score("tesco", "Groceries tesco asda") > 0.0);
//!
//! let lev = SimilarityMatcher::new(MatcherKind::Levenshtein);
//! assert_eq!(lev.score("", ""), 1.0);
//! ```

mod jaccard;
mod kind;
mod levenshtein;
mod tfidf;

pub use crate::jaccard::JaccardMatcher;
pub use crate::kind::MatcherKind;
pub use crate::levenshtein::{levenshtein_distance, LevenshteinMatcher};
pub use crate::tfidf::{CosineTfidfMatcher, Vocabulary};

/// One similarity measure between two texts.
pub trait Similarity {
    /// Similarity of `text1` and `text2` in `[0, 1]`.
    fn score(&self, text1: &str, text2: &str) -> f32;

    /// Method tag reported alongside every score.
    fn kind(&self) -> MatcherKind;
}

/// Closed set of matchers the engine runs.
#[derive(Debug, Clone)]
pub enum SimilarityMatcher {
    Jaccard(JaccardMatcher),
    Levenshtein(LevenshteinMatcher),
    CosineTfidf(CosineTfidfMatcher),
}

impl SimilarityMatcher {
    /// Fresh, unprepared matcher of the given kind.
    pub fn new(kind: MatcherKind) -> Self {
        match kind {
            MatcherKind::Jaccard => SimilarityMatcher::Jaccard(JaccardMatcher),
            MatcherKind::Levenshtein => SimilarityMatcher::Levenshtein(LevenshteinMatcher),
            MatcherKind::CosineTfidf => SimilarityMatcher::CosineTfidf(CosineTfidfMatcher::new()),
        }
    }

    /// Fit any per-corpus state on `documents`.
    ///
    /// Only the TF-IDF matcher has state; calling this again replaces the
    /// previous vocabulary rather than extending it.
    pub fn prepare<S: AsRef<str>>(&mut self, documents: &[S]) {
        if let SimilarityMatcher::CosineTfidf(matcher) = self {
            matcher.build_vocabulary(documents);
        }
    }
}

impl Similarity for SimilarityMatcher {
    fn score(&self, text1: &str, text2: &str) -> f32 {
        match self {
            SimilarityMatcher::Jaccard(m) => m.score(text1, text2),
            SimilarityMatcher::Levenshtein(m) => m.score(text1, text2),
            SimilarityMatcher::CosineTfidf(m) => m.score(text1, text2),
        }
    }

    fn kind(&self) -> MatcherKind {
        match self {
            SimilarityMatcher::Jaccard(m) => m.kind(),
            SimilarityMatcher::Levenshtein(m) => m.kind(),
            SimilarityMatcher::CosineTfidf(m) => m.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [(&str, &str); 4] = [
        ("starbucks", "Dining starbucks costa"),
        ("TESCO STORES 1234", "Groceries tesco asda"),
        ("shell", "Fuel shell bp esso"),
        ("", "Transport"),
    ];

    fn prepared(kind: MatcherKind) -> SimilarityMatcher {
        let mut matcher = SimilarityMatcher::new(kind);
        matcher.prepare(&[
            "Dining starbucks costa",
            "Groceries tesco asda",
            "Fuel shell bp esso",
            "Transport",
        ]);
        matcher
    }

    #[test]
    fn every_matcher_is_symmetric() {
        for kind in MatcherKind::ALL {
            let matcher = prepared(kind);
            for (a, b) in PAIRS {
                assert_eq!(
                    matcher.score(a, b),
                    matcher.score(b, a),
                    "{kind} not symmetric on ({a:?}, {b:?})"
                );
            }
        }
    }

    #[test]
    fn every_matcher_stays_in_unit_range() {
        for kind in MatcherKind::ALL {
            let matcher = prepared(kind);
            for (a, b) in PAIRS {
                let score = matcher.score(a, b);
                assert!((0.0..=1.0).contains(&score), "{kind} gave {score}");
            }
        }
    }

    #[test]
    fn enum_reports_wrapped_kind() {
        for kind in MatcherKind::ALL {
            assert_eq!(SimilarityMatcher::new(kind).kind(), kind);
        }
    }

    #[test]
    fn empty_string_policies_differ() {
        assert_eq!(prepared(MatcherKind::Jaccard).score("", ""), 0.0);
        assert_eq!(prepared(MatcherKind::Levenshtein).score("", ""), 1.0);
        assert_eq!(prepared(MatcherKind::CosineTfidf).score("", ""), 0.0);
    }
}
