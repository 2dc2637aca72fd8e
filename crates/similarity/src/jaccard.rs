//! Token and trigram set overlap.

use tokenize::{jaccard_tokens, TokenSet};

use crate::{MatcherKind, Similarity};

/// Jaccard index over word + trigram token sets.
///
/// Two texts whose token sets are both empty score `0.0`: an empty union is
/// treated as "nothing in common", not as a perfect match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JaccardMatcher;

impl JaccardMatcher {
    fn token_set(text: &str) -> TokenSet {
        jaccard_tokens(text).into_iter().collect()
    }
}

impl Similarity for JaccardMatcher {
    fn score(&self, text1: &str, text2: &str) -> f32 {
        let set1 = Self::token_set(text1);
        let set2 = Self::token_set(text2);

        let intersection = set2.iter().filter(|token| set1.contains(*token)).count();
        let union = set1.len() + (set2.len() - intersection);
        if union == 0 {
            return 0.0;
        }
        intersection as f32 / union as f32
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Jaccard
    }
}
