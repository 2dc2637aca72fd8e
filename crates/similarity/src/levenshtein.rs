//! Edit-distance similarity.
//!
//! Classic Wagner-Fischer dynamic programme with unit costs for insertion,
//! deletion and substitution, O(m × n) time and two rows of memory.

use crate::{MatcherKind, Similarity};

/// Number of single-character edits turning `a` into `b`.
///
/// Counts `char`s, not bytes.
///
/// ```
/// use similarity::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// assert_eq!(levenshtein_distance("", "abc"), 3);
/// ```
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();

    // prev[i] = distance(a[..i], b[..j-1]); row 0 is the running index.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr: Vec<usize> = vec![0; m + 1];

    for (j, b_ch) in b_chars.iter().enumerate() {
        curr[0] = j + 1;
        for i in 1..=m {
            let cost = usize::from(a_chars[i - 1] != *b_ch);
            curr[i] = (prev[i] + 1)
                .min(curr[i - 1] + 1)
                .min(prev[i - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

/// `1 - distance / max_len` over lower-cased text.
///
/// Two empty strings are identical and score `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevenshteinMatcher;

impl Similarity for LevenshteinMatcher {
    fn score(&self, text1: &str, text2: &str) -> f32 {
        let a = text1.to_lowercase();
        let b = text2.to_lowercase();
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        1.0 - levenshtein_distance(&a, &b) as f32 / max_len as f32
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Levenshtein
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("cat", "hat"), 1);
        assert_eq!(levenshtein_distance("cat", "cats"), 1);
        assert_eq!(levenshtein_distance("cats", "cat"), 1);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            levenshtein_distance("starbucks", "stbucks coffee"),
            levenshtein_distance("stbucks coffee", "starbucks")
        );
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(LevenshteinMatcher.score("Tesco", "TESCO"), 1.0);
    }

    #[test]
    fn empty_strings_score_one() {
        assert_eq!(LevenshteinMatcher.score("", ""), 1.0);
    }

    #[test]
    fn one_empty_side_scores_zero() {
        assert_eq!(LevenshteinMatcher.score("", "asda"), 0.0);
    }

    #[test]
    fn similarity_is_normalised_by_longer_string() {
        // kitten -> sitting: 3 edits over 7 chars.
        let score = LevenshteinMatcher.score("kitten", "sitting");
        assert!((score - (1.0 - 3.0 / 7.0)).abs() < 1e-6);
    }
}
