use fxhash::FxHashSet;

/// Set of distinct lower-cased tokens.
pub type TokenSet = FxHashSet<String>;

/// Distinct lower-cased whitespace tokens of `text`.
///
/// Only whitespace separates tokens here; delimiter splitting is left to
/// [`split_words`](crate::split_words).
pub fn token_set(text: &str) -> TokenSet {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}
