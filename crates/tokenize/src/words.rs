use crate::trigram::{trigrams, TRIGRAM_LEN};

/// Characters, besides Unicode whitespace, that separate words.
pub const DELIMITERS: [char; 4] = ['-', '_', '.', '#'];

/// Returns true when `ch` separates two words.
#[inline]
pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || DELIMITERS.contains(&ch)
}

/// Lower-case `text` and split it into words on the delimiter set.
///
/// Runs of delimiters never produce empty words.
pub fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_delimiter)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens for set-overlap scoring: each word, followed by its trigrams when
/// the word has at least [`TRIGRAM_LEN`] characters.
pub fn jaccard_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in split_words(text) {
        let expand = word.chars().count() >= TRIGRAM_LEN;
        let grams = if expand { trigrams(&word) } else { Vec::new() };
        tokens.push(word);
        tokens.extend(grams);
    }
    tokens
}

/// Tokens for TF-IDF vectors: words strictly longer than two characters.
pub fn cosine_tokens(text: &str) -> Vec<String> {
    split_words(text)
        .into_iter()
        .filter(|word| word.chars().count() > 2)
        .collect()
}
