/// Width, in characters, of a trigram sub-token.
pub const TRIGRAM_LEN: usize = 3;

/// Every contiguous three-character window of `word`, in order.
///
/// Operates on `char`s so multi-byte text never splits inside a code point.
/// Words shorter than three characters yield nothing.
pub fn trigrams(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < TRIGRAM_LEN {
        return Vec::new();
    }
    chars
        .windows(TRIGRAM_LEN)
        .map(|window| window.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigrams_of_exact_length_word() {
        assert_eq!(trigrams("abc"), vec!["abc"]);
    }

    #[test]
    fn trigrams_slide_one_char() {
        assert_eq!(trigrams("tesco"), vec!["tes", "esc", "sco"]);
    }

    #[test]
    fn short_input_has_no_trigrams() {
        assert!(trigrams("").is_empty());
        assert!(trigrams("ab").is_empty());
    }

    #[test]
    fn multibyte_chars_stay_whole() {
        assert_eq!(trigrams("café"), vec!["caf", "afé"]);
    }
}
