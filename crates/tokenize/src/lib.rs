//! Merchant text tokenization.
//!
//! Every similarity signal in the categorizer starts from the same word
//! splitter: lower-case the input, then split on the delimiter set
//! (whitespace, `-`, `_`, `.`, `#`). On top of that the crate exposes the two
//! tokenizer variants the matchers consume:
//!
//! - [`jaccard_tokens`]: every word plus, for words of three or more
//!   characters, every contiguous character trigram of that word. The trigram
//!   expansion is what gives near-spellings ("starbucks" / "starbuck") a
//!   non-zero overlap.
//! - [`cosine_tokens`]: only words longer than two characters, no trigrams.
//!
//! [`token_set`] holds the distinct whitespace tokens of an enriched
//! category's text.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clocks, no locale. Same text in, same tokens out.

mod token;
mod trigram;
mod words;

pub use crate::token::{token_set, TokenSet};
pub use crate::trigram::{trigrams, TRIGRAM_LEN};
pub use crate::words::{cosine_tokens, is_delimiter, jaccard_tokens, split_words, DELIMITERS};
