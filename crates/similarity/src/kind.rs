use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a similarity matcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    Jaccard,
    Levenshtein,
    CosineTfidf,
}

impl MatcherKind {
    /// Every matcher, in the order the engine runs them by default.
    pub const ALL: [MatcherKind; 3] = [
        MatcherKind::Jaccard,
        MatcherKind::Levenshtein,
        MatcherKind::CosineTfidf,
    ];

    /// Stable method tag.
    pub fn as_str(self) -> &'static str {
        match self {
            MatcherKind::Jaccard => "jaccard",
            MatcherKind::Levenshtein => "levenshtein",
            MatcherKind::CosineTfidf => "cosine_tfidf",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
