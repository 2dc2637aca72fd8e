use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use similarity::MatcherKind;
use thiserror::Error;
use tokenize::{token_set, TokenSet};

/// Opaque category identifier supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for CategoryId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Who a category belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    /// Shared by every user.
    #[default]
    System,
    /// Owned by the user with this id.
    User(String),
}

/// A spending category as handed over by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name; the data layer guarantees it is non-empty.
    pub name: String,
    /// Ordered keyword list, may be empty.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "Category::default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: CategoryScope,
}

impl Category {
    fn default_active() -> bool {
        true
    }

    /// Active, system-wide category with no keywords.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keywords: Vec::new(),
            is_active: true,
            scope: CategoryScope::System,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.scope = CategoryScope::User(user_id.into());
        self
    }

    /// True if `user_id` may see this category (system-wide or owned).
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        match &self.scope {
            CategoryScope::System => true,
            CategoryScope::User(owner) => owner == user_id,
        }
    }

    /// Keywords that carry text.
    pub fn non_empty_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .filter(|keyword| !keyword.trim().is_empty())
    }
}

/// Active categories visible to `user_id`, in input order.
pub fn visible_candidates<'a>(categories: &'a [Category], user_id: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|category| category.is_active && category.is_visible_to(user_id))
        .collect()
}

/// A category prepared for matching: name plus keywords as one text.
#[derive(Debug, Clone)]
pub struct EnhancedCategory<'a> {
    pub category: &'a Category,
    /// Name followed by every non-empty keyword, space-joined.
    pub text_representation: String,
    /// Lower-cased whitespace tokens of `text_representation`.
    pub token_set: TokenSet,
}

impl<'a> EnhancedCategory<'a> {
    pub fn new(category: &'a Category) -> Self {
        let mut text_representation = category.name.clone();
        for keyword in category.non_empty_keywords() {
            text_representation.push(' ');
            text_representation.push_str(keyword);
        }
        let token_set = token_set(&text_representation);
        Self {
            category,
            text_representation,
            token_set,
        }
    }
}

/// How a match record was produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Keyword equals the query, ignoring case.
    ExactKeyword,
    /// Keyword occurs inside the query.
    Keyword,
    /// Query occurs inside the keyword.
    ReverseKeyword,
    /// A similarity matcher scored the category text.
    Similarity,
}

/// Method that produced a confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityType {
    Keyword,
    Jaccard,
    Levenshtein,
    CosineTfidf,
    /// Result of merging per-method records in ensemble scoring.
    Ensemble,
}

impl SimilarityType {
    pub fn as_str(self) -> &'static str {
        match self {
            SimilarityType::Keyword => "keyword",
            SimilarityType::Jaccard => "jaccard",
            SimilarityType::Levenshtein => "levenshtein",
            SimilarityType::CosineTfidf => "cosine_tfidf",
            SimilarityType::Ensemble => "ensemble",
        }
    }
}

impl From<MatcherKind> for SimilarityType {
    fn from(kind: MatcherKind) -> Self {
        match kind {
            MatcherKind::Jaccard => SimilarityType::Jaccard,
            MatcherKind::Levenshtein => SimilarityType::Levenshtein,
            MatcherKind::CosineTfidf => SimilarityType::CosineTfidf,
        }
    }
}

impl fmt::Display for SimilarityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored (query, category) pairing.
///
/// `confidence` is a per-method heuristic in `[0, 1]`, not a probability.
/// After ensemble scoring it holds the weighted score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryMatch {
    pub category_id: CategoryId,
    pub category_name: String,
    pub match_type: MatchType,
    pub similarity_type: SimilarityType,
    /// Keyword or category text that produced the score.
    pub matched_text: String,
    pub confidence: f32,
}

/// Best result of one method across all categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodStats {
    pub best_score: f32,
    pub match_count: usize,
    pub best_category: String,
}

/// Per-method diagnostics for one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingStats {
    pub merchant_name: String,
    pub methods: BTreeMap<SimilarityType, MethodStats>,
}

/// Errors produced by the categorizer.
///
/// Matching itself never fails; only configuration can be rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CategorizeError {
    #[error("invalid matcher config: {0}")]
    InvalidConfig(String),
}
