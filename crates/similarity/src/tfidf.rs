//! TF-IDF vectors compared with cosine similarity.
//!
//! The vocabulary is fitted on the candidate category texts of one request.
//! `idf(t) = ln(N / df(t))` where `N` is the number of documents in that
//! request, so a term present in every category carries no weight. Query
//! terms outside the vocabulary contribute nothing.

use fxhash::{FxHashMap, FxHashSet};
use tokenize::cosine_tokens;
use tracing::trace;

use crate::{MatcherKind, Similarity};

/// Terms seen across one document set, with document frequency and IDF.
///
/// Term indices follow first-seen order, so the same documents in the same
/// order always produce the same vector layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    index: FxHashMap<String, usize>,
    terms: Vec<String>,
    doc_freq: Vec<usize>,
    idf: Vec<f32>,
    total_docs: usize,
}

impl Vocabulary {
    /// Scan `documents` and compute IDF for every term.
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocab = Vocabulary {
            total_docs: documents.len(),
            ..Default::default()
        };

        for doc in documents {
            let mut seen: FxHashSet<String> = FxHashSet::default();
            for term in cosine_tokens(doc.as_ref()) {
                if !seen.insert(term.clone()) {
                    continue;
                }
                let idx = match vocab.index.get(&term) {
                    Some(&idx) => idx,
                    None => {
                        let idx = vocab.terms.len();
                        vocab.index.insert(term.clone(), idx);
                        vocab.terms.push(term);
                        vocab.doc_freq.push(0);
                        idx
                    }
                };
                vocab.doc_freq[idx] += 1;
            }
        }

        let n = vocab.total_docs as f32;
        vocab.idf = vocab
            .doc_freq
            .iter()
            .map(|&df| (n / df as f32).ln())
            .collect();

        trace!(
            documents = vocab.total_docs,
            terms = vocab.terms.len(),
            "tfidf_vocabulary_built"
        );
        vocab
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of documents the vocabulary was fitted on.
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Position of `term` in the vector layout.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of documents containing `term`, 0 if unseen.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.index_of(term).map_or(0, |idx| self.doc_freq[idx])
    }

    /// IDF of `term`, 0 if unseen.
    pub fn idf(&self, term: &str) -> f32 {
        self.index_of(term).map_or(0.0, |idx| self.idf[idx])
    }

    /// Dense TF-IDF vector of `text`, one slot per vocabulary term.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.terms.len()];
        let tokens = cosine_tokens(text);
        if tokens.is_empty() {
            return vector;
        }

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let total = tokens.len() as f32;
        for (term, count) in counts {
            if let Some(idx) = self.index_of(term) {
                vector[idx] = (count as f32 / total) * self.idf[idx];
            }
        }
        vector
    }
}

/// Cosine of two equal-length vectors; `0.0` when either has zero norm.
pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Cosine similarity of TF-IDF vectors over a fitted [`Vocabulary`].
///
/// Until [`build_vocabulary`](Self::build_vocabulary) runs, every score is `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CosineTfidfMatcher {
    vocabulary: Vocabulary,
}

impl CosineTfidfMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher with an already fitted vocabulary.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Replace the vocabulary with one fitted on `documents`.
    pub fn build_vocabulary<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.vocabulary = Vocabulary::build(documents);
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl Similarity for CosineTfidfMatcher {
    fn score(&self, text1: &str, text2: &str) -> f32 {
        let v1 = self.vocabulary.vectorize(text1);
        let v2 = self.vocabulary.vectorize(text2);
        // Rounding can push identical vectors a hair above one.
        cosine(&v1, &v2).min(1.0)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::CosineTfidf
    }
}
