//! Request-scoped vocabulary and document-frequency table.

use std::collections::{HashMap, HashSet};

/// Token index plus document frequencies over a set of tokenized documents.
///
/// Indices are assigned in first-seen order. Built fresh per request; there is
/// no global vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// token -> dimension index.
    index: HashMap<String, usize>,
    /// dimension index -> number of documents containing the token.
    document_frequency: Vec<usize>,
    /// Number of documents added.
    document_count: usize,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from tokenized documents.
    pub fn build<T: AsRef<[String]>>(documents: &[T]) -> Self {
        let mut vocabulary = Self::new();
        for document in documents {
            vocabulary.add_document(document.as_ref());
        }
        vocabulary
    }

    /// Add one document. Each distinct token counts once toward its frequency.
    pub fn add_document(&mut self, tokens: &[String]) {
        let mut distinct: HashSet<&str> = HashSet::new();
        for token in tokens {
            let idx = match self.index.get(token.as_str()) {
                Some(&idx) => idx,
                None => {
                    let idx = self.document_frequency.len();
                    self.index.insert(token.clone(), idx);
                    self.document_frequency.push(0);
                    idx
                }
            };
            if distinct.insert(token.as_str()) {
                self.document_frequency[idx] += 1;
            }
        }
        self.document_count += 1;
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.document_frequency.len()
    }

    /// Whether no token has been seen.
    pub fn is_empty(&self) -> bool {
        self.document_frequency.is_empty()
    }

    /// Number of documents added.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Dimension index of a token.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Number of documents containing a token (0 if unseen).
    pub fn document_frequency(&self, token: &str) -> usize {
        self.index_of(token)
            .map(|idx| self.document_frequency[idx])
            .unwrap_or(0)
    }

    /// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`.
    pub fn idf(&self, idx: usize) -> f32 {
        let df = self.document_frequency.get(idx).copied().unwrap_or(0);
        let n = self.document_count as f32;
        ((n + 1.0) / (df as f32 + 1.0)).ln() + 1.0
    }

    /// Raw term counts weighted by IDF, one dimension per vocabulary token.
    /// Tokens outside the vocabulary are ignored.
    pub fn weighted_vector(&self, tokens: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.len()];
        for token in tokens {
            if let Some(idx) = self.index_of(token) {
                vector[idx] += 1.0;
            }
        }
        for (idx, value) in vector.iter_mut().enumerate() {
            if *value != 0.0 {
                *value *= self.idf(idx);
            }
        }
        vector
    }
}
