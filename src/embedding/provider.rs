//! The embedding service seam.

use crate::types::{DejavuError, DejavuResult};

/// Embedding vector.
pub type Embedding = Vec<f32>;

/// A text-to-vector service.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, returning exactly one vector per input in input
    /// order. Any failure fails the whole batch.
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Embedding>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> DejavuResult<Embedding> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        if vectors.len() != 1 {
            return Err(DejavuError::EmbeddingCountMismatch {
                expected: 1,
                got: vectors.len(),
            });
        }
        Ok(vectors.remove(0))
    }

    /// Provider name, for logs.
    fn name(&self) -> &str;
}
