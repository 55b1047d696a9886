//! Centered cosine: subtract the batch mean before comparing.

use super::vector::{cosine_similarity, mean_vector, subtract};
use crate::types::{DejavuError, DejavuResult};

/// Score every candidate vector against the query after removing the mean of
/// {query} ∪ candidates from all of them.
///
/// Scores lie in [-1, 1]. A candidate that coincides with the mean scores 0.
/// All vectors must share the query's dimensionality.
pub fn centered_scores(query: &[f32], candidates: &[&[f32]]) -> DejavuResult<Vec<f32>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    for candidate in candidates {
        if candidate.len() != query.len() {
            return Err(DejavuError::DimensionMismatch {
                expected: query.len(),
                got: candidate.len(),
            });
        }
    }

    let mut batch: Vec<&[f32]> = Vec::with_capacity(candidates.len() + 1);
    batch.push(query);
    batch.extend_from_slice(candidates);
    let mean = mean_vector(&batch);

    let centered_query = subtract(query, &mean);
    Ok(candidates
        .iter()
        .map(|candidate| cosine_similarity(&centered_query, &subtract(candidate, &mean)))
        .collect())
}
