//! Semantic side of matching: vector math and centered cosine scoring.

pub mod centered;
pub mod vector;

pub use centered::centered_scores;
pub use vector::{cosine_similarity, is_zero, mean_vector, subtract};
