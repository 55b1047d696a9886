//! High-level operations: score combination and the matching engine.

pub mod combine;
pub mod matcher;
pub mod request;

pub use combine::{
    calibrate, fallback_analysis, percentile_rank, rank, to_match_score, RankParams, ScoreWeights,
};
pub use matcher::{MatchEngine, MatchOutcome};
pub use request::{ErrorResponse, MatchParams, MatchRequest, MatchResponse};
