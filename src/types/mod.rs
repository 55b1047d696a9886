//! All data types for the déjà-vu matching engine.

pub mod dream;
pub mod error;
pub mod matched;

pub use dream::{DreamCandidate, DreamRecord, QueryEvent};
pub use error::{DejavuError, DejavuResult};
pub use matched::{Calibration, MatchedElements, RawScores, ScoredMatch, NO_OVERLAP_SENTINEL};

/// Maximum number of tokens kept per document.
pub const MAX_TOKENS: usize = 2048;

/// Tokens shorter than this (in characters) are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Maximum number of shared keywords reported per match.
pub const MAX_MATCHED_ELEMENTS: usize = 5;

/// Number of matches returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 3;

/// Weight of the centered embedding cosine in the combined score.
pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.6;

/// Weight of the TF-IDF cosine in the combined score.
pub const DEFAULT_LEXICAL_WEIGHT: f32 = 0.4;

/// Title shown for dreams recorded without one.
pub const UNTITLED: &str = "Untitled";

/// Returns today's date in UTC.
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
