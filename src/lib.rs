//! Déjà-vu matching. Ranks a user's past dream entries against a real-life event.
//!
//! Each dream is scored by blending a centered embedding cosine with a TF-IDF
//! cosine, calibrated to a 0-100 display score, and optionally explained by a
//! chat model.

pub mod cli;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod lexical;
pub mod narrative;
pub mod semantic;
pub mod store;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{DejavuConfig, EmbeddingConfig, NarrativeConfig, ScoringConfig};
pub use embedding::{EmbeddingProvider, FetchPlan, FetchedEmbedding, OpenAiEmbeddings};
pub use engine::{MatchEngine, MatchOutcome, MatchRequest, MatchResponse, RankParams, ScoreWeights};
pub use lexical::{tfidf_cosine, tokenize, LexicalScorer, Vocabulary};
pub use narrative::{AnthropicNarrator, Explanation, NarrativeProvider};
pub use semantic::{centered_scores, cosine_similarity};
pub use store::{DreamStore, JsonDreamStore, MemoryDreamStore};
pub use types::{
    Calibration, DejavuError, DejavuResult, DreamCandidate, DreamRecord, MatchedElements,
    QueryEvent, ScoredMatch, DEFAULT_TOP_N, MAX_MATCHED_ELEMENTS, MAX_TOKENS,
};
