//! Error types for the déjà-vu matching engine.

use thiserror::Error;

/// All errors that can occur while matching dreams against a real-life event.
#[derive(Error, Debug)]
pub enum DejavuError {
    /// The real-life event text is missing or blank.
    #[error("A real-life event description is required")]
    MissingEvent,

    /// The request carried no dream list at all.
    #[error("A dream list is required")]
    MissingDreams,

    /// A request field is out of range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A dream has neither a title nor content.
    #[error("Dream {0} has neither a title nor content")]
    EmptyDream(String),

    /// A required API credential is not present in the environment.
    #[error("Credential not configured: environment variable {0} is not set")]
    MissingCredential(String),

    /// The embedding service failed or returned an unusable response.
    #[error("Embedding generation failed: {message}")]
    Embedding {
        message: String,
        /// Raw upstream payload, when one was received.
        detail: Option<serde_json::Value>,
    },

    /// The embedding service returned a different number of vectors than requested.
    #[error("Embedding count mismatch: requested {expected}, received {got}")]
    EmbeddingCountMismatch { expected: usize, got: usize },

    /// Vectors of different dimensionality were compared.
    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The narrative service failed. Never surfaced to callers of a match.
    #[error("Narrative generation failed: {0}")]
    Narrative(String),

    /// A dream id was not found in the store.
    #[error("Dream {0} not found")]
    DreamNotFound(String),

    /// Malformed JSON input.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DejavuError {
    /// Whether this error stems from caller input rather than an upstream service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingEvent
                | Self::MissingDreams
                | Self::InvalidRequest(_)
                | Self::EmptyDream(_)
                | Self::MissingCredential(_)
                | Self::DreamNotFound(_)
                | Self::Json(_)
        )
    }

    /// Raw upstream payload attached to this error, if any.
    pub fn detail(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Embedding { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }
}

/// Convenience result type for matching operations.
pub type DejavuResult<T> = Result<T, DejavuError>;
