//! The chat-completion service seam.

use crate::types::DejavuResult;

/// A service that answers a single user prompt with text.
pub trait NarrativeProvider: Send + Sync {
    /// Send one prompt and return the model's text reply.
    fn complete(&self, prompt: &str) -> DejavuResult<String>;

    /// Provider name, for logs.
    fn name(&self) -> &str;
}
