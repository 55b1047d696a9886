//! Optional narrative explainer for ranked matches.

pub mod anthropic;
pub mod explainer;
pub mod provider;

pub use anthropic::AnthropicNarrator;
pub use explainer::{apply, build_prompt, explain, parse_explanations, Explanation};
pub use provider::NarrativeProvider;
