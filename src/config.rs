//! Engine configuration with TOML persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{
    Calibration, DejavuError, DejavuResult, DEFAULT_LEXICAL_WEIGHT, DEFAULT_SEMANTIC_WEIGHT,
    DEFAULT_TOP_N, MAX_MATCHED_ELEMENTS,
};

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DejavuConfig {
    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Embedding service configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,

    /// Narrative service configuration
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the centered embedding cosine
    pub semantic_weight: f32,

    /// Weight of the TF-IDF cosine
    pub lexical_weight: f32,

    /// Matches returned when a request does not say
    pub top_n: usize,

    /// Calibration used when a request does not say
    pub calibration: Calibration,

    /// Shared keywords reported per match
    pub max_matched_elements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_url: String,

    /// Embedding model name
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Ask for natural-language explanations of the top matches
    pub enabled: bool,

    /// Base URL of an Anthropic-compatible messages API
    pub api_url: String,

    /// Chat model name
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Value of the `anthropic-version` header
    pub api_version: String,

    /// Response token limit
    pub max_tokens: u32,

    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            lexical_weight: DEFAULT_LEXICAL_WEIGHT,
            top_n: DEFAULT_TOP_N,
            calibration: Calibration::Percentile,
            max_matched_elements: MAX_MATCHED_ELEMENTS,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-3-5-sonnet-20240620".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_version: "2023-06-01".to_string(),
            max_tokens: 800,
            timeout_secs: 30,
        }
    }
}

impl DejavuConfig {
    /// Load from TOML file
    pub fn load(path: &Path) -> DejavuResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DejavuError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Save to TOML file
    pub fn save(&self, path: &Path) -> DejavuResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DejavuError::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dejavu")
            .join("config.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
