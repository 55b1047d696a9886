//! OpenAI-compatible `/embeddings` client.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use super::provider::{Embedding, EmbeddingProvider};
use crate::config::EmbeddingConfig;
use crate::types::{DejavuError, DejavuResult};

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

/// Blocking client for an OpenAI-compatible embeddings endpoint.
pub struct OpenAiEmbeddings {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiEmbeddings {
    /// Build a client from configuration, reading the API key from the
    /// configured environment variable.
    pub fn from_config(config: &EmbeddingConfig) -> DejavuResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DejavuError::MissingCredential(config.api_key_env.clone()))?;
        Self::new(&config.api_url, &config.model, api_key, config.timeout_secs)
    }

    /// Build a client with an explicit key.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: String,
        timeout_secs: u64,
    ) -> DejavuResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DejavuError::Embedding {
                message: format!("Failed to build HTTP client: {}", e),
                detail: None,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }
}

impl EmbeddingProvider for OpenAiEmbeddings {
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({ "model": self.model, "input": texts });
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| DejavuError::Embedding {
                message: format!("HTTP request failed: {}", e),
                detail: None,
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| DejavuError::Embedding {
            message: format!("Failed to read response: {}", e),
            detail: None,
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&text).ok();
            let message = detail
                .as_ref()
                .and_then(|v| v["error"]["message"].as_str())
                .map(|s| format!("HTTP {}: {}", status, s))
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(DejavuError::Embedding {
                message,
                detail: detail.or(Some(Value::String(text))),
            });
        }

        parse_embedding_response(&text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Parse an embeddings response body into vectors ordered by their `index`
/// field. Items without an index keep their position.
pub fn parse_embedding_response(body: &str) -> DejavuResult<Vec<Embedding>> {
    let parsed: EmbeddingResponse =
        serde_json::from_str(body).map_err(|e| DejavuError::Embedding {
            message: format!("Malformed embedding response: {}", e),
            detail: serde_json::from_str::<Value>(body).ok(),
        })?;
    order_by_index(parsed.data)
}

fn order_by_index(items: Vec<EmbeddingItem>) -> DejavuResult<Vec<Embedding>> {
    if items.iter().any(|item| item.index.is_none()) {
        return Ok(items.into_iter().map(|item| item.embedding).collect());
    }

    let count = items.len();
    let mut slots: Vec<Option<Embedding>> = vec![None; count];
    for item in items {
        let idx = item.index.unwrap_or(count);
        match slots.get_mut(idx) {
            Some(slot) if slot.is_none() => *slot = Some(item.embedding),
            _ => {
                return Err(DejavuError::Embedding {
                    message: format!("Embedding response has invalid or duplicate index {}", idx),
                    detail: None,
                })
            }
        }
    }
    // Every slot is filled: `count` distinct in-range indices were placed.
    Ok(slots.into_iter().flatten().collect())
}
