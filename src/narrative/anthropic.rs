//! Anthropic messages API client.

use std::time::Duration;

use serde_json::{json, Value};

use super::provider::NarrativeProvider;
use crate::config::NarrativeConfig;
use crate::types::{DejavuError, DejavuResult};

/// Blocking client for `/messages`.
pub struct AnthropicNarrator {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
    api_version: String,
    max_tokens: u32,
}

impl AnthropicNarrator {
    /// Build a client from configuration. Fails with
    /// [`DejavuError::MissingCredential`] when the key variable is unset.
    pub fn from_config(config: &NarrativeConfig) -> DejavuResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DejavuError::MissingCredential(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DejavuError::Narrative(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_version: config.api_version.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

impl NarrativeProvider for AnthropicNarrator {
    fn complete(&self, prompt: &str) -> DejavuResult<String> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(self.url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .map_err(|e| DejavuError::Narrative(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| DejavuError::Narrative(format!("Failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(DejavuError::Narrative(format!("HTTP {}: {}", status, text)));
        }

        let v: Value = serde_json::from_str(&text)
            .map_err(|e| DejavuError::Narrative(format!("Malformed response: {}", e)))?;
        v["content"][0]["text"]
            .as_str()
            .or_else(|| v["completion"].as_str())
            .map(str::to_string)
            .ok_or_else(|| DejavuError::Narrative("Response carries no text".to_string()))
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
