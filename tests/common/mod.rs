//! Mock embedding and narrative services for integration testing.
#![allow(dead_code)]

use std::sync::Mutex;

use dejavu_engine::lexical::tokenize;
use dejavu_engine::types::{DejavuError, DejavuResult, DreamRecord};
use dejavu_engine::{EmbeddingProvider, NarrativeProvider};

/// Dimension of the mock embedding space.
pub const MOCK_DIMENSION: usize = 32;

/// Deterministic bag-of-words embedder: each token adds 1.0 to a hashed bucket.
/// Records every batch it is asked to embed.
#[derive(Default)]
pub struct HashEmbedder {
    requests: Mutex<Vec<Vec<String>>>,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch received so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn vector_for(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; MOCK_DIMENSION];
        for token in tokenize(text) {
            let bucket = token
                .bytes()
                .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
            v[bucket as usize % MOCK_DIMENSION] += 1.0;
        }
        // Keep every vector off the origin.
        v[0] += 0.5;
        v
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Vec<f32>>> {
        self.requests.lock().unwrap().push(texts.to_vec());
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Shares a `HashEmbedder` so a test can inspect requests after handing the
/// engine ownership of a provider.
pub struct SharedEmbedder(pub std::sync::Arc<HashEmbedder>);

impl EmbeddingProvider for SharedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Vec<f32>>> {
        self.0.embed_batch(texts)
    }

    fn name(&self) -> &str {
        "shared-hash"
    }
}

/// An embedder that always fails like an unreachable service.
pub struct FailingEmbedder;

impl EmbeddingProvider for FailingEmbedder {
    fn embed_batch(&self, _texts: &[String]) -> DejavuResult<Vec<Vec<f32>>> {
        Err(DejavuError::Embedding {
            message: "HTTP request failed: connection refused".to_string(),
            detail: Some(serde_json::json!({"error": {"message": "connection refused"}})),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// An embedder that drops the last vector of every batch.
pub struct ShortEmbedder;

impl EmbeddingProvider for ShortEmbedder {
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Vec<f32>>> {
        let mut vectors: Vec<Vec<f32>> = texts.iter().map(|t| HashEmbedder::vector_for(t)).collect();
        vectors.pop();
        Ok(vectors)
    }

    fn name(&self) -> &str {
        "short"
    }
}

/// A narrator with a fixed reply (or failure). Records prompts.
pub struct ScriptedNarrator {
    reply: Result<String, String>,
    prompts: std::sync::Arc<Mutex<Vec<String>>>,
}

impl ScriptedNarrator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Default::default(),
        }
    }

    /// Handle onto the recorded prompts.
    pub fn prompt_log(&self) -> std::sync::Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }
}

impl NarrativeProvider for ScriptedNarrator {
    fn complete(&self, prompt: &str) -> DejavuResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(DejavuError::Narrative)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A small dream journal.
pub fn sample_dreams() -> Vec<DreamRecord> {
    vec![
        DreamRecord::new("d1", "Flying over the sea", "I was flying over a blue ocean with seagulls")
            .with_date("2024-03-01"),
        DreamRecord::new("d2", "Old school", "Walking through the hallways of my old school at night")
            .with_date("2024-03-05"),
        DreamRecord::new("d3", "Red bird", "A red bird flew over my house and sang")
            .with_date("2024-04-11"),
        DreamRecord::new("d4", "Exam panic", "I forgot my pencil and the exam had already started")
            .with_date("2024-05-20"),
        DreamRecord::new("d5", "Forest cabin", "A quiet cabin deep in a pine forest covered in snow")
            .with_date("2024-06-02"),
    ]
}

/// Ten dreams with varied content.
pub fn ten_dreams() -> Vec<DreamRecord> {
    let topics = [
        ("Beach", "waves crashing on a sandy beach at sunset"),
        ("Train", "a long train ride through mountains and tunnels"),
        ("Dog", "my childhood dog running in the park"),
        ("Rain", "standing in the rain outside a cafe"),
        ("Castle", "exploring a castle with endless staircases"),
        ("Ocean", "swimming deep in the ocean with whales"),
        ("City", "lost in a city full of neon lights"),
        ("Garden", "a garden full of red roses and bees"),
        ("Storm", "a storm over the ocean with lightning"),
        ("Library", "reading old books in a silent library"),
    ];
    topics
        .iter()
        .enumerate()
        .map(|(i, (title, content))| DreamRecord::new(format!("t{}", i + 1), *title, *content))
        .collect()
}
