//! Embedding service access and per-request cache coordination.

pub mod coordinator;
pub mod openai;
pub mod provider;

pub use coordinator::{fetch_embeddings, FetchPlan, FetchedEmbedding, ResolvedEmbeddings, Slot};
pub use openai::{parse_embedding_response, OpenAiEmbeddings};
pub use provider::{Embedding, EmbeddingProvider};
