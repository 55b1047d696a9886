//! Dream storage and embedding write-back.

pub mod json_store;

use crate::embedding::{EmbeddingProvider, FetchedEmbedding};
use crate::types::{DejavuError, DejavuResult, DreamCandidate, DreamRecord};

pub use json_store::JsonDreamStore;

/// A source of dream records that also accepts cached embeddings.
pub trait DreamStore {
    /// All stored dreams, in stored order.
    fn dreams(&self) -> DejavuResult<Vec<DreamRecord>>;

    /// Store a vector on the dream with this id.
    fn put_embedding(&mut self, dream_id: &str, embedding: &[f32]) -> DejavuResult<()>;

    /// Store several vectors. Every vector whose dream exists is stored; the
    /// first failure is reported afterwards.
    fn put_embeddings(&mut self, fetched: &[FetchedEmbedding]) -> DejavuResult<()> {
        let mut first_error = None;
        for item in fetched {
            if let Err(e) = self.put_embedding(&item.dream_id, &item.embedding) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Look up one dream by id.
    fn get(&self, dream_id: &str) -> DejavuResult<Option<DreamRecord>> {
        Ok(self
            .dreams()?
            .into_iter()
            .find(|d| d.id.as_deref() == Some(dream_id)))
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDreamStore {
    records: Vec<DreamRecord>,
}

impl MemoryDreamStore {
    pub fn new(records: Vec<DreamRecord>) -> Self {
        Self { records }
    }
}

impl DreamStore for MemoryDreamStore {
    fn dreams(&self) -> DejavuResult<Vec<DreamRecord>> {
        Ok(self.records.clone())
    }

    fn put_embedding(&mut self, dream_id: &str, embedding: &[f32]) -> DejavuResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|d| d.id.as_deref() == Some(dream_id))
            .ok_or_else(|| DejavuError::DreamNotFound(dream_id.to_string()))?;
        record.embedding = Some(embedding.to_vec());
        Ok(())
    }
}

/// Persist freshly fetched vectors. Failures are logged and otherwise ignored.
pub fn write_back(store: &mut dyn DreamStore, fetched: &[FetchedEmbedding]) {
    if fetched.is_empty() {
        return;
    }
    match store.put_embeddings(fetched) {
        Ok(()) => log::info!("Cached {} new embedding(s)", fetched.len()),
        Err(e) => log::warn!("Embedding write-back failed: {}", e),
    }
}

/// Generate and store the embedding for one dream.
pub fn embed_dream(
    provider: &dyn EmbeddingProvider,
    store: &mut dyn DreamStore,
    dream_id: &str,
) -> DejavuResult<usize> {
    let record = store
        .get(dream_id)?
        .ok_or_else(|| DejavuError::DreamNotFound(dream_id.to_string()))?;
    let candidate = DreamCandidate::from_record(record, 0)?;
    let embedding = provider.embed(candidate.text().trim())?;
    store.put_embedding(dream_id, &embedding)?;
    Ok(embedding.len())
}

/// Embed every stored dream that has no vector yet, in one batch.
/// Returns the number of dreams embedded.
pub fn backfill(provider: &dyn EmbeddingProvider, store: &mut dyn DreamStore) -> DejavuResult<usize> {
    let mut pending = Vec::new();
    for (i, record) in store.dreams()?.into_iter().enumerate() {
        let Some(id) = record.id.clone().filter(|id| !id.is_empty()) else {
            log::warn!("Skipping dream at position {} without an id", i + 1);
            continue;
        };
        let candidate = DreamCandidate::from_record(record, i)?;
        if candidate.cached_embedding().is_none() {
            pending.push((id, candidate.text()));
        }
    }
    if pending.is_empty() {
        return Ok(0);
    }

    let texts: Vec<String> = pending.iter().map(|(_, text)| text.clone()).collect();
    let vectors = provider.embed_batch(&texts)?;
    if vectors.len() != pending.len() {
        return Err(DejavuError::EmbeddingCountMismatch {
            expected: pending.len(),
            got: vectors.len(),
        });
    }

    let fetched: Vec<FetchedEmbedding> = pending
        .into_iter()
        .zip(vectors)
        .map(|((dream_id, _), embedding)| FetchedEmbedding {
            dream_id,
            embedding,
        })
        .collect();
    store.put_embeddings(&fetched)?;
    Ok(fetched.len())
}
