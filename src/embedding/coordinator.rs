//! Decides which texts need a fresh vector and correlates the batched reply.

use super::provider::{Embedding, EmbeddingProvider};
use crate::types::{DejavuError, DejavuResult, DreamCandidate, QueryEvent};

/// What a position in the batched request stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The real-life event. Always fetched, never cached.
    Query,
    /// The candidate at this index in the request.
    Candidate(usize),
}

/// A vector fetched during this request for a stored dream that had none.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedEmbedding {
    pub dream_id: String,
    pub embedding: Embedding,
}

/// One vector per participant, ready for centered scoring.
#[derive(Debug, Clone)]
pub struct ResolvedEmbeddings {
    pub query: Embedding,
    /// Aligned with the candidate list.
    pub candidates: Vec<Embedding>,
    /// Vectors fetched in this request, for write-back by the caller. Dreams
    /// without a stored id are left out.
    pub fetched: Vec<FetchedEmbedding>,
}

/// The single batched embedding request for one match.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    texts: Vec<String>,
    slots: Vec<Slot>,
}

impl FetchPlan {
    /// Plan a fetch: the query first, then every candidate lacking a cached vector.
    pub fn new(query: &QueryEvent, candidates: &[DreamCandidate]) -> Self {
        let mut texts = vec![query.text().to_string()];
        let mut slots = vec![Slot::Query];
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.cached_embedding().is_none() {
                texts.push(candidate.text());
                slots.push(Slot::Candidate(i));
            }
        }
        Self { texts, slots }
    }

    /// Texts to send, in request order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// What each text stands for, in request order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of candidates that need a fresh vector.
    pub fn missing_count(&self) -> usize {
        self.slots.len() - 1
    }

    /// Pair returned vectors with their slots and merge them with the cached ones.
    ///
    /// Fails when the reply does not carry exactly one vector per requested text.
    pub fn resolve(
        self,
        candidates: &[DreamCandidate],
        fetched: Vec<Embedding>,
    ) -> DejavuResult<ResolvedEmbeddings> {
        if fetched.len() != self.slots.len() {
            return Err(DejavuError::EmbeddingCountMismatch {
                expected: self.slots.len(),
                got: fetched.len(),
            });
        }

        let mut query = None;
        let mut fresh: Vec<Option<Embedding>> = vec![None; candidates.len()];
        for (slot, vector) in self.slots.into_iter().zip(fetched) {
            match slot {
                Slot::Query => query = Some(vector),
                Slot::Candidate(i) => fresh[i] = Some(vector),
            }
        }
        let query = query.ok_or(DejavuError::EmbeddingCountMismatch {
            expected: 1,
            got: 0,
        })?;

        let mut resolved = Vec::with_capacity(candidates.len());
        let mut written = Vec::new();
        for (candidate, fresh_vec) in candidates.iter().zip(fresh) {
            match (candidate.cached_embedding(), fresh_vec) {
                (Some(cached), _) => resolved.push(cached.to_vec()),
                (None, Some(vector)) => {
                    match &candidate.store_id {
                        Some(dream_id) => written.push(FetchedEmbedding {
                            dream_id: dream_id.clone(),
                            embedding: vector.clone(),
                        }),
                        None => log::debug!(
                            "Dream at position {} has no stored id; its vector is not cached",
                            candidate.id
                        ),
                    }
                    resolved.push(vector);
                }
                (None, None) => {
                    return Err(DejavuError::Embedding {
                        message: format!("No vector planned for dream {}", candidate.id),
                        detail: None,
                    })
                }
            }
        }

        Ok(ResolvedEmbeddings {
            query,
            candidates: resolved,
            fetched: written,
        })
    }
}

/// Fetch the query vector and every missing candidate vector in one call.
pub fn fetch_embeddings(
    provider: &dyn EmbeddingProvider,
    query: &QueryEvent,
    candidates: &[DreamCandidate],
) -> DejavuResult<ResolvedEmbeddings> {
    let plan = FetchPlan::new(query, candidates);
    log::info!(
        "Fetching {} embedding(s) from {} ({} cached)",
        plan.texts().len(),
        provider.name(),
        candidates.len() - plan.missing_count()
    );
    let vectors = provider.embed_batch(plan.texts())?;
    plan.resolve(candidates, vectors)
}
