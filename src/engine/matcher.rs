//! The matching engine: one request in, ranked matches out.

use super::combine::{rank, RankParams, ScoreWeights};
use super::request::{MatchParams, MatchRequest};
use crate::config::{DejavuConfig, ScoringConfig};
use crate::embedding::{fetch_embeddings, EmbeddingProvider, FetchedEmbedding, OpenAiEmbeddings};
use crate::lexical::LexicalScorer;
use crate::narrative::{self, AnthropicNarrator, NarrativeProvider};
use crate::semantic::centered_scores;
use crate::types::{DejavuError, DejavuResult, ScoredMatch};

/// Result of one matching call.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Ranked, truncated matches.
    pub matches: Vec<ScoredMatch>,
    /// Vectors fetched for dreams that had none, for write-back to the store.
    pub fetched: Vec<FetchedEmbedding>,
    /// How many matches received a service-written explanation.
    pub narrated: usize,
}

/// Scores dreams against a real-life event.
///
/// Holds no per-request state; a single engine can serve any number of
/// independent requests.
pub struct MatchEngine {
    embedder: Box<dyn EmbeddingProvider>,
    narrator: Option<Box<dyn NarrativeProvider>>,
    scoring: ScoringConfig,
}

impl MatchEngine {
    /// Create an engine with default scoring and no narrative step.
    pub fn new(embedder: Box<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            narrator: None,
            scoring: ScoringConfig::default(),
        }
    }

    /// Enable the narrative step.
    pub fn with_narrator(mut self, narrator: Box<dyn NarrativeProvider>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Replace the scoring configuration.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Build the HTTP-backed engine. A missing embedding credential is an
    /// error; a missing narrative credential only disables narration.
    pub fn from_config(config: &DejavuConfig) -> DejavuResult<Self> {
        let embedder = OpenAiEmbeddings::from_config(&config.embeddings)?;
        let mut engine = Self::new(Box::new(embedder)).with_scoring(config.scoring.clone());

        if config.narrative.enabled {
            match AnthropicNarrator::from_config(&config.narrative) {
                Ok(narrator) => engine = engine.with_narrator(Box::new(narrator)),
                Err(DejavuError::MissingCredential(var)) => {
                    log::info!("Narrative explanations disabled: {} is not set", var);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(engine)
    }

    /// Drop the narrative step, if any.
    pub fn without_narrator(mut self) -> Self {
        self.narrator = None;
        self
    }

    /// Whether the narrative step will run.
    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// The scoring configuration in use.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// The embedding provider, for store maintenance.
    pub fn embedder(&self) -> &dyn EmbeddingProvider {
        self.embedder.as_ref()
    }

    /// Validate and run a wire request.
    pub fn handle(&self, request: MatchRequest) -> DejavuResult<MatchOutcome> {
        let params = request.validate(&self.scoring)?;
        self.run(params)
    }

    /// Run a validated request.
    pub fn run(&self, params: MatchParams) -> DejavuResult<MatchOutcome> {
        let MatchParams {
            event,
            candidates,
            top_n,
            calibration,
        } = params;

        if candidates.is_empty() {
            log::debug!("No candidate dreams; nothing to match");
            return Ok(MatchOutcome::default());
        }

        let texts: Vec<String> = candidates.iter().map(|c| c.text()).collect();
        let lexical_scorer = LexicalScorer::new(event.text(), &texts);
        let lexical = lexical_scorer.score_corpus();
        log::debug!(
            "Scored {} candidate(s) lexically ({} query tokens)",
            candidates.len(),
            lexical_scorer.query_token_count()
        );

        let resolved = fetch_embeddings(self.embedder.as_ref(), &event, &candidates)?;
        let candidate_vecs: Vec<&[f32]> = resolved.candidates.iter().map(|v| v.as_slice()).collect();
        let semantic = centered_scores(&resolved.query, &candidate_vecs)?;

        let rank_params = RankParams {
            weights: ScoreWeights {
                semantic: self.scoring.semantic_weight,
                lexical: self.scoring.lexical_weight,
            },
            calibration,
            top_n,
            max_matched_elements: self.scoring.max_matched_elements,
        };
        let mut matches = rank(&event, &candidates, &semantic, &lexical, &rank_params);

        let mut narrated = 0;
        if let Some(narrator) = &self.narrator {
            let explanations = narrative::explain(narrator.as_ref(), &event, &matches);
            narrated = narrative::apply(&mut matches, explanations);
            log::debug!("{} of {} match(es) narrated", narrated, matches.len());
        }

        Ok(MatchOutcome {
            matches,
            fetched: resolved.fetched,
            narrated,
        })
    }
}
