//! JSON request and response shapes for one matching call.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::types::{
    Calibration, DejavuError, DejavuResult, DreamCandidate, DreamRecord, QueryEvent, ScoredMatch,
};

/// A matching request as received from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub dreams: Option<Vec<DreamRecord>>,
    #[serde(default)]
    pub real_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
}

/// A validated request.
#[derive(Debug, Clone)]
pub struct MatchParams {
    pub event: QueryEvent,
    pub candidates: Vec<DreamCandidate>,
    pub top_n: usize,
    pub calibration: Calibration,
}

impl MatchRequest {
    /// Parse a request body.
    pub fn from_json(body: &str) -> DejavuResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate the request, filling unset options from `defaults`.
    ///
    /// Dream ids, including ones defaulted from position, must be unique.
    pub fn validate(self, defaults: &ScoringConfig) -> DejavuResult<MatchParams> {
        let dreams = self.dreams.ok_or(DejavuError::MissingDreams)?;
        let event = QueryEvent::new(self.real_event.ok_or(DejavuError::MissingEvent)?)?;

        let top_n = self.top_n.unwrap_or(defaults.top_n);
        if top_n == 0 {
            return Err(DejavuError::InvalidRequest(
                "topN must be a positive integer".to_string(),
            ));
        }

        let candidates = dreams
            .into_iter()
            .enumerate()
            .map(|(i, record)| DreamCandidate::from_record(record, i))
            .collect::<DejavuResult<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(candidates.len());
        if let Some(duplicate) = candidates.iter().find(|c| !seen.insert(c.id.as_str())) {
            return Err(DejavuError::InvalidRequest(format!(
                "duplicate dream id {}",
                duplicate.id
            )));
        }

        Ok(MatchParams {
            event,
            candidates,
            top_n,
            calibration: self.calibration.unwrap_or(defaults.calibration),
        })
    }
}

/// Structured failure body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl From<&DejavuError> for ErrorResponse {
    fn from(err: &DejavuError) -> Self {
        Self {
            error: err.to_string(),
            detail: err.detail().cloned(),
        }
    }
}

/// Response body: either the ranked list or a structured error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchResponse {
    Success { result: Vec<ScoredMatch> },
    Failure(ErrorResponse),
}

impl MatchResponse {
    /// Wrap the outcome of a matching call.
    pub fn from_result(result: &DejavuResult<Vec<ScoredMatch>>) -> Self {
        match result {
            Ok(matches) => Self::Success {
                result: matches.clone(),
            },
            Err(e) => Self::Failure(ErrorResponse::from(e)),
        }
    }

    /// Whether this is an error body.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}
