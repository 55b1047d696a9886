//! Output records of a matching request.

use serde::{Deserialize, Serialize};

/// Text reported in place of keywords when a dream shares none with the event.
pub const NO_OVERLAP_SENTINEL: &str = "no significant keyword overlap";

/// How combined scores are turned into the displayed 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calibration {
    /// Fraction of this batch scoring at or below the candidate.
    #[default]
    Percentile,
    /// The combined score itself.
    Raw,
}

impl Calibration {
    /// Return a human-readable name for this calibration mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Percentile => "percentile",
            Self::Raw => "raw",
        }
    }

    /// Parse a calibration mode from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "percentile" => Some(Self::Percentile),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }
}

impl std::fmt::Display for Calibration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keywords shared by the event and a dream.
///
/// Serialized as a JSON list in both cases; the sentinel becomes a
/// one-element list so the list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub enum MatchedElements {
    /// Shared tokens in first-encountered order.
    Keywords(Vec<String>),
    /// No token is shared.
    NoSignificantOverlap,
}

impl MatchedElements {
    /// Wrap a keyword list, substituting the sentinel for an empty one.
    pub fn from_keywords(keywords: Vec<String>) -> Self {
        if keywords.is_empty() {
            Self::NoSignificantOverlap
        } else {
            Self::Keywords(keywords)
        }
    }

    /// The shared keywords; empty for the sentinel.
    pub fn keywords(&self) -> &[String] {
        match self {
            Self::Keywords(keywords) => keywords,
            Self::NoSignificantOverlap => &[],
        }
    }

    /// Whether this is the "no significant overlap" sentinel.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::NoSignificantOverlap)
    }

    /// Display form, as shown to end users.
    pub fn display_list(&self) -> Vec<String> {
        match self {
            Self::Keywords(keywords) => keywords.clone(),
            Self::NoSignificantOverlap => vec![NO_OVERLAP_SENTINEL.to_string()],
        }
    }
}

impl From<MatchedElements> for Vec<String> {
    fn from(elements: MatchedElements) -> Self {
        elements.display_list()
    }
}

/// Pre-calibration scores kept for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawScores {
    /// Centered embedding cosine, in [-1, 1].
    pub semantic: f32,
    /// TF-IDF cosine, in [0, 1].
    pub lexical: f32,
    /// Weighted blend of the two.
    pub combined: f32,
}

/// One ranked dream in the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub id: String,
    pub dream_title: String,
    /// `YYYY-MM-DD`, or the stored text when it is not a recognizable date.
    pub dream_date: String,
    /// Displayed score, 0-100.
    pub match_score: u8,
    pub matched_elements: MatchedElements,
    pub ai_analysis: String,
    #[serde(rename = "_raw")]
    pub raw: RawScores,
}
