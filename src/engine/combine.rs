//! Blends the two signals, calibrates, ranks, and truncates.

use std::cmp::Ordering;

use crate::lexical::shared_tokens;
use crate::types::{
    Calibration, DreamCandidate, MatchedElements, QueryEvent, RawScores, ScoredMatch,
    DEFAULT_LEXICAL_WEIGHT, DEFAULT_SEMANTIC_WEIGHT, MAX_MATCHED_ELEMENTS,
};

/// Relative weights of the semantic and lexical scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub semantic: f32,
    pub lexical: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: DEFAULT_SEMANTIC_WEIGHT,
            lexical: DEFAULT_LEXICAL_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// `semantic_weight * semantic + lexical_weight * lexical`.
    pub fn combine(&self, semantic: f32, lexical: f32) -> f32 {
        self.semantic * semantic + self.lexical * lexical
    }
}

/// Parameters for ranking one batch.
#[derive(Debug, Clone, Copy)]
pub struct RankParams {
    pub weights: ScoreWeights,
    pub calibration: Calibration,
    /// Maximum number of matches returned.
    pub top_n: usize,
    /// Maximum number of shared keywords per match.
    pub max_matched_elements: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            calibration: Calibration::Percentile,
            top_n: crate::types::DEFAULT_TOP_N,
            max_matched_elements: MAX_MATCHED_ELEMENTS,
        }
    }
}

/// Fraction of `scores` that are ≤ `value`. 0 for an empty batch.
pub fn percentile_rank(scores: &[f32], value: f32) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }
    let at_or_below = scores.iter().filter(|&&s| s <= value).count();
    at_or_below as f32 / scores.len() as f32
}

/// Map combined scores to calibrated 0-1 values.
pub fn calibrate(combined: &[f32], calibration: Calibration) -> Vec<f32> {
    match calibration {
        Calibration::Percentile => combined
            .iter()
            .map(|&s| percentile_rank(combined, s))
            .collect(),
        Calibration::Raw => combined.to_vec(),
    }
}

/// Displayed score: `round(calibrated * 100)` clamped to 0-100.
pub fn to_match_score(calibrated: f32) -> u8 {
    (calibrated * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Explanation used until (and unless) the narrative step replaces it.
pub fn fallback_analysis(calibration: Calibration, elements: &MatchedElements) -> String {
    let framing = match calibration {
        Calibration::Percentile => "Relative score from embedding and keyword similarity (percentile within your dreams)",
        Calibration::Raw => "Score from embedding and keyword similarity (raw)",
    };
    let keywords = match elements {
        MatchedElements::Keywords(keywords) => keywords.join(", "),
        MatchedElements::NoSignificantOverlap => "none".to_string(),
    };
    format!("{}. Shared keywords: {}", framing, keywords)
}

/// Score, sort, and truncate one batch.
///
/// `semantic` and `lexical` are aligned with `candidates`. Sorting is by
/// displayed score, then combined score, both descending; remaining ties keep
/// input order.
pub fn rank(
    event: &QueryEvent,
    candidates: &[DreamCandidate],
    semantic: &[f32],
    lexical: &[f32],
    params: &RankParams,
) -> Vec<ScoredMatch> {
    let combined: Vec<f32> = semantic
        .iter()
        .zip(lexical)
        .map(|(&s, &l)| params.weights.combine(s, l))
        .collect();
    let calibrated = calibrate(&combined, params.calibration);

    let mut scored: Vec<ScoredMatch> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let keywords = shared_tokens(
                event.text(),
                &candidate.keyword_text(),
                params.max_matched_elements,
            );
            let matched_elements = MatchedElements::from_keywords(keywords);
            let ai_analysis = fallback_analysis(params.calibration, &matched_elements);
            ScoredMatch {
                id: candidate.id.clone(),
                dream_title: candidate.display_title().to_string(),
                dream_date: candidate.display_date(),
                match_score: to_match_score(calibrated[i]),
                matched_elements,
                ai_analysis,
                raw: RawScores {
                    semantic: semantic[i],
                    lexical: lexical[i],
                    combined: combined[i],
                },
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.match_score.cmp(&a.match_score).then_with(|| {
            b.raw
                .combined
                .partial_cmp(&a.raw.combined)
                .unwrap_or(Ordering::Equal)
        })
    });
    scored.truncate(params.top_n);
    scored
}
