//! Best-effort natural-language explanations for the top matches.

use std::collections::HashMap;

use serde_json::Value;

use super::provider::NarrativeProvider;
use crate::types::{QueryEvent, ScoredMatch};

/// Outcome of the narrative step for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// The service explained this match.
    Obtained(String),
    /// No usable explanation; the templated text stands.
    FallbackRetained,
}

/// Build the single prompt covering every match.
pub fn build_prompt(event: &QueryEvent, matches: &[ScoredMatch]) -> String {
    let items: Vec<String> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "({}) id: {}\nTitle: {}\nShared keywords: {}",
                i + 1,
                m.id,
                m.dream_title,
                m.matched_elements.display_list().join(", ")
            )
        })
        .collect();
    format!(
        "Real-life event: {}\n\n\
         For each dream below, explain in 2-3 sentences why it resembles the event. \
         Reply with only a JSON array of objects with the fields \"id\" and \"aiAnalysis\".\n\n{}",
        event.text(),
        items.join("\n\n")
    )
}

/// Parse a reply into id -> explanation. `None` when the reply is not a JSON
/// array. Entries missing an id or a non-empty explanation are skipped.
pub fn parse_explanations(reply: &str) -> Option<HashMap<String, String>> {
    let body = strip_code_fence(reply.trim());
    let parsed: Value = serde_json::from_str(body).ok()?;
    let items = parsed.as_array()?;

    let mut explanations = HashMap::new();
    for item in items {
        let id = match &item["id"] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        if let Some(text) = item["aiAnalysis"].as_str().filter(|t| !t.trim().is_empty()) {
            explanations.insert(id, text.to_string());
        }
    }
    Some(explanations)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Ask the provider about every match in one call.
///
/// Returns one outcome per match, in match order. Failures of any kind yield
/// [`Explanation::FallbackRetained`] for every match.
pub fn explain(
    provider: &dyn NarrativeProvider,
    event: &QueryEvent,
    matches: &[ScoredMatch],
) -> Vec<Explanation> {
    if matches.is_empty() {
        return Vec::new();
    }

    let prompt = build_prompt(event, matches);
    let reply = match provider.complete(&prompt) {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("Narrative step skipped, {} failed: {}", provider.name(), e);
            return vec![Explanation::FallbackRetained; matches.len()];
        }
    };

    let Some(mut explanations) = parse_explanations(&reply) else {
        log::warn!("Narrative step skipped, unparseable reply from {}", provider.name());
        return vec![Explanation::FallbackRetained; matches.len()];
    };

    matches
        .iter()
        .map(|m| match explanations.remove(&m.id) {
            Some(text) => Explanation::Obtained(text),
            None => Explanation::FallbackRetained,
        })
        .collect()
}

/// Overwrite `ai_analysis` where an explanation was obtained.
pub fn apply(matches: &mut [ScoredMatch], explanations: Vec<Explanation>) -> usize {
    let mut applied = 0;
    for (m, explanation) in matches.iter_mut().zip(explanations) {
        if let Explanation::Obtained(text) = explanation {
            m.ai_analysis = text;
            applied += 1;
        }
    }
    applied
}
