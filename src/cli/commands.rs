//! CLI command implementations.

use std::path::Path;

use crate::config::DejavuConfig;
use crate::engine::{ErrorResponse, MatchEngine, MatchRequest, MatchResponse};
use crate::lexical::tokenize;
use crate::store::{self, DreamStore, JsonDreamStore};
use crate::types::{DejavuError, DejavuResult, ScoredMatch};

/// Options for `dejavu match`.
pub struct MatchOptions<'a> {
    pub request_path: &'a Path,
    pub store_path: Option<&'a Path>,
    pub write_back: bool,
    pub narrative: bool,
}

/// Run one matching request read from a JSON file.
pub fn cmd_match(config: &DejavuConfig, options: MatchOptions<'_>, json: bool) -> DejavuResult<()> {
    let body = std::fs::read_to_string(options.request_path)?;
    let mut request = MatchRequest::from_json(&body)?;

    let mut dream_store = match options.store_path {
        Some(path) => {
            let opened = JsonDreamStore::open(path)?;
            request.dreams = Some(opened.dreams()?);
            Some(opened)
        }
        None => None,
    };

    let result = MatchEngine::from_config(config).and_then(|engine| {
        let engine = if options.narrative {
            engine
        } else {
            engine.without_narrator()
        };
        engine.handle(request)
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            if json {
                let response = MatchResponse::Failure(ErrorResponse::from(&e));
                println!("{}", to_pretty(&response)?);
            }
            return Err(e);
        }
    };

    if options.write_back {
        match dream_store.as_mut() {
            Some(opened) => store::write_back(opened, &outcome.fetched),
            None => log::warn!("--write-back needs --store; {} vector(s) not cached", outcome.fetched.len()),
        }
    }

    if json {
        let response = MatchResponse::Success {
            result: outcome.matches,
        };
        println!("{}", to_pretty(&response)?);
    } else {
        print_matches(&outcome.matches);
    }
    Ok(())
}

fn print_matches(matches: &[ScoredMatch]) {
    if matches.is_empty() {
        println!("No dreams to compare.");
        return;
    }
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}. [{:>3}%] {} ({})",
            i + 1,
            m.match_score,
            m.dream_title,
            m.dream_date
        );
        println!("     Shared: {}", m.matched_elements.display_list().join(", "));
        println!("     {}", m.ai_analysis);
    }
}

/// Generate and store the embedding of one dream.
pub fn cmd_embed(config: &DejavuConfig, path: &Path, dream_id: &str, json: bool) -> DejavuResult<()> {
    let engine = MatchEngine::from_config(config)?.without_narrator();
    let mut dream_store = JsonDreamStore::open(path)?;
    let dimension = store::embed_dream(engine.embedder(), &mut dream_store, dream_id)?;

    if json {
        println!(
            "{}",
            serde_json::json!({"ok": true, "id": dream_id, "dimension": dimension})
        );
    } else {
        println!("Embedded dream {} ({} dimensions)", dream_id, dimension);
    }
    Ok(())
}

/// Embed every stored dream lacking a vector.
pub fn cmd_backfill(config: &DejavuConfig, path: &Path, json: bool) -> DejavuResult<()> {
    let engine = MatchEngine::from_config(config)?.without_narrator();
    let mut dream_store = JsonDreamStore::open(path)?;
    let total = dream_store.len();
    let embedded = store::backfill(engine.embedder(), &mut dream_store)?;

    if json {
        println!(
            "{}",
            serde_json::json!({"embedded": embedded, "total": total})
        );
    } else {
        println!("Embedded {} of {} dream(s) in {}", embedded, total, path.display());
    }
    Ok(())
}

/// Print the normalized token sequence of a text.
pub fn cmd_tokens(text: &str, json: bool) -> DejavuResult<()> {
    let tokens = tokenize(text);
    if json {
        println!("{}", serde_json::to_string(&tokens)?);
    } else {
        println!("{}", tokens.join(" "));
    }
    Ok(())
}

/// Print the effective configuration, or its default path.
pub fn cmd_config(config: &DejavuConfig, show_path: bool) -> DejavuResult<()> {
    if show_path {
        println!("{}", DejavuConfig::default_path().display());
        return Ok(());
    }
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| DejavuError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}

fn to_pretty<T: serde::Serialize>(value: &T) -> DejavuResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
