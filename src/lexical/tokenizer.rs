//! Text normalization into bounded lowercase token sequences.

use crate::types::{MAX_TOKENS, MIN_TOKEN_CHARS};

/// Whether a (lowercased) character belongs inside a token.
///
/// Kept: ASCII letters and digits, and precomposed Hangul syllables.
/// Everything else separates tokens.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Split text into lowercase tokens of at least two characters, capped at
/// [`MAX_TOKENS`].
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_token_char(c))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .take(MAX_TOKENS)
        .map(str::to_string)
        .collect()
}

/// Tokens shared by two texts, in the order they first appear in `a`,
/// capped at `max_count`.
pub fn shared_tokens(a: &str, b: &str, max_count: usize) -> Vec<String> {
    let in_b: std::collections::HashSet<String> = tokenize(b).into_iter().collect();
    let mut seen = std::collections::HashSet::new();
    tokenize(a)
        .into_iter()
        .filter(|token| in_b.contains(token) && seen.insert(token.clone()))
        .take(max_count)
        .collect()
}
