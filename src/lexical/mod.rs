//! Lexical side of matching: tokenizer, vocabulary, TF-IDF scorer.

pub mod tfidf;
pub mod tokenizer;
pub mod vocabulary;

pub use tfidf::{tfidf_cosine, LexicalScorer};
pub use tokenizer::{is_token_char, shared_tokens, tokenize};
pub use vocabulary::Vocabulary;
