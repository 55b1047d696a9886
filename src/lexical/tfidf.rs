//! TF-IDF cosine similarity between the event and each dream.

use super::tokenizer::tokenize;
use super::vocabulary::Vocabulary;
use crate::semantic::cosine_similarity;

/// Scores candidates against one query, with document frequencies estimated
/// over the request's candidate pool.
///
/// Each score uses the documents {query, candidate, corpus...}, so a candidate
/// drawn from the corpus is counted twice toward its own frequencies.
pub struct LexicalScorer {
    query_tokens: Vec<String>,
    corpus_tokens: Vec<Vec<String>>,
    corpus_vocabulary: Vocabulary,
}

impl LexicalScorer {
    /// Tokenize the query and corpus once for the whole request.
    pub fn new<S: AsRef<str>>(query: &str, corpus: &[S]) -> Self {
        let corpus_tokens: Vec<Vec<String>> =
            corpus.iter().map(|doc| tokenize(doc.as_ref())).collect();
        let corpus_vocabulary = Vocabulary::build(&corpus_tokens);
        Self {
            query_tokens: tokenize(query),
            corpus_tokens,
            corpus_vocabulary,
        }
    }

    /// Score an arbitrary candidate text.
    pub fn score_text(&self, candidate: &str) -> f32 {
        self.score_tokens(&tokenize(candidate))
    }

    /// Score every corpus document against the query, in corpus order.
    pub fn score_corpus(&self) -> Vec<f32> {
        self.corpus_tokens
            .iter()
            .map(|tokens| self.score_tokens(tokens))
            .collect()
    }

    fn score_tokens(&self, candidate_tokens: &[String]) -> f32 {
        let mut vocabulary = self.corpus_vocabulary.clone();
        vocabulary.add_document(&self.query_tokens);
        vocabulary.add_document(candidate_tokens);

        let query_vec = vocabulary.weighted_vector(&self.query_tokens);
        let candidate_vec = vocabulary.weighted_vector(candidate_tokens);
        cosine_similarity(&query_vec, &candidate_vec)
    }

    /// Number of tokens in the normalized query.
    pub fn query_token_count(&self) -> usize {
        self.query_tokens.len()
    }
}

/// TF-IDF cosine similarity of `candidate` to `query`, in [0, 1].
///
/// 0 when either weighted vector is all zeros.
pub fn tfidf_cosine<S: AsRef<str>>(query: &str, candidate: &str, corpus: &[S]) -> f32 {
    LexicalScorer::new(query, corpus).score_text(candidate)
}
