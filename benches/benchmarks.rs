//! Criterion benchmarks for the déjà-vu matching engine.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use dejavu_engine::engine::{rank, MatchEngine, MatchRequest, RankParams};
use dejavu_engine::lexical::{tokenize, LexicalScorer};
use dejavu_engine::semantic::centered_scores;
use dejavu_engine::types::{DejavuResult, DreamCandidate, DreamRecord, QueryEvent};
use dejavu_engine::EmbeddingProvider;

const DIMENSION: usize = 1536;

const WORDS: [&str; 24] = [
    "ocean", "bird", "forest", "school", "exam", "flying", "falling", "house", "mother", "train",
    "storm", "night", "river", "mountain", "city", "dog", "garden", "red", "blue", "door",
    "stairs", "teeth", "lost", "bridge",
];

/// Fresh random vectors for every text.
struct RandomEmbedder;

impl EmbeddingProvider for RandomEmbedder {
    fn embed_batch(&self, texts: &[String]) -> DejavuResult<Vec<Vec<f32>>> {
        let mut rng = rand::thread_rng();
        Ok(texts
            .iter()
            .map(|_| (0..DIMENSION).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect())
    }

    fn name(&self) -> &str {
        "random"
    }
}

fn random_text(words: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..words)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_vector() -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..DIMENSION).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// A journal of `count` dreams. Half carry cached vectors.
fn make_journal(count: usize) -> Vec<DreamRecord> {
    (0..count)
        .map(|i| {
            let record = DreamRecord::new(format!("d{}", i), random_text(4), random_text(60))
                .with_date("2024-01-01");
            if i % 2 == 0 {
                record.with_embedding(random_vector())
            } else {
                record
            }
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = random_text(2000);
    c.bench_function("tokenize_2000_words", |b| b.iter(|| tokenize(&text)));
}

fn bench_tfidf_500(c: &mut Criterion) {
    let query = random_text(30);
    let corpus: Vec<String> = (0..500).map(|_| random_text(60)).collect();
    c.bench_function("tfidf_score_500_dreams", |b| {
        b.iter(|| LexicalScorer::new(&query, &corpus).score_corpus())
    });
}

fn bench_centered_500(c: &mut Criterion) {
    let query = random_vector();
    let candidates: Vec<Vec<f32>> = (0..500).map(|_| random_vector()).collect();
    let refs: Vec<&[f32]> = candidates.iter().map(|v| v.as_slice()).collect();
    c.bench_function("centered_cosine_500x1536", |b| {
        b.iter(|| centered_scores(&query, &refs))
    });
}

fn bench_rank_500(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let event = QueryEvent::new(random_text(30)).unwrap();
    let candidates: Vec<DreamCandidate> = make_journal(500)
        .into_iter()
        .enumerate()
        .map(|(i, r)| DreamCandidate::from_record(r, i).unwrap())
        .collect();
    let semantic: Vec<f32> = (0..500).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let lexical: Vec<f32> = (0..500).map(|_| rng.gen_range(0.0..1.0)).collect();
    let params = RankParams::default();
    c.bench_function("rank_500_percentile", |b| {
        b.iter(|| rank(&event, &candidates, &semantic, &lexical, &params))
    });
}

fn bench_full_match_200(c: &mut Criterion) {
    let engine = MatchEngine::new(Box::new(RandomEmbedder));
    let dreams = make_journal(200);
    let event = random_text(30);
    c.bench_function("match_200_dreams", |b| {
        b.iter(|| {
            let request = MatchRequest {
                dreams: Some(dreams.clone()),
                real_event: Some(event.clone()),
                top_n: Some(3),
                calibration: None,
            };
            engine.handle(request)
        })
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_tfidf_500,
    bench_centered_500,
    bench_rank_500,
    bench_full_match_200,
);
criterion_main!(benches);
