use coursematch_core::tokenizer::clean_text;
use coursematch_core::SimilarityIndex;
use criterion::{criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &[
    "python", "rust", "web", "development", "data", "science", "machine", "learning", "guitar",
    "piano", "photography", "marketing", "finance", "excel", "design", "beginners", "advanced",
    "complete", "bootcamp", "masterclass", "javascript", "react", "trading", "drawing",
];

fn synthetic_corpus(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let title: Vec<&str> = (0..6).map(|j| WORDS[(i * 7 + j * 13 + i / 5) % WORDS.len()]).collect();
            clean_text(&format!("{} course {i}", title.join(" ")))
        })
        .collect()
}

fn bench_clean_text(c: &mut Criterion) {
    let text = "The Complete Web Developer Bootcamp 2024: HTML, CSS & JavaScript (React!)";
    c.bench_function("clean_text_title", |b| b.iter(|| clean_text(text)));
}

fn bench_query(c: &mut Criterion) {
    let index = SimilarityIndex::build(&synthetic_corpus(5_000));
    c.bench_function("query_top4_5k_docs", |b| b.iter(|| index.query("python data science for beginners", 4)));
}

criterion_group!(benches, bench_clean_text, bench_query);
criterion_main!(benches);
