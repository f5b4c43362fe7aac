//! Criterion benchmarks for nerdict.
//!
//! Covers tokenization, token-scan matching, whole-text matching and synonym
//! normalization over generated dictionaries.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use nerdict::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use nerdict::dictionary::{Dictionary, DictionaryEntry};
use nerdict::matcher::{match_tokens, match_whole_text};
use nerdict::message::Entity;
use nerdict::synonym::SynonymMap;

const WORDS: &[&str] = &[
    "weather", "today", "play", "music", "navigate", "home", "call", "mom", "set", "alarm",
    "seven", "tomorrow", "book", "table", "restaurant", "nyc", "paris", "london", "traffic",
    "news", "timer", "minutes", "volume", "up",
];

/// Generate test texts for benchmarking.
fn generate_texts(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let len = 5 + (i % 20);
            (0..len)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Generate a dictionary with `count` entries, a few of them real words.
fn generate_dictionary(count: usize) -> Dictionary {
    let mut entries: Vec<DictionaryEntry> = (0..count)
        .map(|i| DictionaryEntry::new(format!("term{i}"), format!("label{}", i % 10)))
        .collect();
    for word in WORDS.iter().step_by(3) {
        entries.push(DictionaryEntry::new(*word, "known"));
    }
    entries.push(DictionaryEntry::new("weather today", "app").with_direct(true));
    Dictionary::from_entries(entries)
}

fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");

    let tokenizer = WhitespaceTokenizer::new();
    let texts = generate_texts(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("whitespace_batch", |b| {
        b.iter(|| {
            for text in &texts {
                let tokens: Vec<_> = tokenizer.tokenize(black_box(text)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    group.sample_size(20);

    let tokenizer = WhitespaceTokenizer::new();
    let tokens: Vec<Vec<_>> = generate_texts(100)
        .iter()
        .map(|text| tokenizer.tokenize(text).unwrap().collect())
        .collect();

    for size in [100, 10_000] {
        let dictionary = generate_dictionary(size);

        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_function(format!("match_tokens_{size}"), |b| {
            b.iter(|| {
                for message_tokens in &tokens {
                    black_box(match_tokens(black_box(message_tokens), Some(&dictionary)));
                }
            })
        });

        group.bench_function(format!("match_whole_text_{size}"), |b| {
            b.iter(|| black_box(match_whole_text(black_box("weather today"), Some(&dictionary))))
        });
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let synonyms = SynonymMap::build(
        (0..10_000)
            .map(|i| (format!("alias{i}"), format!("Canonical {i}")))
            .chain([("NYC".to_string(), "New York City".to_string())]),
    );
    let entities: Vec<Entity> = (0..1000)
        .map(|i| {
            let value = if i % 2 == 0 { format!("alias{i}") } else { "nyc".to_string() };
            Entity::new(0, 3, value, "city")
        })
        .collect();

    group.throughput(Throughput::Elements(entities.len() as u64));
    group.bench_function("apply_synonyms", |b| {
        b.iter(|| {
            let mut batch = entities.clone();
            black_box(synonyms.apply(&mut batch, "ner_synonyms_dict"))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenization, bench_matching, bench_normalization);
criterion_main!(benches);
