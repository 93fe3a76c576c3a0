// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for catalogue search and keyword highlighting in
// the kartei-catalog crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kartei_catalog::highlight::highlight_segments;
use kartei_catalog::search::SearchQuery;
use kartei_catalog::store::CatalogStore;
use kartei_core::types::ProjectDraft;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed an in-memory catalogue with `count` synthetic records spread over
/// a few years, with recurring vocabulary so searches actually hit.
fn seeded_store(count: usize) -> CatalogStore {
    let topics = [
        "solar dryer for cocoa beans",
        "IoT aquaponics water monitor",
        "smart irrigation with moisture sensors",
        "RFID attendance tracking",
        "campus waste sorting assistant",
    ];
    let years = ["2022", "2023", "2024", "2025"];

    let mut store = CatalogStore::open_in_memory().expect("open in-memory db");
    let drafts: Vec<ProjectDraft> = (0..count)
        .map(|i| {
            let topic = topics[i % topics.len()];
            ProjectDraft {
                title: format!("Project {i}: {topic}"),
                year: years[i % years.len()].to_string(),
                abstract_text: format!(
                    "This final year project presents a {topic}. The prototype was \
                     evaluated over one semester and compared against a manual \
                     baseline, with attention to cost, reliability and ease of use."
                ),
                supervisor: format!("Supervisor {}", i % 7),
                student: format!("Student {i}"),
            }
        })
        .collect();
    store.insert_many(&drafts).expect("seed records");
    store
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark a two-word search with and without a year filter over a
/// 500-record catalogue.
fn bench_search(c: &mut Criterion) {
    let store = seeded_store(500);

    let query = SearchQuery::parse("solar dryer", None);
    c.bench_function("search (two words, 500 records)", |b| {
        b.iter(|| {
            let hits = store.search(black_box(&query)).expect("search");
            black_box(hits);
        });
    });

    let filtered = SearchQuery::parse("solar dryer", Some("2024"));
    c.bench_function("search (two words + year, 500 records)", |b| {
        b.iter(|| {
            let hits = store.search(black_box(&filtered)).expect("search");
            black_box(hits);
        });
    });
}

/// Benchmark highlight segmentation over an abstract-sized text.
fn bench_highlight(c: &mut Criterion) {
    let text = "This final year project presents a solar dryer for cocoa beans. \
                The dryer uses a solar collector and a small fan to keep the \
                drying chamber at a stable temperature. Moisture readings are \
                logged every minute and the farmer is alerted when the batch is \
                done. The prototype was evaluated over one semester against sun \
                drying on open mats, with attention to cost and reliability."
        .repeat(3);
    let keywords = vec![
        "solar".to_string(),
        "dryer".to_string(),
        "solar dryer".to_string(),
        "moisture".to_string(),
    ];

    c.bench_function("highlight_segments (~1 KiB abstract)", |b| {
        b.iter(|| {
            let segments = highlight_segments(black_box(&text), black_box(&keywords));
            black_box(segments);
        });
    });
}

criterion_group!(benches, bench_search, bench_highlight);
criterion_main!(benches);
