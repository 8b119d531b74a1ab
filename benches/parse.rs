// benches/parse.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ffe_scrape::{
    ParseOptions, parse_pages,
    specs::{GridLayout, extract_results_with, extract_roster},
};

const ROSTER: &str = include_str!("../tests/fixtures/roster_ls.html");
const FLAT: &str = include_str!("../tests/fixtures/grid_flat.html");
const NESTED: &str = include_str!("../tests/fixtures/grid_nested.html");

fn bench_parse(c: &mut Criterion) {
    let opts = ParseOptions::default();
    let roster = extract_roster(ROSTER);

    c.bench_function("roster", |b| {
        b.iter(|| black_box(extract_roster(black_box(ROSTER))).len())
    });

    c.bench_function("results_flat", |b| {
        b.iter(|| {
            let players = extract_results_with(GridLayout::Flat, black_box(FLAT), &roster, &opts);
            black_box(players.len())
        })
    });

    c.bench_function("results_nested", |b| {
        b.iter(|| {
            let players = extract_results_with(GridLayout::Nested, black_box(NESTED), &roster, &opts);
            black_box(players.len())
        })
    });

    c.bench_function("pipeline_flat", |b| {
        b.iter(|| black_box(parse_pages(black_box(ROSTER), black_box(FLAT), &opts)))
    });

    c.bench_function("pipeline_nested", |b| {
        b.iter(|| black_box(parse_pages(black_box(ROSTER), black_box(NESTED), &opts)))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
