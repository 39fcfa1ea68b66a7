//! Benchmarks for the game core.
//!
//! `run_match` is the hot path of `simulate`: one full match on the logical
//! clock, bots included.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tugmath::Config;
use tugmath::game::generate;
use tugmath::sim::{SimConfig, run_match, run_simulation};

fn bench_generate(c: &mut Criterion) {
    let config = Config::default();
    let wide = Config {
        min_number: 1,
        max_number: 1_000_000,
        ..Config::default()
    };
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("generate_1_to_9", |b| {
        b.iter(|| black_box(generate(black_box(&config), &mut rng)));
    });
    c.bench_function("generate_1_to_1m", |b| {
        b.iter(|| black_box(generate(black_box(&wide), &mut rng)));
    });
}

fn bench_single_match(c: &mut Criterion) {
    let config = SimConfig::default();

    c.bench_function("single_match", |b| {
        b.iter(|| {
            let result = run_match(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_match_batch(c: &mut Criterion) {
    // Sequential, without parallel overhead
    let config = SimConfig::default();

    c.bench_function("10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_match(black_box(seed), black_box(&config));
                let _ = black_box(result);
            }
        });
    });
}

fn bench_parallel_simulation(c: &mut Criterion) {
    let config = SimConfig::default();

    c.bench_function("100_matches_parallel", |b| {
        b.iter(|| {
            let stats = run_simulation(black_box(0), 100, black_box(&config), || {});
            black_box(stats)
        });
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_single_match,
    bench_match_batch,
    bench_parallel_simulation
);
criterion_main!(benches);
