//! Criterion benchmarks for the Mastermind GA.
//!
//! Measures peg scoring on its own and complete seeded sessions for each
//! selection strategy.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mastermind_ga::ga::{operators, Engine, GaConfig, Palette, Scorer, Selection};
use mastermind_ga::random::create_rng;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let palette = Palette::classic();
    let mut rng = create_rng(42);

    for len in [4usize, 7] {
        let pairs: Vec<_> = (0..256)
            .map(|_| {
                (
                    operators::random_code(&palette, len, &mut rng),
                    operators::random_code(&palette, len, &mut rng),
                )
            })
            .collect();
        for (name, scorer) in [
            ("full", Scorer::default()),
            ("exact_only", Scorer::default().with_exact_only(true)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, len), &pairs, |b, pairs| {
                b.iter(|| {
                    for (guess, secret) in pairs {
                        black_box(scorer.score(black_box(guess), black_box(secret)).ok());
                    }
                })
            });
        }
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.sample_size(10);

    for (selection, len) in [
        (Selection::Truncation, 4usize),
        (Selection::Roulette, 4),
        (Selection::Truncation, 6),
    ] {
        let config = GaConfig::default()
            .with_selection(selection)
            .with_code_length(len)
            .with_max_generations(2000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("{selection:?}"), len),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut engine = Engine::new(black_box(config.clone())).ok();
                    let outcome = engine.as_mut().map(|e| e.run_to_convergence(None));
                    black_box(outcome.map(|o| o.generations))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scoring, bench_session);
criterion_main!(benches);
