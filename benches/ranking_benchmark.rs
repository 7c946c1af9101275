//! Benchmarks for ranking and suggestions.
//!
//! Run with: cargo bench --bench ranking_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use recipe_intel::{Catalog, Recipe, RankingEngine, RecipeService};
use std::hint::black_box;
use std::sync::Arc;

const PANTRY: &[&str] = &[
    "milk", "eggs", "flour", "sugar", "butter", "salt", "pepper", "garlic", "onions", "rice",
    "pasta", "olive oil", "tomato", "cheese", "chicken", "basil", "lemon", "soy sauce",
];

/// Generate a synthetic catalog with the specified number of recipes.
fn generate_catalog(count: usize) -> Catalog {
    let recipes = (0..count)
        .map(|i| {
            let ingredients: Vec<String> = (0..(3 + i % 6))
                .map(|j| PANTRY[(i * 7 + j * 3) % PANTRY.len()].to_string())
                .collect();
            Recipe::new(format!("recipe-{i}"), ingredients)
                .with_rating(3.0 + (i % 20) as f64 / 10.0)
                .with_prep_time((5 + i % 60) as u32)
        })
        .collect();
    Catalog::from_recipes(recipes)
}

fn bench_rank_builtin(c: &mut Criterion) {
    let service = RecipeService::builtin();
    c.bench_function("rank_builtin", |b| {
        b.iter(|| black_box(service.rank(black_box(&["eggs", "butter", "salt"]), 5)));
    });
}

fn bench_rank_catalog_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_catalog");
    let held = ["eggs", "garlic", "rice", "olive oil"];

    for size in [100, 1_000, 10_000] {
        let engine = RankingEngine::new(Arc::new(generate_catalog(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &engine, |b, engine| {
            b.iter(|| black_box(engine.rank(black_box(&held), 10)));
        });
    }
    group.finish();
}

fn bench_suggest(c: &mut Criterion) {
    let service = RecipeService::builtin();
    c.bench_function("suggest_builtin", |b| {
        b.iter(|| {
            black_box(service.suggest(
                black_box(&["salt", "bread", "milk"]),
                black_box(&["butter", "eggs"]),
            ))
        });
    });
}

criterion_group!(benches, bench_rank_builtin, bench_rank_catalog_sizes, bench_suggest);
criterion_main!(benches);
