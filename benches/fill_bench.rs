//! Fill Simulation Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the order-book walk that runs on every market order.
//! The walk is linear in consumed levels; these benches keep an eye on
//! the exact-decimal arithmetic cost at realistic and worst-case depths.
//!
//! Run with: cargo bench --bench fill_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use sdex_trader::domain::book::DepthLevel;
use sdex_trader::domain::fill::simulate;
use sdex_trader::domain::intent::TradeSide;

/// A book with `n` ask levels, prices ascending from 0.1000 in 1-unit
/// price steps, 50 units resting at each level.
fn deep_asks(n: i64) -> Vec<DepthLevel> {
    (0..n)
        .map(|i| DepthLevel {
            price: Decimal::new(1000 + i, 4),
            amount: Decimal::new(50, 0),
        })
        .collect()
}

/// Benchmark a typical market order consuming a few levels.
fn bench_shallow_walk(c: &mut Criterion) {
    let asks = deep_asks(20);
    let amount = Decimal::new(120, 0);

    c.bench_function("fill_walk_3_of_20_levels", |b| {
        b.iter(|| {
            let _plan = simulate(
                black_box(&asks),
                black_box(amount),
                TradeSide::Buy,
                Decimal::new(1001, 3),
            );
        });
    });
}

/// Benchmark a large order sweeping a deep book end to end.
fn bench_full_sweep(c: &mut Criterion) {
    let asks = deep_asks(1000);
    let amount = Decimal::new(50_000, 0);

    c.bench_function("fill_walk_1000_levels", |b| {
        b.iter(|| {
            let _plan = simulate(
                black_box(&asks),
                black_box(amount),
                TradeSide::Buy,
                Decimal::new(1001, 3),
            );
        });
    });
}

/// Benchmark the infeasible path: the walk must still report the
/// partial amount achievable.
fn bench_insufficient_liquidity(c: &mut Criterion) {
    let asks = deep_asks(100);
    let amount = Decimal::new(1_000_000, 0);

    c.bench_function("fill_walk_insufficient", |b| {
        b.iter(|| {
            let _err = simulate(
                black_box(&asks),
                black_box(amount),
                TradeSide::Buy,
                Decimal::new(1001, 3),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_shallow_walk,
    bench_full_sweep,
    bench_insufficient_liquidity,
);
criterion_main!(benches);
