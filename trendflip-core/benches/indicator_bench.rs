//! Criterion benchmarks for the per-cycle hot path.
//!
//! Benchmarks:
//! 1. ATR over windows of increasing size
//! 2. ATR + Supertrend full recompute (what every polling cycle does)
//! 3. A full cycle: recompute + tracker observation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trendflip_core::domain::Candle;
use trendflip_core::indicators::{compute_atr, supertrend, SupertrendParams};
use trendflip_core::TrendCycle;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            let high = close + 1.5;
            let low = close - 1.5;
            Candle::new(
                i as i64 * 60_000,
                open,
                high,
                low,
                close,
                1_000_000.0 + (i % 500_000) as f64,
            )
        })
        .collect()
}

const WINDOWS: [usize; 3] = [100, 1_000, 10_000];

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_atr(c: &mut Criterion) {
    let mut group = c.benchmark_group("atr");
    for n in WINDOWS {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| compute_atr(black_box(candles), 10))
        });
    }
    group.finish();
}

fn bench_supertrend(c: &mut Criterion) {
    let params = SupertrendParams::default();
    let mut group = c.benchmark_group("supertrend_recompute");
    for n in WINDOWS {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| supertrend(black_box(candles), &params))
        });
    }
    group.finish();
}

fn bench_cycle(c: &mut Criterion) {
    let candles = make_candles(100);
    c.bench_function("cycle_evaluate_100", |b| {
        let mut cycle = TrendCycle::new("BENCH", SupertrendParams::default(), 100)
            .expect("valid cycle params");
        b.iter(|| cycle.evaluate(black_box(&candles)))
    });
}

criterion_group!(benches, bench_atr, bench_supertrend, bench_cycle);
criterion_main!(benches);
