//! Quote Computation Benchmarks — Hot-Path Performance Validation
//!
//! Benchmarks the bid/ask derivation that runs at the top of every
//! quote cycle.
//!
//! Run with: cargo bench --bench quote_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

use binance_spread_bot::domain::quote::QuotePair;

/// Benchmark quote pair derivation at BTC-scale prices.
fn bench_quote_around(c: &mut Criterion) {
    c.bench_function("quote_around_btc", |b| {
        b.iter(|| {
            let _quote = QuotePair::around(
                black_box(dec!(50000.12345678)),
                black_box(dec!(20.0)),
                black_box(2),
            );
        });
    });
}

/// Benchmark the validity check on a derived quote.
fn bench_quote_validity(c: &mut Criterion) {
    let quote = QuotePair::around(dec!(50000.00), dec!(20.0), 2);

    c.bench_function("quote_is_valid", |b| {
        b.iter(|| {
            let _ok = black_box(&quote).is_valid();
        });
    });
}

criterion_group!(benches, bench_quote_around, bench_quote_validity);
criterion_main!(benches);
