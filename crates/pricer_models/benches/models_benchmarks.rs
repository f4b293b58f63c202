//! Criterion benchmarks for the closed-form analytics.
//!
//! Benchmarks cover:
//! - Black-Scholes price and full Greeks across moneyness
//! - Implied volatility inversion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::{implied_volatility, BlackScholes, ImpliedVolConfig};
use pricer_models::instruments::OptionType;

fn bench_black_scholes(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");
    let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();

    for strike in [80.0, 100.0, 120.0] {
        group.bench_with_input(BenchmarkId::new("price", strike), &strike, |b, &k| {
            b.iter(|| bs.price(black_box(k), black_box(1.0), OptionType::Call))
        });
        group.bench_with_input(BenchmarkId::new("greeks", strike), &strike, |b, &k| {
            b.iter(|| bs.greeks(black_box(k), black_box(1.0), OptionType::Put))
        });
    }

    group.finish();
}

fn bench_implied_vol(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_vol");
    let config = ImpliedVolConfig::default();

    for sigma in [0.1, 0.4, 1.0] {
        let target = BlackScholes::new(100.0_f64, 0.05, sigma)
            .unwrap()
            .price(110.0, 0.5, OptionType::Call);
        group.bench_with_input(BenchmarkId::new("newton", sigma), &target, |b, &p| {
            b.iter(|| {
                implied_volatility(
                    black_box(p),
                    100.0,
                    110.0,
                    0.05,
                    0.5,
                    OptionType::Call,
                    &config,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_black_scholes, bench_implied_vol);
criterion_main!(benches);
