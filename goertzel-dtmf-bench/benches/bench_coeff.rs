use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use goertzel_dtmf::coeff::{coeff_table, generate_coeff, SAMPLE_RATES};
use std::hint::black_box;

/// Same quantization through `std` cosine, for comparison with `libm`.
fn generate_coeff_std(freq: f64, sample_rate: f64) -> i16 {
    (16383.5 * 2.0 * (2.0 * std::f64::consts::PI * freq / sample_rate).cos()) as i16
}

fn bench_single(c: &mut Criterion) {
    let mut g = c.benchmark_group("generate_coeff");
    g.bench_function("libm", |b| {
        b.iter(|| generate_coeff(black_box(697.0), black_box(8000.0)))
    });
    g.bench_function("std", |b| {
        b.iter(|| generate_coeff_std(black_box(697.0), black_box(8000.0)))
    });
    g.finish();
}

fn bench_table(c: &mut Criterion) {
    let mut g = c.benchmark_group("coeff_table");
    for &rate in &SAMPLE_RATES {
        g.bench_with_input(BenchmarkId::from_parameter(rate), &rate, |b, &fs| {
            b.iter(|| coeff_table(black_box(fs)));
        });
    }
    g.finish();
}

criterion_group!(benches, bench_single, bench_table);
criterion_main!(benches);
