use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bitsieve_core::bitset::bit_field_len;
use bitsieve_core::wide::stride::Int128Stride;
use bitsieve_core::{init, scalar};
use rand::Rng;

const N: usize = 64 * 1024;

fn i64_column() -> Vec<i64> {
    let mut rng = rand::rng();
    (0..N).map(|_| rng.random_range(-1000..1000)).collect()
}

fn bench_i64_equal(c: &mut Criterion) {
    init();
    let src = i64_column();
    let mut bits = vec![0u8; bit_field_len(N)];

    c.bench_function("scalar match_i64_equal 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(scalar::match_i64_equal(
                black_box(&src),
                black_box(42),
                &mut bits,
                None,
            ))
        })
    });

    c.bench_function("dispatched match_i64_equal 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(bitsieve_core::match_i64_equal(
                black_box(&src),
                black_box(42),
                &mut bits,
                None,
            ))
        })
    });
}

fn bench_i64_between(c: &mut Criterion) {
    init();
    let src = i64_column();
    let mut bits = vec![0u8; bit_field_len(N)];

    c.bench_function("scalar match_i64_between 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(scalar::match_i64_between(
                black_box(&src),
                black_box(-100),
                black_box(100),
                &mut bits,
                None,
            ))
        })
    });

    c.bench_function("dispatched match_i64_between 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(bitsieve_core::match_i64_between(
                black_box(&src),
                black_box(-100),
                black_box(100),
                &mut bits,
                None,
            ))
        })
    });
}

fn bench_f64_less(c: &mut Criterion) {
    init();
    let mut rng = rand::rng();
    let src: Vec<f64> = (0..N).map(|_| rng.random_range(-1000..1000) as f64).collect();
    let mut bits = vec![0u8; bit_field_len(N)];

    c.bench_function("dispatched match_f64_less 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(bitsieve_core::match_f64_less(
                black_box(&src),
                black_box(0.0),
                &mut bits,
                None,
            ))
        })
    });
}

fn bench_i128_between(c: &mut Criterion) {
    init();
    let mut rng = rand::rng();
    let values: Vec<i128> = (0..N).map(|_| rng.random_range(-1000..1000) as i128).collect();
    let stride = Int128Stride::from_values(&values);
    let mut bits = vec![0u8; bit_field_len(N)];

    c.bench_function("dispatched match_i128_between 64k", |b| {
        b.iter(|| {
            bits.fill(0);
            black_box(bitsieve_core::match_i128_between(
                black_box(stride.as_ref()),
                black_box(-100),
                black_box(100),
                &mut bits,
                None,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_i64_equal,
    bench_i64_between,
    bench_f64_less,
    bench_i128_between
);
criterion_main!(benches);
