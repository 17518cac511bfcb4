//! Throughput benchmarks for the HZR codec.
//!
//! Measures encode, verify and decode over the payload shapes HZR is
//! built for (sparse residuals, long zero runs) plus the worst cases
//! (uniform random, histogram-flat data).

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hzr::{decode, encode, encode_to_vec, max_compressed_size, verify};
use std::hint::black_box;

/// Type alias for pattern generator functions.
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Test data patterns.
mod test_data {
    /// All zeros (fill blocks).
    pub fn zeros(size: usize) -> Vec<u8> {
        vec![0u8; size]
    }

    /// Reproducible random data (worst case for the entropy coder).
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Predictor-residual-like data: mostly zeros, small magnitudes.
    pub fn residuals(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0xFEEDFACE;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let r = (seed >> 32) as u32;
            data.push(if r % 4 == 0 { (r % 8) as u8 } else { 0 });
        }
        data
    }

    /// Low-entropy quantized data.
    pub fn nibbles(size: usize) -> Vec<u8> {
        (0..size).map(|i| (i & 15) as u8).collect()
    }
}

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("zeros", test_data::zeros as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("residuals", test_data::residuals as PatternGenerator),
    ("nibbles", test_data::nibbles as PatternGenerator),
];

const SIZE: usize = 256 * 1024;

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        let mut out = vec![0u8; max_compressed_size(SIZE)];

        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let size = encode(black_box(data), &mut out).unwrap();
                black_box(size);
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        let compressed = encode_to_vec(&data).unwrap();
        let mut out = vec![0u8; SIZE];

        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    decode(black_box(compressed), &mut out).unwrap();
                    black_box(&out);
                });
            },
        );
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        let compressed = encode_to_vec(&data).unwrap();

        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let size = verify(black_box(compressed)).unwrap();
                    black_box(size);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_verify);
criterion_main!(benches);
