//! Benchmarks for card validation and batch checks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datacap_card::{check_numbers, detect_brand, format_input, luhn_check_digit, mask_number, validate};

fn create_numbers(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // 15-digit Visa payload plus its check digit
            let payload = format!("4{:014}", i);
            let check = luhn_check_digit(&payload).unwrap_or(0);
            format!("{payload}{check}")
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");

    group.bench_function("validate", |b| {
        b.iter(|| validate(black_box("4111 1111 1111 1111")))
    });

    group.bench_function("detect_brand", |b| {
        b.iter(|| detect_brand(black_box("2720991234567890")))
    });

    group.bench_function("mask_number", |b| {
        b.iter(|| mask_number(black_box("378282246310005")))
    });

    group.bench_function("format_input", |b| {
        b.iter(|| format_input(black_box("37828224631")))
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_numbers");

    for size in [10, 100, 1000, 10000].iter() {
        let numbers = create_numbers(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| check_numbers(black_box(&numbers)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
