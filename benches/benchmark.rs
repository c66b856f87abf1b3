//! Benchmarks for card_validator performance testing.
//!
//! Run with: cargo bench

use card_validator::enrich::{EnrichmentResult, MemoryBinLookup};
use card_validator::{
    classify, luhn, luhn_check, mask_for_logging, sanitize, validate_simple, Validator,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test card numbers
const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111-1111-1111-1111";
const MASTERCARD: &str = "5555555555554444";
const AMEX: &str = "378282246310005";

const VISA_DIGITS: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

/// Benchmark each pipeline stage on its own
fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    group.bench_function("sanitize_raw", |b| b.iter(|| sanitize(black_box(VISA_16))));

    group.bench_function("sanitize_formatted", |b| {
        b.iter(|| sanitize(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("classify", |b| b.iter(|| classify(black_box(MASTERCARD))));

    group.bench_function("mask", |b| b.iter(|| mask_for_logging(black_box(VISA_16))));

    group.finish();
}

/// Benchmark Luhn algorithm specifically
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("str_16", |b| b.iter(|| luhn_check(black_box(VISA_16))));

    group.bench_function("str_15", |b| b.iter(|| luhn_check(black_box(AMEX))));

    group.bench_function("digits_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("check_digit", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Benchmark full offline validation
fn bench_validate_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_simple");

    for (name, card) in [
        ("visa_16_raw", VISA_16),
        ("visa_16_formatted", VISA_16_FORMATTED),
        ("mastercard", MASTERCARD),
        ("amex_15", AMEX),
    ] {
        group.bench_function(name, |b| b.iter(|| validate_simple(black_box(card))));
    }

    group.finish();
}

/// Benchmark mixed inputs, one third of them invalid
fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");

    for size in [100usize, 1000] {
        let cards: Vec<&str> = (0..size)
            .map(|i| match i % 3 {
                0 => VISA_16,
                1 => AMEX,
                _ => "4111111111111112",
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("validate_simple", size), &cards, |b, cards| {
            b.iter(|| {
                cards
                    .iter()
                    .filter(|c| validate_simple(c).map(|r| r.valid).unwrap_or(false))
                    .count()
            })
        });
    }

    group.finish();
}

/// Benchmark orchestration with an in-memory BIN table
fn bench_enriched(c: &mut Criterion) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(_) => return,
    };

    let table = MemoryBinLookup::builder()
        .add(
            "411111",
            EnrichmentResult {
                scheme: "visa".into(),
                ..Default::default()
            },
        )
        .build();
    let validator = Validator::with_lookup(Default::default(), std::sync::Arc::new(table));

    c.bench_function("validate_card_memory_lookup", |b| {
        b.iter(|| runtime.block_on(validator.validate_card(black_box(VISA_16))))
    });
}

criterion_group!(
    benches,
    bench_stages,
    bench_luhn,
    bench_validate_simple,
    bench_mixed,
    bench_enriched,
);

criterion_main!(benches);
