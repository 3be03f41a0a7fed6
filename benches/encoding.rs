//! Codec benchmarks for contiguous
//!
//! These benchmarks measure the storage tag varints and the value codec that
//! every append and read of a list goes through.

use std::borrow::Cow;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as hint_black_box;
use contiguous::encoding::varint::{decode_varint, encode_varint};
use contiguous::encoding::StoredValue;

fn bench_varint_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_encode");

    let test_values: Vec<(u64, &str)> = vec![
        (0, "zero"),
        (127, "1_byte_max"),
        (16383, "2_byte_max"),
        (2097151, "3_byte_max"),
        (268435455, "4_byte_max"),
        (u64::MAX, "max_u64"),
    ];

    for (value, name) in test_values {
        group.bench_with_input(BenchmarkId::new("encode", name), &value, |b, &value| {
            let mut buf = [0u8; 9];
            b.iter(|| {
                let len = encode_varint(black_box(value), &mut buf);
                hint_black_box(len)
            });
        });
    }

    group.finish();
}

fn bench_varint_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_decode");

    let test_values: Vec<(u64, &str)> = vec![
        (0, "zero"),
        (127, "1_byte_max"),
        (16383, "2_byte_max"),
        (2097151, "3_byte_max"),
        (268435455, "4_byte_max"),
        (u64::MAX, "max_u64"),
    ];

    for (value, name) in test_values {
        let mut buf = [0u8; 9];
        let len = encode_varint(value, &mut buf);

        group.bench_with_input(BenchmarkId::new("decode", name), &buf[..len], |b, data| {
            b.iter(|| {
                let result = decode_varint(black_box(data));
                hint_black_box(result)
            });
        });
    }

    group.finish();
}

fn sample_values() -> Vec<(StoredValue<'static>, &'static str)> {
    vec![
        (StoredValue::Null, "null"),
        (StoredValue::Integer(1), "int_one"),
        (StoredValue::Integer(42), "int_1_byte"),
        (StoredValue::Integer(-1_000_000), "int_3_byte"),
        (StoredValue::Integer(i64::MIN), "int_8_byte"),
        (StoredValue::Float(1.1), "float"),
        (StoredValue::Double(std::f64::consts::PI), "double"),
        (StoredValue::Text(Cow::Borrowed("Douglas Adams")), "text_short"),
        (
            StoredValue::Text(Cow::Owned("Don't Panic. ".repeat(40))),
            "text_520",
        ),
    ]
}

fn bench_value_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_encode");

    for (value, name) in sample_values() {
        group.bench_with_input(BenchmarkId::new("encode", name), &value, |b, value| {
            let mut buf = vec![0u8; 1024];
            b.iter(|| {
                let len = black_box(value).encode(&mut buf);
                hint_black_box(len)
            });
        });
    }

    group.finish();
}

fn bench_value_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_decode");

    for (value, name) in sample_values() {
        let mut buf = vec![0u8; value.encoded_len()];
        value.encode(&mut buf);

        group.bench_with_input(BenchmarkId::new("decode", name), &buf, |b, data| {
            b.iter(|| {
                let result = StoredValue::decode(black_box(data));
                hint_black_box(result.map(|(_, len)| len))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_varint_encode,
    bench_varint_decode,
    bench_value_encode,
    bench_value_decode
);
criterion_main!(benches);
