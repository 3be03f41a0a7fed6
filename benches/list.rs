//! List benchmarks for contiguous
//!
//! Append, indexed read, flat scan and rendering over lists of a small
//! three-field record, compared where useful against a plain `Vec`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box as hint_black_box;
use contiguous::{BufferPool, ContiguousList, Record, SchemaBuilder};

#[derive(Debug, Default, Clone)]
struct Passenger {
    name: String,
    seat: i32,
    fare: f64,
}

impl Record for Passenger {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("name", |p| &p.name, |p, v| p.name = v)
            .scalar("seat", |p| &p.seat, |p, v| p.seat = v)
            .scalar("fare", |p| &p.fare, |p, v| p.fare = v);
    }
}

fn passengers(count: usize) -> Vec<Passenger> {
    (0..count)
        .map(|i| Passenger {
            name: format!("passenger {}", i),
            seat: i as i32,
            fare: i as f64 * 1.25,
        })
        .collect()
}

fn filled(pool: &BufferPool, records: &[Passenger]) -> ContiguousList<Passenger> {
    let mut list = ContiguousList::with_pool(pool).unwrap();
    list.append_all(records).unwrap();
    list
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    let pool = BufferPool::new();

    for count in [100usize, 10_000] {
        let records = passengers(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("contiguous", count), &records, |b, records| {
            b.iter(|| {
                let list = filled(&pool, black_box(records));
                hint_black_box(list.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_clone", count), &records, |b, records| {
            b.iter(|| {
                let list: Vec<Passenger> = black_box(records).to_vec();
                hint_black_box(list.len())
            });
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let pool = BufferPool::new();
    let list = filled(&pool, &passengers(10_000));

    c.bench_function("get_random", |b| {
        let mut index = 0usize;
        b.iter(|| {
            index = (index + 7919) % 10_000;
            let passenger = list.get(black_box(index)).unwrap();
            hint_black_box(passenger.seat)
        });
    });
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let pool = BufferPool::new();
    let list = filled(&pool, &passengers(10_000));
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("values", |b| {
        b.iter(|| {
            let count = list.values().filter(|value| value.is_ok()).count();
            hint_black_box(count)
        });
    });

    group.bench_function("materialize", |b| {
        b.iter(|| {
            let seats: i64 = list.iter().map(|p| p.unwrap().seat as i64).sum();
            hint_black_box(seats)
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let pool = BufferPool::new();
    let list = filled(&pool, &passengers(1_000));

    c.bench_function("to_json_array_1000", |b| {
        b.iter(|| {
            let json = list.to_json_array().unwrap();
            hint_black_box(json.len())
        });
    });
}

criterion_group!(benches, bench_append, bench_get, bench_scan, bench_render);
criterion_main!(benches);
