use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weft_core::{forall, Atomic, Domain, MemoryOrder, Range};

fn benchmark_index_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_order");

    for side in [16_i64, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &n| {
            let d = Domain::new([Range::new(1, n), Range::new(1, n)]);
            let indices: Vec<_> = d.iter().collect();
            b.iter(|| {
                let mut total = 0_i64;
                for idx in &indices {
                    total += d.index_order(*idx);
                }
                black_box(total);
            });
        });
    }

    group.finish();
}

fn benchmark_order_to_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_to_index");

    for side in [16_i64, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &n| {
            let d = Domain::new([Range::new(1, n), Range::new(1, n)]);
            let size = d.size();
            b.iter(|| {
                let mut total = 0_i64;
                for order in 0..size {
                    total += d.order_to_index(order)[0];
                }
                black_box(total);
            });
        });
    }

    group.finish();
}

fn benchmark_forall_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("forall_sum");

    for side in [64_i64, 256, 1_024].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &n| {
            let d = Domain::new([Range::new(1, n), Range::new(1, n)]);
            b.iter(|| {
                let total = Atomic::new(0_i64);
                forall(&d, |idx| {
                    total.add(idx[0] + idx[1], MemoryOrder::Relaxed);
                });
                black_box(total.read(MemoryOrder::Relaxed));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_index_order,
    benchmark_order_to_index,
    benchmark_forall_sum
);
criterion_main!(benches);
