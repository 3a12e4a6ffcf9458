//! Benchmark for PersistentLinkedList vs standard VecDeque.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use retrace::persistent::PersistentLinkedList;
use std::collections::VecDeque;
use std::hint::black_box;

// =============================================================================
// push_back / push_front Benchmark
// =============================================================================

fn benchmark_push_both_ends(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_both_ends");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentLinkedList", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut list = PersistentLinkedList::new();
                    for index in 0..size {
                        if index % 2 == 0 {
                            list.push_back(black_box(index)).unwrap();
                        } else {
                            list.push_front(black_box(index)).unwrap();
                        }
                    }
                    black_box(list)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut deque = VecDeque::new();
                for index in 0..size {
                    if index % 2 == 0 {
                        deque.push_back(black_box(index));
                    } else {
                        deque.push_front(black_box(index));
                    }
                }
                black_box(deque)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Churn Benchmark (remove then re-insert, building tombstones)
// =============================================================================

fn benchmark_churn(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("churn");

    for size in [100_usize, 1000] {
        group.bench_with_input(
            BenchmarkId::new("PersistentLinkedList", size),
            &size,
            |bencher, &size| {
                let list: PersistentLinkedList<usize> = (0..size).collect();
                bencher.iter(|| {
                    let mut list = list.clone();
                    for _ in 0..100 {
                        let value = list.pop_front().unwrap_or_default();
                        list.push_back(black_box(value)).unwrap();
                    }
                    black_box(list.tombstones())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// iter Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in [100_usize, 1000, 10000] {
        let list: PersistentLinkedList<usize> = (0..size).collect();
        group.bench_with_input(
            BenchmarkId::new("PersistentLinkedList", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(list.iter().sum::<usize>()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_push_both_ends, benchmark_churn, benchmark_iter);
criterion_main!(benches);
