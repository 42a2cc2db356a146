//! Benchmarks for AdmissionQueue.
//!
//! Run with: `cargo bench --bench queue`

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use queuekit::config::QueueConfig;
use queuekit::engine::queue::AdmissionQueue;
use queuekit::policy::registry::PolicyRegistry;
use queuekit::policy::threshold::ThresholdPolicy;

fn bounded_queue(max_backlog: usize) -> AdmissionQueue<(u64, u64)> {
    let registry = PolicyRegistry::new();
    registry.register("bounded", Arc::new(ThresholdPolicy::new(max_backlog)));
    let config = QueueConfig::try_new("bounded").expect("valid name");
    AdmissionQueue::bind(&registry, config).expect("registered policy")
}

// ============================================================================
// Enqueue + dequeue benchmarks (mixed operations)
// ============================================================================

fn bench_enqueue_dequeue(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission_queue");
    let ops_per_iter = 1024u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));

    group.bench_function("enqueue_dequeue", |b| {
        b.iter_batched(
            || bounded_queue(1_000_000),
            |mut queue| {
                for i in 0..1024u64 {
                    queue.enqueue((std::hint::black_box(i % 64), std::hint::black_box(i % 1500)));
                }
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(queue.dequeue());
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Reshape churn benchmarks (continuous eviction pressure)
// ============================================================================

fn bench_reshape_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission_queue");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("reshape_churn", |b| {
        b.iter_batched(
            || {
                let mut queue = bounded_queue(1024);
                for i in 0..2048u64 {
                    queue.enqueue((i % 64, i % 1500));
                }
                queue
            },
            |mut queue| {
                // Occupancy sits over the bound; every admission evicts.
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(
                        queue.admit((std::hint::black_box(i % 64), std::hint::black_box(i % 1500))),
                    );
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Key-collision benchmarks (deep buckets, linear sibling scans)
// ============================================================================

fn bench_single_key_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission_queue");
    group.throughput(Throughput::Elements(1024));

    group.bench_function("single_key_drain", |b| {
        b.iter_batched(
            || {
                let mut queue = bounded_queue(1_000_000);
                for _ in 0..1024u64 {
                    queue.enqueue((7, 7));
                }
                queue
            },
            |mut queue| {
                while let Ok(Some(packet)) = queue.dequeue() {
                    std::hint::black_box(packet);
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue_dequeue,
    bench_reshape_churn,
    bench_single_key_bucket
);
criterion_main!(benches);
