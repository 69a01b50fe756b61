//! Benchmarks for followgraph store operations.
//!
//! These benchmarks measure the performance of:
//! - `common_followees` with a growing number of sources
//! - `common_followees` with growing branch sizes
//! - `ingest_branch` for fresh and already-stored branches

// Benchmark code - performance of the benchmark setup is not critical
#![allow(missing_docs)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]

mod common;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use followgraph::{AccountId, FollowGraphOps, GraphStore, Profile};

use common::{following_range, populate};

/// Intersection over more and more sources, each following 500 accounts.
fn bench_common_followees_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_followees_sources");

    let populated = populate(20, 500, 100);

    for num_sources in &[2usize, 5, 10, 20] {
        let sources = &populated.roots[..*num_sources];

        group.throughput(Throughput::Elements(*num_sources as u64));
        group.bench_with_input(
            BenchmarkId::new("sources", num_sources),
            num_sources,
            |b, _| {
                b.iter(|| {
                    let common = populated
                        .store
                        .common_followees(black_box(sources))
                        .expect("common_followees failed");
                    black_box(common)
                });
            },
        );
    }

    group.finish();
}

/// Intersection of two sources with growing branches.
fn bench_common_followees_branch_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_followees_branch_size");

    for following in &[100i64, 1_000, 5_000] {
        let populated = populate(2, *following, following / 2);

        group.throughput(Throughput::Elements(*following as u64 * 2));
        group.bench_with_input(
            BenchmarkId::new("following", following),
            following,
            |b, _| {
                b.iter(|| {
                    let common = populated
                        .store
                        .common_followees(black_box(&populated.roots))
                        .expect("common_followees failed");
                    black_box(common)
                });
            },
        );

        drop(populated.dir);
    }

    group.finish();
}

/// Branch ingest: first commit versus re-ingesting an identical branch.
fn bench_ingest_branch(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_branch");

    for size in &[100i64, 1_000] {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = GraphStore::open(&dir.path().join("bench.db")).expect("failed to open store");
        store
            .seed_account(&Profile::new(1, "root"))
            .expect("seed failed");
        let branch = following_range(10, *size);

        group.throughput(Throughput::Elements(*size as u64));

        // Fresh: a new root per iteration so every edge is created.
        let mut next_root = 1_000_000_000i64;
        group.bench_with_input(BenchmarkId::new("fresh", size), size, |b, _| {
            b.iter(|| {
                next_root += 1;
                store
                    .seed_account(&Profile::new(next_root, "fresh_root"))
                    .expect("seed failed");
                black_box(
                    store
                        .ingest_branch(AccountId(next_root), &branch)
                        .expect("ingest failed"),
                )
            });
        });

        store
            .ingest_branch(AccountId(1), &branch)
            .expect("ingest failed");
        group.bench_with_input(BenchmarkId::new("repeat", size), size, |b, _| {
            b.iter(|| {
                black_box(
                    store
                        .ingest_branch(AccountId(1), &branch)
                        .expect("ingest failed"),
                )
            });
        });

        drop(dir);
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_common_followees_sources,
    bench_common_followees_branch_size,
    bench_ingest_branch,
);

criterion_main!(benches);
