//! End-to-end run benchmarks over the reference fluorescence profile.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use xray_bench::{reference_manager, reference_source};
use xray_hist::CsvWriter;

const EVENTS: u64 = 10_000;

fn bench_run_sequential(c: &mut Criterion) {
    let source = reference_source(42).unwrap();
    let mut manager = reference_manager(1).unwrap();
    c.bench_function("run_sequential_10k", |b| {
        b.iter(|| {
            let mut sink = CsvWriter::new(std::io::sink());
            black_box(manager.run_sequential(&source, EVENTS, &mut sink).unwrap());
        });
    });
}

fn bench_run_4_workers(c: &mut Criterion) {
    let source = reference_source(42).unwrap();
    let mut manager = reference_manager(4).unwrap();
    c.bench_function("run_4_workers_10k", |b| {
        b.iter(|| {
            let mut sink = CsvWriter::new(std::io::sink());
            black_box(manager.run(&source, EVENTS, &mut sink).unwrap());
        });
    });
}

criterion_group!(benches, bench_run_sequential, bench_run_4_workers);
criterion_main!(benches);
