//! Criterion micro-benchmarks for the per-step and per-event scoring path.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use xray_core::{EventId, RunId, StepPoint, WorkerId};
use xray_scoring::{
    EventAccumulator, ExecutionRole, HistogramSpecs, RunAggregator, ScoringHooks, StepClassifier,
    WorkerScoring,
};
use xray_test_utils::fixtures::{self, DETECTOR};

fn bench_classify_step(c: &mut Criterion) {
    let classifier = StepClassifier::new(DETECTOR);
    let hit = StepPoint::new(DETECTOR, 4.51, Some("phot"));
    let miss = StepPoint::new(fixtures::WORLD, 6.0, None);
    c.bench_function("classify_step", |b| {
        b.iter(|| {
            black_box(classifier.classify(black_box(&hit)));
            black_box(classifier.classify(black_box(&miss)));
        });
    });
}

fn bench_event_fold(c: &mut Criterion) {
    let mut run = RunAggregator::begin_run(&HistogramSpecs::default()).unwrap();
    let mut acc = EventAccumulator::new();
    let classifier = StepClassifier::new(DETECTOR);
    let steps = fixtures::fluorescence_event(fixtures::TI_K_ALPHA);
    c.bench_function("event_fold", |b| {
        b.iter(|| {
            acc.begin_event();
            for step in &steps {
                if let Some(obs) = classifier.classify(&step.as_point()) {
                    acc.record(&obs);
                }
            }
            black_box(acc.end_event(&mut run));
        });
    });
}

fn bench_worker_1k_events(c: &mut Criterion) {
    let events = fixtures::mixed_events(1000);
    c.bench_function("worker_1k_events", |b| {
        b.iter(|| {
            let mut scoring = WorkerScoring::new(
                ExecutionRole::Worker(WorkerId(0)),
                StepClassifier::new(DETECTOR),
                HistogramSpecs::default(),
            );
            scoring.on_begin_run(RunId(0)).unwrap();
            for (i, steps) in events.iter().enumerate() {
                scoring.on_begin_event(EventId(i as u64));
                for step in steps {
                    scoring.on_step(&step.as_point());
                }
                scoring.on_end_event().unwrap();
            }
            black_box(scoring.on_end_run().unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_classify_step,
    bench_event_fold,
    bench_worker_1k_events
);
criterion_main!(benches);
