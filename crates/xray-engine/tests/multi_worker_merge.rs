//! Multi-worker runs against a sequential baseline.

use std::fs;

use proptest::prelude::*;
use xray_core::{EventId, StepRecord};
use xray_engine::{
    EngineError, EventHistory, EventSource, FluorescenceConfig, FluorescenceSource, RunConfig,
    RunManager, ScriptedSource,
};
use xray_geometry::{Geometry, GeometryConfig};
use xray_hist::CsvDirectory;
use xray_scoring::ExecutionRole;
use xray_test_utils::fixtures;
use xray_test_utils::MemoryPersist;

const EVENTS: u64 = 20_000;

fn geometry() -> Geometry {
    Geometry::construct(&GeometryConfig::default()).unwrap()
}

fn source(seed: u64) -> FluorescenceSource {
    FluorescenceSource::new(
        geometry(),
        FluorescenceConfig {
            seed,
            ..FluorescenceConfig::default()
        },
    )
    .unwrap()
}

fn manager(workers: usize) -> RunManager {
    let config = RunConfig {
        worker_count: Some(workers),
        ..RunConfig::default()
    };
    RunManager::new(config, &geometry()).unwrap()
}

#[test]
fn parallel_merge_matches_sequential_fold() {
    let src = source(42);
    let mut sink = MemoryPersist::new();
    let seq = manager(1).run_sequential(&src, EVENTS, &mut sink).unwrap();
    let par = manager(4).run(&src, EVENTS, &mut sink).unwrap();

    assert_eq!(seq.outcome.events, EVENTS);
    assert_eq!(par.outcome.events, EVENTS);
    for (p, s) in par
        .outcome
        .histograms
        .iter()
        .zip(seq.outcome.histograms.iter())
    {
        assert_eq!(p.name(), s.name());
        assert_eq!(p.counts(), s.counts());
        assert_eq!(p.entries(), EVENTS);
        assert!((p.mean() - s.mean()).abs() < 1e-9);
        assert!((p.rms() - s.rms()).abs() < 1e-9);
    }
    assert_eq!(par.metrics.totals(), seq.metrics.totals());
    assert!(par.metrics.totals().fluorescence_hits > 0);

    let report = par.outcome.report.unwrap();
    assert_eq!(report.role, ExecutionRole::Global);
    assert_eq!(sink.saved.len(), 2);
    assert!(sink.saved.iter().all(|(stem, _)| stem == "XRay"));
}

#[test]
fn merge_is_deterministic_across_runs() {
    let src = source(9);
    let mut sink = MemoryPersist::new();
    let mut m = manager(8);
    let a = m.run(&src, 5_000, &mut sink).unwrap();
    let b = m.run(&src, 5_000, &mut sink).unwrap();
    assert_eq!(a.outcome.histograms, b.outcome.histograms);
    let ids: Vec<_> = a.metrics.workers.iter().map(|w| w.worker.0).collect();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
}

#[test]
fn empty_run_persists_zero_samples() {
    let mut sink = MemoryPersist::new();
    let summary = manager(3)
        .run(&ScriptedSource::default(), 0, &mut sink)
        .unwrap();
    assert!(summary.outcome.report.is_none());
    let (stem, set) = sink.last().unwrap();
    assert_eq!(stem, "XRay");
    assert_eq!(set.len(), 2);
    assert!(!set.has_samples());
}

#[test]
fn scripted_scenarios_end_to_end() {
    let src = ScriptedSource::new([
        vec![fixtures::fluorescence_step(4.5)],
        fixtures::compton_then_primary(),
        vec![fixtures::detector_step(0.0, None), fixtures::detector_step(3.0, None)],
    ]);
    let mut sink = MemoryPersist::new();
    let summary = manager(2).run(&src, 3, &mut sink).unwrap();
    let edet = summary.outcome.histograms.get("EDet").unwrap();
    let fluo = summary.outcome.histograms.get("EDetFluo").unwrap();
    assert_eq!(edet.entries(), 3);
    assert_eq!(fluo.entries(), 3);
    // EDet: 4.5, 4.5, 3.0. EDetFluo: 4.5, 0.0, 0.0.
    assert_eq!(edet.bin(642).unwrap().entries, 2);
    assert_eq!(edet.bin(428).unwrap().entries, 1);
    assert_eq!(fluo.bin(642).unwrap().entries, 1);
    assert_eq!(fluo.bin(0).unwrap().entries, 2);
}

struct PanickingSource;

impl EventSource for PanickingSource {
    fn name(&self) -> &str {
        "panicking"
    }

    fn generate(&self, event: EventId, out: &mut EventHistory) {
        if event.0 == 5 {
            panic!("generator failure on event 5");
        }
        out.push(StepRecord::escaped(1.0));
    }
}

#[test]
fn worker_panic_surfaces_as_error() {
    let mut sink = MemoryPersist::new();
    let err = manager(2).run(&PanickingSource, 10, &mut sink).unwrap_err();
    match err {
        EngineError::WorkerPanicked { worker } => assert_eq!(worker.0, 1),
        other => panic!("unexpected error: {other}"),
    }
    assert!(sink.saved.is_empty());
}

#[test]
fn csv_directory_receives_merged_histograms() {
    let dir = std::env::temp_dir().join(format!("xray-engine-{}", std::process::id()));
    let mut sink = CsvDirectory::new(&dir);
    manager(2).run(&source(1), 500, &mut sink).unwrap();

    let text = fs::read_to_string(sink.path_for("XRay", "EDet")).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "#class tools::histo::h1d");
    assert_eq!(lines[1], "#title Photon Energy Incident on the Detector");
    assert_eq!(lines[3], "#axis fixed 1000 0 7");
    let entries: u64 = lines[7..]
        .iter()
        .map(|l| l.split(',').next().unwrap().parse::<u64>().unwrap())
        .sum();
    assert_eq!(entries, 500);
    assert!(sink.path_for("XRay", "EDetFluo").exists());
    fs::remove_dir_all(&dir).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn merge_matches_sequential_for_any_split(
        workers in 1usize..9,
        seed in any::<u64>(),
        events in 0u64..600,
    ) {
        let src = source(seed);
        let mut sink = MemoryPersist::new();
        let seq = manager(1).run_sequential(&src, events, &mut sink).unwrap();
        let par = manager(workers).run(&src, events, &mut sink).unwrap();

        prop_assert_eq!(par.outcome.events, events);
        prop_assert_eq!(par.metrics.workers.len(), workers);
        prop_assert_eq!(par.outcome.report.is_some(), events > 0);
        for (p, s) in par
            .outcome
            .histograms
            .iter()
            .zip(seq.outcome.histograms.iter())
        {
            prop_assert_eq!(p.counts(), s.counts());
            prop_assert_eq!(p.entries(), events);
            prop_assert!((p.mean() - s.mean()).abs() < 1e-9);
            prop_assert!((p.rms() - s.rms()).abs() < 1e-9);
        }
    }
}
