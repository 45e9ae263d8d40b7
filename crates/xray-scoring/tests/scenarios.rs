//! End-to-end scoring scenarios driven through the callback interface.

use proptest::prelude::*;
use xray_core::{EventId, RunId, StepRecord, WorkerId};
use xray_scoring::{
    ExecutionRole, HistogramSpecs, RunAggregator, RunOutcome, ScoringHooks, StepClassifier,
    WorkerScoring,
};
use xray_test_utils::fixtures::{self, DETECTOR};
use xray_test_utils::MockGeometry;

fn worker(id: u32) -> WorkerScoring {
    let classifier = StepClassifier::resolve(&MockGeometry::standard(), "Detector").unwrap();
    WorkerScoring::new(
        ExecutionRole::Worker(WorkerId(id)),
        classifier,
        HistogramSpecs::default(),
    )
}

fn drive(scoring: &mut WorkerScoring, events: &[Vec<StepRecord>]) -> RunOutcome {
    scoring.on_begin_run(RunId(0)).unwrap();
    for (i, steps) in events.iter().enumerate() {
        scoring.on_begin_event(EventId(i as u64));
        for step in steps {
            scoring.on_step(&step.as_point());
        }
        scoring.on_end_event().unwrap();
    }
    scoring.on_end_run().unwrap()
}

#[test]
fn single_fluorescence_hit() {
    let out = drive(&mut worker(0), &[vec![fixtures::fluorescence_step(4.5)]]);
    for name in ["EDet", "EDetFluo"] {
        let h = out.histograms.get(name).unwrap();
        assert_eq!(h.entries(), 1);
        assert_eq!(h.in_range_entries(), 1);
        let bin = h.slot_of(4.5).unwrap();
        assert_eq!(h.counts().iter().sum::<u64>(), 1);
        assert!(matches!(bin, xray_hist::BinSlot::InRange(642)));
        assert_eq!(h.bin(642).unwrap().entries, 1);
    }
    let report = out.report.unwrap();
    assert_eq!(report.summary("EDet").unwrap().mean, 4.5);
}

#[test]
fn scattered_photon_then_primary() {
    let mut s = worker(0);
    s.on_begin_run(RunId(0)).unwrap();
    s.on_begin_event(EventId(0));
    for step in fixtures::compton_then_primary() {
        s.on_step(&step.as_point());
    }
    let rec = s.on_end_event().unwrap();
    assert_eq!(rec.primary(), 4.5);
    assert_eq!(rec.fluorescence(), 0.0);

    let out = s.on_end_run().unwrap();
    let fluo = out.histograms.get("EDetFluo").unwrap();
    assert_eq!(fluo.entries(), 1);
    assert_eq!(fluo.bin(0).unwrap().entries, 1);
}

#[test]
fn zero_energy_step_leaves_field_unset() {
    let mut s = worker(0);
    s.on_begin_run(RunId(0)).unwrap();
    s.on_begin_event(EventId(0));
    s.on_step(&fixtures::detector_step(0.0, None).as_point());
    assert!(!s.current_event().has_primary());
    s.on_step(&fixtures::detector_step(3.0, None).as_point());
    assert_eq!(s.current_event().primary(), 3.0);
    s.on_end_event().unwrap();
    s.on_end_run().unwrap();
}

#[test]
fn nan_step_does_not_lose_a_sample() {
    let event = vec![
        fixtures::detector_step(f64::NAN, Some("phot")),
        fixtures::fluorescence_step(4.5),
    ];
    let out = drive(&mut worker(0), &[event, fixtures::miss_event(6.0)]);
    assert_eq!(out.events, 2);
    for h in out.histograms.iter() {
        assert_eq!(h.entries(), out.events);
        assert_eq!(h.bin(642).unwrap().entries, 1);
    }
}

#[test]
fn empty_run_skips_report() {
    let out = drive(&mut worker(0), &[]);
    assert!(out.report.is_none());
    assert_eq!(out.events, 0);
    assert!(out.histograms.iter().all(|h| h.entries() == 0));
}

#[test]
fn misses_still_fold_zero_samples() {
    let out = drive(&mut worker(0), &[fixtures::miss_event(6.0)]);
    let h = out.histograms.get("EDet").unwrap();
    assert_eq!(h.entries(), 1);
    assert_eq!(h.bin(0).unwrap().entries, 1);
    assert!(out.report.is_some());
}

#[test]
fn worker_merge_equals_single_worker() {
    let events = fixtures::mixed_events(60);
    let single = drive(&mut worker(0), &events);

    let specs = HistogramSpecs::default();
    let mut global = RunAggregator::begin_run(&specs).unwrap();
    for (i, chunk) in events.chunks(17).enumerate() {
        let out = drive(&mut worker(i as u32), chunk);
        global.absorb(&out).unwrap();
    }
    let merged = global.end_run(ExecutionRole::Global);
    assert_eq!(merged.events, 60);
    for (m, s) in merged.histograms.iter().zip(single.histograms.iter()) {
        assert_eq!(m.name(), s.name());
        assert_eq!(m.counts(), s.counts());
        assert_eq!(m.entries(), s.entries());
        assert!((m.mean() - s.mean()).abs() < 1e-9);
        assert!((m.rms() - s.rms()).abs() < 1e-9);
    }
    assert_eq!(merged.report.unwrap().role, ExecutionRole::Global);
}

fn arb_step() -> impl Strategy<Value = StepRecord> {
    (0u32..4, 0.0f64..8.0, prop::bool::ANY).prop_map(|(v, e, phot)| {
        let process = if phot { Some("phot") } else { Some("compt") };
        if v == 3 {
            StepRecord::escaped(e)
        } else {
            StepRecord::new(xray_core::VolumeHandle(v), e, process)
        }
    })
}

proptest! {
    #[test]
    fn first_detector_step_wins(steps in prop::collection::vec(arb_step(), 0..12)) {
        let mut s = worker(0);
        s.on_begin_run(RunId(0)).unwrap();
        s.on_begin_event(EventId(0));
        for step in &steps {
            s.on_step(&step.as_point());
        }
        let rec = s.on_end_event().unwrap();

        let on_det = steps
            .iter()
            .filter(|r| r.post_volume == Some(DETECTOR) && r.total_energy != 0.0);
        let expected_primary = on_det.clone().next().map_or(0.0, |r| r.total_energy);
        let expected_fluo = on_det
            .filter(|r| r.creator_process == Some("phot"))
            .map(|r| r.total_energy)
            .next()
            .unwrap_or(0.0);
        prop_assert_eq!(rec.primary(), expected_primary);
        prop_assert_eq!(rec.fluorescence(), expected_fluo);
    }

    #[test]
    fn n_events_give_n_samples(n in 0usize..40) {
        let out = drive(&mut worker(0), &fixtures::mixed_events(n));
        for h in out.histograms.iter() {
            prop_assert_eq!(h.entries(), n as u64);
        }
        prop_assert_eq!(out.report.is_some(), n > 0);
    }
}
