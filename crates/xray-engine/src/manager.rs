//! Run orchestration across worker threads.
//!
//! A [`RunManager`] owns everything that is fixed across runs: the
//! configuration and the resolved sensitive-volume handle. Each call to
//! [`run`](RunManager::run) then:
//!
//! 1. spawns one named thread per worker, each with its own
//!    [`WorkerScoring`] and its own histograms;
//! 2. has worker `i` process events `i, i + n, i + 2n, …` strictly in
//!    order, delivering every callback;
//! 3. waits for all workers, then receives their outcomes over a channel;
//! 4. merges them in worker-id order into a coordinator-owned set, logs
//!    the global report, and persists the merged histograms.
//!
//! No state is shared between workers while the run is in progress.

use std::io;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

use log::{debug, info};
use xray_core::{EventId, RunId, VolumeLookup, WorkerId};
use xray_hist::Persist;
use xray_scoring::{
    ExecutionRole, HistogramSpecs, RunAggregator, RunOutcome, ScoringError, ScoringHooks,
    StepClassifier, WorkerScoring,
};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::metrics::{RunMetrics, WorkerMetrics};
use crate::source::{EventHistory, EventSource};

/// What a completed run returns to the caller.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Id of the completed run.
    pub run: RunId,
    /// Merged histograms and the global report.
    pub outcome: RunOutcome,
    /// Timing and tally metrics.
    pub metrics: RunMetrics,
}

type WorkerResult = (WorkerId, Result<(RunOutcome, WorkerMetrics), ScoringError>);

/// Drives runs over an [`EventSource`].
#[derive(Debug)]
pub struct RunManager {
    config: RunConfig,
    classifier: StepClassifier,
    next_run: u32,
}

impl RunManager {
    /// Validate `config` and resolve the sensitive volume in `geometry`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] for a bad config, or
    /// [`EngineError::Scoring`] wrapping
    /// [`ScoringError::MissingVolume`] if the volume does not exist.
    pub fn new(config: RunConfig, geometry: &impl VolumeLookup) -> Result<Self, EngineError> {
        config.validate()?;
        let classifier = StepClassifier::resolve(geometry, &config.sensitive_volume)?;
        debug!(
            "sensitive volume '{}' resolved to handle {}",
            config.sensitive_volume,
            classifier.sensitive_volume()
        );
        Ok(Self {
            config,
            classifier,
            next_run: 0,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of runs started so far.
    pub fn runs_started(&self) -> u32 {
        self.next_run
    }

    fn advance_run(&mut self) -> RunId {
        let run = RunId(self.next_run);
        self.next_run += 1;
        run
    }

    /// Process `events` events on the configured number of worker
    /// threads, merge, report and persist.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ThreadSpawnFailed`] if a worker cannot start.
    /// - [`EngineError::WorkerPanicked`] naming the lowest panicked worker.
    /// - [`EngineError::Worker`] if a worker's scoring action failed.
    /// - [`EngineError::Persist`] if the sink rejects the merged set.
    pub fn run<S, P>(
        &mut self,
        source: &S,
        events: u64,
        sink: &mut P,
    ) -> Result<RunSummary, EngineError>
    where
        S: EventSource + ?Sized,
        P: Persist + ?Sized,
    {
        let started = Instant::now();
        let run = self.advance_run();
        let workers = self.config.resolved_worker_count();
        info!(
            "run {run}: {events} events from '{}' on {workers} workers",
            source.name()
        );

        let (tx, rx) = crossbeam_channel::unbounded::<WorkerResult>();
        let panicked = thread::scope(|scope| {
            join_spawned(workers, |i| {
                let worker = WorkerId(i as u32);
                let tx = tx.clone();
                let classifier = self.classifier;
                let specs = self.config.histograms.clone();
                let share = (i as u64..events).step_by(workers);
                thread::Builder::new()
                    .name(format!("xray-worker-{i}"))
                    .spawn_scoped(scope, move || {
                        let result = run_worker(worker, classifier, specs, source, run, share);
                        // The receiver outlives the scope.
                        let _ = tx.send((worker, result));
                    })
            })
        })?;
        drop(tx);

        if let Some(&worker) = panicked.first() {
            return Err(EngineError::WorkerPanicked { worker });
        }

        let mut results: Vec<WorkerResult> = rx.try_iter().collect();
        results.sort_by_key(|(worker, _)| *worker);

        let merge_started = Instant::now();
        let mut global = RunAggregator::begin_run(&self.config.histograms)?;
        let mut metrics = RunMetrics::default();
        for (worker, result) in results {
            let (outcome, worker_metrics) =
                result.map_err(|source| EngineError::Worker { worker, source })?;
            global.absorb(&outcome)?;
            debug!(
                "run {run}: merged worker {worker} ({} events)",
                outcome.events
            );
            metrics.workers.push(worker_metrics);
        }
        let outcome = global.end_run(ExecutionRole::Global);
        metrics.merge_us = elapsed_us(merge_started);

        self.finish(run, outcome, metrics, sink, started)
    }

    /// Process `events` events on the calling thread with the global
    /// role, then report and persist.
    ///
    /// # Errors
    ///
    /// [`EngineError::Scoring`] or [`EngineError::Persist`].
    pub fn run_sequential<S, P>(
        &mut self,
        source: &S,
        events: u64,
        sink: &mut P,
    ) -> Result<RunSummary, EngineError>
    where
        S: EventSource + ?Sized,
        P: Persist + ?Sized,
    {
        let started = Instant::now();
        let run = self.advance_run();
        info!(
            "run {run}: {events} events from '{}' sequentially",
            source.name()
        );
        let mut scoring = WorkerScoring::new(
            ExecutionRole::Global,
            self.classifier,
            self.config.histograms.clone(),
        );
        let outcome = drive_events(&mut scoring, source, run, 0..events)?;
        let metrics = RunMetrics {
            workers: vec![WorkerMetrics {
                worker: WorkerId(0),
                tally: scoring.tally(),
                elapsed_us: elapsed_us(started),
            }],
            ..RunMetrics::default()
        };
        self.finish(run, outcome, metrics, sink, started)
    }

    fn finish<P: Persist + ?Sized>(
        &self,
        run: RunId,
        outcome: RunOutcome,
        mut metrics: RunMetrics,
        sink: &mut P,
        started: Instant,
    ) -> Result<RunSummary, EngineError> {
        if outcome.report.is_none() {
            debug!("run {run}: no samples, report skipped");
        }
        let persist_started = Instant::now();
        sink.persist(&outcome.histograms, &self.config.file_stem)?;
        metrics.persist_us = elapsed_us(persist_started);
        metrics.total_us = elapsed_us(started);
        info!(
            "run {run}: {} events scored in {} us",
            outcome.events, metrics.total_us
        );
        Ok(RunSummary {
            run,
            outcome,
            metrics,
        })
    }
}

fn elapsed_us(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_micros()).unwrap_or(u64::MAX)
}

/// Spawn `workers` threads through `spawn`, then join every thread that
/// started, returning the ids of those that panicked in ascending order.
///
/// A spawn failure stops spawning but still joins the threads already
/// running before the error is returned.
fn join_spawned<'scope, F>(workers: usize, mut spawn: F) -> Result<Vec<WorkerId>, EngineError>
where
    F: FnMut(usize) -> io::Result<ScopedJoinHandle<'scope, ()>>,
{
    let mut handles = Vec::with_capacity(workers);
    let mut failure = None;
    for i in 0..workers {
        match spawn(i) {
            Ok(handle) => handles.push((WorkerId(i as u32), handle)),
            Err(e) => {
                failure = Some(EngineError::ThreadSpawnFailed {
                    reason: format!("xray-worker-{i}: {e}"),
                });
                break;
            }
        }
    }
    let panicked = handles
        .into_iter()
        .filter_map(|(worker, h)| h.join().is_err().then_some(worker))
        .collect();
    match failure {
        Some(err) => Err(err),
        None => Ok(panicked),
    }
}

fn run_worker<S: EventSource + ?Sized>(
    worker: WorkerId,
    classifier: StepClassifier,
    specs: HistogramSpecs,
    source: &S,
    run: RunId,
    events: impl Iterator<Item = u64>,
) -> Result<(RunOutcome, WorkerMetrics), ScoringError> {
    let started = Instant::now();
    let mut scoring = WorkerScoring::new(ExecutionRole::Worker(worker), classifier, specs);
    let outcome = drive_events(&mut scoring, source, run, events)?;
    let metrics = WorkerMetrics {
        worker,
        tally: scoring.tally(),
        elapsed_us: elapsed_us(started),
    };
    Ok((outcome, metrics))
}

/// Deliver one run's callbacks to `scoring`, event by event.
fn drive_events<S, H>(
    scoring: &mut H,
    source: &S,
    run: RunId,
    events: impl Iterator<Item = u64>,
) -> Result<RunOutcome, ScoringError>
where
    S: EventSource + ?Sized,
    H: ScoringHooks + ?Sized,
{
    scoring.on_begin_run(run)?;
    let mut history = EventHistory::new();
    for id in events {
        let event = EventId(id);
        history.clear();
        source.generate(event, &mut history);
        scoring.on_begin_event(event);
        for step in &history {
            scoring.on_step(&step.as_point());
        }
        scoring.on_end_event()?;
    }
    scoring.on_end_run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use xray_test_utils::fixtures;
    use xray_test_utils::{MemoryPersist, MockGeometry};

    fn manager(workers: usize) -> RunManager {
        let config = RunConfig {
            worker_count: Some(workers),
            ..RunConfig::default()
        };
        RunManager::new(config, &MockGeometry::standard()).unwrap()
    }

    #[test]
    fn missing_volume_is_fatal() {
        let config = RunConfig {
            sensitive_volume: "Gap".into(),
            ..RunConfig::default()
        };
        let err = RunManager::new(config, &MockGeometry::standard()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Scoring(ScoringError::MissingVolume { .. })
        ));
    }

    #[test]
    fn run_ids_advance() {
        let mut m = manager(2);
        let src = ScriptedSource::default();
        let mut sink = MemoryPersist::new();
        assert_eq!(m.run(&src, 0, &mut sink).unwrap().run, RunId(0));
        assert_eq!(m.run_sequential(&src, 0, &mut sink).unwrap().run, RunId(1));
        assert_eq!(m.runs_started(), 2);
    }

    #[test]
    fn more_workers_than_events() {
        let src = ScriptedSource::new([vec![fixtures::fluorescence_step(4.5)]]);
        let mut sink = MemoryPersist::new();
        let summary = manager(4).run(&src, 1, &mut sink).unwrap();
        assert_eq!(summary.outcome.events, 1);
        assert_eq!(summary.metrics.workers.len(), 4);
        assert_eq!(summary.metrics.totals().fluorescence_hits, 1);
        let idle: Vec<_> = summary
            .metrics
            .workers
            .iter()
            .filter(|w| w.tally.events == 0)
            .collect();
        assert_eq!(idle.len(), 3);
    }

    #[test]
    fn spawn_failure_joins_started_workers() {
        let result = thread::scope(|scope| {
            join_spawned(3, |i| {
                if i == 2 {
                    return Err(io::Error::other("no threads left"));
                }
                thread::Builder::new().spawn_scoped(scope, move || {
                    assert_ne!(i, 0, "worker 0 fails");
                })
            })
        });
        match result {
            Err(EngineError::ThreadSpawnFailed { reason }) => {
                assert!(reason.starts_with("xray-worker-2"));
            }
            other => panic!("expected ThreadSpawnFailed, got {other:?}"),
        }
    }

    #[test]
    fn join_reports_panicked_workers_in_order() {
        let panicked = thread::scope(|scope| {
            join_spawned(4, |i| {
                thread::Builder::new().spawn_scoped(scope, move || {
                    assert!(i % 2 == 0, "odd worker fails");
                })
            })
        })
        .unwrap();
        assert_eq!(panicked, vec![WorkerId(1), WorkerId(3)]);
    }

    #[test]
    fn persist_failure_surfaces() {
        let src = ScriptedSource::default();
        let mut sink = MemoryPersist::failing();
        assert!(matches!(
            manager(1).run(&src, 0, &mut sink),
            Err(EngineError::Persist(_))
        ));
    }
}
