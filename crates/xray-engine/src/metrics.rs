//! Per-run performance and tally metrics.
//!
//! [`WorkerMetrics`] is filled by each worker at the end of its share of
//! the run; [`RunMetrics`] collects them in worker order along with the
//! coordinator's own timings. All durations are in microseconds.

use xray_core::WorkerId;
use xray_scoring::ScoringTally;

/// What one worker did during a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkerMetrics {
    /// The worker.
    pub worker: WorkerId,
    /// Scoring counters.
    pub tally: ScoringTally,
    /// Wall-clock time from begin-of-run to end-of-run, in microseconds.
    pub elapsed_us: u64,
}

/// Metrics for a whole run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// One entry per worker, sorted by worker id.
    pub workers: Vec<WorkerMetrics>,
    /// Time spent merging worker histograms, in microseconds.
    pub merge_us: u64,
    /// Time spent persisting the merged set, in microseconds.
    pub persist_us: u64,
    /// Wall-clock time for the entire run, in microseconds.
    pub total_us: u64,
}

impl RunMetrics {
    /// Counters summed over all workers.
    pub fn totals(&self) -> ScoringTally {
        self.workers
            .iter()
            .fold(ScoringTally::default(), |mut acc, w| {
                acc.events += w.tally.events;
                acc.steps += w.tally.steps;
                acc.detector_steps += w.tally.detector_steps;
                acc.primary_hits += w.tally.primary_hits;
                acc.fluorescence_hits += w.tally.fluorescence_hits;
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert!(m.workers.is_empty());
        assert_eq!(m.merge_us, 0);
        assert_eq!(m.persist_us, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.totals(), ScoringTally::default());
    }

    #[test]
    fn totals_sum_workers() {
        let w = |id, events| WorkerMetrics {
            worker: WorkerId(id),
            tally: ScoringTally {
                events,
                steps: events * 3,
                detector_steps: 1,
                primary_hits: 1,
                fluorescence_hits: 0,
            },
            elapsed_us: 10,
        };
        let m = RunMetrics {
            workers: vec![w(0, 4), w(1, 6)],
            ..RunMetrics::default()
        };
        let t = m.totals();
        assert_eq!(t.events, 10);
        assert_eq!(t.steps, 30);
        assert_eq!(t.detector_steps, 2);
    }
}
