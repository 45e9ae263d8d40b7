//! Run-level aggregation.
//!
//! A [`RunAggregator`] books the two detector histograms at the start of
//! a run, folds one sample per event into each, and at the end of the run
//! produces a [`RunOutcome`]: the histogram set, ready to be merged or
//! persisted, plus a [`RunReport`] unless the run saw no samples at all.
//!
//! Every worker owns one aggregator. The coordinator owns another, empty
//! one and [`absorb`](RunAggregator::absorb)s the worker outcomes into it
//! once all workers have finished.

use std::fmt;

use log::info;
use xray_core::units::{BestUnit, KEV};
use xray_core::WorkerId;
use xray_hist::{H1Summary, HistogramId, HistogramSet, H1Spec};

use crate::error::ScoringError;

/// Name of the all-photon histogram.
pub const PRIMARY_HISTOGRAM: &str = "EDet";
/// Name of the photoelectric-origin histogram.
pub const FLUORESCENCE_HISTOGRAM: &str = "EDetFluo";

/// Booking parameters for the two detector histograms.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramSpecs {
    /// Energy of every photon incident on the detector.
    pub primary: H1Spec,
    /// Energy of photoelectric-origin photons incident on the detector.
    pub fluorescence: H1Spec,
}

impl HistogramSpecs {
    /// Default bin count.
    pub const DEFAULT_BINS: usize = 1000;
    /// Default lower edge.
    pub const DEFAULT_MIN: f64 = 0.0;
    /// Default upper edge (exclusive).
    pub const DEFAULT_MAX: f64 = 7.0 * KEV;

    /// Both specs in booking order.
    pub fn iter(&self) -> impl Iterator<Item = &H1Spec> {
        [&self.primary, &self.fluorescence].into_iter()
    }
}

impl Default for HistogramSpecs {
    fn default() -> Self {
        Self {
            primary: H1Spec::new(
                PRIMARY_HISTOGRAM,
                "Photon Energy Incident on the Detector",
                Self::DEFAULT_BINS,
                Self::DEFAULT_MIN,
                Self::DEFAULT_MAX,
            ),
            fluorescence: H1Spec::new(
                FLUORESCENCE_HISTOGRAM,
                "Photo-Electric Effect Photon Energy Incident on the Detector",
                Self::DEFAULT_BINS,
                Self::DEFAULT_MIN,
                Self::DEFAULT_MAX,
            ),
        }
    }
}

/// Which side of the run an aggregator reports for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionRole {
    /// A worker thread; its report covers only its own events.
    Worker(WorkerId),
    /// The coordinator; its report covers the merged run.
    Global,
}

impl fmt::Display for ExecutionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worker(_) => write!(f, "for the local thread"),
            Self::Global => write!(f, "for the entire run"),
        }
    }
}

/// Mean and rms of each histogram at the end of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Who the report is for.
    pub role: ExecutionRole,
    /// Number of events folded.
    pub events: u64,
    /// One summary per histogram, in booking order.
    pub summaries: Vec<H1Summary>,
}

impl RunReport {
    /// Summary of one histogram by name.
    pub fn summary(&self, name: &str) -> Option<&H1Summary> {
        self.summaries.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ----> print histograms statistic {}", self.role)?;
        for s in &self.summaries {
            writeln!(
                f,
                " {} : mean = {} rms = {}",
                s.name,
                BestUnit::energy(s.mean),
                BestUnit::energy(s.rms)
            )?;
        }
        Ok(())
    }
}

/// What a finished run hands over.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Report, `None` when no histogram received a sample.
    pub report: Option<RunReport>,
    /// The run's histograms, for merging or persistence.
    pub histograms: HistogramSet,
    /// Number of events folded.
    pub events: u64,
}

/// Owns the histogram set of one run on one worker (or the coordinator).
#[derive(Clone, Debug)]
pub struct RunAggregator {
    histograms: HistogramSet,
    primary: HistogramId,
    fluorescence: HistogramId,
    events: u64,
}

impl RunAggregator {
    /// Book both histograms.
    ///
    /// # Errors
    ///
    /// [`ScoringError::Histogram`] if a spec is invalid or both share a
    /// name.
    pub fn begin_run(specs: &HistogramSpecs) -> Result<Self, ScoringError> {
        let mut histograms = HistogramSet::new();
        let primary = histograms.book(specs.primary.clone())?;
        let fluorescence = histograms.book(specs.fluorescence.clone())?;
        Ok(Self {
            histograms,
            primary,
            fluorescence,
            events: 0,
        })
    }

    /// Insert one sample into each histogram.
    #[inline]
    pub fn fold_event(&mut self, primary: f64, fluorescence: f64) {
        // Ids come from our own bookings and are always valid.
        if let Some(h) = self.histograms.by_id_mut(self.primary) {
            h.fill(primary);
        }
        if let Some(h) = self.histograms.by_id_mut(self.fluorescence) {
            h.fill(fluorescence);
        }
        self.events += 1;
    }

    /// Number of events folded so far.
    pub fn events_folded(&self) -> u64 {
        self.events
    }

    /// Current histograms.
    pub fn histograms(&self) -> &HistogramSet {
        &self.histograms
    }

    /// Sum a finished worker run into this one.
    ///
    /// # Errors
    ///
    /// [`ScoringError::Histogram`] if the worker booked different
    /// histograms. `self` is left unchanged in that case.
    pub fn absorb(&mut self, worker: &RunOutcome) -> Result<(), ScoringError> {
        self.histograms.merge(&worker.histograms)?;
        self.events += worker.events;
        Ok(())
    }

    /// Close the run: build the report (skipped when empty), log it, and
    /// hand the histograms over.
    pub fn end_run(self, role: ExecutionRole) -> RunOutcome {
        let report = self.histograms.has_samples().then(|| RunReport {
            role,
            events: self.events,
            summaries: self.histograms.summaries(),
        });
        if let Some(report) = &report {
            info!("{report}");
        }
        RunOutcome {
            report,
            histograms: self.histograms,
            events: self.events,
        }
    }
}
