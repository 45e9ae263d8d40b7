//! Engine callback interface and the composed per-worker scoring action.
//!
//! The transport engine drives scoring through [`ScoringHooks`]:
//!
//! ```text
//! on_begin_run
//!   (on_begin_event  on_step*  on_end_event)*
//! on_end_run
//! ```
//!
//! [`WorkerScoring`] wires the classifier, the event accumulator and the
//! run aggregator together behind that interface. One instance lives on
//! each worker and is never shared.

use log::debug;
use xray_core::{EventId, LifecycleError, RunId, StepPoint};

use crate::classifier::StepClassifier;
use crate::error::ScoringError;
use crate::event::{EventAccumulator, EventRecord};
use crate::run::{ExecutionRole, HistogramSpecs, RunAggregator, RunOutcome};

/// Callbacks the transport engine delivers to a scoring action.
///
/// `on_begin_event` and `on_step` sit on the hot path and cannot fail.
/// Run transitions and `on_end_event` report out-of-order calls.
pub trait ScoringHooks: Send {
    /// A run starts: book fresh histograms.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::RunAlreadyActive`] if the previous run was not
    /// ended, or a histogram booking error.
    fn on_begin_run(&mut self, run: RunId) -> Result<(), ScoringError>;

    /// An event starts: reset per-event state.
    fn on_begin_event(&mut self, event: EventId);

    /// One transport step of the current event.
    fn on_step(&mut self, step: &StepPoint<'_>);

    /// The current event ends: fold it into the run.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::RunNotActive`] or [`LifecycleError::EventNotOpen`].
    fn on_end_event(&mut self) -> Result<EventRecord, ScoringError>;

    /// The run ends: report and hand the histograms over.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::RunNotActive`] or [`LifecycleError::EventStillOpen`].
    fn on_end_run(&mut self) -> Result<RunOutcome, ScoringError>;
}

/// Counters kept by a [`WorkerScoring`] over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoringTally {
    /// Events closed.
    pub events: u64,
    /// Steps seen, scored or not.
    pub steps: u64,
    /// Steps that ended in the sensitive volume.
    pub detector_steps: u64,
    /// Events whose primary field was set.
    pub primary_hits: u64,
    /// Events whose fluorescence field was set.
    pub fluorescence_hits: u64,
}

/// Classifier + accumulator + aggregator for one worker.
#[derive(Debug)]
pub struct WorkerScoring {
    role: ExecutionRole,
    classifier: StepClassifier,
    specs: HistogramSpecs,
    event: EventAccumulator,
    run: Option<RunAggregator>,
    run_id: Option<RunId>,
    open_event: Option<EventId>,
    tally: ScoringTally,
}

impl WorkerScoring {
    /// New scoring action. No run is active until
    /// [`on_begin_run`](ScoringHooks::on_begin_run).
    pub fn new(role: ExecutionRole, classifier: StepClassifier, specs: HistogramSpecs) -> Self {
        Self {
            role,
            classifier,
            specs,
            event: EventAccumulator::new(),
            run: None,
            run_id: None,
            open_event: None,
            tally: ScoringTally::default(),
        }
    }

    /// Role this action reports for.
    pub fn role(&self) -> ExecutionRole {
        self.role
    }

    /// Counters for the current (or last) run.
    pub fn tally(&self) -> ScoringTally {
        self.tally
    }

    /// Whether a run is active.
    pub fn run_active(&self) -> bool {
        self.run.is_some()
    }

    /// State of the event in flight.
    pub fn current_event(&self) -> &EventRecord {
        self.event.current()
    }
}

impl ScoringHooks for WorkerScoring {
    fn on_begin_run(&mut self, run: RunId) -> Result<(), ScoringError> {
        if self.run.is_some() {
            return Err(LifecycleError::RunAlreadyActive.into());
        }
        self.run = Some(RunAggregator::begin_run(&self.specs)?);
        self.run_id = Some(run);
        self.tally = ScoringTally::default();
        debug!("{:?}: begin run {run}", self.role);
        Ok(())
    }

    fn on_begin_event(&mut self, event: EventId) {
        self.event.begin_event();
        self.open_event = Some(event);
    }

    #[inline]
    fn on_step(&mut self, step: &StepPoint<'_>) {
        if self.open_event.is_none() {
            return;
        }
        self.tally.steps += 1;
        if let Some(obs) = self.classifier.classify(step) {
            self.tally.detector_steps += 1;
            self.event.record(&obs);
        }
    }

    fn on_end_event(&mut self) -> Result<EventRecord, ScoringError> {
        // The event is closed even when the call is rejected.
        let open = self.open_event.take();
        let run = self.run.as_mut().ok_or(LifecycleError::RunNotActive)?;
        if open.is_none() {
            return Err(LifecycleError::EventNotOpen.into());
        }
        let record = self.event.end_event(run);
        self.tally.events += 1;
        self.tally.primary_hits += u64::from(record.has_primary());
        self.tally.fluorescence_hits += u64::from(record.has_fluorescence());
        Ok(record)
    }

    fn on_end_run(&mut self) -> Result<RunOutcome, ScoringError> {
        if self.open_event.is_some() {
            return Err(LifecycleError::EventStillOpen.into());
        }
        let run = self.run.take().ok_or(LifecycleError::RunNotActive)?;
        if let Some(id) = self.run_id.take() {
            debug!(
                "{:?}: end run {id} after {} events ({} detector steps)",
                self.role, self.tally.events, self.tally.detector_steps
            );
        }
        Ok(run.end_run(self.role))
    }
}
