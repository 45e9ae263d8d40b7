//! Detector scoring for X-ray transport runs.
//!
//! Three stages, one per module:
//!
//! 1. [`classifier`]: decide whether a step ends in the sensitive volume
//!    and whether the particle is of photoelectric origin.
//! 2. [`event`]: keep the first energy seen on the detector per event,
//!    for all photons and for fluorescence photons.
//! 3. [`run`]: fold one sample per event into the `EDet` and `EDetFluo`
//!    histograms, report mean and rms, and hand the set over.
//!
//! [`hooks`] composes the three behind the [`ScoringHooks`] callback
//! trait the transport engine drives. There is no shared state: each
//! worker owns its own [`WorkerScoring`], and the coordinator merges the
//! finished [`RunOutcome`]s after the run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod error;
pub mod event;
pub mod hooks;
pub mod run;

pub use classifier::{StepClassifier, StepObservation};
pub use error::ScoringError;
pub use event::{EventAccumulator, EventRecord};
pub use hooks::{ScoringHooks, ScoringTally, WorkerScoring};
pub use run::{
    ExecutionRole, HistogramSpecs, RunAggregator, RunOutcome, RunReport, FLUORESCENCE_HISTOGRAM,
    PRIMARY_HISTOGRAM,
};
