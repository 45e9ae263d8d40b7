//! Lifecycle errors shared by the scoring and engine crates.
//!
//! The scoring layer is a passive state machine driven by engine
//! callbacks: run → events → steps. Calling a transition out of that
//! order is a driver bug and is reported with one of these variants.

use std::error::Error;
use std::fmt;

/// A callback arrived in a state that does not accept it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    /// `begin_run` while a run is already active. Histogram binning is
    /// fixed for the duration of a run, so a second begin is refused.
    RunAlreadyActive,
    /// An event or end-of-run callback without an active run.
    RunNotActive,
    /// `end_run` while an event is still open.
    EventStillOpen,
    /// `end_event` without a matching `begin_event`.
    EventNotOpen,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunAlreadyActive => write!(f, "a run is already active"),
            Self::RunNotActive => write!(f, "no run is active"),
            Self::EventStillOpen => write!(f, "an event is still open"),
            Self::EventNotOpen => write!(f, "no event is open"),
        }
    }
}

impl Error for LifecycleError {}
