//! Engine errors.

use std::error::Error;
use std::fmt;

use xray_core::WorkerId;
use xray_hist::PersistError;
use xray_scoring::ScoringError;

/// Errors from setting up or executing a run.
#[derive(Debug)]
pub enum EngineError {
    /// Run configuration is invalid.
    InvalidConfig {
        /// Which setting was rejected and why.
        reason: String,
    },
    /// Event source parameters are invalid.
    InvalidSource {
        /// Which parameter was rejected and why.
        reason: String,
    },
    /// Scoring setup or a coordinator-side lifecycle call failed.
    Scoring(ScoringError),
    /// A worker's scoring action rejected a callback.
    Worker {
        /// The failing worker.
        worker: WorkerId,
        /// What went wrong.
        source: ScoringError,
    },
    /// A worker thread panicked; its histograms are lost.
    WorkerPanicked {
        /// The worker that panicked.
        worker: WorkerId,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the OS error.
        reason: String,
    },
    /// Persisting the merged histograms failed.
    Persist(PersistError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid run config: {reason}"),
            Self::InvalidSource { reason } => write!(f, "invalid event source: {reason}"),
            Self::Scoring(e) => write!(f, "scoring: {e}"),
            Self::Worker { worker, source } => write!(f, "worker {worker}: {source}"),
            Self::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn worker thread: {reason}")
            }
            Self::Persist(e) => write!(f, "persist: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scoring(e) => Some(e),
            Self::Worker { source, .. } => Some(source),
            Self::Persist(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoringError> for EngineError {
    fn from(e: ScoringError) -> Self {
        Self::Scoring(e)
    }
}

impl From<PersistError> for EngineError {
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}
