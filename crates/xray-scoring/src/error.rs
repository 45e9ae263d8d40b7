//! Scoring-layer errors.

use std::error::Error;
use std::fmt;

use xray_core::LifecycleError;
use xray_hist::HistError;

/// Errors surfaced by scoring setup and lifecycle transitions.
///
/// Scoring misses and empty-run reports are normal outcomes and never
/// appear here.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoringError {
    /// The sensitive volume could not be resolved by name. Fatal:
    /// without it nothing can be scored.
    MissingVolume {
        /// The requested volume name.
        name: String,
    },
    /// A callback arrived out of order.
    Lifecycle(LifecycleError),
    /// Histogram booking or merging failed.
    Histogram(HistError),
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVolume { name } => {
                write!(f, "sensitive volume '{name}' not found in geometry")
            }
            Self::Lifecycle(e) => write!(f, "lifecycle: {e}"),
            Self::Histogram(e) => write!(f, "histogram: {e}"),
        }
    }
}

impl Error for ScoringError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lifecycle(e) => Some(e),
            Self::Histogram(e) => Some(e),
            Self::MissingVolume { .. } => None,
        }
    }
}

impl From<LifecycleError> for ScoringError {
    fn from(e: LifecycleError) -> Self {
        Self::Lifecycle(e)
    }
}

impl From<HistError> for ScoringError {
    fn from(e: HistError) -> Self {
        Self::Histogram(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_chains_to_inner_error() {
        let e: ScoringError = LifecycleError::RunNotActive.into();
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "lifecycle: no run is active");

        let missing = ScoringError::MissingVolume {
            name: "Detector".into(),
        };
        assert!(missing.source().is_none());
        assert!(missing.to_string().contains("Detector"));
    }
}
