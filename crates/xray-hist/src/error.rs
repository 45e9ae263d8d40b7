//! Histogram and persistence errors.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from histogram booking, filling, and merging.
#[derive(Clone, Debug, PartialEq)]
pub enum HistError {
    /// Bin count is zero or the range is empty / non-finite.
    InvalidBinning {
        /// Histogram being booked.
        name: String,
        /// Description of the problem.
        reason: String,
    },
    /// A histogram with this name is already booked in the set.
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
    /// No histogram with this name exists in the set.
    UnknownHistogram {
        /// The requested name.
        name: String,
    },
    /// Two histograms (or sets) cannot be merged because their binning
    /// or membership differs.
    Incompatible {
        /// Name of the first histogram that disagrees.
        name: String,
        /// Description of the mismatch.
        reason: String,
    },
}

impl fmt::Display for HistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBinning { name, reason } => {
                write!(f, "invalid binning for '{name}': {reason}")
            }
            Self::DuplicateName { name } => write!(f, "histogram '{name}' already booked"),
            Self::UnknownHistogram { name } => write!(f, "unknown histogram '{name}'"),
            Self::Incompatible { name, reason } => {
                write!(f, "cannot merge '{name}': {reason}")
            }
        }
    }
}

impl Error for HistError {}

/// Errors from writing a histogram set to storage.
#[derive(Debug)]
pub enum PersistError {
    /// An I/O error occurred while writing.
    Io(io::Error),
    /// The file stem is empty or contains a path separator.
    InvalidStem {
        /// The rejected stem.
        stem: String,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidStem { stem } => write!(f, "invalid file stem '{stem}'"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
