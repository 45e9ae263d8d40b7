//! Geometry construction errors.
//!
//! All of these are fatal configuration errors: a geometry that fails
//! to build makes scoring meaningless, so construction aborts instead of
//! attempting recovery.

use std::error::Error;
use std::fmt;

/// Errors arising from material resolution or volume placement.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A material name is not in the material database.
    MaterialNotFound {
        /// The requested material name.
        name: String,
    },
    /// A volume name is already in use.
    DuplicateVolume {
        /// The conflicting name.
        name: String,
    },
    /// A placement refers to a mother volume that does not exist.
    UnknownMother {
        /// The missing mother name.
        name: String,
    },
    /// A dimension is non-finite or not strictly positive.
    InvalidDimension {
        /// Volume being constructed.
        volume: String,
        /// Description of the offending dimension.
        reason: String,
    },
    /// Overlap check failed: the volume protrudes from its mother or
    /// intersects a sibling.
    Overlap {
        /// Volume being placed.
        volume: String,
        /// Mother or sibling it collides with.
        other: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaterialNotFound { name } => write!(f, "material '{name}' not found"),
            Self::DuplicateVolume { name } => write!(f, "volume '{name}' already placed"),
            Self::UnknownMother { name } => write!(f, "mother volume '{name}' not found"),
            Self::InvalidDimension { volume, reason } => {
                write!(f, "invalid dimension for '{volume}': {reason}")
            }
            Self::Overlap { volume, other } => {
                write!(f, "volume '{volume}' overlaps '{other}'")
            }
        }
    }
}

impl Error for GeometryError {}
