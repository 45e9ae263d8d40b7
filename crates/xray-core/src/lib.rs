//! Core types and traits for X-ray detector scoring.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: volume and run
//! identifiers, energy and length units, the per-step view handed over
//! by the transport engine, lifecycle errors, and the geometry lookup
//! trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod step;
pub mod traits;
pub mod units;

pub use error::LifecycleError;
pub use id::{EventId, RunId, VolumeHandle, WorkerId};
pub use step::{StepPoint, StepRecord, PHOTOELECTRIC_PROCESS};
pub use traits::VolumeLookup;
