//! Detector geometry for X-ray scoring.
//!
//! Builds the static volume hierarchy the scoring layer scores against:
//! a world box holding a fluorescence target and a thin detector plane.
//! Materials come from a small NIST subset ([`MaterialTable`]); volumes
//! are axis-aligned boxes ([`BoxShape`]) checked for overlaps at
//! placement.
//!
//! The only thing the scoring layer needs from here is named-volume
//! lookup, exposed through [`xray_core::VolumeLookup`]. [`Geometry::locate`]
//! is used by event sources to find the volume a step ends in.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod material;
pub mod shape;

pub use config::{GeometryConfig, DETECTOR, TARGET, WORLD};
pub use error::GeometryError;
pub use geometry::{Geometry, GeometryBuilder, PlacedVolume};
pub use material::{Material, MaterialState, MaterialTable};
pub use shape::{BoxShape, Point3};
