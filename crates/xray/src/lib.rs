//! X-ray detector scoring for Monte-Carlo transport runs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all xray sub-crates. For most users, adding `xray` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use xray::prelude::*;
//!
//! let geometry = Geometry::construct(&GeometryConfig::default()).unwrap();
//! let source = FluorescenceSource::new(geometry.clone(), FluorescenceConfig::default()).unwrap();
//! let config = RunConfig {
//!     worker_count: Some(2),
//!     ..RunConfig::default()
//! };
//! let mut manager = RunManager::new(config, &geometry).unwrap();
//!
//! let mut sink = CsvWriter::new(Vec::new());
//! let summary = manager.run(&source, 1_000, &mut sink).unwrap();
//! assert_eq!(summary.outcome.events, 1_000);
//! assert_eq!(summary.outcome.histograms.get("EDet").unwrap().entries(), 1_000);
//! assert_eq!(sink.sets_written(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `xray-core` | IDs, units, step view, lifecycle errors, volume lookup |
//! | [`geometry`] | `xray-geometry` | Materials, boxes, target/detector construction |
//! | [`hist`] | `xray-hist` | 1-D histograms, sets, merge, CSV persistence |
//! | [`scoring`] | `xray-scoring` | Classifier, event accumulator, run aggregator, hooks |
//! | [`engine`] | `xray-engine` | Event sources and the multi-worker run manager |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, units and traits (`xray-core`).
///
/// Contains the identifiers, the [`types::StepPoint`] view of a step and
/// the [`types::VolumeLookup`] trait.
pub use xray_core as types;

/// Detector geometry (`xray-geometry`).
///
/// [`geometry::Geometry::construct`] builds the world, target and
/// detector from a [`geometry::GeometryConfig`].
pub use xray_geometry as geometry;

/// Histograms and persistence (`xray-hist`).
pub use xray_hist as hist;

/// Per-step, per-event and per-run scoring (`xray-scoring`).
///
/// [`scoring::ScoringHooks`] is the callback interface a transport engine
/// drives; [`scoring::WorkerScoring`] implements it.
pub use xray_scoring as scoring;

/// Event sources and run orchestration (`xray-engine`).
pub use xray_engine as engine;

/// Common imports for typical xray usage.
///
/// ```rust
/// use xray::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use xray_core::{
        EventId, LifecycleError, RunId, StepPoint, StepRecord, VolumeHandle, VolumeLookup,
        WorkerId, PHOTOELECTRIC_PROCESS,
    };

    // Geometry
    pub use xray_geometry::{Geometry, GeometryConfig, GeometryError};

    // Histograms
    pub use xray_hist::{CsvDirectory, CsvWriter, H1Spec, HistogramSet, Persist, PersistError, H1};

    // Scoring
    pub use xray_scoring::{
        EventRecord, ExecutionRole, HistogramSpecs, RunOutcome, RunReport, ScoringError,
        ScoringHooks, StepClassifier, WorkerScoring,
    };

    // Engine
    pub use xray_engine::{
        EngineError, EventSource, FluorescenceConfig, FluorescenceSource, RunConfig, RunManager,
        RunSummary, ScriptedSource,
    };
}
