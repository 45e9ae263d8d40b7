//! Run driver for X-ray scoring.
//!
//! Stands in for the transport engine: event histories come from an
//! [`EventSource`] ([`ScriptedSource`] for fixed scripts,
//! [`FluorescenceSource`] for a seeded beam-on-target model), and a
//! [`RunManager`] delivers them as scoring callbacks on one thread per
//! worker, then merges, reports and persists the per-worker histograms.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fluorescence;
pub mod manager;
pub mod metrics;
pub mod source;

pub use config::RunConfig;
pub use error::EngineError;
pub use fluorescence::{FluorescenceConfig, FluorescenceSource, COMPTON_PROCESS};
pub use manager::{RunManager, RunSummary};
pub use metrics::{RunMetrics, WorkerMetrics};
pub use source::{EventHistory, EventSource, ScriptedSource};
