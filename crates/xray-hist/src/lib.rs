//! Fixed-binning histograms for X-ray scoring.
//!
//! - [`H1`]: a 1-D histogram with under/overflow bins and the weighted
//!   sums needed to recover mean and rms after merging.
//! - [`HistogramSet`]: an ordered set of named histograms, the unit a
//!   worker owns during a run and the coordinator persists after it.
//! - [`Persist`]: hand-over to storage, with CSV sinks
//!   ([`CsvWriter`], [`CsvDirectory`]).
//!
//! Merging is a bin-wise sum and never loses information: merging K
//! per-worker sets yields exactly the set a single worker would have
//! filled with all K sample streams.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod h1;
pub mod persist;
pub mod set;
pub mod spec;

pub use error::{HistError, PersistError};
pub use h1::{BinContent, BinSlot, H1};
pub use persist::{write_h1_csv, CsvDirectory, CsvWriter, Persist};
pub use set::{H1Summary, HistogramId, HistogramSet};
pub use spec::H1Spec;
