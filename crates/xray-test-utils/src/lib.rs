//! Test utilities and mock types for xray development.
//!
//! Provides a [`MockGeometry`] for the [`VolumeLookup`] contract, an
//! in-memory [`MemoryPersist`] sink, and step/event [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use xray_core::{VolumeHandle, VolumeLookup};
use xray_hist::{HistogramSet, Persist, PersistError};

/// Name-to-handle lookup without any real geometry behind it.
#[derive(Clone, Debug, Default)]
pub struct MockGeometry {
    volumes: HashMap<String, VolumeHandle>,
}

impl MockGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with_volume(mut self, name: &str, handle: VolumeHandle) -> Self {
        self.volumes.insert(name.to_string(), handle);
        self
    }

    /// World, target and detector at handles 0, 1 and 2.
    pub fn standard() -> Self {
        Self::new()
            .with_volume("World", fixtures::WORLD)
            .with_volume("Target", fixtures::TARGET)
            .with_volume("Detector", fixtures::DETECTOR)
    }
}

impl VolumeLookup for MockGeometry {
    fn volume_handle(&self, name: &str) -> Option<VolumeHandle> {
        self.volumes.get(name).copied()
    }
}

/// Persistence sink that keeps every set it receives.
///
/// Can be told to fail, to exercise error propagation.
#[derive(Debug, Default)]
pub struct MemoryPersist {
    pub saved: Vec<(String, HistogramSet)>,
    fail_with_stem: bool,
}

impl MemoryPersist {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every persist call with an invalid-stem error.
    pub fn failing() -> Self {
        Self {
            saved: Vec::new(),
            fail_with_stem: true,
        }
    }

    /// The most recently saved set, if any.
    pub fn last(&self) -> Option<&(String, HistogramSet)> {
        self.saved.last()
    }
}

impl Persist for MemoryPersist {
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError> {
        if self.fail_with_stem {
            return Err(PersistError::InvalidStem {
                stem: file_stem.to_string(),
            });
        }
        self.saved.push((file_stem.to_string(), set.clone()));
        Ok(())
    }
}
