//! Benchmark profiles for the xray workspace.
//!
//! - [`reference_geometry`]: the default target/detector setup
//! - [`reference_source`]: seeded fluorescence source over that geometry
//! - [`reference_manager`]: run manager with a fixed worker count

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use xray_engine::{
    EngineError, FluorescenceConfig, FluorescenceSource, RunConfig, RunManager,
};
use xray_geometry::{Geometry, GeometryConfig, GeometryError};

/// The default geometry: 20 cm air world, titanium target, air detector.
pub fn reference_geometry() -> Result<Geometry, GeometryError> {
    Geometry::construct(&GeometryConfig::default())
}

/// Fluorescence source with default physics and the given seed.
pub fn reference_source(seed: u64) -> Result<FluorescenceSource, EngineError> {
    let geometry = reference_geometry().map_err(|e| EngineError::InvalidSource {
        reason: e.to_string(),
    })?;
    FluorescenceSource::new(
        geometry,
        FluorescenceConfig {
            seed,
            ..FluorescenceConfig::default()
        },
    )
}

/// Run manager over [`reference_geometry`] with `workers` threads.
pub fn reference_manager(workers: usize) -> Result<RunManager, EngineError> {
    let geometry = reference_geometry().map_err(|e| EngineError::InvalidConfig {
        reason: e.to_string(),
    })?;
    let config = RunConfig {
        worker_count: Some(workers),
        ..RunConfig::default()
    };
    RunManager::new(config, &geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xray_core::VolumeLookup;

    #[test]
    fn profiles_build() {
        let geo = reference_geometry().unwrap();
        assert!(geo.volume_handle("Detector").is_some());
        reference_source(3).unwrap();
        assert_eq!(reference_manager(2).unwrap().config().resolved_worker_count(), 2);
    }
}
