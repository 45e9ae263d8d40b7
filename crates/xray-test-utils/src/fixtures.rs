//! Reusable step and event fixtures.
//!
//! Handles follow the standard placement order: world, target, detector.

use xray_core::units::KEV;
use xray_core::{StepRecord, VolumeHandle, PHOTOELECTRIC_PROCESS};

pub const WORLD: VolumeHandle = VolumeHandle(0);
pub const TARGET: VolumeHandle = VolumeHandle(1);
pub const DETECTOR: VolumeHandle = VolumeHandle(2);

/// Titanium K-alpha line.
pub const TI_K_ALPHA: f64 = 4.51 * KEV;

/// Step into the detector.
pub fn detector_step(energy: f64, process: Option<&'static str>) -> StepRecord {
    StepRecord::new(DETECTOR, energy, process)
}

/// Step into the detector by a fluorescence photon.
pub fn fluorescence_step(energy: f64) -> StepRecord {
    detector_step(energy, Some(PHOTOELECTRIC_PROCESS))
}

/// Step through the world, away from the detector.
pub fn world_step(energy: f64) -> StepRecord {
    StepRecord::new(WORLD, energy, None)
}

/// One fluorescence photon hitting the detector.
pub fn fluorescence_event(energy: f64) -> Vec<StepRecord> {
    vec![
        StepRecord::new(TARGET, energy, Some(PHOTOELECTRIC_PROCESS)),
        world_step(energy),
        fluorescence_step(energy),
        StepRecord::escaped(energy),
    ]
}

/// A scattered photon at 4.5 then a primary at 6.0 keV, both on the detector.
pub fn compton_then_primary() -> Vec<StepRecord> {
    vec![
        detector_step(4.5 * KEV, Some("compt")),
        detector_step(6.0 * KEV, None),
    ]
}

/// Photon that never reaches the detector.
pub fn miss_event(energy: f64) -> Vec<StepRecord> {
    vec![world_step(energy), StepRecord::escaped(energy)]
}

/// A deterministic mixed batch of `n` events.
pub fn mixed_events(n: usize) -> Vec<Vec<StepRecord>> {
    (0..n)
        .map(|i| match i % 3 {
            0 => fluorescence_event(TI_K_ALPHA),
            1 => vec![detector_step((1.0 + i as f64 * 0.01) * KEV, None)],
            _ => miss_event(6.0 * KEV),
        })
        .collect()
}
