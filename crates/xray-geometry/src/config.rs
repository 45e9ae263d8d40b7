//! Geometry parameters.

use xray_core::units::{CM, MM, NM};

use crate::shape::Point3;

/// Name of the world volume.
pub const WORLD: &str = "World";
/// Name of the fluorescence target.
pub const TARGET: &str = "Target";
/// Name of the sensitive detector plane.
pub const DETECTOR: &str = "Detector";

/// Parameters for the target/detector setup.
///
/// The defaults describe a thin titanium foil 3 cm upstream of the
/// origin and a 1 nm air "detector" plane offset 3 cm sideways, inside a
/// 20 cm air cube. The detector is deliberately thin: it registers
/// photons crossing the plane without changing them.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryConfig {
    /// Edge length of the world cube.
    pub world_size: f64,
    /// Transverse (x and y) size of the target.
    pub target_size_xy: f64,
    /// Target thickness along z.
    pub target_thickness: f64,
    /// Centre of the target.
    pub target_position: Point3,
    /// Transverse (x and y) size of the detector.
    pub detector_size_xy: f64,
    /// Detector thickness along z.
    pub detector_thickness: f64,
    /// Centre of the detector.
    pub detector_position: Point3,
    /// Material filling the world.
    pub world_material: String,
    /// Target material.
    pub target_material: String,
    /// Detector material.
    pub detector_material: String,
    /// Run overlap checks while placing volumes.
    pub check_overlaps: bool,
}

impl GeometryConfig {
    /// Default world edge: 20 cm.
    pub const DEFAULT_WORLD_SIZE: f64 = 20.0 * CM;
    /// Default target thickness: 1 µm.
    pub const DEFAULT_TARGET_THICKNESS: f64 = 0.001 * MM;
    /// Default detector thickness: 1 nm.
    pub const DEFAULT_DETECTOR_THICKNESS: f64 = 1.0 * NM;
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            world_size: Self::DEFAULT_WORLD_SIZE,
            target_size_xy: 5.0 * CM,
            target_thickness: Self::DEFAULT_TARGET_THICKNESS,
            target_position: [0.0, 0.0, -3.0 * CM],
            detector_size_xy: 2.0 * CM,
            detector_thickness: Self::DEFAULT_DETECTOR_THICKNESS,
            detector_position: [3.0 * CM, 0.0, 0.0],
            world_material: "G4_AIR".into(),
            target_material: "G4_Ti".into(),
            detector_material: "G4_AIR".into(),
            check_overlaps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let c = GeometryConfig::default();
        assert_eq!(c.world_size, 200.0);
        assert_eq!(c.target_position, [0.0, 0.0, -30.0]);
        assert_eq!(c.detector_position, [30.0, 0.0, 0.0]);
        assert_eq!(c.detector_thickness, 1.0e-6);
        assert!(c.check_overlaps);
    }
}
