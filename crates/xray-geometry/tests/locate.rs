//! Property tests for point location in the reference geometry.

use proptest::prelude::*;
use xray_core::VolumeLookup;
use xray_geometry::{Geometry, GeometryConfig, DETECTOR, WORLD};

fn reference() -> Geometry {
    Geometry::construct(&GeometryConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn locate_is_none_exactly_outside_world(
        x in -150.0f64..150.0,
        y in -150.0f64..150.0,
        z in -150.0f64..150.0,
    ) {
        let geo = reference();
        let inside = x.abs() <= 100.0 && y.abs() <= 100.0 && z.abs() <= 100.0;
        prop_assert_eq!(geo.locate([x, y, z]).is_some(), inside);
    }

    #[test]
    fn detector_plane_points_locate_to_detector(
        x in 20.0f64..=40.0,
        y in -10.0f64..=10.0,
    ) {
        let geo = reference();
        prop_assert_eq!(geo.locate([x, y, 0.0]), geo.volume_handle(DETECTOR));
    }

    #[test]
    fn located_volume_contains_point(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        z in -100.0f64..100.0,
    ) {
        let geo = reference();
        let handle = geo.locate([x, y, z]).unwrap();
        prop_assert!(geo.volume(handle).unwrap().contains([x, y, z]));
    }
}

#[test]
fn world_is_handle_zero() {
    let geo = reference();
    assert_eq!(geo.world().name, WORLD);
    assert_eq!(geo.volume_handle(WORLD), Some(geo.world().handle));
}
