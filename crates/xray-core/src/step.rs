//! Borrowed view of one transport step.

use crate::id::VolumeHandle;

/// Creator-process name of the photoelectric effect.
///
/// Photons whose creator process carries this name are fluorescence
/// photons emitted after a photo-absorption in the target.
pub const PHOTOELECTRIC_PROCESS: &str = "phot";

/// The slice of transport state the scoring layer looks at for one step.
///
/// The transport engine owns the track; a `StepPoint` only borrows the
/// creator-process name for the duration of the step callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPoint<'a> {
    /// Volume containing the post-step point, or `None` when the
    /// particle left the world.
    pub post_volume: Option<VolumeHandle>,
    /// Total energy of the traversing particle at the post-step point.
    pub total_energy: f64,
    /// Name of the process that created the particle, `None` for
    /// primaries.
    pub creator_process: Option<&'a str>,
}

impl<'a> StepPoint<'a> {
    /// Step ending in `volume` for a particle created by `process`.
    pub fn new(volume: VolumeHandle, total_energy: f64, process: Option<&'a str>) -> Self {
        Self {
            post_volume: Some(volume),
            total_energy,
            creator_process: process,
        }
    }

    /// Step whose post-step point lies outside the world volume.
    pub fn out_of_world(total_energy: f64) -> Self {
        Self {
            post_volume: None,
            total_energy,
            creator_process: None,
        }
    }

    /// Whether the particle was created by the photoelectric effect.
    pub fn is_photoelectric(&self) -> bool {
        self.creator_process == Some(PHOTOELECTRIC_PROCESS)
    }
}

/// Owned record of one step, as kept in a recorded event history.
///
/// Process names are static in the transport engine, so a record is
/// `Copy` and fits inline in small buffers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    /// Volume containing the post-step point, `None` outside the world.
    pub post_volume: Option<VolumeHandle>,
    /// Total energy at the post-step point.
    pub total_energy: f64,
    /// Creator process of the particle, `None` for primaries.
    pub creator_process: Option<&'static str>,
}

impl StepRecord {
    /// Step ending in `volume`.
    pub fn new(volume: VolumeHandle, total_energy: f64, process: Option<&'static str>) -> Self {
        Self {
            post_volume: Some(volume),
            total_energy,
            creator_process: process,
        }
    }

    /// Step leaving the world.
    pub fn escaped(total_energy: f64) -> Self {
        Self {
            post_volume: None,
            total_energy,
            creator_process: None,
        }
    }

    /// Borrowed view handed to scoring callbacks.
    pub fn as_point(&self) -> StepPoint<'static> {
        StepPoint {
            post_volume: self.post_volume,
            total_energy: self.total_energy,
            creator_process: self.creator_process,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photoelectric_requires_exact_name() {
        let v = VolumeHandle(1);
        assert!(StepPoint::new(v, 4.5, Some("phot")).is_photoelectric());
        assert!(!StepPoint::new(v, 4.5, Some("compt")).is_photoelectric());
        assert!(!StepPoint::new(v, 4.5, Some("Phot")).is_photoelectric());
        assert!(!StepPoint::new(v, 4.5, None).is_photoelectric());
    }

    #[test]
    fn out_of_world_has_no_volume() {
        let s = StepPoint::out_of_world(1.0);
        assert_eq!(s.post_volume, None);
        assert!(!s.is_photoelectric());
    }

    #[test]
    fn record_views_match() {
        let r = StepRecord::new(VolumeHandle(2), 4.5, Some(PHOTOELECTRIC_PROCESS));
        assert_eq!(r.as_point(), StepPoint::new(VolumeHandle(2), 4.5, Some("phot")));
        assert_eq!(StepRecord::escaped(1.0).as_point(), StepPoint::out_of_world(1.0));
    }
}
