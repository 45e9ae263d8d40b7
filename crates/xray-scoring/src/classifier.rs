//! Step classification.
//!
//! [`StepClassifier`] decides, per transport step, whether the step ends
//! in the sensitive volume and whether the particle came from the
//! photoelectric effect. Classification is pure: a step outside the
//! sensitive volume yields `None` and has no side effects.

use xray_core::{StepPoint, VolumeHandle, VolumeLookup};

use crate::error::ScoringError;

/// What one scored step contributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepObservation {
    /// The sensitive volume the step ended in.
    pub volume: VolumeHandle,
    /// Total energy of the particle at the post-step point.
    pub energy: f64,
    /// The particle was created by the photoelectric effect.
    pub photoelectric: bool,
}

/// Classifies steps against one cached sensitive-volume handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepClassifier {
    sensitive: VolumeHandle,
}

impl StepClassifier {
    /// Classifier for an already-resolved handle.
    pub fn new(sensitive: VolumeHandle) -> Self {
        Self { sensitive }
    }

    /// Resolve the sensitive volume by name once and cache the handle.
    ///
    /// # Errors
    ///
    /// [`ScoringError::MissingVolume`] if the geometry has no such volume.
    pub fn resolve(geometry: &impl VolumeLookup, name: &str) -> Result<Self, ScoringError> {
        geometry
            .volume_handle(name)
            .map(Self::new)
            .ok_or_else(|| ScoringError::MissingVolume {
                name: name.to_string(),
            })
    }

    /// The cached sensitive-volume handle.
    pub fn sensitive_volume(&self) -> VolumeHandle {
        self.sensitive
    }

    /// Classify one step.
    #[inline]
    pub fn classify(&self, step: &StepPoint<'_>) -> Option<StepObservation> {
        if step.post_volume != Some(self.sensitive) {
            return None;
        }
        Some(StepObservation {
            volume: self.sensitive,
            energy: step.total_energy,
            photoelectric: step.is_photoelectric(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xray_test_utils::MockGeometry;

    const DET: VolumeHandle = VolumeHandle(2);

    #[test]
    fn steps_elsewhere_are_ignored() {
        let c = StepClassifier::new(DET);
        assert_eq!(c.classify(&StepPoint::new(VolumeHandle(1), 4.5, Some("phot"))), None);
        assert_eq!(c.classify(&StepPoint::out_of_world(4.5)), None);
    }

    #[test]
    fn detector_step_carries_energy_and_origin() {
        let c = StepClassifier::new(DET);
        let obs = c.classify(&StepPoint::new(DET, 4.5, Some("phot"))).unwrap();
        assert_eq!(
            obs,
            StepObservation {
                volume: DET,
                energy: 4.5,
                photoelectric: true
            }
        );
        let primary = c.classify(&StepPoint::new(DET, 6.0, None)).unwrap();
        assert!(!primary.photoelectric);
        let compton = c.classify(&StepPoint::new(DET, 6.0, Some("compt"))).unwrap();
        assert!(!compton.photoelectric);
    }

    #[test]
    fn resolve_caches_handle_or_fails() {
        let geo = MockGeometry::new().with_volume("Detector", DET);
        let c = StepClassifier::resolve(&geo, "Detector").unwrap();
        assert_eq!(c.sensitive_volume(), DET);

        let err = StepClassifier::resolve(&geo, "Gap").unwrap_err();
        assert_eq!(err, ScoringError::MissingVolume { name: "Gap".into() });
    }
}
