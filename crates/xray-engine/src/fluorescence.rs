//! A seeded toy generator for target fluorescence.
//!
//! Each event is one beam photon travelling along +z into the target.
//! It is photo-absorbed with some probability and re-emitted as a
//! titanium K-shell photon (creator process `"phot"`), Compton-scattered
//! (creator process `"compt"`), or passes straight through. Secondary
//! photons leave the target centre isotropically; a photon scores when
//! its straight line crosses the detector plane inside the detector.
//!
//! The random stream of an event depends only on the seed and the event
//! id, so histories are reproducible across worker counts.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use xray_core::units::KEV;
use xray_core::{EventId, StepRecord, VolumeHandle, PHOTOELECTRIC_PROCESS};
use xray_geometry::{Geometry, Point3, DETECTOR, TARGET};

use crate::error::EngineError;
use crate::source::{EventHistory, EventSource};

/// Creator process of Compton-scattered photons.
pub const COMPTON_PROCESS: &str = "compt";

/// Electron rest energy.
const ELECTRON_MASS: f64 = 510.998_95 * KEV;

/// Parameters of a [`FluorescenceSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct FluorescenceConfig {
    /// Base seed for every per-event stream.
    pub seed: u64,
    /// Energy of the beam photon.
    pub beam_energy: f64,
    /// Probability that the beam photon is photo-absorbed and re-emitted.
    pub absorption_probability: f64,
    /// Probability that the beam photon Compton-scatters.
    pub scatter_probability: f64,
    /// K-alpha line energy.
    pub k_alpha: f64,
    /// K-beta line energy.
    pub k_beta: f64,
    /// Fraction of fluorescence photons emitted on the K-beta line.
    pub k_beta_fraction: f64,
}

impl FluorescenceConfig {
    /// Default beam energy, just above the titanium K edge.
    pub const DEFAULT_BEAM_ENERGY: f64 = 6.0 * KEV;
    /// Default photo-absorption probability.
    pub const DEFAULT_ABSORPTION_PROBABILITY: f64 = 0.3;
    /// Default Compton probability.
    pub const DEFAULT_SCATTER_PROBABILITY: f64 = 0.05;
    /// Titanium K-alpha.
    pub const DEFAULT_K_ALPHA: f64 = 4.51 * KEV;
    /// Titanium K-beta.
    pub const DEFAULT_K_BETA: f64 = 4.93 * KEV;
    /// Default K-beta fraction.
    pub const DEFAULT_K_BETA_FRACTION: f64 = 0.12;

    /// Check probabilities and energies.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSource`] naming the first bad parameter.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid =
            |reason: String| -> Result<(), EngineError> { Err(EngineError::InvalidSource { reason }) };
        for (name, p) in [
            ("absorption_probability", self.absorption_probability),
            ("scatter_probability", self.scatter_probability),
            ("k_beta_fraction", self.k_beta_fraction),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        if self.absorption_probability + self.scatter_probability > 1.0 {
            return invalid("absorption and scatter probabilities sum above 1".into());
        }
        for (name, e) in [
            ("beam_energy", self.beam_energy),
            ("k_alpha", self.k_alpha),
            ("k_beta", self.k_beta),
        ] {
            if !e.is_finite() || e <= 0.0 {
                return invalid(format!("{name} must be finite and positive, got {e}"));
            }
        }
        Ok(())
    }
}

impl Default for FluorescenceConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            beam_energy: Self::DEFAULT_BEAM_ENERGY,
            absorption_probability: Self::DEFAULT_ABSORPTION_PROBABILITY,
            scatter_probability: Self::DEFAULT_SCATTER_PROBABILITY,
            k_alpha: Self::DEFAULT_K_ALPHA,
            k_beta: Self::DEFAULT_K_BETA,
            k_beta_fraction: Self::DEFAULT_K_BETA_FRACTION,
        }
    }
}

/// Seeded beam-on-target generator over a constructed [`Geometry`].
#[derive(Clone, Debug)]
pub struct FluorescenceSource {
    config: FluorescenceConfig,
    geometry: Geometry,
    world: VolumeHandle,
    target: VolumeHandle,
    detector: VolumeHandle,
    emission_point: Point3,
    detector_plane_z: f64,
}

impl FluorescenceSource {
    /// Build a source for `geometry`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSource`] if the config is invalid or the
    /// geometry lacks a target or detector volume.
    pub fn new(geometry: Geometry, config: FluorescenceConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let missing = |name: &str| EngineError::InvalidSource {
            reason: format!("geometry has no '{name}' volume"),
        };
        let target = geometry.volume_by_name(TARGET).ok_or_else(|| missing(TARGET))?;
        let detector = geometry
            .volume_by_name(DETECTOR)
            .ok_or_else(|| missing(DETECTOR))?;
        let emission_point = target.centre();
        let detector_plane_z = detector.centre()[2];
        let (target, detector) = (target.handle, detector.handle);
        let world = geometry.world().handle;
        Ok(Self {
            config,
            geometry,
            world,
            target,
            detector,
            emission_point,
            detector_plane_z,
        })
    }

    /// Source parameters.
    pub fn config(&self) -> &FluorescenceConfig {
        &self.config
    }

    /// The geometry photons are tracked through.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn isotropic(rng: &mut ChaCha8Rng) -> Point3 {
        let cos_theta = 2.0 * rng.random::<f64>() - 1.0;
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = std::f64::consts::TAU * rng.random::<f64>();
        [sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta]
    }

    /// Volume where a photon leaving the emission point along `dir`
    /// crosses the detector plane, if it gets there.
    fn plane_crossing(&self, dir: Point3) -> Option<VolumeHandle> {
        let dz = self.detector_plane_z - self.emission_point[2];
        if dir[2] <= 0.0 || dz <= 0.0 {
            return None;
        }
        let t = dz / dir[2];
        let p = [
            self.emission_point[0] + t * dir[0],
            self.emission_point[1] + t * dir[1],
            self.detector_plane_z,
        ];
        self.geometry.locate(p)
    }

    /// Steps of a secondary photon after it leaves the target.
    fn track(&self, dir: Point3, energy: f64, creator: &'static str, out: &mut EventHistory) {
        out.push(StepRecord::new(self.target, energy, Some(creator)));
        out.push(StepRecord::new(self.world, energy, Some(creator)));
        if self.plane_crossing(dir) == Some(self.detector) {
            out.push(StepRecord::new(self.detector, energy, Some(creator)));
            out.push(StepRecord::new(self.world, energy, Some(creator)));
        }
        out.push(StepRecord::escaped(energy));
    }
}

impl EventSource for FluorescenceSource {
    fn name(&self) -> &str {
        "fluorescence"
    }

    fn generate(&self, event: EventId, out: &mut EventHistory) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed ^ event.0);
        let beam = self.config.beam_energy;
        out.push(StepRecord::new(self.world, beam, None));
        out.push(StepRecord::new(self.target, beam, None));

        let u = rng.random::<f64>();
        if u < self.config.absorption_probability {
            let energy = if rng.random_bool(self.config.k_beta_fraction) {
                self.config.k_beta
            } else {
                self.config.k_alpha
            };
            let dir = Self::isotropic(&mut rng);
            self.track(dir, energy, PHOTOELECTRIC_PROCESS, out);
        } else if u < self.config.absorption_probability + self.config.scatter_probability {
            let dir = Self::isotropic(&mut rng);
            let energy = beam / (1.0 + beam / ELECTRON_MASS * (1.0 - dir[2]));
            self.track(dir, energy, COMPTON_PROCESS, out);
        } else {
            out.push(StepRecord::new(self.world, beam, None));
            out.push(StepRecord::escaped(beam));
        }
    }
}
