//! Run configuration.

use xray_geometry::DETECTOR;
use xray_scoring::HistogramSpecs;

use crate::error::EngineError;

/// Configuration for a [`RunManager`](crate::RunManager).
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Number of worker threads. `None` = one per available CPU.
    pub worker_count: Option<usize>,
    /// Stem the merged histograms are persisted under.
    pub file_stem: String,
    /// Name of the sensitive volume, resolved once per manager.
    pub sensitive_volume: String,
    /// Histogram booking parameters, identical on every worker.
    pub histograms: HistogramSpecs,
}

impl RunConfig {
    /// Default persistence stem.
    pub const DEFAULT_FILE_STEM: &'static str = "XRay";
    /// Upper bound on worker threads.
    pub const MAX_WORKERS: usize = 64;

    /// Resolve the actual worker count.
    ///
    /// Explicit values and the detected CPU count are both clamped to
    /// `[1, MAX_WORKERS]`.
    pub fn resolved_worker_count(&self) -> usize {
        let n = match self.worker_count {
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };
        n.clamp(1, Self::MAX_WORKERS)
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidConfig`] for an empty or path-like file stem,
    /// an empty volume name, or invalid histogram specs.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.file_stem.is_empty() || self.file_stem.contains(['/', '\\']) {
            return Err(EngineError::InvalidConfig {
                reason: format!("file stem '{}' is not a plain name", self.file_stem),
            });
        }
        if self.sensitive_volume.is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "sensitive volume name is empty".into(),
            });
        }
        for spec in self.histograms.iter() {
            spec.validate().map_err(|e| EngineError::InvalidConfig {
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            file_stem: Self::DEFAULT_FILE_STEM.into(),
            sensitive_volume: DETECTOR.into(),
            histograms: HistogramSpecs::default(),
        }
    }
}
