//! Histogram booking parameters.

use crate::error::HistError;

/// Booking parameters for a fixed-binning 1-D histogram.
///
/// Immutable once a histogram is booked from it. Bins are uniform over
/// `[min, max)`.
#[derive(Clone, Debug, PartialEq)]
pub struct H1Spec {
    /// Short name used for lookup and file naming (e.g. `"EDet"`).
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Number of in-range bins.
    pub bins: usize,
    /// Lower edge of the first bin.
    pub min: f64,
    /// Upper edge of the last bin (exclusive).
    pub max: f64,
}

impl H1Spec {
    /// Largest accepted number of in-range bins.
    pub const MAX_BINS: usize = 1 << 24;

    /// Create a spec without validating it.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        bins: usize,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            bins,
            min,
            max,
        }
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`HistError::InvalidBinning`] if the name is empty, `bins` is zero
    /// or above [`MAX_BINS`](Self::MAX_BINS), or the range is non-finite
    /// or empty.
    pub fn validate(&self) -> Result<(), HistError> {
        let invalid = |reason: String| HistError::InvalidBinning {
            name: self.name.clone(),
            reason,
        };
        if self.name.is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if self.bins == 0 {
            return Err(invalid("bin count must be at least 1".into()));
        }
        if self.bins > Self::MAX_BINS {
            return Err(invalid(format!(
                "bin count {} exceeds {}",
                self.bins,
                Self::MAX_BINS
            )));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(format!(
                "range must be finite, got [{}, {})",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(invalid(format!(
                "min {} must be below max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Whether two specs bin identically (titles may differ).
    pub fn same_binning(&self, other: &H1Spec) -> bool {
        self.bins == other.bins && self.min == other.min && self.max == other.max
    }
}
