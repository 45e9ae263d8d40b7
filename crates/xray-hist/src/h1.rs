//! Fixed-binning 1-D histogram.
//!
//! [`H1`] keeps, per bin, the entry count and the weighted sums needed
//! to recover statistics after a merge: `Σw`, `Σw²`, `Σxw`, `Σx²w`.
//! Bin 0 is the underflow bin and bin `bins + 1` the overflow bin, so a
//! histogram with `n` in-range bins stores `n + 2` slots.
//!
//! Mean and rms are computed over in-range bins only. Under/overflow
//! entries still count towards [`H1::entries`].

use crate::error::HistError;
use crate::spec::H1Spec;

/// Per-bin accumulators.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BinContent {
    /// Number of fills that landed in this bin.
    pub entries: u64,
    /// Sum of weights.
    pub sw: f64,
    /// Sum of squared weights.
    pub sw2: f64,
    /// Sum of `x * w`.
    pub sxw: f64,
    /// Sum of `x² * w`.
    pub sx2w: f64,
}

impl BinContent {
    fn add(&mut self, other: &BinContent) {
        self.entries += other.entries;
        self.sw += other.sw;
        self.sw2 += other.sw2;
        self.sxw += other.sxw;
        self.sx2w += other.sx2w;
    }
}

/// Where a sample lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinSlot {
    /// Below `min`.
    Underflow,
    /// In-range bin, 0-based.
    InRange(usize),
    /// At or above `max`.
    Overflow,
}

/// A fixed-binning 1-D histogram.
#[derive(Clone, Debug, PartialEq)]
pub struct H1 {
    spec: H1Spec,
    /// `bins + 2` slots: underflow, in-range bins, overflow.
    slots: Vec<BinContent>,
}

impl H1 {
    /// Book an empty histogram.
    ///
    /// # Errors
    ///
    /// [`HistError::InvalidBinning`] if the spec fails validation.
    pub fn new(spec: H1Spec) -> Result<Self, HistError> {
        spec.validate()?;
        let slots = vec![BinContent::default(); spec.bins + 2];
        Ok(Self { spec, slots })
    }

    /// Booking parameters.
    pub fn spec(&self) -> &H1Spec {
        &self.spec
    }

    /// Histogram name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Classify a sample without filling.
    ///
    /// `NaN` has no slot and yields `None`.
    pub fn slot_of(&self, x: f64) -> Option<BinSlot> {
        if x.is_nan() {
            return None;
        }
        if x < self.spec.min {
            return Some(BinSlot::Underflow);
        }
        if x >= self.spec.max {
            return Some(BinSlot::Overflow);
        }
        let index = ((x - self.spec.min) / self.spec.bin_width()) as usize;
        // Rounding can push values just below max into bin `bins`.
        Some(BinSlot::InRange(index.min(self.spec.bins - 1)))
    }

    fn slot_index(&self, slot: BinSlot) -> usize {
        match slot {
            BinSlot::Underflow => 0,
            BinSlot::InRange(i) => i + 1,
            BinSlot::Overflow => self.spec.bins + 1,
        }
    }

    /// Fill one sample with unit weight.
    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    /// Fill one sample with weight `w`.
    ///
    /// A `NaN` sample is counted as an overflow entry without touching
    /// the weighted sums, so every fill adds exactly one entry.
    pub fn fill_weighted(&mut self, x: f64, w: f64) {
        let Some(slot) = self.slot_of(x) else {
            let overflow = self.spec.bins + 1;
            self.slots[overflow].entries += 1;
            return;
        };
        let index = self.slot_index(slot);
        let bin = &mut self.slots[index];
        bin.entries += 1;
        bin.sw += w;
        bin.sw2 += w * w;
        bin.sxw += x * w;
        bin.sx2w += x * x * w;
    }

    /// Total number of fills, including under/overflow.
    pub fn entries(&self) -> u64 {
        self.slots.iter().map(|b| b.entries).sum()
    }

    /// Number of fills inside `[min, max)`.
    pub fn in_range_entries(&self) -> u64 {
        self.in_range().iter().map(|b| b.entries).sum()
    }

    /// Whether nothing has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.entries() == 0
    }

    /// Content of an in-range bin (0-based).
    pub fn bin(&self, index: usize) -> Option<&BinContent> {
        self.in_range().get(index)
    }

    /// Underflow bin.
    pub fn underflow(&self) -> &BinContent {
        &self.slots[0]
    }

    /// Overflow bin.
    pub fn overflow(&self) -> &BinContent {
        &self.slots[self.spec.bins + 1]
    }

    /// All slots, underflow first and overflow last.
    pub fn slots(&self) -> &[BinContent] {
        &self.slots
    }

    fn in_range(&self) -> &[BinContent] {
        &self.slots[1..=self.spec.bins]
    }

    /// Per-bin entry counts for in-range bins.
    pub fn counts(&self) -> Vec<u64> {
        self.in_range().iter().map(|b| b.entries).collect()
    }

    /// Lower edge of an in-range bin.
    pub fn bin_lower_edge(&self, index: usize) -> f64 {
        self.spec.min + index as f64 * self.spec.bin_width()
    }

    /// Centre of an in-range bin.
    pub fn bin_centre(&self, index: usize) -> f64 {
        self.bin_lower_edge(index) + 0.5 * self.spec.bin_width()
    }

    /// In-range sum of weights.
    pub fn sum_weights(&self) -> f64 {
        self.in_range().iter().map(|b| b.sw).sum()
    }

    /// Weighted mean of in-range samples, 0 when there are none.
    pub fn mean(&self) -> f64 {
        let sw = self.sum_weights();
        if sw == 0.0 {
            return 0.0;
        }
        let sxw: f64 = self.in_range().iter().map(|b| b.sxw).sum();
        sxw / sw
    }

    /// Root-mean-square deviation of in-range samples around the mean,
    /// 0 when there are none.
    pub fn rms(&self) -> f64 {
        let sw = self.sum_weights();
        if sw == 0.0 {
            return 0.0;
        }
        let mean = self.mean();
        let sx2w: f64 = self.in_range().iter().map(|b| b.sx2w).sum();
        (sx2w / sw - mean * mean).abs().sqrt()
    }

    /// Add another histogram's contents bin by bin.
    ///
    /// # Errors
    ///
    /// [`HistError::Incompatible`] if the binning differs.
    pub fn merge(&mut self, other: &H1) -> Result<(), HistError> {
        if !self.spec.same_binning(&other.spec) {
            return Err(HistError::Incompatible {
                name: self.spec.name.clone(),
                reason: format!(
                    "binning {}×[{}, {}) vs {}×[{}, {})",
                    self.spec.bins,
                    self.spec.min,
                    self.spec.max,
                    other.spec.bins,
                    other.spec.min,
                    other.spec.max
                ),
            });
        }
        for (mine, theirs) in self.slots.iter_mut().zip(&other.slots) {
            mine.add(theirs);
        }
        Ok(())
    }

    /// Clear all contents, keeping the binning.
    pub fn reset(&mut self) {
        self.slots.fill(BinContent::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edet() -> H1 {
        H1::new(H1Spec::new("EDet", "t", 1000, 0.0, 7.0)).unwrap()
    }

    #[test]
    fn fill_places_sample_in_expected_bin() {
        let mut h = edet();
        h.fill(4.5);
        assert_eq!(h.entries(), 1);
        assert_eq!(h.slot_of(4.5), Some(BinSlot::InRange(642)));
        assert_eq!(h.bin(642).unwrap().entries, 1);
        assert!((h.mean() - 4.5).abs() < 1e-12);
        assert_eq!(h.rms(), 0.0);
    }

    #[test]
    fn zero_goes_to_first_bin() {
        let mut h = edet();
        h.fill(0.0);
        assert_eq!(h.bin(0).unwrap().entries, 1);
        assert_eq!(h.underflow().entries, 0);
    }

    #[test]
    fn max_edge_overflows() {
        let mut h = edet();
        h.fill(7.0);
        h.fill(-0.1);
        assert_eq!(h.overflow().entries, 1);
        assert_eq!(h.underflow().entries, 1);
        assert_eq!(h.entries(), 2);
        assert_eq!(h.in_range_entries(), 0);
        assert_eq!(h.mean(), 0.0);
    }

    #[test]
    fn value_just_below_max_stays_in_range() {
        let h = edet();
        assert_eq!(h.slot_of(7.0 - 1e-15), Some(BinSlot::InRange(999)));
    }

    #[test]
    fn nan_counts_as_overflow_entry() {
        let mut h = edet();
        h.fill(f64::NAN);
        assert_eq!(h.entries(), 1);
        assert_eq!(h.overflow().entries, 1);
        assert_eq!(h.overflow().sw, 0.0);
        assert_eq!(h.in_range_entries(), 0);
        assert_eq!(h.mean(), 0.0);
    }

    #[test]
    fn mean_and_rms_of_two_points() {
        let mut h = edet();
        h.fill(2.0);
        h.fill(4.0);
        assert!((h.mean() - 3.0).abs() < 1e-12);
        assert!((h.rms() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_fill_shifts_mean() {
        let mut h = edet();
        h.fill_weighted(1.0, 3.0);
        h.fill_weighted(5.0, 1.0);
        assert!((h.mean() - 2.0).abs() < 1e-12);
        assert_eq!(h.sum_weights(), 4.0);
    }

    #[test]
    fn merge_adds_bins_and_rejects_mismatch() {
        let mut a = edet();
        let mut b = edet();
        a.fill(1.0);
        b.fill(1.0);
        b.fill(6.0);
        a.merge(&b).unwrap();
        assert_eq!(a.entries(), 3);
        assert_eq!(a.bin(142).unwrap().entries, 2);

        let other = H1::new(H1Spec::new("EDet", "t", 10, 0.0, 7.0)).unwrap();
        assert!(matches!(
            a.merge(&other),
            Err(HistError::Incompatible { .. })
        ));
        assert_eq!(a.entries(), 3, "failed merge leaves contents untouched");
    }

    #[test]
    fn booking_with_overflowing_bin_count_fails() {
        assert!(matches!(
            H1::new(H1Spec::new("EDet", "t", usize::MAX, 0.0, 7.0)),
            Err(HistError::InvalidBinning { .. })
        ));
    }

    #[test]
    fn reset_clears_contents() {
        let mut h = edet();
        h.fill(1.0);
        h.reset();
        assert!(h.is_empty());
        assert_eq!(h.slots().len(), 1002);
    }

    #[test]
    fn bin_geometry() {
        let h = edet();
        assert_eq!(h.bin_lower_edge(0), 0.0);
        assert!((h.bin_centre(0) - 0.0035).abs() < 1e-15);
        assert!(h.bin(1000).is_none());
    }
}
