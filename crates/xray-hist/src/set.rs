//! Named, ordered histogram sets.
//!
//! A [`HistogramSet`] is what one worker owns for the duration of a run
//! and what the coordinator persists at the end. Histograms are kept in
//! booking order; [`HistogramId`] indexes them without a name lookup on
//! the fill path.

use indexmap::IndexMap;

use crate::error::HistError;
use crate::h1::H1;
use crate::spec::H1Spec;

/// Index of a histogram within its set, in booking order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HistogramId(pub usize);

/// Summary statistics of one histogram.
#[derive(Clone, Debug, PartialEq)]
pub struct H1Summary {
    /// Histogram name.
    pub name: String,
    /// Total number of fills, including under/overflow.
    pub entries: u64,
    /// In-range mean.
    pub mean: f64,
    /// In-range rms.
    pub rms: f64,
}

/// An ordered collection of uniquely named histograms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramSet {
    histograms: IndexMap<String, H1>,
}

impl HistogramSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Book every spec in order.
    ///
    /// # Errors
    ///
    /// The first booking error encountered.
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a H1Spec>) -> Result<Self, HistError> {
        let mut set = Self::new();
        for spec in specs {
            set.book(spec.clone())?;
        }
        Ok(set)
    }

    /// Book a new empty histogram.
    ///
    /// # Errors
    ///
    /// - [`HistError::InvalidBinning`] if the spec is invalid.
    /// - [`HistError::DuplicateName`] if the name is taken.
    pub fn book(&mut self, spec: H1Spec) -> Result<HistogramId, HistError> {
        if self.histograms.contains_key(&spec.name) {
            return Err(HistError::DuplicateName { name: spec.name });
        }
        let name = spec.name.clone();
        let h = H1::new(spec)?;
        let (index, _) = self.histograms.insert_full(name, h);
        Ok(HistogramId(index))
    }

    /// Resolve a name to its id.
    pub fn id_of(&self, name: &str) -> Option<HistogramId> {
        self.histograms.get_index_of(name).map(HistogramId)
    }

    /// Fill one sample into a histogram by id.
    ///
    /// # Errors
    ///
    /// [`HistError::UnknownHistogram`] if the id is out of range.
    pub fn fill(&mut self, id: HistogramId, x: f64) -> Result<(), HistError> {
        let (_, h) = self
            .histograms
            .get_index_mut(id.0)
            .ok_or_else(|| HistError::UnknownHistogram {
                name: format!("#{}", id.0),
            })?;
        h.fill(x);
        Ok(())
    }

    /// Look up a histogram by name.
    pub fn get(&self, name: &str) -> Option<&H1> {
        self.histograms.get(name)
    }

    /// Look up a histogram by id.
    pub fn by_id(&self, id: HistogramId) -> Option<&H1> {
        self.histograms.get_index(id.0).map(|(_, h)| h)
    }

    /// Mutable access by id.
    pub fn by_id_mut(&mut self, id: HistogramId) -> Option<&mut H1> {
        self.histograms.get_index_mut(id.0).map(|(_, h)| h)
    }

    /// Number of booked histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Whether no histograms are booked.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// Whether any booked histogram holds at least one sample.
    pub fn has_samples(&self) -> bool {
        self.histograms.values().any(|h| !h.is_empty())
    }

    /// Iterate histograms in booking order.
    pub fn iter(&self) -> impl Iterator<Item = &H1> {
        self.histograms.values()
    }

    /// Booked names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.histograms.keys().map(String::as_str)
    }

    /// Summary statistics for every histogram, in booking order.
    pub fn summaries(&self) -> Vec<H1Summary> {
        self.iter()
            .map(|h| H1Summary {
                name: h.name().to_string(),
                entries: h.entries(),
                mean: h.mean(),
                rms: h.rms(),
            })
            .collect()
    }

    /// Sum another set into this one, histogram by histogram.
    ///
    /// Both sets must hold the same names with the same binning. The
    /// check runs before any histogram is touched, so a failed merge
    /// leaves `self` unchanged.
    ///
    /// # Errors
    ///
    /// [`HistError::Incompatible`] on any membership or binning mismatch.
    pub fn merge(&mut self, other: &HistogramSet) -> Result<(), HistError> {
        if self.len() != other.len() {
            return Err(HistError::Incompatible {
                name: "<set>".into(),
                reason: format!("{} histograms vs {}", self.len(), other.len()),
            });
        }
        for theirs in other.iter() {
            let mine = self
                .histograms
                .get(theirs.name())
                .ok_or_else(|| HistError::Incompatible {
                    name: theirs.name().to_string(),
                    reason: "missing from destination set".into(),
                })?;
            if !mine.spec().same_binning(theirs.spec()) {
                return Err(HistError::Incompatible {
                    name: theirs.name().to_string(),
                    reason: "binning differs".into(),
                });
            }
        }
        for theirs in other.iter() {
            if let Some(mine) = self.histograms.get_mut(theirs.name()) {
                mine.merge(theirs)?;
            }
        }
        Ok(())
    }

    /// Clear all contents, keeping bookings.
    pub fn reset(&mut self) {
        for h in self.histograms.values_mut() {
            h.reset();
        }
    }
}
