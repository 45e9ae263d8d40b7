//! Per-event accumulation with first-hit-wins semantics.
//!
//! A photon crossing the detector plane can register on several steps;
//! only the first registration of each observable counts. Each field is
//! written once per event and ignored afterwards.
//!
//! # Zero energy
//!
//! Fields are stored as `Option<f64>`, but a recorded value of exactly
//! `0.0` is treated as "nothing recorded": the field stays unset and a
//! later nonzero value still wins. This keeps the observable behaviour
//! of a 0.0 "unset" marker, where a genuine zero cannot be told apart
//! from no hit. Unset fields read back as `0.0`.

use crate::classifier::StepObservation;
use crate::run::RunAggregator;

/// Per-event observables.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventRecord {
    primary: Option<f64>,
    fluorescence: Option<f64>,
}

impl EventRecord {
    /// Energy of the first photon incident on the detector, 0 if unset.
    pub fn primary(&self) -> f64 {
        self.primary.unwrap_or(0.0)
    }

    /// Energy of the first photoelectric-origin photon incident on the
    /// detector, 0 if unset.
    pub fn fluorescence(&self) -> f64 {
        self.fluorescence.unwrap_or(0.0)
    }

    /// Whether the primary field has been written this event.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Whether the fluorescence field has been written this event.
    pub fn has_fluorescence(&self) -> bool {
        self.fluorescence.is_some()
    }
}

/// First write wins; a zero or non-finite write leaves the slot unset.
#[inline]
fn record_first(slot: &mut Option<f64>, energy: f64) {
    if slot.is_none() && energy != 0.0 && energy.is_finite() {
        *slot = Some(energy);
    }
}

/// Accumulator for the event currently in flight on one worker.
#[derive(Clone, Debug, Default)]
pub struct EventAccumulator {
    record: EventRecord,
}

impl EventAccumulator {
    /// A fresh accumulator with both fields unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both fields at the start of an event.
    pub fn begin_event(&mut self) {
        self.record = EventRecord::default();
    }

    /// Record the energy of a photon incident on the detector.
    pub fn record_primary(&mut self, energy: f64) {
        record_first(&mut self.record.primary, energy);
    }

    /// Record the energy of a photoelectric-origin photon incident on the
    /// detector.
    pub fn record_fluorescence(&mut self, energy: f64) {
        record_first(&mut self.record.fluorescence, energy);
    }

    /// Feed a classified step: always the primary field, the
    /// fluorescence field only for photoelectric origin.
    pub fn record(&mut self, obs: &StepObservation) {
        self.record_primary(obs.energy);
        if obs.photoelectric {
            self.record_fluorescence(obs.energy);
        }
    }

    /// Current state of the event.
    pub fn current(&self) -> &EventRecord {
        &self.record
    }

    /// Hand both values to the run aggregator, unconditionally, and clear
    /// the accumulator. Returns the finished record.
    pub fn end_event(&mut self, run: &mut RunAggregator) -> EventRecord {
        let finished = std::mem::take(&mut self.record);
        run.fold_event(finished.primary(), finished.fluorescence());
        finished
    }
}
