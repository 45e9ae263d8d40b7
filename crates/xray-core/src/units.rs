//! Energy and length units.
//!
//! Internal units are **keV** for energy and **mm** for length. Values
//! are plain `f64`s multiplied by the unit constants, so `7.0 * KEV` and
//! `20.0 * CM` read the way they are written in detector descriptions.
//!
//! [`BestUnit`] renders an energy with the largest unit that keeps the
//! magnitude at or above one, the way run summaries are printed.

use std::fmt;

/// One electronvolt.
pub const EV: f64 = 1.0e-3;
/// One kiloelectronvolt (internal energy unit).
pub const KEV: f64 = 1.0;
/// One megaelectronvolt.
pub const MEV: f64 = 1.0e3;
/// One gigaelectronvolt.
pub const GEV: f64 = 1.0e6;

/// One nanometre.
pub const NM: f64 = 1.0e-6;
/// One micrometre.
pub const UM: f64 = 1.0e-3;
/// One millimetre (internal length unit).
pub const MM: f64 = 1.0;
/// One centimetre.
pub const CM: f64 = 10.0;
/// One metre.
pub const M: f64 = 1.0e3;

/// Energy units, smallest first, used by [`BestUnit`].
const ENERGY_UNITS: [(f64, &str); 4] = [(EV, "eV"), (KEV, "keV"), (MEV, "MeV"), (GEV, "GeV")];

/// Display adapter choosing the most readable energy unit.
///
/// ```
/// use xray_core::units::{BestUnit, KEV, EV};
///
/// assert_eq!(BestUnit::energy(4.5 * KEV).to_string(), "4.5 keV");
/// assert_eq!(BestUnit::energy(450.0 * EV).to_string(), "450 eV");
/// assert_eq!(BestUnit::energy(0.0).to_string(), "0 eV");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestUnit {
    value: f64,
}

impl BestUnit {
    /// Wrap an energy expressed in internal units.
    pub fn energy(value: f64) -> Self {
        Self { value }
    }
}

impl fmt::Display for BestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.value.abs();
        let (scale, symbol) = ENERGY_UNITS
            .iter()
            .rev()
            .find(|(scale, _)| magnitude >= *scale)
            .copied()
            .unwrap_or(ENERGY_UNITS[0]);
        write!(f, "{} {symbol}", round_significant(self.value / scale, 6))
    }
}

/// Round to `digits` significant digits so that unit conversion noise
/// (`4.499999999`) does not leak into printed summaries.
fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let exponent = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - exponent);
    (value * factor).round() / factor
}
