//! Material database.
//!
//! [`MaterialTable`] holds the materials a geometry uses. Materials are
//! built on demand from a small NIST subset via
//! [`find_or_build`](MaterialTable::find_or_build); building the same
//! name twice returns the existing entry.

use std::fmt;

use indexmap::IndexMap;

use crate::error::GeometryError;

/// Physical state of a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialState {
    /// Solid.
    Solid,
    /// Gas.
    Gas,
}

/// A material definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Database name (e.g. `"G4_Ti"`).
    pub name: String,
    /// Density in g/cm³.
    pub density: f64,
    /// Physical state.
    pub state: MaterialState,
    /// Mean excitation energy in eV.
    pub mean_excitation_ev: f64,
    /// Elemental composition as `(symbol, mass fraction)`.
    pub composition: Vec<(&'static str, f64)>,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " Material: {:>12}    density: {:.6e} g/cm3   I: {:.1} eV   {:?}",
            self.name, self.density, self.mean_excitation_ev, self.state
        )?;
        for (symbol, fraction) in &self.composition {
            write!(f, "\n   ---> Element: {symbol:<2}  ElmMassFraction: {:6.2} %", fraction * 100.0)?;
        }
        Ok(())
    }
}

/// The NIST entries this workspace knows how to build.
fn nist_material(name: &str) -> Option<Material> {
    let material = match name {
        "G4_AIR" => Material {
            name: name.into(),
            density: 1.20479e-3,
            state: MaterialState::Gas,
            mean_excitation_ev: 85.7,
            composition: vec![
                ("C", 0.000124),
                ("N", 0.755268),
                ("O", 0.231781),
                ("Ar", 0.012827),
            ],
        },
        "G4_Ti" => Material {
            name: name.into(),
            density: 4.54,
            state: MaterialState::Solid,
            mean_excitation_ev: 233.0,
            composition: vec![("Ti", 1.0)],
        },
        "G4_Pb" => Material {
            name: name.into(),
            density: 11.35,
            state: MaterialState::Solid,
            mean_excitation_ev: 823.0,
            composition: vec![("Pb", 1.0)],
        },
        "G4_Galactic" => Material {
            name: name.into(),
            density: 1.0e-25,
            state: MaterialState::Gas,
            mean_excitation_ev: 21.8,
            composition: vec![("H", 1.0)],
        },
        _ => return None,
    };
    Some(material)
}

/// Materials registered for a geometry, in registration order.
#[derive(Clone, Debug, Default)]
pub struct MaterialTable {
    materials: IndexMap<String, Material>,
}

impl MaterialTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the named material, building it from the NIST subset if it
    /// is not registered yet.
    ///
    /// # Errors
    ///
    /// [`GeometryError::MaterialNotFound`] if the name is not a known
    /// database entry.
    pub fn find_or_build(&mut self, name: &str) -> Result<&Material, GeometryError> {
        if !self.materials.contains_key(name) {
            let material = nist_material(name).ok_or_else(|| GeometryError::MaterialNotFound {
                name: name.to_string(),
            })?;
            self.materials.insert(name.to_string(), material);
        }
        self.get(name)
    }

    /// Look up a material that was already registered.
    ///
    /// # Errors
    ///
    /// [`GeometryError::MaterialNotFound`] if it was never built.
    pub fn get(&self, name: &str) -> Result<&Material, GeometryError> {
        self.materials
            .get(name)
            .ok_or_else(|| GeometryError::MaterialNotFound {
                name: name.to_string(),
            })
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no materials are registered.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate materials in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}

impl fmt::Display for MaterialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "***** Table : Nb of materials = {} *****", self.len())?;
        for material in self.iter() {
            writeln!(f, "{material}")?;
        }
        Ok(())
    }
}
