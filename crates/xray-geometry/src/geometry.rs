//! Volume hierarchy construction and lookup.
//!
//! [`GeometryBuilder`] places boxes into a world volume, resolving
//! materials and checking overlaps as it goes. The resulting
//! [`Geometry`] is immutable: volume handles are assigned in placement
//! order and never change.

use indexmap::IndexMap;
use log::{debug, info};
use xray_core::{VolumeHandle, VolumeLookup};

use crate::config::{GeometryConfig, DETECTOR, TARGET, WORLD};
use crate::error::GeometryError;
use crate::material::{Material, MaterialTable};
use crate::shape::{BoxShape, Placement, Point3};

/// One placed volume.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedVolume {
    /// Volume name, unique within the geometry.
    pub name: String,
    /// Handle assigned at placement.
    pub handle: VolumeHandle,
    /// Name of the filling material.
    pub material: String,
    /// Mother volume, `None` for the world.
    pub mother: Option<VolumeHandle>,
    placement: Placement,
}

impl PlacedVolume {
    /// The solid.
    pub fn shape(&self) -> BoxShape {
        self.placement.shape
    }

    /// Global position of the centre.
    pub fn centre(&self) -> Point3 {
        self.placement.centre
    }

    /// Whether a global point lies inside or on the surface.
    pub fn contains(&self, point: Point3) -> bool {
        self.placement.contains(point)
    }
}

/// Incremental builder for a [`Geometry`].
pub struct GeometryBuilder {
    materials: MaterialTable,
    volumes: Vec<PlacedVolume>,
    names: IndexMap<String, VolumeHandle>,
    check_overlaps: bool,
}

impl GeometryBuilder {
    /// Start a geometry with the given world box.
    ///
    /// # Errors
    ///
    /// [`GeometryError::MaterialNotFound`] if `material` is unknown.
    pub fn new(
        name: &str,
        shape: BoxShape,
        material: &str,
        check_overlaps: bool,
    ) -> Result<Self, GeometryError> {
        let mut builder = Self {
            materials: MaterialTable::new(),
            volumes: Vec::new(),
            names: IndexMap::new(),
            check_overlaps,
        };
        builder.push(name, shape, material, [0.0; 3], None)?;
        Ok(builder)
    }

    /// Register a material without placing anything in it.
    ///
    /// # Errors
    ///
    /// [`GeometryError::MaterialNotFound`] if `name` is unknown.
    pub fn define_material(&mut self, name: &str) -> Result<&Material, GeometryError> {
        self.materials.find_or_build(name)
    }

    /// Place a box inside the named mother volume.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::UnknownMother`] if `mother` was never placed.
    /// - [`GeometryError::DuplicateVolume`] if `name` is taken.
    /// - [`GeometryError::MaterialNotFound`] if `material` is unknown.
    /// - [`GeometryError::Overlap`] if overlap checks are on and the box
    ///   protrudes from its mother or intersects a sibling.
    pub fn place(
        &mut self,
        name: &str,
        shape: BoxShape,
        material: &str,
        centre: Point3,
        mother: &str,
    ) -> Result<VolumeHandle, GeometryError> {
        let mother = *self
            .names
            .get(mother)
            .ok_or_else(|| GeometryError::UnknownMother {
                name: mother.to_string(),
            })?;
        self.push(name, shape, material, centre, Some(mother))
    }

    fn push(
        &mut self,
        name: &str,
        shape: BoxShape,
        material: &str,
        centre: Point3,
        mother: Option<VolumeHandle>,
    ) -> Result<VolumeHandle, GeometryError> {
        if self.names.contains_key(name) {
            return Err(GeometryError::DuplicateVolume {
                name: name.to_string(),
            });
        }
        self.materials.find_or_build(material)?;

        let placement = Placement { shape, centre };
        if self.check_overlaps {
            if let Some(mother) = mother {
                self.check_overlap(name, &placement, mother)?;
            }
        }

        let handle = VolumeHandle(self.volumes.len() as u32);
        self.volumes.push(PlacedVolume {
            name: name.to_string(),
            handle,
            material: material.to_string(),
            mother,
            placement,
        });
        self.names.insert(name.to_string(), handle);
        debug!("placed volume '{name}' as handle {handle}");
        Ok(handle)
    }

    fn check_overlap(
        &self,
        name: &str,
        placement: &Placement,
        mother: VolumeHandle,
    ) -> Result<(), GeometryError> {
        let mother_volume = &self.volumes[mother.0 as usize];
        if !placement.within(&mother_volume.placement) {
            return Err(GeometryError::Overlap {
                volume: name.to_string(),
                other: mother_volume.name.clone(),
            });
        }
        let sibling = self
            .volumes
            .iter()
            .filter(|v| v.mother == Some(mother))
            .find(|v| placement.intersects(&v.placement));
        if let Some(sibling) = sibling {
            return Err(GeometryError::Overlap {
                volume: name.to_string(),
                other: sibling.name.clone(),
            });
        }
        Ok(())
    }

    /// Finish construction.
    pub fn build(self) -> Geometry {
        info!("\n{}", self.materials);
        Geometry {
            materials: self.materials,
            volumes: self.volumes,
            names: self.names,
        }
    }
}

/// An immutable detector geometry.
///
/// Handle 0 is always the world volume.
#[derive(Clone, Debug)]
pub struct Geometry {
    materials: MaterialTable,
    volumes: Vec<PlacedVolume>,
    names: IndexMap<String, VolumeHandle>,
}

impl Geometry {
    /// Build the target/detector setup described by `config`.
    ///
    /// # Errors
    ///
    /// Any [`GeometryError`]: unknown material, invalid dimension, or a
    /// failed overlap check.
    pub fn construct(config: &GeometryConfig) -> Result<Self, GeometryError> {
        let world = BoxShape::new(WORLD, config.world_size, config.world_size, config.world_size)?;
        let mut builder =
            GeometryBuilder::new(WORLD, world, &config.world_material, config.check_overlaps)?;
        builder.define_material(&config.target_material)?;
        builder.define_material(&config.detector_material)?;

        let target = BoxShape::new(
            TARGET,
            config.target_size_xy,
            config.target_size_xy,
            config.target_thickness,
        )?;
        builder.place(
            TARGET,
            target,
            &config.target_material,
            config.target_position,
            WORLD,
        )?;

        let detector = BoxShape::new(
            DETECTOR,
            config.detector_size_xy,
            config.detector_size_xy,
            config.detector_thickness,
        )?;
        builder.place(
            DETECTOR,
            detector,
            &config.detector_material,
            config.detector_position,
            WORLD,
        )?;

        Ok(builder.build())
    }

    /// The world volume.
    pub fn world(&self) -> &PlacedVolume {
        &self.volumes[0]
    }

    /// Look up a placed volume by handle.
    pub fn volume(&self, handle: VolumeHandle) -> Option<&PlacedVolume> {
        self.volumes.get(handle.0 as usize)
    }

    /// Look up a placed volume by name.
    pub fn volume_by_name(&self, name: &str) -> Option<&PlacedVolume> {
        self.names.get(name).and_then(|h| self.volume(*h))
    }

    /// All placed volumes in placement order.
    pub fn volumes(&self) -> &[PlacedVolume] {
        &self.volumes
    }

    /// Materials used by this geometry.
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// The innermost volume containing `point`, or `None` outside the
    /// world.
    ///
    /// Daughters are searched before mothers; among siblings the most
    /// recently placed wins on shared surfaces.
    pub fn locate(&self, point: Point3) -> Option<VolumeHandle> {
        if !self.world().contains(point) {
            return None;
        }
        let mut current = self.world().handle;
        loop {
            let inner = self
                .volumes
                .iter()
                .rev()
                .find(|v| v.mother == Some(current) && v.contains(point));
            match inner {
                Some(v) => current = v.handle,
                None => return Some(current),
            }
        }
    }
}

impl VolumeLookup for Geometry {
    fn volume_handle(&self, name: &str) -> Option<VolumeHandle> {
        self.names.get(name).copied()
    }
}
