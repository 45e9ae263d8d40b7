//! Axis-aligned box solids.

use crate::error::GeometryError;

/// A point in the global frame, in mm.
pub type Point3 = [f64; 3];

/// An axis-aligned box described by its half-lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    /// Half-lengths along x, y, z.
    pub half: [f64; 3],
}

impl BoxShape {
    /// Build a box from full lengths along x, y, z.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidDimension`] if any length is non-finite or
    /// not strictly positive.
    pub fn new(volume: &str, size_x: f64, size_y: f64, size_z: f64) -> Result<Self, GeometryError> {
        for (axis, size) in [("x", size_x), ("y", size_y), ("z", size_z)] {
            if !size.is_finite() || size <= 0.0 {
                return Err(GeometryError::InvalidDimension {
                    volume: volume.to_string(),
                    reason: format!("{axis} length must be finite and positive, got {size}"),
                });
            }
        }
        Ok(Self {
            half: [size_x / 2.0, size_y / 2.0, size_z / 2.0],
        })
    }

    /// Whether `point` (relative to the box centre) lies inside or on the
    /// surface.
    pub fn contains_local(&self, point: Point3) -> bool {
        (0..3).all(|i| point[i].abs() <= self.half[i])
    }
}

/// A box placed at a global position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    pub shape: BoxShape,
    pub centre: Point3,
}

impl Placement {
    pub fn contains(&self, point: Point3) -> bool {
        let local = [
            point[0] - self.centre[0],
            point[1] - self.centre[1],
            point[2] - self.centre[2],
        ];
        self.shape.contains_local(local)
    }

    /// Whether this box lies entirely inside `outer` (touching allowed).
    pub fn within(&self, outer: &Placement) -> bool {
        (0..3).all(|i| {
            let lo = self.centre[i] - self.shape.half[i];
            let hi = self.centre[i] + self.shape.half[i];
            lo >= outer.centre[i] - outer.shape.half[i] && hi <= outer.centre[i] + outer.shape.half[i]
        })
    }

    /// Whether the interiors of the two boxes intersect (shared faces are
    /// not an overlap).
    pub fn intersects(&self, other: &Placement) -> bool {
        (0..3).all(|i| {
            let gap = (self.centre[i] - other.centre[i]).abs();
            gap < self.shape.half[i] + other.shape.half[i]
        })
    }
}
