//! Cutting planes from a blade swing.
//!
//! A blade enters a target with its tip at `entry_tip` and leaves with its tip
//! at `exit_tip`, while its base sits at `base`. The three points span the
//! plane the blade swept through.

use crate::errors::PlaneError;
use crate::float_types::Real;
use crate::plane::Plane;
use nalgebra::{Matrix4, Point3, Vector3};

/// One swing of a blade through a target, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeSweep {
    pub base: Point3<Real>,
    pub entry_tip: Point3<Real>,
    pub exit_tip: Point3<Real>,
}

impl BladeSweep {
    pub const fn new(base: Point3<Real>, entry_tip: Point3<Real>, exit_tip: Point3<Real>) -> Self {
        BladeSweep {
            base,
            entry_tip,
            exit_tip,
        }
    }

    /// The swept plane in world space.
    ///
    /// The normal is `(exit_tip - entry_tip) × (exit_tip - base)`.
    pub fn plane(&self) -> Result<Plane, PlaneError> {
        Plane::from_points(self.exit_tip, self.entry_tip, self.base)
    }

    /// The swept plane, flipped if needed so its normal does not point away from `up`.
    ///
    /// Keeps the positive half consistently "above" the cut regardless of
    /// swing direction.
    pub fn plane_towards(&self, up: &Vector3<Real>) -> Result<Plane, PlaneError> {
        Ok(self.plane()?.oriented_towards(up))
    }

    /// The swept plane expressed in a mesh's local space.
    ///
    /// `world_to_local` is the inverse of the mesh's model matrix. Orientation
    /// towards `up` (world space) happens before the transform.
    pub fn local_plane(
        &self,
        world_to_local: &Matrix4<Real>,
        up: Option<&Vector3<Real>>,
    ) -> Result<Plane, PlaneError> {
        let plane = match up {
            Some(up) => self.plane_towards(up)?,
            None => self.plane()?,
        };
        plane.transformed(world_to_local)
    }
}
