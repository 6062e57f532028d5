//! Cutting planes: construction, point classification, edge intersection and
//! the 2D frame used to triangulate caps.

use crate::errors::PlaneError;
use crate::float_types::Real;
use nalgebra::{Matrix4, Point3, Vector3};

/// One of the two half-spaces a [`Plane`] divides space into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The half-space the plane normal points into (`n·p - w >= 0`).
    Positive,
    /// The opposite half-space.
    Negative,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Positive => Side::Negative,
            Side::Negative => Side::Positive,
        }
    }

    /// `+1.0` for [`Side::Positive`], `-1.0` for [`Side::Negative`].
    pub const fn sign(self) -> Real {
        match self {
            Side::Positive => 1.0,
            Side::Negative => -1.0,
        }
    }
}

/// An oriented plane `n·p = w` with a unit normal `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a normal vector and its distance from the origin.
    ///
    /// The normal is normalized; `w` is kept as given and is measured along
    /// the normalized normal. A zero-length normal is stored as-is and rejected
    /// later by [`Plane::validate`].
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let normal = normal.try_normalize(Real::EPSILON).unwrap_or(normal);
        Plane { normal, w }
    }

    /// Plane through `point` facing along `normal`.
    pub fn from_point_normal(point: Point3<Real>, normal: Vector3<Real>) -> Self {
        let plane = Self::from_normal(normal, 0.0);
        Plane {
            w: plane.normal.dot(&point.coords),
            ..plane
        }
    }

    /// Create a plane from three points.
    /// The normal direction follows the right-hand rule: (p2-p1) × (p3-p1)
    pub fn from_points(
        p1: Point3<Real>,
        p2: Point3<Real>,
        p3: Point3<Real>,
    ) -> Result<Self, PlaneError> {
        let normal = (p2 - p1).cross(&(p3 - p1));
        if !normal.iter().all(|c| c.is_finite()) {
            return Err(PlaneError::NonFinite);
        }
        let normal = normal
            .try_normalize(Real::EPSILON * Real::EPSILON)
            .ok_or(PlaneError::CollinearPoints)?;
        Ok(Plane {
            normal,
            w: normal.dot(&p1.coords),
        })
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Get the offset (distance from origin along the normal)
    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Checks that the plane can be used as a cutting tool.
    pub fn validate(&self) -> Result<(), PlaneError> {
        if !self.w.is_finite() || !self.normal.iter().all(|c| c.is_finite()) {
            return Err(PlaneError::NonFinite);
        }
        if self.normal.norm_squared() < 0.5 {
            return Err(PlaneError::ZeroNormal);
        }
        Ok(())
    }

    /// The same plane with a unit normal.
    ///
    /// `origin`, `to_2d`, `from_2d` and tolerance comparisons assume a unit
    /// normal. Call after [`Plane::validate`].
    pub fn normalized(&self) -> Self {
        let length = self.normal.norm();
        Plane {
            normal: self.normal / length,
            w: self.w / length,
        }
    }

    /// Flip the plane (reverse normal and distance)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Return this plane, flipped if needed so the normal does not point away from `up`.
    pub fn oriented_towards(&self, up: &Vector3<Real>) -> Self {
        if self.normal.dot(up) < 0.0 {
            self.flipped()
        } else {
            *self
        }
    }

    /// Signed distance of `point` from the plane; positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Side of `point`, treating points within `tolerance` of the plane as positive.
    #[inline]
    pub fn side_of(&self, point: &Point3<Real>, tolerance: Real) -> Side {
        side_of_distance(self.signed_distance(point), tolerance)
    }

    /// The point of the plane closest to the origin.
    pub fn origin(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: &Point3<Real>) -> Point3<Real> {
        point - self.normal * self.signed_distance(point)
    }

    /// Apply an affine transform to the plane.
    ///
    /// Points move with `mat`; the normal moves with its inverse transpose, so
    /// the result is still the set of transformed points of this plane. Use it
    /// with a world-to-local matrix to express a world-space cut in mesh space.
    pub fn transformed(&self, mat: &Matrix4<Real>) -> Result<Self, PlaneError> {
        let mat_inv_transpose = mat
            .try_inverse()
            .ok_or(PlaneError::SingularTransform)?
            .transpose();
        let point = mat.transform_point(&self.origin());
        let normal = mat_inv_transpose.transform_vector(&self.normal);
        let normal = normal
            .try_normalize(Real::EPSILON)
            .ok_or(PlaneError::SingularTransform)?;
        let plane = Plane {
            normal,
            w: normal.dot(&point.coords),
        };
        plane.validate()?;
        Ok(plane)
    }

    /// Orthonormal in-plane axes `(u, v)` with `u × v = n`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        build_orthonormal_basis(self.normal)
    }

    /// Coordinates of `point` in the plane's 2D frame (origin at [`Plane::origin`]).
    pub fn to_2d(&self, point: &Point3<Real>) -> [Real; 2] {
        let (u, v) = self.basis();
        let offset = point - self.origin();
        [offset.dot(&u), offset.dot(&v)]
    }

    /// Inverse of [`Plane::to_2d`]; the result lies on the plane.
    pub fn from_2d(&self, coords: [Real; 2]) -> Point3<Real> {
        let (u, v) = self.basis();
        self.origin() + u * coords[0] + v * coords[1]
    }
}

/// Tie-break for the side test: anything within `tolerance` counts as positive.
#[inline]
pub fn side_of_distance(distance: Real, tolerance: Real) -> Side {
    if distance >= -tolerance {
        Side::Positive
    } else {
        Side::Negative
    }
}

/// Two unit vectors spanning the plane orthogonal to `n`, right-handed with `n`.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}
