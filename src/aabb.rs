use crate::float_types::Real;
use crate::plane::{Plane, Side};
use nalgebra::Point3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Aabb::new(first, first), |aabb, p| Aabb {
            mins: aabb.mins.inf(p),
            maxs: aabb.maxs.sup(p),
        }))
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3<Real>; 8] {
        let (a, b) = (self.mins, self.maxs);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// The side of `plane` the whole box lies on, using the same tie-break as
    /// the triangle classifier: everything at or above `-tolerance` is
    /// positive, everything strictly below is negative. `None` if the plane
    /// passes through the box.
    pub fn plane_side(&self, plane: &Plane, tolerance: Real) -> Option<Side> {
        let (min, max) = self.corners().iter().fold(
            (Real::MAX, -Real::MAX),
            |(min, max), corner| {
                let d = plane.signed_distance(corner);
                (min.min(d), max.max(d))
            },
        );
        if min >= -tolerance {
            Some(Side::Positive)
        } else if max < -tolerance {
            Some(Side::Negative)
        } else {
            None
        }
    }
}
