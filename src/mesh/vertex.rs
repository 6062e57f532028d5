//! Struct and functions for working with the per-corner attributes of a [`Mesh`](crate::mesh::Mesh).

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3};

/// A mesh vertex: position, texture coordinate and normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub uv: Vector2<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `uv`     – texture coordinate
    /// * `normal` – (optionally non‑unit) normal; it will be **copied
    ///              verbatim**
    pub const fn new(pos: Point3<Real>, uv: Vector2<Real>, normal: Vector3<Real>) -> Self {
        Vertex { pos, uv, normal }
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Position, UV and normal all use the same parameter.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let new_pos = self.pos + (other.pos - self.pos) * t;
        let new_uv = self.uv + (other.uv - self.uv) * t;
        let new_normal = self.normal + (other.normal - self.normal) * t;
        Vertex::new(new_pos, new_uv, new_normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VertexEpsilon {
    pub position: <Point3<Real> as approx::AbsDiffEq>::Epsilon,
    pub uv: <Vector2<Real> as approx::AbsDiffEq>::Epsilon,
    pub normal: <Vector3<Real> as approx::AbsDiffEq>::Epsilon,
}

impl approx::AbsDiffEq for Vertex {
    type Epsilon = VertexEpsilon;

    fn default_epsilon() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_epsilon(),
            uv: Vector2::<Real>::default_epsilon(),
            normal: Vector3::<Real>::default_epsilon(),
        }
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.pos, &other.pos, epsilon.position)
            && approx::AbsDiffEq::abs_diff_eq(&self.uv, &other.uv, epsilon.uv)
            && approx::AbsDiffEq::abs_diff_eq(&self.normal, &other.normal, epsilon.normal)
    }
}

impl approx::RelativeEq for Vertex {
    fn default_max_relative() -> Self::Epsilon {
        Self::Epsilon {
            position: Point3::<Real>::default_max_relative(),
            uv: Vector2::<Real>::default_max_relative(),
            normal: Vector3::<Real>::default_max_relative(),
        }
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        approx::RelativeEq::relative_eq(
            &self.pos,
            &other.pos,
            epsilon.position,
            max_relative.position,
        ) && approx::RelativeEq::relative_eq(&self.uv, &other.uv, epsilon.uv, max_relative.uv)
            && approx::RelativeEq::relative_eq(
                &self.normal,
                &other.normal,
                epsilon.normal,
                max_relative.normal,
            )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vertex_interpolate() {
        let v1 = Vertex::new(Point3::origin(), Vector2::new(0.0, 0.0), Vector3::x());
        let v2 = Vertex::new(Point3::new(2.0, 2.0, 2.0), Vector2::new(1.0, 0.5), Vector3::y());
        let v_mid = v1.interpolate(&v2, 0.5);

        approx::assert_relative_eq!(
            v_mid,
            Vertex::new(
                Point3::new(1.0, 1.0, 1.0),
                Vector2::new(0.5, 0.25),
                Vector3::new(0.5, 0.5, 0.0)
            )
        );
    }
}
