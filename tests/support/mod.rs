//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use bifurcate::{Bifurcation, Mesh, Plane, Side, float_types::Real};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Area of a regular `n`-gon with circumradius `r`.
pub fn ngon_area(n: usize, r: Real) -> Real {
    let n = n as Real;
    0.5 * n * r * r * (bifurcate::float_types::TAU / n).sin()
}

/// A closed hollow cylinder around the y axis, `height` tall and centred on
/// the origin. Vertices are shared between faces; normals and UVs are absent.
pub fn tube(outer: Real, inner: Real, height: Real, segments: usize) -> Mesh {
    let h = height * 0.5;
    let mut positions = Vec::with_capacity(4 * segments);
    // rings: outer bottom, outer top, inner bottom, inner top
    for (radius, y) in [(outer, -h), (outer, h), (inner, -h), (inner, h)] {
        for i in 0..segments {
            let theta = bifurcate::float_types::TAU * i as Real / segments as Real;
            positions.push(Point3::new(radius * theta.cos(), y, radius * theta.sin()));
        }
    }

    let n = segments as u32;
    let (ob, ot, ib, it) = (0, n, 2 * n, 3 * n);
    let mut indices = Vec::with_capacity(24 * segments);
    for i in 0..n {
        let j = (i + 1) % n;
        // outer wall, facing away from the axis
        indices.extend_from_slice(&[ob + i, ot + i, ob + j, ob + j, ot + i, ot + j]);
        // inner wall, facing the axis
        indices.extend_from_slice(&[ib + i, ib + j, it + i, ib + j, it + j, it + i]);
        // top, facing +y
        indices.extend_from_slice(&[it + i, it + j, ot + i, it + j, ot + j, ot + i]);
        // bottom, facing -y
        indices.extend_from_slice(&[ib + i, ob + i, ib + j, ib + j, ob + i, ob + j]);
    }
    Mesh::from_triangles(positions, indices)
}

/// Panics if a non-cap triangle of `side` has a corner on the wrong side of `plane`.
pub fn assert_no_straddling(cut: &Bifurcation, plane: &Plane, side: Side, eps: Real) {
    let mesh = cut.side(side);
    let surface = mesh.triangle_count() - cut.cap_range(side).len();
    for (i, tri) in mesh.triangles().take(surface).enumerate() {
        for p in &tri {
            let d = plane.signed_distance(p) * side.sign();
            assert!(
                d >= -eps,
                "{side:?} triangle {i} has a corner {d} on the wrong side"
            );
        }
    }
}

/// Every cap triangle of `side` must face away from the material it closes.
pub fn assert_cap_faces_out(cut: &Bifurcation, plane: &Plane, side: Side) {
    let mesh = cut.side(side);
    for i in cut.cap_range(side) {
        let facing = mesh.face_normal(i).dot(&plane.normal) * side.sign();
        assert!(
            approx_eq(facing, -1.0, 1e-6),
            "{side:?} cap triangle {i} faces {facing}"
        );
    }
}
