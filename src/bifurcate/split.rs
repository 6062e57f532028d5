//! Per-triangle classification against the cutting plane.
//!
//! Classification is a pure function of one triangle, so it can run in any
//! order (and in parallel); the accumulators consume the pieces in input order.

use crate::float_types::Real;
use crate::mesh::{Mesh, Vertex, triangle_area};
use crate::plane::{Plane, Side, side_of_distance};
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What happens to one source triangle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Piece {
    /// The triangle goes unchanged to one side.
    Whole(Side),
    /// The triangle straddles the plane.
    Split(SplitTriangle),
}

/// A point where the plane crosses a source edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CutVertex {
    /// Source vertex indices of the crossed edge, smaller first.
    pub edge: (usize, usize),
    pub vertex: Vertex,
}

/// Corner of a sub-triangle: either a source vertex or one of the two cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Corner {
    Source(usize),
    Cut(usize),
}

/// A straddling triangle, rotated so the corner alone on its side comes first.
///
/// With source corners `(lone, a, b)` in winding order, `cuts[0]` lies on
/// `lone–a` and `cuts[1]` on `lone–b`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SplitTriangle {
    pub lone_side: Side,
    pub lone: usize,
    pub a: usize,
    pub b: usize,
    pub cuts: [CutVertex; 2],
}

impl SplitTriangle {
    /// The single sub-triangle on the lone corner's side.
    pub fn lone_triangle(&self) -> [Corner; 3] {
        [Corner::Source(self.lone), Corner::Cut(0), Corner::Cut(1)]
    }

    /// The two sub-triangles on the other side.
    pub fn pair_triangles(&self) -> [[Corner; 3]; 2] {
        [
            [Corner::Cut(0), Corner::Source(self.a), Corner::Source(self.b)],
            [Corner::Cut(0), Corner::Source(self.b), Corner::Cut(1)],
        ]
    }

    /// Resolve a corner to its full vertex.
    pub fn vertex(&self, mesh: &Mesh, corner: Corner) -> Vertex {
        match corner {
            Corner::Source(i) => mesh.vertex(i),
            Corner::Cut(k) => self.cuts[k].vertex,
        }
    }

    /// Positions of a sub-triangle.
    pub fn positions(&self, mesh: &Mesh, corners: &[Corner; 3]) -> [Point3<Real>; 3] {
        corners.map(|c| self.vertex(mesh, c).pos)
    }

    /// The cut segment this triangle contributes to the caps, unless it has
    /// collapsed to a point.
    pub fn segment(&self, tolerance: Real) -> Option<[Point3<Real>; 2]> {
        let (a, b) = (self.cuts[0].vertex.pos, self.cuts[1].vertex.pos);
        ((b - a).norm() > tolerance).then_some([a, b])
    }
}

/// `true` when a sub-triangle has no area worth keeping.
#[inline]
pub(crate) fn is_sliver(positions: &[Point3<Real>; 3], tolerance: Real) -> bool {
    let [a, b, c] = positions;
    triangle_area(a, b, c) <= tolerance * tolerance
}

/// Classify every triangle of `mesh`, in index order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn classify(mesh: &Mesh, plane: &Plane, tolerance: Real) -> Vec<Piece> {
    (0..mesh.triangle_count())
        .map(|i| classify_triangle(mesh, plane, mesh.triangle_indices(i), tolerance))
        .collect()
}

/// Classify every triangle of `mesh`, in index order.
#[cfg(feature = "parallel")]
pub(crate) fn classify(mesh: &Mesh, plane: &Plane, tolerance: Real) -> Vec<Piece> {
    (0..mesh.triangle_count())
        .into_par_iter()
        .map(|i| classify_triangle(mesh, plane, mesh.triangle_indices(i), tolerance))
        .collect()
}

/// Decide the fate of one triangle.
///
/// A corner within `tolerance` of the plane is on-plane. The triangle is
/// split only if it has corners strictly on both sides; otherwise it goes
/// whole to the negative side if any corner is strictly negative, else to the
/// positive side. Inside a split, on-plane corners count as positive.
pub(crate) fn classify_triangle(
    mesh: &Mesh,
    plane: &Plane,
    corners: [usize; 3],
    tolerance: Real,
) -> Piece {
    let distances = corners.map(|i| plane.signed_distance(&mesh.positions[i]));
    let has_positive = distances.iter().any(|&d| d > tolerance);
    let has_negative = distances.iter().any(|&d| d < -tolerance);

    if !(has_positive && has_negative) {
        let side = if has_negative {
            Side::Negative
        } else {
            Side::Positive
        };
        return Piece::Whole(side);
    }

    let sides = distances.map(|d| side_of_distance(d, tolerance));
    let negatives = sides.iter().filter(|&&s| s == Side::Negative).count();
    let lone_side = if negatives == 1 {
        Side::Negative
    } else {
        Side::Positive
    };
    // exactly one corner is on `lone_side`
    let k = sides.iter().position(|&s| s == lone_side).unwrap_or(0);
    let (lone, a, b) = (k, (k + 1) % 3, (k + 2) % 3);

    let cut = |other: usize| {
        cut_edge(
            mesh,
            (corners[lone], distances[lone]),
            (corners[other], distances[other]),
            lone_side,
        )
    };

    Piece::Split(SplitTriangle {
        lone_side,
        lone: corners[lone],
        a: corners[a],
        b: corners[b],
        cuts: [cut(a), cut(b)],
    })
}

/// Intersect the edge between the lone corner and another corner.
///
/// The point is always computed from the edge's positive end towards its
/// negative end, so two triangles sharing the edge produce bit-identical
/// results regardless of their winding.
fn cut_edge(
    mesh: &Mesh,
    lone: (usize, Real),
    other: (usize, Real),
    lone_side: Side,
) -> CutVertex {
    let ((p, dp), (n, dn)) = match lone_side {
        Side::Positive => (lone, other),
        Side::Negative => (other, lone),
    };
    let t = (dp / (dp - dn)).clamp(0.0, 1.0);
    let mut vertex = mesh.vertex(p).interpolate(&mesh.vertex(n), t);
    vertex.normal = vertex.normal.try_normalize(Real::EPSILON).unwrap_or(vertex.normal);
    CutVertex {
        edge: (p.min(n), p.max(n)),
        vertex,
    }
}
