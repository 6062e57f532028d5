//! `Mesh` struct: indexed triangle soup with per-vertex UVs and optional normals.

use crate::aabb::Aabb;
use crate::errors::InvalidMeshError;
use crate::float_types::{QUANTIZATION_FACTOR, Real};
use hashbrown::HashMap;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

/// A triangle mesh in the layout game engines hand out: parallel per-vertex
/// arrays plus a flat index list of consecutive triples.
///
/// `uvs` and `normals` are either empty ("absent") or exactly as long as
/// `positions`. Absent UVs read as zero; absent normals are generated from
/// triangle geometry whenever they are needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<Real>>,
    pub uvs: Vec<Vector2<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            positions: Vec::new(),
            uvs: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Build a mesh from positions and indices only; UVs and normals are absent.
    pub const fn from_triangles(positions: Vec<Point3<Real>>, indices: Vec<u32>) -> Self {
        Mesh {
            positions,
            uvs: Vec::new(),
            normals: Vec::new(),
            indices,
        }
    }

    /// Checks the structural invariants a cut relies on.
    ///
    /// ### Errors
    /// - index list not a multiple of three
    /// - UV or normal array neither empty nor as long as `positions`
    /// - an index past the end of `positions`
    /// - a NaN or infinite position
    pub fn validate(&self) -> Result<(), InvalidMeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(InvalidMeshError::TriangleListLength {
                len: self.indices.len(),
            });
        }

        let expected = self.positions.len();
        for (attribute, found) in [("uvs", self.uvs.len()), ("normals", self.normals.len())] {
            if found != 0 && found != expected {
                return Err(InvalidMeshError::AttributeLength {
                    attribute,
                    expected,
                    found,
                });
            }
        }

        if let Some(position) = self.indices.iter().position(|&i| i as usize >= expected) {
            return Err(InvalidMeshError::IndexOutOfRange {
                triangle: position / 3,
                index: self.indices[position],
                vertex_count: expected,
            });
        }

        if let Some(vertex) = self
            .positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(InvalidMeshError::NonFiniteCoordinate { vertex });
        }

        Ok(())
    }

    /// `true` when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Vertex indices of triangle `i`.
    #[inline]
    pub fn triangle_indices(&self, i: usize) -> [usize; 3] {
        [
            self.indices[3 * i] as usize,
            self.indices[3 * i + 1] as usize,
            self.indices[3 * i + 2] as usize,
        ]
    }

    /// Corner positions of triangle `i`.
    #[inline]
    pub fn triangle(&self, i: usize) -> [Point3<Real>; 3] {
        self.triangle_indices(i).map(|v| self.positions[v])
    }

    /// Iterator over the corner positions of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        (0..self.triangle_count()).map(|i| self.triangle(i))
    }

    /// All attributes of vertex `i`; absent UVs and normals read as zero.
    pub fn vertex(&self, i: usize) -> Vertex {
        Vertex::new(
            self.positions[i],
            self.uvs.get(i).copied().unwrap_or_else(Vector2::zeros),
            self.normals.get(i).copied().unwrap_or_else(Vector3::zeros),
        )
    }

    /// Unit normal of triangle `i` from its winding (zero if degenerate).
    pub fn face_normal(&self, i: usize) -> Vector3<Real> {
        let [a, b, c] = self.triangle(i);
        face_normal(&a, &b, &c)
    }

    /// Total area of all triangles.
    pub fn surface_area(&self) -> Real {
        self.triangles().map(|[a, b, c]| triangle_area(&a, &b, &c)).sum()
    }

    /// Area of the triangles in `range` (by triangle index).
    pub fn area_of(&self, range: std::ops::Range<usize>) -> Real {
        range
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                triangle_area(&a, &b, &c)
            })
            .sum()
    }

    /// **Mathematical Foundation: Divergence Theorem**
    ///
    /// `V = Σ (a · (b × c)) / 6` over all triangles. Exact for closed meshes
    /// with consistent outward winding; negative if the winding is inward.
    pub fn signed_volume(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Bounds of all referenced and unreferenced positions, `None` if there are none.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Replace the normals with area-weighted vertex normals.
    ///
    /// For meshes that do not share vertices between triangles this is the
    /// flat face normal of each triangle.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];
        for i in 0..self.triangle_count() {
            let [ia, ib, ic] = self.triangle_indices(i);
            let (a, b, c) = (self.positions[ia], self.positions[ib], self.positions[ic]);
            // un-normalized cross product weights by area
            let weighted = (b - a).cross(&(c - a));
            normals[ia] += weighted;
            normals[ib] += weighted;
            normals[ic] += weighted;
        }
        for n in &mut normals {
            *n = n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        self.normals = normals;
    }

    /// Checks if the mesh is closed
    ///
    /// ### Returns
    /// Returns `true` if every edge, matched by quantized position, is used
    /// by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for [a, b, c] in self.triangles() {
            let corners = [
                QuantizedPoint::new(&a),
                QuantizedPoint::new(&b),
                QuantizedPoint::new(&c),
            ];
            for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                let (p0, p1) = (corners[i0], corners[i1]);
                // Order them so (p0, p1) and (p1, p0) become the same key
                let key = if p0 < p1 { (p0, p1) } else { (p1, p0) };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }

        !edge_counts.is_empty() && edge_counts.values().all(|&count| count == 2)
    }

    /// Apply an affine transform: positions by `mat`, normals by its inverse
    /// transpose. Returns `None` if `mat` is not invertible.
    pub fn transformed(&self, mat: &Matrix4<Real>) -> Option<Mesh> {
        let mat_inv_transpose = mat.try_inverse()?.transpose();
        let mut mesh = self.clone();
        for pos in &mut mesh.positions {
            *pos = mat.transform_point(pos);
        }
        for normal in &mut mesh.normals {
            *normal = mat_inv_transpose
                .transform_vector(normal)
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector3::zeros);
        }
        Some(mesh)
    }
}

/// Position snapped to a `1 / QUANTIZATION_FACTOR` grid, usable as a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct QuantizedPoint(i64, i64, i64);

impl QuantizedPoint {
    pub(crate) fn new(p: &Point3<Real>) -> Self {
        QuantizedPoint(
            (p.x * QUANTIZATION_FACTOR).round() as i64,
            (p.y * QUANTIZATION_FACTOR).round() as i64,
            (p.z * QUANTIZATION_FACTOR).round() as i64,
        )
    }
}

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule, or zero if degenerate.
#[inline]
pub fn face_normal(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Vector3<Real> {
    (b - a)
        .cross(&(c - a))
        .try_normalize(Real::EPSILON * Real::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

#[inline]
pub fn triangle_area(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    (b - a).cross(&(c - a)).norm() * 0.5
}
