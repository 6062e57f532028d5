//! Simple closed meshes used as cut targets by the demo and the tests.

use crate::float_types::{PI, Real, TAU};
use crate::mesh::{Mesh, face_normal};
use nalgebra::{Point3, Vector2, Vector3};

impl Mesh {
    /// A single triangle with UVs `(0,0)`, `(1,0)`, `(0,1)` and its face normal.
    pub fn from_triangle(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Mesh {
        let normal = face_normal(&a, &b, &c);
        Mesh {
            positions: vec![a, b, c],
            uvs: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
            ],
            normals: vec![normal; 3],
            indices: vec![0, 1, 2],
        }
    }

    /// Axis-aligned cube of edge length `size` centred on the origin.
    ///
    /// Each face has its own four vertices (24 in total) so normals and UVs
    /// stay per-face; two triangles per face, wound counter-clockwise seen
    /// from outside.
    pub fn cube(size: Real) -> Mesh {
        let h = size * 0.5;
        // (normal, u, v) with u × v = normal
        let faces: [(Vector3<Real>, Vector3<Real>, Vector3<Real>); 6] = [
            (Vector3::x(), Vector3::y(), Vector3::z()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::z(), Vector3::x()),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), Vector3::y(), Vector3::x()),
        ];

        let mut mesh = Mesh::new();
        for (normal, u, v) in faces {
            let base = mesh.positions.len() as u32;
            let center = Point3::from(normal * h);
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.positions.push(center + u * (su * h) + v * (sv * h));
                mesh.uvs.push(Vector2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
                mesh.normals.push(normal);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// UV sphere centred on the origin.
    ///
    /// The grid has `(segments + 1) × (stacks + 1)` vertices: the seam column
    /// and the pole rows are duplicated so every vertex carries a distinct UV.
    /// Pole quads collapse to a single triangle.
    pub fn uv_sphere(radius: Real, segments: usize, stacks: usize) -> Mesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);
        let mut mesh = Mesh::new();

        for j in 0..=stacks {
            let v = j as Real / stacks as Real;
            let phi = v * PI;
            for i in 0..=segments {
                let u = i as Real / segments as Real;
                let theta = u * TAU;
                let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                mesh.positions.push(Point3::from(normal * radius));
                mesh.uvs.push(Vector2::new(u, v));
                mesh.normals.push(normal);
            }
        }

        let row = segments as u32 + 1;
        for j in 0..stacks as u32 {
            for i in 0..segments as u32 {
                let a = j * row + i;
                let b = a + 1;
                let c = b + row;
                let d = a + row;
                if j != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if j != stacks as u32 - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        mesh
    }
}
