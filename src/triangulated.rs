//! A trait for any shape which can be represented by triangles
use crate::mesh::{Mesh, Vertex, face_normal};

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle.
    ///
    /// The triangle is `[v0, v1, v2]` with positions, UVs and normals.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);
}

impl Triangulated3D for Mesh {
    /// Visits triangles in index order. Absent normals are filled with the
    /// face normal of the triangle being visited.
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for i in 0..self.triangle_count() {
            let mut tri = self.triangle_indices(i).map(|v| self.vertex(v));
            if !self.has_normals() {
                let normal = face_normal(&tri[0].pos, &tri[1].pos, &tri[2].pos);
                for vertex in &mut tri {
                    vertex.normal = normal;
                }
            }
            f(tri);
        }
    }
}
