//! Growable per-side buffers that become the output meshes.

use crate::bifurcate::VertexSharing;
use crate::bifurcate::split::{Corner, SplitTriangle};
use crate::float_types::Real;
use crate::mesh::{Mesh, Vertex, face_normal};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector2, Vector3};

/// Collects the triangles that end up on one side of the plane.
///
/// In [`VertexSharing::Unshared`] mode every triangle gets three fresh
/// vertices. In [`VertexSharing::Shared`] mode source vertices are remapped
/// once per side and cut vertices are shared through their source edge, so
/// neighbouring triangles keep sharing vertices after the cut.
pub(crate) struct SideAccumulator<'a> {
    source: &'a Mesh,
    sharing: VertexSharing,
    mesh: Mesh,
    remap: Vec<Option<u32>>,
    cut_vertices: HashMap<(usize, usize), u32>,
}

impl<'a> SideAccumulator<'a> {
    pub fn new(source: &'a Mesh, sharing: VertexSharing) -> Self {
        let remap = match sharing {
            VertexSharing::Shared => vec![None; source.vertex_count()],
            VertexSharing::Unshared => Vec::new(),
        };
        SideAccumulator {
            source,
            sharing,
            mesh: Mesh::new(),
            remap,
            cut_vertices: HashMap::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Append an untouched source triangle.
    pub fn push_whole(&mut self, corners: [usize; 3]) {
        match self.sharing {
            VertexSharing::Unshared => {
                let [a, b, c] = corners.map(|i| self.source.vertex(i));
                let generated = face_normal(&a.pos, &b.pos, &c.pos);
                for mut vertex in [a, b, c] {
                    if !self.source.has_normals() {
                        vertex.normal = generated;
                    }
                    self.push_vertex(vertex);
                }
            },
            VertexSharing::Shared => {
                for i in corners {
                    let index = self.source_index(i);
                    self.mesh.indices.push(index);
                }
            },
        }
    }

    /// Append one sub-triangle of a split source triangle.
    pub fn push_split(&mut self, split: &SplitTriangle, corners: [Corner; 3]) {
        match self.sharing {
            VertexSharing::Unshared => {
                let [a, b, c] = corners.map(|corner| split.vertex(self.source, corner));
                let normal = face_normal(&a.pos, &b.pos, &c.pos);
                for mut vertex in [a, b, c] {
                    vertex.normal = normal;
                    self.push_vertex(vertex);
                }
            },
            VertexSharing::Shared => {
                for corner in corners {
                    let index = match corner {
                        Corner::Source(i) => self.source_index(i),
                        Corner::Cut(k) => {
                            let cut = &split.cuts[k];
                            match self.cut_vertices.get(&cut.edge) {
                                Some(&index) => index,
                                None => {
                                    let index = self.new_vertex(cut.vertex);
                                    self.cut_vertices.insert(cut.edge, index);
                                    index
                                },
                            }
                        },
                    };
                    self.mesh.indices.push(index);
                }
            },
        }
    }

    /// Append a cap triangle with zero UVs and the given flat normal.
    pub fn push_cap(&mut self, corners: [Point3<Real>; 3], normal: Vector3<Real>) {
        for pos in corners {
            self.push_vertex(Vertex::new(pos, Vector2::zeros(), normal));
        }
    }

    /// Turn the buffers into the output mesh.
    pub fn finish(self) -> Mesh {
        let mut mesh = self.mesh;
        if self.sharing == VertexSharing::Shared && !self.source.has_normals() {
            // cap vertices are never shared, so they keep their flat normal
            mesh.recompute_normals();
        }
        mesh
    }

    fn source_index(&mut self, i: usize) -> u32 {
        if let Some(index) = self.remap[i] {
            return index;
        }
        let index = self.new_vertex(self.source.vertex(i));
        self.remap[i] = Some(index);
        index
    }

    fn push_vertex(&mut self, vertex: Vertex) {
        let index = self.new_vertex(vertex);
        self.mesh.indices.push(index);
    }

    fn new_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.mesh.positions.len() as u32;
        self.mesh.positions.push(vertex.pos);
        self.mesh.uvs.push(vertex.uv);
        self.mesh.normals.push(vertex.normal);
        index
    }
}
