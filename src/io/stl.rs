use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::Mesh;
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use std::io::Cursor;

/// Export to ASCII STL
/// Convert this Mesh to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use bifurcate::Mesh;
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mesh  = Mesh::cube(1.0);
/// let text = mesh.to_stl_ascii("my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// # Ok(())
/// # }
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Convert this Mesh to a **binary STL** byte vector. Binary STL has no
/// room for a solid name.
///
/// ```rust
/// # use bifurcate::Mesh;
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let object = Mesh::cube(1.0);
/// let bytes  = object.to_stl_binary()?;
/// assert_eq!(bytes.len(), 84 + 50 * 12);
/// # Ok(())
/// # }
/// ```
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    let p = v.pos;
                    Vertex::new([p.x as f32, p.y as f32, p.z as f32])
                }),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    /// Load an ASCII or binary STL.
    ///
    /// Vertices are welded by the reader, so the mesh comes back indexed.
    /// STL stores one normal per facet, which a welded vertex cannot carry:
    /// normals and UVs are left absent.
    pub fn from_stl(bytes: &[u8]) -> Result<Mesh, IoError> {
        let stl = stl_io::read_stl(&mut Cursor::new(bytes))?;

        if u32::try_from(stl.vertices.len()).is_err() {
            return Err(IoError::MalformedInput(format!(
                "{} vertices do not fit a 32-bit index buffer",
                stl.vertices.len()
            )));
        }

        #[allow(clippy::unnecessary_cast)]
        let positions = stl
            .vertices
            .iter()
            .map(|v| Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
            .collect();
        let indices = stl
            .faces
            .iter()
            .flat_map(|face| face.vertices.map(|i| i as u32))
            .collect();

        let mesh = Mesh::from_triangles(positions, indices);
        mesh.validate()?;
        Ok(mesh)
    }
}
