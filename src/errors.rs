//! Validation errors

/// A source mesh that cannot be bifurcated.
///
/// Raised before any geometry is produced; a mesh is never partially processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMeshError {
    /// (TriangleListLength) The index list is not a whole number of triangles
    #[error("(TriangleListLength) index list length {len} is not a multiple of 3")]
    TriangleListLength { len: usize },
    /// (AttributeLength) A per-vertex attribute array disagrees with the position count
    #[error(
        "(AttributeLength) {attribute} has {found} entries but the mesh has {expected} vertices"
    )]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        found: usize,
    },
    /// (IndexOutOfRange) A triangle references a vertex that does not exist
    #[error(
        "(IndexOutOfRange) triangle {triangle} references vertex {index} (vertex count = {vertex_count})"
    )]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    /// (NonFiniteCoordinate) A vertex position has a NaN or infinite component
    #[error("(NonFiniteCoordinate) vertex {vertex} has a NaN or infinite coordinate")]
    NonFiniteCoordinate { vertex: usize },
}

/// A plane that cannot be used as a cutting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaneError {
    /// (ZeroNormal) The normal has (near) zero length
    #[error("(ZeroNormal) the plane normal has zero length")]
    ZeroNormal,
    /// (NonFinite) The normal or offset has a NaN or infinite component
    #[error("(NonFinite) the plane normal or offset is NaN or infinite")]
    NonFinite,
    /// (CollinearPoints) The points used to build the plane do not span one
    #[error("(CollinearPoints) the points are collinear and do not define a plane")]
    CollinearPoints,
    /// (SingularTransform) The transform applied to the plane cannot be inverted
    #[error("(SingularTransform) the transform is not invertible")]
    SingularTransform,
}

/// Everything that can make a bifurcation fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BifurcateError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] InvalidMeshError),
    #[error("invalid cutting plane: {0}")]
    InvalidPlane(#[from] PlaneError),
}

/// Result type for bifurcation operations.
pub type Result<T> = std::result::Result<T, BifurcateError>;
