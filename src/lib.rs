//! Split triangle meshes along a plane into two **capped, watertight halves**.
//!
//! A [`Bifurcator`] classifies every triangle against a [`Plane`], copies
//! whole triangles into the half they lie in, splits straddling triangles
//! into one sub-triangle on one side and two on the other, and seals both
//! halves with cap geometry along the cut.
//!
//! ```
//! use bifurcate::{Bifurcator, CutOutcome, Mesh, Plane, Side};
//! use nalgebra::Vector3;
//!
//! let sphere = Mesh::uv_sphere(1.0, 32, 16);
//! let cut = Bifurcator::default()
//!     .bifurcate(&sphere, &Plane::from_normal(Vector3::new(1.0, 1.0, 0.0), 0.2))
//!     .unwrap();
//! assert_eq!(cut.outcome, CutOutcome::Split);
//! assert!(cut.cap_triangles > 0);
//! assert!(cut.cap_area(Side::Positive) > 0.0);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import/export
//! - **delaunay**: use `geo`s `spade` feature to triangulate caps
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to classify triangles on multiple threads
//! - **earcut**: use `geo`s `earcutr` feature to triangulate caps, this conflicts with delaunay

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod bifurcate;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod plane;
pub mod sweep;
pub mod triangulated;

#[cfg(any(
    all(feature = "delaunay", feature = "earcut"),
    not(any(feature = "delaunay", feature = "earcut"))
))]
compile_error!("Either 'delaunay' or 'earcut' feature must be specified, but not both");

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use aabb::Aabb;
pub use crate::bifurcate::{
    BifurcateOptions, Bifurcation, Bifurcator, CapStrategy, CutOutcome, Excision, VertexSharing,
    bifurcate,
};
pub use errors::{BifurcateError, InvalidMeshError, PlaneError};
pub use float_types::Real;
pub use mesh::{Mesh, Vertex};
pub use plane::{Plane, Side};
pub use sweep::BladeSweep;
