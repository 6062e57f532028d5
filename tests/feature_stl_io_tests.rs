#![cfg(feature = "stl-io")]

mod support;

use bifurcate::{Bifurcator, Mesh, Plane, io::IoError};
use nalgebra::Vector3;
use support::approx_eq;

#[test]
fn ascii_stl_wraps_every_facet() {
    let cube = Mesh::cube(1.0);
    let text = cube.to_stl_ascii("cube");
    assert!(text.starts_with("solid cube\n"));
    assert!(text.trim_end().ends_with("endsolid cube"));
    assert_eq!(text.matches("facet normal").count(), 12);
    assert_eq!(text.matches("vertex ").count(), 36);
}

#[test]
fn binary_stl_has_fixed_record_sizes() {
    let cut = Bifurcator::default()
        .bifurcate(&Mesh::cube(1.0), &Plane::from_normal(Vector3::y(), 0.0))
        .unwrap();
    let bytes = cut.positive.to_stl_binary().unwrap();
    assert_eq!(bytes.len(), 84 + 50 * cut.positive.triangle_count());
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
    assert_eq!(count as usize, cut.positive.triangle_count());
}

#[test]
fn stl_round_trip_welds_vertices() {
    let bytes = Mesh::cube(2.0).to_stl_binary().unwrap();
    let mesh = Mesh::from_stl(&bytes).unwrap();

    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.vertex_count(), 8);
    assert!(!mesh.has_normals());
    assert!(!mesh.has_uvs());
    assert!(mesh.is_closed());
    assert!(approx_eq(mesh.signed_volume(), 8.0, 1e-5));

    // the loaded mesh can be cut like any other
    let cut = Bifurcator::default()
        .bifurcate(&mesh, &Plane::from_normal(Vector3::z(), 0.25))
        .unwrap();
    assert!(cut.positive.is_closed());
    assert!(approx_eq(cut.positive.signed_volume(), 3.0, 1e-5));
    assert!(approx_eq(cut.negative.signed_volume(), 5.0, 1e-5));
}

#[test]
fn ascii_stl_can_be_read_back() {
    let text = Mesh::cube(1.0).to_stl_ascii("cube");
    let mesh = Mesh::from_stl(text.as_bytes()).unwrap();
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.is_closed());
}

#[test]
fn garbage_is_rejected() {
    let result = Mesh::from_stl(b"definitely not an stl file");
    assert!(matches!(result, Err(IoError::StdIo(_))), "{result:?}");
}
