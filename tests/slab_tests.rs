mod support;

use bifurcate::{BifurcateError, Bifurcator, Mesh, Plane, PlaneError};
use nalgebra::Vector3;
use support::approx_eq;

#[test]
fn excised_pieces_add_back_up() {
    let sphere = Mesh::uv_sphere(1.0, 32, 15);
    let first = Plane::from_normal(Vector3::new(1.0, 0.2, 0.0), -0.2);
    let second = Plane::from_normal(Vector3::new(1.0, -0.1, 0.1), 0.3);
    let excision = Bifurcator::default().excise(&sphere, &first, &second).unwrap();

    let total = excision.first_negative.signed_volume()
        + excision.second_positive.signed_volume()
        + excision.slab.signed_volume();
    assert!(approx_eq(total, sphere.signed_volume(), 1e-9));

    for piece in excision.remaining() {
        assert!(piece.is_closed());
        assert!(piece.signed_volume() > 0.0);
    }
    assert!(excision.slab.is_closed());
}

#[test]
fn excising_outside_the_mesh_removes_nothing() {
    let cube = Mesh::cube(1.0);
    let excision = Bifurcator::default()
        .excise(
            &cube,
            &Plane::from_normal(Vector3::x(), 3.0),
            &Plane::from_normal(Vector3::x(), 4.0),
        )
        .unwrap();
    assert!(excision.slab.is_empty());
    assert!(excision.second_positive.is_empty());
    assert_eq!(excision.first_negative.triangle_count(), 12);
}

#[test]
fn a_bad_second_plane_fails_before_cutting() {
    let cube = Mesh::cube(1.0);
    let result = Bifurcator::default().excise(
        &cube,
        &Plane::from_normal(Vector3::x(), 0.0),
        &Plane::from_normal(Vector3::zeros(), 0.0),
    );
    assert_eq!(
        result,
        Err(BifurcateError::InvalidPlane(PlaneError::ZeroNormal))
    );
}
