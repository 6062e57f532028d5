mod support;

use bifurcate::{
    BifurcateOptions, Bifurcator, CapStrategy, Mesh, Plane, Side, bifurcate::cap::weld_loops,
    float_types::{PI, Real},
};
use nalgebra::Vector3;
use support::{approx_eq, assert_cap_faces_out, ngon_area, tube};

fn cut_with(cap: CapStrategy, mesh: &Mesh, plane: &Plane) -> bifurcate::Bifurcation {
    Bifurcator::new(BifurcateOptions::default().with_cap(cap))
        .bifurcate(mesh, plane)
        .unwrap()
}

#[test]
fn midpoint_fan_uses_one_wedge_per_segment() {
    let cube = Mesh::cube(1.0);
    let plane = Plane::from_normal(Vector3::y(), 0.0);
    let cut = cut_with(CapStrategy::MidpointFan, &cube, &plane);

    assert_eq!(cut.cap_triangles, cut.cut_segments.len());
    assert_eq!(cut.positive.triangle_count(), 14 + 8);
    assert!(approx_eq(cut.cap_area(Side::Negative), 1.0, 1e-9));
}

#[test]
fn centroid_fan_closes_convex_sections() {
    let sphere = Mesh::uv_sphere(1.0, 24, 12);
    let plane = Plane::from_normal(Vector3::new(0.2, 1.0, 0.1), -0.3);
    let cut = cut_with(CapStrategy::CentroidFan, &sphere, &plane);

    let loops = weld_loops(&cut.cut_segments);
    assert_eq!(loops.len(), 1);
    assert!(loops[0].closed);
    // one wedge per loop edge
    assert_eq!(cut.cap_triangles, loops[0].points.len());
    assert!(cut.positive.is_closed());
    assert!(cut.negative.is_closed());
}

#[test]
fn cap_approximates_the_circle() {
    // an odd stack count puts the equator in the middle of a band of quads
    let sphere = Mesh::uv_sphere(1.0, 64, 31);
    let plane = Plane::from_normal(Vector3::y(), 0.0);
    let radius = (15.0 * PI / 31.0).sin();
    for cap in [
        CapStrategy::MidpointFan,
        CapStrategy::CentroidFan,
        CapStrategy::Triangulated,
    ] {
        let cut = cut_with(cap, &sphere, &plane);
        // the section is a 64-gon inscribed in the band
        assert!(
            approx_eq(cut.cap_area(Side::Positive), ngon_area(64, radius), 1e-9),
            "{cap:?}"
        );
        assert!(cut.cap_area(Side::Positive) < PI);
    }
}

#[test]
fn tube_cap_leaves_the_bore_open() {
    let segments = 24;
    let tube = tube(1.0, 0.5, 2.0, segments);
    assert!(tube.is_closed());
    assert!(tube.signed_volume() > 0.0);

    let plane = Plane::from_normal(Vector3::y(), 0.0);
    let cut = cut_with(CapStrategy::Triangulated, &tube, &plane);

    let loops = weld_loops(&cut.cut_segments);
    assert_eq!(loops.len(), 2);
    assert!(loops.iter().all(|l| l.closed));

    let annulus = ngon_area(segments, 1.0) - ngon_area(segments, 0.5);
    for side in [Side::Positive, Side::Negative] {
        assert!(
            approx_eq(cut.cap_area(side), annulus, 1e-9),
            "{side:?}: {} vs {annulus}",
            cut.cap_area(side)
        );
        assert_cap_faces_out(&cut, &plane, side);
    }
    assert!(cut.positive.is_closed());
    assert!(cut.negative.is_closed());

    let half = tube.signed_volume() / 2.0;
    assert!(approx_eq(cut.positive.signed_volume(), half, 1e-9));
    assert!(approx_eq(cut.negative.signed_volume(), half, 1e-9));
}

#[test]
fn two_bodies_get_two_caps() {
    // two cubes side by side along x, cut across both
    let left = Mesh::cube(1.0)
        .transformed(&nalgebra::Translation3::new(-1.0, 0.0, 0.0).to_homogeneous())
        .unwrap();
    let right = Mesh::cube(1.0)
        .transformed(&nalgebra::Translation3::new(1.0, 0.0, 0.0).to_homogeneous())
        .unwrap();
    let mut both = left.clone();
    let offset = both.positions.len() as u32;
    both.positions.extend(&right.positions);
    both.uvs.extend(&right.uvs);
    both.normals.extend(&right.normals);
    both.indices.extend(right.indices.iter().map(|i| i + offset));

    let plane = Plane::from_normal(Vector3::y(), 0.1);
    let cut = cut_with(CapStrategy::Triangulated, &both, &plane);

    assert_eq!(weld_loops(&cut.cut_segments).len(), 2);
    assert!(approx_eq(cut.cap_area(Side::Positive), 2.0, 1e-9));
    assert!(cut.positive.is_closed());
    assert!(cut.negative.is_closed());
}

#[test]
fn open_surfaces_still_get_capped_where_possible() {
    // a cube without its top face: the cut still closes a loop around the walls
    let mut open_box = Mesh::cube(1.0);
    let top = (0..open_box.triangle_count())
        .find(|&i| open_box.face_normal(i).y > 0.5)
        .unwrap();
    open_box.indices.drain(3 * top..3 * top + 6);
    assert!(!open_box.is_closed());

    let plane = Plane::from_normal(Vector3::y(), 0.0);
    let cut = cut_with(CapStrategy::Triangulated, &open_box, &plane);
    assert!(approx_eq(cut.cap_area(Side::Negative), 1.0, 1e-9));
    assert!(approx_eq(
        cut.cap_area(Side::Positive),
        cut.cap_area(Side::Negative),
        Real::EPSILON
    ));
}
