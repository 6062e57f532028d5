// main.rs
//
// Cuts a few fixture meshes and writes every half to `stl/` so the results
// can be inspected in any STL viewer.

use bifurcate::{
    BifurcateOptions, Bifurcator, BladeSweep, CapStrategy, Mesh, Plane, VertexSharing,
};
use nalgebra::{Point3, Vector3};
use std::fs;

fn write_halves(name: &str, positive: &Mesh, negative: &Mesh) {
    let _ = fs::write(
        format!("stl/{name}_positive.stl"),
        positive.to_stl_ascii(&format!("{name}_positive")),
    );
    let _ = fs::write(
        format!("stl/{name}_negative.stl"),
        negative.to_stl_ascii(&format!("{name}_negative")),
    );
}

fn main() {
    // Ensure the /stls folder exists
    let _ = fs::create_dir_all("stl");

    let cube = Mesh::cube(2.0);
    let sphere = Mesh::uv_sphere(1.0, 32, 16);

    // 1) cube through its centre
    match bifurcate::bifurcate(&cube, &Plane::from_normal(Vector3::y(), 0.0)) {
        Ok((top, bottom)) => write_halves("cube_y0", &top, &bottom),
        Err(err) => eprintln!("cube cut failed: {err}"),
    }

    // 2) sphere on a slant, once per cap strategy
    let slant = Plane::from_point_normal(Point3::new(0.0, 0.2, 0.0), Vector3::new(1.0, 2.0, 0.5));
    for (label, cap) in [
        ("midpoint", CapStrategy::MidpointFan),
        ("centroid", CapStrategy::CentroidFan),
        ("triangulated", CapStrategy::Triangulated),
    ] {
        let bifurcator = Bifurcator::new(BifurcateOptions::default().with_cap(cap));
        match bifurcator.bifurcate(&sphere, &slant) {
            Ok(cut) => write_halves(&format!("sphere_{label}"), &cut.positive, &cut.negative),
            Err(err) => eprintln!("sphere cut ({label}) failed: {err}"),
        }
    }

    // 3) smooth-shaded halves
    let smooth = Bifurcator::new(BifurcateOptions::default().with_sharing(VertexSharing::Shared));
    if let Ok(cut) = smooth.bifurcate(&sphere, &slant) {
        write_halves("sphere_smooth", &cut.positive, &cut.negative);
    }

    // 4) a sword swing through the sphere
    let swing = BladeSweep::new(
        Point3::new(-2.0, 0.5, -2.0),
        Point3::new(-2.0, 0.0, 2.0),
        Point3::new(2.0, -0.3, 2.0),
    );
    match swing.plane_towards(&Vector3::y()) {
        Ok(plane) => {
            if let Ok((upper, lower)) = bifurcate::bifurcate(&sphere, &plane) {
                write_halves("sphere_swing", &upper, &lower);
            }
        },
        Err(err) => eprintln!("degenerate swing: {err}"),
    }

    // 5) take a slab out of the cube
    match Bifurcator::default().excise(
        &cube,
        &Plane::from_normal(Vector3::x(), -0.25),
        &Plane::from_normal(Vector3::x(), 0.25),
    ) {
        Ok(excision) => {
            write_halves(
                "cube_excised",
                &excision.second_positive,
                &excision.first_negative,
            );
            let _ = fs::write("stl/cube_slab.stl", excision.slab.to_stl_ascii("cube_slab"));
        },
        Err(err) => eprintln!("excision failed: {err}"),
    }
}
