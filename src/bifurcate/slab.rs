//! Two-plane cuts that delete the material between the planes.

use crate::bifurcate::{Bifurcation, Bifurcator};
use crate::errors::Result;
use crate::mesh::Mesh;
use crate::plane::Plane;

/// The pieces of a slab excision.
///
/// The slab is the region on the positive side of the first plane and the
/// negative side of the second. For parallel planes facing the same way this
/// is the band between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Excision {
    /// The part of the mesh behind the first plane, capped.
    pub first_negative: Mesh,
    /// The part of the mesh in front of the second plane, capped.
    pub second_positive: Mesh,
    /// The removed slab, capped on both faces.
    pub slab: Mesh,
}

impl Excision {
    /// The two pieces that survive the cut.
    pub fn remaining(&self) -> [&Mesh; 2] {
        [&self.first_negative, &self.second_positive]
    }
}

pub(crate) fn excise(
    bifurcator: &Bifurcator,
    mesh: &Mesh,
    first: &Plane,
    second: &Plane,
) -> Result<Excision> {
    second.validate()?;
    let Bifurcation {
        positive, negative, ..
    } = bifurcator.bifurcate(mesh, first)?;
    let (second_positive, slab) = bifurcator.bifurcate(&positive, second)?.into_meshes();

    log::trace!(
        "excise: kept {} + {} triangles, removed {}",
        negative.triangle_count(),
        second_positive.triangle_count(),
        slab.triangle_count()
    );

    Ok(Excision {
        first_negative: negative,
        second_positive,
        slab,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn band_out_of_a_cube() {
        let cube = Mesh::cube(2.0);
        let excision = Bifurcator::default()
            .excise(
                &cube,
                &Plane::from_normal(Vector3::x(), -0.5),
                &Plane::from_normal(Vector3::x(), 0.5),
            )
            .unwrap();

        assert_relative_eq!(excision.first_negative.signed_volume(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(excision.second_positive.signed_volume(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(excision.slab.signed_volume(), 4.0, epsilon = 1e-9);
        for piece in excision.remaining() {
            assert!(piece.is_closed());
        }
    }
}
