//! Splitting a mesh into the two halves on either side of a plane.
//!
//! ```
//! use ::bifurcate::{Mesh, Plane, bifurcate};
//! use nalgebra::Vector3;
//!
//! let cube = Mesh::cube(1.0);
//! let (top, bottom) = bifurcate(&cube, &Plane::from_normal(Vector3::y(), 0.0)).unwrap();
//! assert!(top.is_closed() && bottom.is_closed());
//! ```

use crate::errors::Result;
use crate::float_types::{Real, tolerance};
use crate::mesh::Mesh;
use crate::plane::{Plane, Side};
use nalgebra::Point3;
use std::ops::Range;

mod accumulator;
pub mod cap;
pub mod slab;
mod split;

use accumulator::SideAccumulator;
use split::{Piece, is_sliver};

pub use cap::CapStrategy;
pub use slab::Excision;

/// Whether output triangles share vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexSharing {
    /// Three fresh vertices per output triangle. Flat shading; vertex count
    /// is always three times the triangle count.
    #[default]
    Unshared,
    /// Source vertices are reused within each half and cut vertices are
    /// shared along the cut, so smooth shading survives the cut.
    Shared,
}

/// Options for [`Bifurcator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BifurcateOptions {
    pub cap: CapStrategy,
    pub sharing: VertexSharing,
    /// Distance below which a vertex counts as lying on the plane.
    pub tolerance: Real,
    /// A half whose surface area (caps excluded) is below this is discarded.
    /// `0.0` keeps everything.
    pub min_fragment_area: Real,
}

impl Default for BifurcateOptions {
    fn default() -> Self {
        BifurcateOptions {
            cap: CapStrategy::default(),
            sharing: VertexSharing::default(),
            tolerance: tolerance(),
            min_fragment_area: 0.0,
        }
    }
}

impl BifurcateOptions {
    pub const fn with_cap(mut self, cap: CapStrategy) -> Self {
        self.cap = cap;
        self
    }

    pub const fn with_sharing(mut self, sharing: VertexSharing) -> Self {
        self.sharing = sharing;
        self
    }

    pub const fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub const fn with_min_fragment_area(mut self, area: Real) -> Self {
        self.min_fragment_area = area;
        self
    }
}

/// How the plane related to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutOutcome {
    /// At least one triangle straddled the plane.
    Split,
    /// No triangle was cut but both halves received triangles (the plane
    /// passes between disconnected parts).
    Separated,
    /// The whole mesh lies on one side; the other half is empty.
    Untouched(Side),
}

/// The result of one bifurcation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bifurcation {
    /// Everything on the side the plane normal points to.
    pub positive: Mesh,
    /// Everything on the other side.
    pub negative: Mesh,
    /// Number of cap triangles appended at the end of each non-empty half.
    pub cap_triangles: usize,
    /// One segment per cut triangle, in source triangle order.
    pub cut_segments: Vec<[Point3<Real>; 2]>,
    pub outcome: CutOutcome,
    /// The half discarded by [`BifurcateOptions::min_fragment_area`], if any.
    pub culled: Option<Side>,
}

impl Bifurcation {
    pub const fn side(&self, side: Side) -> &Mesh {
        match side {
            Side::Positive => &self.positive,
            Side::Negative => &self.negative,
        }
    }

    /// Triangle indices of the cap in the given half.
    pub fn cap_range(&self, side: Side) -> Range<usize> {
        let mesh = self.side(side);
        let end = mesh.triangle_count();
        end.saturating_sub(self.cap_triangles)..end
    }

    /// Total area of one cap.
    pub fn cap_area(&self, side: Side) -> Real {
        self.side(side).area_of(self.cap_range(side))
    }

    /// `(positive, negative)`
    pub fn into_meshes(self) -> (Mesh, Mesh) {
        (self.positive, self.negative)
    }
}

/// Splits meshes along planes with a fixed set of [`BifurcateOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bifurcator {
    pub options: BifurcateOptions,
}

impl Bifurcator {
    pub const fn new(options: BifurcateOptions) -> Self {
        Bifurcator { options }
    }

    /// Split `mesh` into the parts on the positive and negative side of `plane`.
    ///
    /// Every source triangle is either copied whole into one half or split
    /// into one sub-triangle on one side and two on the other. Both halves
    /// are then sealed with the same cap, facing `-n` in the positive half
    /// and `+n` in the negative half.
    ///
    /// ### Errors
    /// The mesh and the plane are validated first; nothing is computed for
    /// invalid input.
    pub fn bifurcate(&self, mesh: &Mesh, plane: &Plane) -> Result<Bifurcation> {
        if let Err(err) = mesh.validate() {
            log::debug!("refusing to cut mesh: {err}");
            return Err(err.into());
        }
        if let Err(err) = plane.validate() {
            log::debug!("refusing to cut with plane {plane:?}: {err}");
            return Err(err.into());
        }
        let plane = &plane.normalized();

        let tolerance = self.options.tolerance;
        let sharing = self.options.sharing;
        let pieces = match mesh
            .bounding_box()
            .and_then(|aabb| aabb.plane_side(plane, tolerance))
        {
            // the plane misses the bounds entirely
            Some(side) => vec![Piece::Whole(side); mesh.triangle_count()],
            None => split::classify(mesh, plane, tolerance),
        };

        let mut positive = SideAccumulator::new(mesh, sharing);
        let mut negative = SideAccumulator::new(mesh, sharing);
        let mut cut_segments = Vec::new();
        let (mut split_count, mut dropped) = (0usize, 0usize);

        for (i, piece) in pieces.iter().enumerate() {
            match piece {
                Piece::Whole(Side::Positive) => positive.push_whole(mesh.triangle_indices(i)),
                Piece::Whole(Side::Negative) => negative.push_whole(mesh.triangle_indices(i)),
                Piece::Split(split) => {
                    split_count += 1;
                    let (lone, pair) = match split.lone_side {
                        Side::Positive => (&mut positive, &mut negative),
                        Side::Negative => (&mut negative, &mut positive),
                    };
                    let corners = split.lone_triangle();
                    if is_sliver(&split.positions(mesh, &corners), tolerance) {
                        dropped += 1;
                    } else {
                        lone.push_split(split, corners);
                    }
                    for corners in split.pair_triangles() {
                        if is_sliver(&split.positions(mesh, &corners), tolerance) {
                            dropped += 1;
                        } else {
                            pair.push_split(split, corners);
                        }
                    }
                    cut_segments.extend(split.segment(tolerance));
                },
            }
        }

        let caps = cap::cap_triangles(&cut_segments, plane, self.options.cap, tolerance);
        let surface = [positive.triangle_count(), negative.triangle_count()];
        for &[a, b, c] in &caps {
            negative.push_cap([a, b, c], plane.normal);
            positive.push_cap([a, c, b], -plane.normal);
        }

        let outcome = match surface {
            _ if split_count > 0 => CutOutcome::Split,
            [_, 0] => CutOutcome::Untouched(Side::Positive),
            [0, _] => CutOutcome::Untouched(Side::Negative),
            _ => CutOutcome::Separated,
        };

        log::trace!(
            "bifurcate: {} triangles -> {} positive / {} negative ({split_count} split, {dropped} slivers dropped, {} cap triangles) [{outcome:?}]",
            mesh.triangle_count(),
            surface[0],
            surface[1],
            caps.len(),
        );

        let mut bifurcation = Bifurcation {
            positive: positive.finish(),
            negative: negative.finish(),
            cap_triangles: caps.len(),
            cut_segments,
            outcome,
            culled: None,
        };
        self.cull(&mut bifurcation, surface);
        Ok(bifurcation)
    }

    /// Drop the smaller half if its surface is below the fragment threshold.
    fn cull(&self, bifurcation: &mut Bifurcation, surface: [usize; 2]) {
        let threshold = self.options.min_fragment_area;
        if threshold <= 0.0 || matches!(bifurcation.outcome, CutOutcome::Untouched(_)) {
            return;
        }
        let area = [
            bifurcation.positive.area_of(0..surface[0]),
            bifurcation.negative.area_of(0..surface[1]),
        ];
        let (side, smaller) = if area[0] <= area[1] {
            (Side::Positive, area[0])
        } else {
            (Side::Negative, area[1])
        };
        if smaller < threshold {
            log::debug!("culling {side:?} fragment of area {smaller} (threshold {threshold})");
            match side {
                Side::Positive => bifurcation.positive = Mesh::new(),
                Side::Negative => bifurcation.negative = Mesh::new(),
            }
            bifurcation.culled = Some(side);
        }
    }

    /// Remove the slab between two planes; see [`Excision`].
    pub fn excise(&self, mesh: &Mesh, first: &Plane, second: &Plane) -> Result<Excision> {
        slab::excise(self, mesh, first, second)
    }
}

/// Split `mesh` with default options and return `(positive, negative)`.
pub fn bifurcate(mesh: &Mesh, plane: &Plane) -> Result<(Mesh, Mesh)> {
    Ok(Bifurcator::default().bifurcate(mesh, plane)?.into_meshes())
}
