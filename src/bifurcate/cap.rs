//! Cap generation: closing the hole a cut leaves in each half.
//!
//! The cut segments are welded into boundary loops, then each strategy turns
//! the loops (or the raw segments) into flat triangles lying in the plane.
//! Every triangle returned here faces along the plane normal; the caller
//! reverses the winding for the positive side.

use crate::float_types::{Real, real_bits};
use crate::mesh::{QuantizedPoint, face_normal, triangle_area};
use crate::plane::Plane;
use geo::{Area, Centroid, Contains, Coord, LineString, Point, Polygon as GeoPolygon};
use hashbrown::{HashMap, HashSet};
use nalgebra::{Point3, Vector3};

/// How the cut boundary is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapStrategy {
    /// Fan every cut segment to the midpoint of the two intersection points
    /// that are furthest apart. Cheap and exact for convex cross-sections
    /// only; concave or multi-loop sections get overlapping caps.
    MidpointFan,
    /// Weld the segments into loops and fan each loop from its area centroid.
    /// Exact for star-shaped loops; holes are not subtracted.
    CentroidFan,
    /// Weld the segments into loops, nest holes inside their outer loops and
    /// triangulate each region properly. Loops the triangulator rejects fall
    /// back to [`CapStrategy::CentroidFan`].
    #[default]
    Triangulated,
}

/// A chain of cut points welded at shared endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoop {
    pub points: Vec<Point3<Real>>,
    /// `false` when the chain ran into a dead end (open surface, non-manifold input).
    pub closed: bool,
}

/// Build cap triangles for `segments`, all facing along `plane.normal`.
pub(crate) fn cap_triangles(
    segments: &[[Point3<Real>; 2]],
    plane: &Plane,
    strategy: CapStrategy,
    tolerance: Real,
) -> Vec<[Point3<Real>; 3]> {
    // a lone segment encloses nothing: every strategy yields only zero-area
    // triangles for it, and `orient` drops those
    if segments.is_empty() {
        return Vec::new();
    }

    let raw = match strategy {
        CapStrategy::MidpointFan => midpoint_fan(segments),
        CapStrategy::CentroidFan => weld_loops(segments)
            .iter()
            .flat_map(|boundary| centroid_fan(boundary, plane))
            .collect(),
        CapStrategy::Triangulated => triangulate_loops(&weld_loops(segments), plane),
    };

    raw.into_iter()
        .filter_map(|tri| orient(tri, plane, tolerance))
        .collect()
}

/// Flip `tri` to face along the plane normal; `None` if it has no area.
fn orient(tri: [Point3<Real>; 3], plane: &Plane, tolerance: Real) -> Option<[Point3<Real>; 3]> {
    let [a, b, c] = tri;
    if triangle_area(&a, &b, &c) <= tolerance * tolerance {
        return None;
    }
    if face_normal(&a, &b, &c).dot(&plane.normal) < 0.0 {
        Some([a, c, b])
    } else {
        Some([a, b, c])
    }
}

fn midpoint_fan(segments: &[[Point3<Real>; 2]]) -> Vec<[Point3<Real>; 3]> {
    let points: Vec<&Point3<Real>> = segments.iter().flatten().collect();

    let mut furthest = (points[0], points[0], 0.0);
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            let distance = (*q - *p).norm_squared();
            if distance > furthest.2 {
                furthest = (*p, *q, distance);
            }
        }
    }
    let mid = nalgebra::center(furthest.0, furthest.1);

    segments.iter().map(|[a, b]| [mid, *a, *b]).collect()
}

/// Weld cut segments into boundary loops.
///
/// Endpoints are matched by quantized position. Neighbouring triangles
/// compute their shared cut point identically, so on a closed mesh every
/// chain closes.
pub fn weld_loops(segments: &[[Point3<Real>; 2]]) -> Vec<BoundaryLoop> {
    // drop collapsed and duplicate segments (coincident faces cut twice)
    let mut seen = HashSet::new();
    let segments: Vec<([QuantizedPoint; 2], [Point3<Real>; 2])> = segments
        .iter()
        .filter_map(|&[a, b]| {
            let (ka, kb) = (QuantizedPoint::new(&a), QuantizedPoint::new(&b));
            let key = if ka < kb { (ka, kb) } else { (kb, ka) };
            (ka != kb && seen.insert(key)).then_some(([ka, kb], [a, b]))
        })
        .collect();

    // point key -> (segment, which end)
    let mut adjacency: HashMap<QuantizedPoint, Vec<(usize, usize)>> = HashMap::new();
    for (i, (keys, _)) in segments.iter().enumerate() {
        adjacency.entry(keys[0]).or_default().push((i, 0));
        adjacency.entry(keys[1]).or_default().push((i, 1));
    }

    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();

    // follow unused segments from `key`, returning the next point reached
    let step = |key: &QuantizedPoint, used: &mut [bool]| {
        let neighbours = adjacency.get(key)?;
        let &(segment, end) = neighbours.iter().find(|(segment, _)| !used[*segment])?;
        used[segment] = true;
        let (keys, points) = &segments[segment];
        Some((keys[1 - end], points[1 - end]))
    };

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let ([first_key, mut key], [first, second]) = segments[start];
        let mut points = vec![first, second];

        // forward from the second point until the chain returns to its start
        let mut closed = false;
        while let Some((next_key, next)) = step(&key, &mut used) {
            if next_key == first_key {
                closed = true;
                break;
            }
            points.push(next);
            key = next_key;
        }

        // an open chain may continue behind its first point
        if !closed {
            let mut key = first_key;
            let mut behind = Vec::new();
            while let Some((next_key, next)) = step(&key, &mut used) {
                behind.push(next);
                key = next_key;
            }
            if !behind.is_empty() {
                behind.reverse();
                behind.extend(points);
                points = behind;
            }
        }

        loops.push(BoundaryLoop { points, closed });
    }

    let open = loops.iter().filter(|boundary| !boundary.closed).count();
    if open > 0 {
        log::warn!(
            "{open} of {} cut boundary chains do not close; the source mesh is open or non-manifold",
            loops.len()
        );
    }
    loops
}

/// Fan a loop from its area centroid (falling back to the vertex average).
fn centroid_fan(boundary: &BoundaryLoop, plane: &Plane) -> Vec<[Point3<Real>; 3]> {
    let points = &boundary.points;
    if points.len() < 2 {
        return Vec::new();
    }

    let ring: Vec<Coord<Real>> = points.iter().map(|p| to_coord(plane, p)).collect();
    let center = GeoPolygon::new(LineString::new(ring), Vec::new())
        .centroid()
        .map(|c| plane.from_2d([c.x(), c.y()]))
        .unwrap_or_else(|| {
            let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
            Point3::from(sum / points.len() as Real)
        });

    let edges = if boundary.closed {
        points.len()
    } else {
        points.len() - 1
    };
    (0..edges)
        .map(|i| [center, points[i], points[(i + 1) % points.len()]])
        .collect()
}

/// A closed loop projected into the plane's 2D frame.
struct Ring {
    coords: Vec<Coord<Real>>,
    polygon: GeoPolygon<Real>,
    area: Real,
    boundary: BoundaryLoop,
}

fn triangulate_loops(loops: &[BoundaryLoop], plane: &Plane) -> Vec<[Point3<Real>; 3]> {
    let mut triangles = Vec::new();
    let mut rings = Vec::new();
    // 2D coordinates back to the exact 3D cut points
    let mut lookup: HashMap<(u64, u64), Point3<Real>> = HashMap::new();

    for boundary in loops {
        if !boundary.closed {
            triangles.extend(centroid_fan(boundary, plane));
            continue;
        }
        // collinear cut points stay: the surface uses them, so dropping them
        // would leave T-junctions along the cut
        let coords: Vec<Coord<Real>> =
            boundary.points.iter().map(|p| to_coord(plane, p)).collect();
        if coords.len() < 3 {
            log::debug!("skipping degenerate cut loop of {} points", coords.len());
            continue;
        }
        for (c, p) in coords.iter().zip(&boundary.points) {
            lookup.insert(coord_key(c), *p);
        }
        let polygon = GeoPolygon::new(LineString::new(coords.clone()), Vec::new());
        let area = polygon.unsigned_area();
        rings.push(Ring {
            coords,
            polygon,
            area,
            boundary: boundary.clone(),
        });
    }

    // nesting depth: even rings are outer boundaries, odd rings are holes
    let depth: Vec<usize> = rings
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let probe = Point::from(ring.coords[0]);
            rings
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && other.polygon.contains(&probe))
                .count()
        })
        .collect();

    let mut holes: Vec<Vec<usize>> = vec![Vec::new(); rings.len()];
    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 0 {
            continue;
        }
        let probe = Point::from(ring.coords[0]);
        // the tightest enclosing outer ring owns the hole
        let parent = rings
            .iter()
            .enumerate()
            .filter(|(j, other)| depth[*j] + 1 == depth[i] && other.polygon.contains(&probe))
            .min_by(|(_, a), (_, b)| a.area.total_cmp(&b.area))
            .map(|(j, _)| j);
        if let Some(parent) = parent {
            holes[parent].push(i);
        }
    }

    let mut loop_count = 0;
    for (i, ring) in rings.iter().enumerate() {
        if depth[i] % 2 == 1 {
            continue;
        }
        loop_count += 1;
        let interiors: Vec<&[Coord<Real>]> =
            holes[i].iter().map(|&h| rings[h].coords.as_slice()).collect();

        match triangulate_2d(&ring.coords, &interiors) {
            Some(tris) if !tris.is_empty() => {
                triangles.extend(tris.into_iter().map(|tri| {
                    tri.map(|c| {
                        lookup
                            .get(&coord_key(&c))
                            .copied()
                            .unwrap_or_else(|| plane.from_2d([c.x, c.y]))
                    })
                }));
            },
            _ => {
                log::debug!(
                    "triangulator rejected a cut loop of {} points ({} holes); fanning it",
                    ring.coords.len(),
                    interiors.len()
                );
                triangles.extend(centroid_fan(&ring.boundary, plane));
                for &h in &holes[i] {
                    triangles.extend(centroid_fan(&rings[h].boundary, plane));
                }
            },
        }
    }
    log::trace!(
        "capped {loop_count} regions from {} loops into {} triangles",
        loops.len(),
        triangles.len()
    );
    triangles
}

#[cfg(feature = "delaunay")]
#[allow(clippy::excessive_precision)]
const MIN_ALLOWED_VALUE: Real = 1.793662034335766e-43;

/// Plane coordinates of `p`; tiny values are flushed to zero for spade.
fn to_coord(plane: &Plane, p: &Point3<Real>) -> Coord<Real> {
    let [x, y] = plane.to_2d(p);
    #[cfg(feature = "delaunay")]
    let (x, y) = (
        if x.abs() < MIN_ALLOWED_VALUE { 0.0 } else { x },
        if y.abs() < MIN_ALLOWED_VALUE { 0.0 } else { y },
    );
    Coord { x, y }
}

#[inline]
fn coord_key(c: &Coord<Real>) -> (u64, u64) {
    (real_bits(c.x), real_bits(c.y))
}

/// Triangulate a ring with holes in 2D; `None` if the triangulator fails.
fn triangulate_2d(
    outer: &[Coord<Real>],
    holes: &[&[Coord<Real>]],
) -> Option<Vec<[Coord<Real>; 3]>> {
    let polygon = GeoPolygon::new(
        LineString::new(outer.to_vec()),
        holes
            .iter()
            .map(|hole| LineString::new(hole.to_vec()))
            .collect(),
    );

    #[cfg(feature = "earcut")]
    {
        use geo::TriangulateEarcut;
        let triangulation = polygon.earcut_triangles_raw();
        let vertices = triangulation.vertices;
        let coord = |i: usize| Coord {
            x: vertices[2 * i],
            y: vertices[2 * i + 1],
        };
        Some(
            triangulation
                .triangle_indices
                .chunks_exact(3)
                .map(|tri| [coord(tri[0]), coord(tri[1]), coord(tri[2])])
                .collect(),
        )
    }

    #[cfg(feature = "delaunay")]
    {
        use geo::TriangulateSpade;
        let tris = polygon.constrained_triangulation(Default::default()).ok()?;
        Some(
            tris.into_iter()
                .map(|triangle| [triangle.0, triangle.1, triangle.2])
                .collect(),
        )
    }
}
