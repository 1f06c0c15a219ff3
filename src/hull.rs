//! The public hull record, its verifier, and the build error types.

use glam::DVec3;
use thiserror::Error;

use crate::builder;
use crate::mesh::{FaceId, Mark, Mesh};

/// The kind of degeneracy that prevented hull construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInput {
    /// The input points are approximately equal.
    #[error("coincident")]
    Coincident,
    /// The input points are approximately on the same line.
    #[error("colinear")]
    Colinear,
    /// The input points are approximately on the same plane.
    #[error("coplanar")]
    Coplanar,
}

/// An error returned during [`ConvexHull3d`] construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvexHull3dError {
    /// Fewer than four input points were supplied.
    #[error("less than four input points specified")]
    TooFewPoints,
    /// The input points do not span three dimensions, so no hull exists.
    #[error("Input points appear to be {0}")]
    DegenerateInput(DegenerateInput),
    /// A topological invariant failed during construction. This is a bug;
    /// please report it with a minimal reproducible example.
    #[error("Internal error: {0}")]
    InternalError(&'static str),
}

/// Formatting options for [`ConvexHull3d::polygons_with`].
///
/// All options default to off, which yields the same zero-based,
/// counter-clockwise, compacted indices as [`ConvexHull3d::polygons`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolygonFormat {
    /// Wind each polygon clockwise around its outward normal.
    pub clockwise: bool,
    /// Number vertices starting from one instead of zero.
    pub indexed_from_one: bool,
    /// Reference vertices by their original input position instead of their
    /// compacted hull index.
    pub point_relative: bool,
}

/// A 3D [convex hull]: the smallest convex polyhedron containing all input
/// points, built with the quickhull algorithm of Barber, Dobkin, and
/// Huhdanpaa, with co-planar faces merged.
///
/// [convex hull]: https://en.wikipedia.org/wiki/Convex_hull
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use polyhull::ConvexHull3d;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(21.0, 0.0, 0.0),
///     DVec3::new(0.0, 21.0, 0.0),
///     DVec3::new(0.0, 0.0, 21.0),
///     DVec3::new(1.0, 1.0, 1.0),
/// ];
///
/// let hull = ConvexHull3d::try_from_points(&points).unwrap();
///
/// // The interior point is dropped, leaving a tetrahedron.
/// assert_eq!(hull.vertices().len(), 4);
/// assert_eq!(hull.polygons().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct ConvexHull3d {
    /// The points on the hull, compacted in order of first input appearance.
    pub(crate) vertices: Vec<DVec3>,
    /// Per-face loops of indices into `vertices`, wound counter-clockwise
    /// around the outward normal.
    pub(crate) polygons: Vec<Vec<u32>>,
    /// For each hull vertex, the index of the input point it copies.
    pub(crate) vertex_point_indices: Vec<u32>,
    /// The distance tolerance derived from the input extent.
    pub(crate) distance_tolerance: f64,
    /// The finished mesh, retained for verification.
    pub(crate) mesh: Mesh,
    /// The surviving faces, in the same order as `polygons`.
    pub(crate) faces: Vec<FaceId>,
}

impl ConvexHull3d {
    /// Attempts to compute the convex hull of the given point set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvexHull3dError`] if fewer than four points are given
    /// or the points are coincident, colinear, or coplanar within tolerance.
    pub fn try_from_points(points: &[DVec3]) -> Result<Self, ConvexHull3dError> {
        builder::build(points)
    }

    /// Attempts to compute the convex hull of a flat coordinate sequence,
    /// interpreted triple-by-triple as points.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvexHull3dError`] if fewer than four points are given
    /// or the points are coincident, colinear, or coplanar within tolerance.
    pub fn try_from_coords(coords: &[f64]) -> Result<Self, ConvexHull3dError> {
        let points: Vec<DVec3> = coords
            .chunks_exact(3)
            .map(|c| DVec3::new(c[0], c[1], c[2]))
            .collect();
        builder::build(&points)
    }

    /// Returns the points on the hull, a subset of the input points.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns one index loop per face, referencing [`vertices`](Self::vertices)
    /// counter-clockwise around the outward normal.
    #[inline]
    pub fn polygons(&self) -> &[Vec<u32>] {
        &self.polygons
    }

    /// Returns, for each hull vertex, the index of the input point it copies.
    #[inline]
    pub fn vertex_point_indices(&self) -> &[u32] {
        &self.vertex_point_indices
    }

    /// Returns the distance tolerance used by every signed-distance decision
    /// during the build.
    #[inline]
    pub fn distance_tolerance(&self) -> f64 {
        self.distance_tolerance
    }

    /// Returns the face index loops reformatted per the given options.
    pub fn polygons_with(&self, format: PolygonFormat) -> Vec<Vec<u32>> {
        self.polygons
            .iter()
            .map(|polygon| {
                let mut indices: Vec<u32> = polygon
                    .iter()
                    .map(|&i| {
                        let mut index = if format.point_relative {
                            self.vertex_point_indices[i as usize]
                        } else {
                            i
                        };
                        if format.indexed_from_one {
                            index += 1;
                        }
                        index
                    })
                    .collect();
                if format.clockwise {
                    indices[1..].reverse();
                }
                indices
            })
            .collect()
    }

    /// Computes the volume of the hull by fanning tetrahedra from its first
    /// vertex. Positive for any successfully built hull.
    pub fn volume(&self) -> f64 {
        let origin = self.vertices[0];
        let mut volume = 0.0;
        for polygon in &self.polygons {
            let p0 = self.vertices[polygon[0] as usize] - origin;
            for pair in polygon[1..].windows(2) {
                let p1 = self.vertices[pair[0] as usize] - origin;
                let p2 = self.vertices[pair[1] as usize] - origin;
                volume += p0.dot(p1.cross(p2));
            }
        }
        volume / 6.0
    }

    /// Returns the hull vertex furthest in the given direction.
    pub fn support_point(&self, direction: DVec3) -> DVec3 {
        let mut max = self.vertices[0].dot(direction);
        let mut index = 0;

        for (i, vertex) in self.vertices.iter().enumerate().skip(1) {
            let dot = vertex.dot(direction);
            if dot > max {
                max = dot;
                index = i;
            }
        }

        self.vertices[index]
    }

    /// Verifies the hull against its inputs, reporting any violation to the
    /// diagnostic sink.
    ///
    /// Returns `true` iff every edge is locally convex at `tolerance`
    /// (defaulting to [`distance_tolerance`](Self::distance_tolerance)), no
    /// face carries a redundant vertex, and every input point lies within
    /// `10 · tolerance` of the hull.
    pub fn check<F: FnMut(&str)>(&self, mut sink: F, tolerance: Option<f64>) -> bool {
        let tolerance = tolerance.unwrap_or(self.distance_tolerance);

        if !self.check_faces(&mut sink, tolerance) {
            return false;
        }

        // Input containment is held to a looser bound than edge convexity.
        let point_tolerance = 10.0 * tolerance;
        for (i, vertex) in self.mesh.vertices.iter().enumerate() {
            for (k, &face) in self.faces.iter().enumerate() {
                let face = self.mesh.face(face);
                if face.mark == Mark::Visible {
                    let dist = face.distance_to_plane(vertex.point);
                    if dist > point_tolerance {
                        sink(&format!("point {i} is {dist:.3e} above face {k}"));
                        return false;
                    }
                }
            }
        }

        true
    }

    fn check_faces<F: FnMut(&str)>(&self, sink: &mut F, tolerance: f64) -> bool {
        for (k, &face_id) in self.faces.iter().enumerate() {
            let face = self.mesh.face(face_id);
            if face.mark != Mark::Visible {
                continue;
            }

            let he0 = face.first_edge;
            let mut hedge = he0;
            loop {
                let Some(opposite) = self.mesh.half_edge(hedge).opposite else {
                    sink(&format!("face {k} has a half-edge without an opposite"));
                    return false;
                };
                let opp_face = self.mesh.face(self.mesh.half_edge(opposite).face);

                let tail = self.mesh.vertex(self.mesh.tail(hedge)).index;
                let head = self.mesh.vertex(self.mesh.head(hedge)).index;

                let dist = face.distance_to_plane(opp_face.centroid);
                if dist > tolerance {
                    sink(&format!(
                        "edge {tail}-{head} of face {k} is non-convex by {dist:.3e}"
                    ));
                    return false;
                }
                let dist = opp_face.distance_to_plane(face.centroid);
                if dist > tolerance {
                    sink(&format!(
                        "edge {head}-{tail} into face {k} is non-convex by {dist:.3e}"
                    ));
                    return false;
                }

                let next = self.mesh.half_edge(hedge).next;
                if self.mesh.opposite_face(next) == self.mesh.opposite_face(hedge) {
                    sink(&format!("redundant vertex {head} in face {k}"));
                    return false;
                }

                hedge = next;
                if hedge == he0 {
                    break;
                }
            }
        }
        true
    }
}
