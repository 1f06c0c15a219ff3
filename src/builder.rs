//! Incremental hull construction.
//!
//! The builder owns the mesh arenas and both conflict lists for the duration
//! of one build: it estimates the distance tolerance, erects the initial
//! tetrahedron, then repeatedly extends the hull towards the furthest
//! outside point until the conflict list drains.

use glam::DVec3;

use crate::conflict::VertexList;
use crate::hull::{ConvexHull3d, ConvexHull3dError, DegenerateInput};
use crate::mesh::{FaceId, HalfEdgeId, Mark, Mesh, Vertex, VertexId};

/// Which non-convexity test drives a merge attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MergeKind {
    /// First pass: merge only when the larger face sees the smaller one as
    /// non-convex; otherwise defer the face to the second pass.
    NonConvexWrtLargerFace,
    /// Second pass: merge when either face sees the other as non-convex.
    NonConvex,
}

/// One suspended boundary walk of the horizon traversal.
struct HorizonFrame {
    /// The edge through which the face was entered; the walk stops here.
    edge0: HalfEdgeId,
    /// The next boundary edge to examine.
    edge: HalfEdgeId,
    /// Whether any edge of this frame has been examined yet.
    started: bool,
}

pub(crate) struct HullBuilder {
    mesh: Mesh,
    /// Outside points claimed by faces, in contiguous per-face runs.
    claimed: VertexList,
    /// Points orphaned by face deletion, awaiting reassignment.
    unclaimed: VertexList,
    /// The current horizon, as an ordered closed cycle of half-edges.
    horizon: Vec<HalfEdgeId>,
    /// Faces created for the current eye point.
    new_faces: Vec<FaceId>,
    max_vtxs: [VertexId; 3],
    min_vtxs: [VertexId; 3],
    tolerance: f64,
}

/// Computes the convex hull of the given points.
pub(crate) fn build(points: &[DVec3]) -> Result<ConvexHull3d, ConvexHull3dError> {
    if points.len() < 4 {
        return Err(ConvexHull3dError::TooFewPoints);
    }

    let mut mesh = Mesh::new();
    mesh.vertices.reserve(points.len());
    for (i, &point) in points.iter().enumerate() {
        mesh.vertices.push(Vertex::new(point, i as i32));
    }

    let mut builder = HullBuilder {
        mesh,
        claimed: VertexList::new(),
        unclaimed: VertexList::new(),
        horizon: Vec::new(),
        new_faces: Vec::new(),
        max_vtxs: [VertexId(0); 3],
        min_vtxs: [VertexId(0); 3],
        tolerance: 0.0,
    };

    builder.compute_max_and_min();
    builder.create_initial_simplex()?;
    while let Some(eye) = builder.next_point_to_add() {
        builder.add_point_to_hull(eye)?;
    }
    Ok(builder.finish())
}

impl HullBuilder {
    /// Finds the extreme vertices along each coordinate axis and derives the
    /// distance tolerance from the extent of the point cloud.
    fn compute_max_and_min(&mut self) {
        let mut max = self.mesh.vertices[0].point;
        let mut min = max;

        for (i, vertex) in self.mesh.vertices.iter().enumerate().skip(1) {
            let point = vertex.point;
            for axis in 0..3 {
                if point[axis] > max[axis] {
                    max[axis] = point[axis];
                    self.max_vtxs[axis] = VertexId(i as u32);
                } else if point[axis] < min[axis] {
                    min[axis] = point[axis];
                    self.min_vtxs[axis] = VertexId(i as u32);
                }
            }
        }

        self.tolerance = 3.0
            * f64::EPSILON
            * (max.x.abs().max(min.x.abs())
                + max.y.abs().max(min.y.abs())
                + max.z.abs().max(min.z.abs()));
    }

    /// Erects the initial tetrahedron from four affinely independent extreme
    /// points and partitions the remaining points among its faces.
    fn create_initial_simplex(&mut self) -> Result<(), ConvexHull3dError> {
        let mut max_extent = 0.0;
        let mut imax = 0;
        for axis in 0..3 {
            let extent = self.mesh.point(self.max_vtxs[axis])[axis]
                - self.mesh.point(self.min_vtxs[axis])[axis];
            if extent > max_extent {
                max_extent = extent;
                imax = axis;
            }
        }

        if max_extent <= self.tolerance {
            return Err(ConvexHull3dError::DegenerateInput(
                DegenerateInput::Coincident,
            ));
        }

        // The first two vertices are the extremes of the widest axis.
        let v0 = self.max_vtxs[imax];
        let v1 = self.min_vtxs[imax];
        let p0 = self.mesh.point(v0);
        let u01 = (self.mesh.point(v1) - p0).normalize();

        // The third vertex is the point furthest from the line through them.
        let mut max_sqr = 0.0;
        let mut nmax = DVec3::ZERO;
        let mut third = None;
        for (i, vertex) in self.mesh.vertices.iter().enumerate() {
            let id = VertexId(i as u32);
            let xprod = u01.cross(vertex.point - p0);
            let len_sqr = xprod.length_squared();
            if len_sqr > max_sqr && id != v0 && id != v1 {
                max_sqr = len_sqr;
                nmax = xprod;
                third = Some(id);
            }
        }
        let v2 = match third {
            Some(v) if max_sqr.sqrt() > 100.0 * self.tolerance => v,
            _ => {
                return Err(ConvexHull3dError::DegenerateInput(DegenerateInput::Colinear));
            }
        };
        let nmax = nmax.normalize();

        // The fourth vertex is the point furthest from the base plane.
        let d0 = self.mesh.point(v2).dot(nmax);
        let mut max_dist = 0.0;
        let mut fourth = None;
        for (i, vertex) in self.mesh.vertices.iter().enumerate() {
            let id = VertexId(i as u32);
            let dist = (vertex.point.dot(nmax) - d0).abs();
            if dist > max_dist && id != v0 && id != v1 && id != v2 {
                max_dist = dist;
                fourth = Some(id);
            }
        }
        let v3 = match fourth {
            Some(v) if max_dist > 100.0 * self.tolerance => v,
            _ => {
                return Err(ConvexHull3dError::DegenerateInput(DegenerateInput::Coplanar));
            }
        };

        // Two symmetric stitching patterns, so that all four normals point
        // away from the opposite vertex.
        let tris: [FaceId; 4];
        if self.mesh.point(v3).dot(nmax) - d0 < 0.0 {
            tris = [
                self.mesh.create_triangle(v0, v1, v2, 0.0),
                self.mesh.create_triangle(v3, v1, v0, 0.0),
                self.mesh.create_triangle(v3, v2, v1, 0.0),
                self.mesh.create_triangle(v3, v0, v2, 0.0),
            ];
            for i in 0..3 {
                let k = (i + 1) % 3;
                let a = self.mesh.edge_at(tris[i + 1], 1);
                let b = self.mesh.edge_at(tris[k + 1], 0);
                self.mesh.set_opposite(a, b);
                let a = self.mesh.edge_at(tris[i + 1], 2);
                let b = self.mesh.edge_at(tris[0], k as i32);
                self.mesh.set_opposite(a, b);
            }
        } else {
            tris = [
                self.mesh.create_triangle(v0, v2, v1, 0.0),
                self.mesh.create_triangle(v3, v0, v1, 0.0),
                self.mesh.create_triangle(v3, v1, v2, 0.0),
                self.mesh.create_triangle(v3, v2, v0, 0.0),
            ];
            for i in 0..3 {
                let k = (i + 1) % 3;
                let a = self.mesh.edge_at(tris[i + 1], 0);
                let b = self.mesh.edge_at(tris[k + 1], 1);
                self.mesh.set_opposite(a, b);
                let a = self.mesh.edge_at(tris[i + 1], 2);
                let b = self.mesh.edge_at(tris[0], ((3 - i) % 3) as i32);
                self.mesh.set_opposite(a, b);
            }
        }

        // Claim every remaining point for the face it rises furthest above.
        for i in 0..self.mesh.vertices.len() {
            let id = VertexId(i as u32);
            if id == v0 || id == v1 || id == v2 || id == v3 {
                continue;
            }
            let point = self.mesh.point(id);

            let mut max_dist = self.tolerance;
            let mut max_face = None;
            for &tri in &tris {
                let dist = self.mesh.face(tri).distance_to_plane(point);
                if dist > max_dist {
                    max_dist = dist;
                    max_face = Some(tri);
                }
            }
            if let Some(face) = max_face {
                self.add_point_to_face(id, face);
            }
        }

        Ok(())
    }

    /// Claims `vtx` for `face`, keeping the face's run contiguous with
    /// `outside` as its head.
    fn add_point_to_face(&mut self, vtx: VertexId, face: FaceId) {
        self.mesh.vertex_mut(vtx).face = Some(face);
        match self.mesh.face(face).outside {
            Some(head) => self
                .claimed
                .insert_before(vtx, head, &mut self.mesh.vertices),
            None => self.claimed.add(vtx, &mut self.mesh.vertices),
        }
        self.mesh.face_mut(face).outside = Some(vtx);
    }

    /// Releases `vtx` from `face`, advancing the face's run head if needed.
    fn remove_point_from_face(&mut self, vtx: VertexId, face: FaceId) {
        if self.mesh.face(face).outside == Some(vtx) {
            let next = self.mesh.vertex(vtx).next;
            self.mesh.face_mut(face).outside = match next {
                Some(next) if self.mesh.vertex(next).face == Some(face) => Some(next),
                _ => None,
            };
        }
        self.claimed.delete(vtx, &mut self.mesh.vertices);
    }

    /// Splices the face's whole conflict run out of the claimed list and
    /// returns its head.
    fn remove_all_points_from_face(&mut self, face: FaceId) -> Option<VertexId> {
        let head = self.mesh.face(face).outside?;

        let mut end = head;
        while let Some(next) = self.mesh.vertex(end).next {
            if self.mesh.vertex(next).face != Some(face) {
                break;
            }
            end = next;
        }
        self.claimed.delete_span(head, end, &mut self.mesh.vertices);
        self.mesh.vertex_mut(end).next = None;
        Some(head)
    }

    /// Takes the conflict run off a dying face. With an absorbing face, each
    /// point still above it is reclaimed; everything else lands in the
    /// unclaimed list.
    fn delete_face_points(&mut self, face: FaceId, absorbing: Option<FaceId>) {
        let Some(head) = self.remove_all_points_from_face(face) else {
            return;
        };

        match absorbing {
            None => self.unclaimed.add_all(head, &mut self.mesh.vertices),
            Some(absorbing) => {
                let mut vtx_next = Some(head);
                while let Some(vtx) = vtx_next {
                    vtx_next = self.mesh.vertex(vtx).next;
                    let dist = self
                        .mesh
                        .face(absorbing)
                        .distance_to_plane(self.mesh.point(vtx));
                    if dist > self.tolerance {
                        self.add_point_to_face(vtx, absorbing);
                    } else {
                        self.unclaimed.add(vtx, &mut self.mesh.vertices);
                    }
                }
            }
        }
    }

    /// Returns the furthest outside point of the first non-empty face, or
    /// `None` when the conflict list has drained.
    fn next_point_to_add(&self) -> Option<VertexId> {
        if self.claimed.is_empty() {
            return None;
        }
        let first = self.claimed.first()?;
        let eye_face = self.mesh.vertex(first).face?;

        let mut eye_vtx = None;
        let mut max_dist = 0.0;
        let mut vtx = self.mesh.face(eye_face).outside;
        while let Some(v) = vtx {
            if self.mesh.vertex(v).face != Some(eye_face) {
                break;
            }
            let dist = self.mesh.face(eye_face).distance_to_plane(self.mesh.point(v));
            if dist > max_dist {
                max_dist = dist;
                eye_vtx = Some(v);
            }
            vtx = self.mesh.vertex(v).next;
        }
        eye_vtx
    }

    /// Extends the hull to the given eye point: carve out the faces it sees,
    /// fan new faces around the horizon, merge away non-convex seams, and
    /// reassign the orphaned points.
    fn add_point_to_hull(&mut self, eye: VertexId) -> Result<(), ConvexHull3dError> {
        self.horizon.clear();
        self.unclaimed.clear();

        let eye_face = self
            .mesh
            .vertex(eye)
            .face
            .ok_or(ConvexHull3dError::InternalError("eye vertex without face"))?;
        self.remove_point_from_face(eye, eye_face);

        let eye_point = self.mesh.point(eye);
        self.calculate_horizon(eye_point, eye_face)?;

        self.new_faces.clear();
        self.add_new_faces(eye)?;

        // First merge pass: merge faces which are non-convex as determined
        // by the larger face.
        for i in 0..self.new_faces.len() {
            let face = self.new_faces[i];
            if self.mesh.face(face).mark == Mark::Visible {
                while self.do_adjacent_merge(face, MergeKind::NonConvexWrtLargerFace)? {}
            }
        }

        // Second merge pass: merge faces which are non-convex wrt either face.
        for i in 0..self.new_faces.len() {
            let face = self.new_faces[i];
            if self.mesh.face(face).mark == Mark::NonConvex {
                self.mesh.face_mut(face).mark = Mark::Visible;
                while self.do_adjacent_merge(face, MergeKind::NonConvex)? {}
            }
        }

        self.resolve_unclaimed_points();
        Ok(())
    }

    /// Depth-first traversal over the faces visible from the eye point,
    /// deleting them and collecting the boundary edges whose far faces stay
    /// visible. The collected edges form an ordered closed cycle.
    fn calculate_horizon(
        &mut self,
        eye_point: DVec3,
        start_face: FaceId,
    ) -> Result<(), ConvexHull3dError> {
        self.delete_face_points(start_face, None);
        self.mesh.face_mut(start_face).mark = Mark::Deleted;

        let first_edge = self.mesh.face(start_face).first_edge;
        let mut stack = vec![HorizonFrame {
            edge0: first_edge,
            edge: first_edge,
            started: false,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.started && frame.edge == frame.edge0 {
                stack.pop();
                continue;
            }
            frame.started = true;

            let edge = frame.edge;
            frame.edge = self.mesh.half_edge(edge).next;

            let opposite = self
                .mesh
                .half_edge(edge)
                .opposite
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
            let opp_face = self.mesh.half_edge(opposite).face;

            if self.mesh.face(opp_face).mark == Mark::Visible {
                if self.mesh.face(opp_face).distance_to_plane(eye_point) > self.tolerance {
                    // The neighbor is visible too; cross over and keep walking.
                    self.delete_face_points(opp_face, None);
                    self.mesh.face_mut(opp_face).mark = Mark::Deleted;
                    stack.push(HorizonFrame {
                        edge0: opposite,
                        edge: self.mesh.half_edge(opposite).next,
                        started: true,
                    });
                } else {
                    self.horizon.push(edge);
                }
            }
        }

        Ok(())
    }

    /// Creates the triangle fan joining the eye point to the horizon and
    /// stitches neighboring fan faces to each other.
    fn add_new_faces(&mut self, eye: VertexId) -> Result<(), ConvexHull3dError> {
        let mut hedge_side_begin = None;
        let mut hedge_side_prev: Option<HalfEdgeId> = None;

        for i in 0..self.horizon.len() {
            let horizon_he = self.horizon[i];
            let hedge_side = self.add_adjoining_face(eye, horizon_he)?;

            match hedge_side_prev {
                Some(prev) => {
                    let left_side = self.mesh.half_edge(hedge_side).next;
                    self.mesh.set_opposite(left_side, prev);
                }
                None => hedge_side_begin = Some(hedge_side),
            }

            self.new_faces.push(self.mesh.half_edge(hedge_side).face);
            hedge_side_prev = Some(hedge_side);
        }

        if let (Some(begin), Some(prev)) = (hedge_side_begin, hedge_side_prev) {
            let left_side = self.mesh.half_edge(begin).next;
            self.mesh.set_opposite(left_side, prev);
        }

        Ok(())
    }

    /// Creates one fan triangle over a horizon edge, pairing its outer edge
    /// with the existing face beyond the horizon.
    fn add_adjoining_face(
        &mut self,
        eye: VertexId,
        horizon_he: HalfEdgeId,
    ) -> Result<HalfEdgeId, ConvexHull3dError> {
        let tail = self.mesh.tail(horizon_he);
        let head = self.mesh.head(horizon_he);
        let face = self.mesh.create_triangle(eye, tail, head, 0.0);

        let outer_opposite = self
            .mesh
            .half_edge(horizon_he)
            .opposite
            .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
        let outer = self.mesh.edge_at(face, -1);
        self.mesh.set_opposite(outer, outer_opposite);

        Ok(self.mesh.edge_at(face, 0))
    }

    /// Attempts one merge of `face` with a neighbor under the given merge
    /// predicate. Returns `true` if a merge happened, in which case the
    /// caller retries.
    fn do_adjacent_merge(
        &mut self,
        face: FaceId,
        kind: MergeKind,
    ) -> Result<bool, ConvexHull3dError> {
        let he0 = self.mesh.face(face).first_edge;
        let mut hedge = he0;
        let mut convex = true;

        loop {
            let opposite = self
                .mesh
                .half_edge(hedge)
                .opposite
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
            let opp_face = self.mesh.half_edge(opposite).face;

            let adj_distance = self
                .mesh
                .opp_face_distance(hedge)
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
            let opp_distance = self
                .mesh
                .opp_face_distance(opposite)
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;

            let mut merge = false;
            match kind {
                MergeKind::NonConvex => {
                    if adj_distance > -self.tolerance || opp_distance > -self.tolerance {
                        merge = true;
                    }
                }
                MergeKind::NonConvexWrtLargerFace => {
                    // Merge when the larger face sees the smaller one as
                    // non-convex; if only the smaller one objects, leave the
                    // decision to the second pass.
                    if self.mesh.face(face).area > self.mesh.face(opp_face).area {
                        if adj_distance > -self.tolerance {
                            merge = true;
                        } else if opp_distance > -self.tolerance {
                            convex = false;
                        }
                    } else if opp_distance > -self.tolerance {
                        merge = true;
                    } else if adj_distance > -self.tolerance {
                        convex = false;
                    }
                }
            }

            if merge {
                let mut discarded = Vec::with_capacity(3);
                self.mesh.merge_adjacent_face(hedge, &mut discarded)?;
                for absorbed in discarded {
                    self.delete_face_points(absorbed, Some(face));
                }
                return Ok(true);
            }

            hedge = self.mesh.half_edge(hedge).next;
            if hedge == he0 {
                break;
            }
        }

        if !convex {
            self.mesh.face_mut(face).mark = Mark::NonConvex;
        }
        Ok(false)
    }

    /// Re-tests every unclaimed point against the visible new faces, claiming
    /// it for the face it rises furthest above, or dropping it as interior.
    fn resolve_unclaimed_points(&mut self) {
        let mut vtx_next = self.unclaimed.first();
        while let Some(vtx) = vtx_next {
            vtx_next = self.mesh.vertex(vtx).next;
            let point = self.mesh.point(vtx);

            let mut max_dist = self.tolerance;
            let mut max_face = None;
            for &new_face in &self.new_faces {
                if self.mesh.face(new_face).mark == Mark::Visible {
                    let dist = self.mesh.face(new_face).distance_to_plane(point);
                    if dist > max_dist {
                        max_dist = dist;
                        max_face = Some(new_face);
                    }
                    if max_dist > 1000.0 * self.tolerance {
                        break;
                    }
                }
            }

            if let Some(face) = max_face {
                self.add_point_to_face(vtx, face);
            }
        }
    }

    /// Compacts the surviving vertices and faces into the output record.
    fn finish(mut self) -> ConvexHull3d {
        for vertex in &mut self.mesh.vertices {
            vertex.index = -1;
        }

        // Keep only the visible faces and mark the vertices they touch.
        let mut visible = Vec::new();
        for i in 0..self.mesh.faces.len() {
            let face = FaceId(i as u32);
            if self.mesh.face(face).mark != Mark::Visible {
                continue;
            }
            let he0 = self.mesh.face(face).first_edge;
            let mut hedge = he0;
            loop {
                let head = self.mesh.head(hedge);
                self.mesh.vertex_mut(head).index = 0;
                hedge = self.mesh.half_edge(hedge).next;
                if hedge == he0 {
                    break;
                }
            }
            visible.push(face);
        }

        // Renumber the used vertices in order of first input appearance.
        let mut vertex_point_indices = Vec::new();
        let mut num_vertices = 0;
        for (i, vertex) in self.mesh.vertices.iter_mut().enumerate() {
            if vertex.index == 0 {
                vertex_point_indices.push(i as u32);
                vertex.index = num_vertices;
                num_vertices += 1;
            }
        }

        let vertices = vertex_point_indices
            .iter()
            .map(|&i| self.mesh.vertices[i as usize].point)
            .collect();

        let polygons = visible
            .iter()
            .map(|&face| {
                let he0 = self.mesh.face(face).first_edge;
                let mut indices = Vec::with_capacity(self.mesh.face(face).num_verts);
                let mut hedge = he0;
                loop {
                    indices.push(self.mesh.vertex(self.mesh.head(hedge)).index as u32);
                    hedge = self.mesh.half_edge(hedge).next;
                    if hedge == he0 {
                        break;
                    }
                }
                indices
            })
            .collect();

        ConvexHull3d {
            vertices,
            polygons,
            vertex_point_indices,
            distance_tolerance: self.tolerance,
            mesh: self.mesh,
            faces: visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConvexHull3d, ConvexHull3dError, DegenerateInput};
    use glam::DVec3;

    #[test]
    fn tolerance_follows_extent_formula() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        let hull = ConvexHull3d::try_from_points(&points).unwrap();
        assert_eq!(hull.distance_tolerance(), 9.0 * f64::EPSILON);
    }

    #[test]
    fn too_few_points() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(err, ConvexHull3dError::TooFewPoints);
        assert_eq!(err.to_string(), "less than four input points specified");
    }

    #[test]
    fn coincident_points() {
        let points = vec![DVec3::splat(1.0); 5];
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(
            err,
            ConvexHull3dError::DegenerateInput(DegenerateInput::Coincident)
        );
        assert_eq!(err.to_string(), "Input points appear to be coincident");
    }

    #[test]
    fn colinear_points() {
        // Points on the x-axis, plus one jittered well below the 100x
        // tolerance threshold.
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(1.5, 1e-14, 0.0),
        ];
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(
            err,
            ConvexHull3dError::DegenerateInput(DegenerateInput::Colinear)
        );
        assert_eq!(err.to_string(), "Input points appear to be colinear");
    }

    #[test]
    fn coplanar_points() {
        // A unit square in the z = 0 plane, plus one point barely above it.
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.5, 0.5, 1e-14),
        ];
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(
            err,
            ConvexHull3dError::DegenerateInput(DegenerateInput::Coplanar)
        );
        assert_eq!(err.to_string(), "Input points appear to be coplanar");
    }

    #[test]
    fn line_of_many_points_is_colinear() {
        let points = (0..10)
            .map(|i| DVec3::new(i as f64, 1.0, 10.0))
            .collect::<Vec<_>>();
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(
            err,
            ConvexHull3dError::DegenerateInput(DegenerateInput::Colinear)
        );
    }

    #[test]
    fn flat_grid_is_coplanar() {
        let mut points = Vec::new();
        for i in 0..3 {
            for j in 0..3 {
                points.push(DVec3::new(i as f64, j as f64, 10.0));
            }
        }
        let err = ConvexHull3d::try_from_points(&points).unwrap_err();
        assert_eq!(
            err,
            ConvexHull3dError::DegenerateInput(DegenerateInput::Coplanar)
        );
    }
}
