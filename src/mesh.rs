//! The half-edge polyhedral mesh underlying hull construction.
//!
//! Faces, half-edges, and vertices live in flat arenas and refer to each
//! other through typed indices. Absorbed faces and detached half-edges stay
//! in their arena marked dead; nothing is ever freed mid-build.

use glam::DVec3;

use crate::hull::ConvexHull3dError;

/// The index of a vertex in the mesh's vertex arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct VertexId(pub(crate) u32);

impl VertexId {
    /// Returns the underlying index of the vertex as a `usize`.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The index of a half-edge in the mesh's half-edge arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct HalfEdgeId(pub(crate) u32);

impl HalfEdgeId {
    /// Returns the underlying index of the half-edge as a `usize`.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The index of a face in the mesh's face arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FaceId(pub(crate) u32);

impl FaceId {
    /// Returns the underlying index of the face as a `usize`.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The lifecycle tag of a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    /// The face is part of the current hull.
    Visible,
    /// The face is deferred to the second merge pass.
    NonConvex,
    /// The face has been absorbed or cut away and is no longer on the hull.
    Deleted,
}

/// A wrapper around one input point.
///
/// The `index` slot is overloaded: it holds the original input index during
/// construction, then a visibility marker, and finally the compacted output
/// index during extraction.
#[derive(Clone, Debug)]
pub(crate) struct Vertex {
    /// The coordinates of the input point.
    pub(crate) point: DVec3,
    /// Input index during the build, reused by output extraction.
    pub(crate) index: i32,
    /// The face claiming this vertex as an outside point, if any.
    pub(crate) face: Option<FaceId>,
    /// Intrusive link to the previous vertex in a conflict list.
    pub(crate) prev: Option<VertexId>,
    /// Intrusive link to the next vertex in a conflict list.
    pub(crate) next: Option<VertexId>,
}

impl Vertex {
    pub(crate) fn new(point: DVec3, index: i32) -> Self {
        Self {
            point,
            index,
            face: None,
            prev: None,
            next: None,
        }
    }
}

/// An oriented edge belonging to exactly one face.
#[derive(Clone, Debug)]
pub(crate) struct HalfEdge {
    /// The head vertex of the edge.
    pub(crate) vertex: VertexId,
    /// The face on the interior side of the edge.
    pub(crate) face: FaceId,
    /// The successor around `face`.
    pub(crate) next: HalfEdgeId,
    /// The predecessor around `face`.
    pub(crate) prev: HalfEdgeId,
    /// The paired half-edge on the adjacent face.
    pub(crate) opposite: Option<HalfEdgeId>,
}

/// A convex polygon embedded in a plane.
#[derive(Clone, Debug)]
pub(crate) struct Face {
    /// One of the face's half-edges; the `next` cycle enumerates the boundary.
    pub(crate) first_edge: HalfEdgeId,
    /// The unit normal of the face plane.
    pub(crate) normal: DVec3,
    /// The centroid of the face's vertices.
    pub(crate) centroid: DVec3,
    /// The plane offset, `normal · centroid`.
    pub(crate) plane_offset: f64,
    /// Twice the area of the face, as accumulated by the normal fan.
    pub(crate) area: f64,
    /// The number of vertices on the face boundary.
    pub(crate) num_verts: usize,
    /// The lifecycle tag of the face.
    pub(crate) mark: Mark,
    /// Head of this face's contiguous run in the claimed conflict list.
    pub(crate) outside: Option<VertexId>,
}

impl Face {
    /// Returns the signed distance from the face plane to the given point.
    #[inline]
    pub(crate) fn distance_to_plane(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.plane_offset
    }
}

/// Arena storage for the vertices, half-edges, and faces of the hull.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
}

impl Mesh {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.index()]
    }

    #[inline]
    pub(crate) fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.half_edges[id.index()]
    }

    #[inline]
    pub(crate) fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.index()]
    }

    /// Returns the coordinates of the given vertex.
    #[inline]
    pub(crate) fn point(&self, id: VertexId) -> DVec3 {
        self.vertices[id.index()].point
    }

    /// Returns the head vertex of the given half-edge.
    #[inline]
    pub(crate) fn head(&self, edge: HalfEdgeId) -> VertexId {
        self.half_edge(edge).vertex
    }

    /// Returns the tail vertex of the given half-edge.
    #[inline]
    pub(crate) fn tail(&self, edge: HalfEdgeId) -> VertexId {
        self.half_edge(self.half_edge(edge).prev).vertex
    }

    /// Returns the face on the far side of the given half-edge, if paired.
    #[inline]
    pub(crate) fn opposite_face(&self, edge: HalfEdgeId) -> Option<FaceId> {
        self.half_edge(edge)
            .opposite
            .map(|opp| self.half_edge(opp).face)
    }

    /// Returns the squared length of the given half-edge.
    #[inline]
    pub(crate) fn edge_length_squared(&self, edge: HalfEdgeId) -> f64 {
        self.point(self.head(edge))
            .distance_squared(self.point(self.tail(edge)))
    }

    /// Returns the distance from the edge's face plane to the centroid of the
    /// face on the far side, or `None` for an unpaired edge.
    #[inline]
    pub(crate) fn opp_face_distance(&self, edge: HalfEdgeId) -> Option<f64> {
        let opp_face = self.opposite_face(edge)?;
        Some(
            self.face(self.half_edge(edge).face)
                .distance_to_plane(self.face(opp_face).centroid),
        )
    }

    /// Pairs two half-edges as each other's opposite.
    #[inline]
    pub(crate) fn set_opposite(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.half_edge_mut(a).opposite = Some(b);
        self.half_edge_mut(b).opposite = Some(a);
    }

    /// Returns the face's half-edge at the given offset from its first edge.
    ///
    /// Positive offsets walk `next`, negative offsets walk `prev`.
    pub(crate) fn edge_at(&self, face: FaceId, offset: i32) -> HalfEdgeId {
        let mut edge = self.face(face).first_edge;
        let mut i = offset;
        while i > 0 {
            edge = self.half_edge(edge).next;
            i -= 1;
        }
        while i < 0 {
            edge = self.half_edge(edge).prev;
            i += 1;
        }
        edge
    }

    /// Creates a triangular face over the given vertices, in counter-clockwise
    /// winding around the outward normal. The new edges are unpaired.
    pub(crate) fn create_triangle(
        &mut self,
        v0: VertexId,
        v1: VertexId,
        v2: VertexId,
        min_area: f64,
    ) -> FaceId {
        let face = FaceId(self.faces.len() as u32);
        let base = self.half_edges.len() as u32;
        let (e0, e1, e2) = (HalfEdgeId(base), HalfEdgeId(base + 1), HalfEdgeId(base + 2));

        self.half_edges.push(HalfEdge {
            vertex: v0,
            face,
            next: e1,
            prev: e2,
            opposite: None,
        });
        self.half_edges.push(HalfEdge {
            vertex: v1,
            face,
            next: e2,
            prev: e0,
            opposite: None,
        });
        self.half_edges.push(HalfEdge {
            vertex: v2,
            face,
            next: e0,
            prev: e1,
            opposite: None,
        });

        self.faces.push(Face {
            first_edge: e0,
            normal: DVec3::ZERO,
            centroid: DVec3::ZERO,
            plane_offset: 0.0,
            area: 0.0,
            num_verts: 0,
            mark: Mark::Visible,
            outside: None,
        });

        self.compute_normal_and_centroid_with_min_area(face, min_area);
        face
    }

    /// Computes the face normal by fanning cross products around the first
    /// edge, storing the unit normal, the accumulated area, and the vertex
    /// count.
    fn compute_normal(&mut self, face: FaceId) {
        let he0 = self.face(face).first_edge;
        let he1 = self.half_edge(he0).next;
        let mut he2 = self.half_edge(he1).next;

        let p0 = self.point(self.head(he0));
        let mut d2 = self.point(self.head(he1)) - p0;

        let mut normal = DVec3::ZERO;
        let mut num_verts = 2;

        while he2 != he0 {
            let d1 = d2;
            d2 = self.point(self.head(he2)) - p0;
            normal += d1.cross(d2);
            he2 = self.half_edge(he2).next;
            num_verts += 1;
        }

        let area = normal.length();
        let face = self.face_mut(face);
        face.num_verts = num_verts;
        face.area = area;
        face.normal = normal / area;
    }

    /// Like [`compute_normal`](Self::compute_normal), but stabilizes the
    /// plane of a face whose area falls below `min_area` by removing the
    /// normal's component along the face's longest edge.
    fn compute_normal_with_min_area(&mut self, face: FaceId, min_area: f64) {
        self.compute_normal(face);

        if self.face(face).area < min_area {
            let he0 = self.face(face).first_edge;
            let mut hedge_max = he0;
            let mut len_sqr_max = self.edge_length_squared(he0);

            let mut hedge = self.half_edge(he0).next;
            while hedge != he0 {
                let len_sqr = self.edge_length_squared(hedge);
                if len_sqr > len_sqr_max {
                    hedge_max = hedge;
                    len_sqr_max = len_sqr;
                }
                hedge = self.half_edge(hedge).next;
            }

            let p2 = self.point(self.head(hedge_max));
            let p1 = self.point(self.tail(hedge_max));
            let u = (p2 - p1) / len_sqr_max.sqrt();

            let face = self.face_mut(face);
            let dot = face.normal.dot(u);
            face.normal = (face.normal - dot * u).normalize();
        }
    }

    fn compute_centroid(&mut self, face: FaceId) {
        let he0 = self.face(face).first_edge;
        let mut centroid = DVec3::ZERO;
        let mut hedge = he0;
        loop {
            centroid += self.point(self.head(hedge));
            hedge = self.half_edge(hedge).next;
            if hedge == he0 {
                break;
            }
        }
        let num_verts = self.face(face).num_verts as f64;
        self.face_mut(face).centroid = centroid / num_verts;
    }

    /// Recomputes the face's plane data and verifies that the boundary walk
    /// agrees with the recorded vertex count.
    pub(crate) fn compute_normal_and_centroid(
        &mut self,
        face: FaceId,
    ) -> Result<(), ConvexHull3dError> {
        self.compute_normal(face);
        self.compute_centroid(face);
        let (normal, centroid) = {
            let face = self.face(face);
            (face.normal, face.centroid)
        };
        self.face_mut(face).plane_offset = normal.dot(centroid);

        let he0 = self.face(face).first_edge;
        let mut num_verts = 0;
        let mut hedge = he0;
        loop {
            num_verts += 1;
            hedge = self.half_edge(hedge).next;
            if hedge == he0 {
                break;
            }
        }
        if num_verts != self.face(face).num_verts {
            return Err(ConvexHull3dError::InternalError(
                "face vertex count mismatch",
            ));
        }
        Ok(())
    }

    fn compute_normal_and_centroid_with_min_area(&mut self, face: FaceId, min_area: f64) {
        self.compute_normal_with_min_area(face, min_area);
        self.compute_centroid(face);
        let (normal, centroid) = {
            let face = self.face(face);
            (face.normal, face.centroid)
        };
        self.face_mut(face).plane_offset = normal.dot(centroid);
    }

    /// Absorbs the face across `hedge_adj` into `hedge_adj`'s own face.
    ///
    /// Every face taken off the hull by the merge, including any collateral
    /// triangle collapsed while stitching the joins, is appended to
    /// `discarded`.
    pub(crate) fn merge_adjacent_face(
        &mut self,
        hedge_adj: HalfEdgeId,
        discarded: &mut Vec<FaceId>,
    ) -> Result<(), ConvexHull3dError> {
        let face = self.half_edge(hedge_adj).face;
        let hedge_opp = self
            .half_edge(hedge_adj)
            .opposite
            .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
        let opp_face = self.half_edge(hedge_opp).face;

        discarded.push(opp_face);
        self.face_mut(opp_face).mark = Mark::Deleted;

        let mut hedge_adj_prev = self.half_edge(hedge_adj).prev;
        let mut hedge_adj_next = self.half_edge(hedge_adj).next;
        let mut hedge_opp_prev = self.half_edge(hedge_opp).prev;
        let mut hedge_opp_next = self.half_edge(hedge_opp).next;

        // Skip past runs where the two faces share several consecutive edges.
        while self.opposite_face(hedge_adj_prev) == Some(opp_face) {
            hedge_adj_prev = self.half_edge(hedge_adj_prev).prev;
            hedge_opp_next = self.half_edge(hedge_opp_next).next;
        }
        while self.opposite_face(hedge_adj_next) == Some(opp_face) {
            hedge_opp_prev = self.half_edge(hedge_opp_prev).prev;
            hedge_adj_next = self.half_edge(hedge_adj_next).next;
        }

        // Hand the non-shared portion of the absorbed boundary to `face`.
        let mut hedge = hedge_opp_next;
        loop {
            self.half_edge_mut(hedge).face = face;
            if hedge == hedge_opp_prev {
                break;
            }
            hedge = self.half_edge(hedge).next;
        }

        if hedge_adj == self.face(face).first_edge {
            self.face_mut(face).first_edge = hedge_adj_next;
        }

        // Stitch the joins at the head and at the tail of the shared run.
        if let Some(collapsed) = self.connect_half_edges(face, hedge_opp_prev, hedge_adj_next)? {
            discarded.push(collapsed);
        }
        if let Some(collapsed) = self.connect_half_edges(face, hedge_adj_prev, hedge_opp_next)? {
            discarded.push(collapsed);
        }

        self.compute_normal_and_centroid(face)?;
        self.check_consistency(face)
    }

    /// Joins two boundary sections of `face` after a merge.
    ///
    /// When the sections meet across a redundant edge (both half-edges seeing
    /// the same opposite face), the redundant edge is eliminated; a triangular
    /// opposite face collapses entirely and is returned for discarding.
    fn connect_half_edges(
        &mut self,
        face: FaceId,
        hedge_prev: HalfEdgeId,
        hedge: HalfEdgeId,
    ) -> Result<Option<FaceId>, ConvexHull3dError> {
        let mut collapsed = None;

        if self.opposite_face(hedge_prev) == self.opposite_face(hedge) {
            let opp_face = self
                .opposite_face(hedge)
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;

            if hedge_prev == self.face(face).first_edge {
                self.face_mut(face).first_edge = hedge;
            }

            let hedge_opp;
            if self.face(opp_face).num_verts == 3 {
                // The opposite face degenerates to a single edge; drop it.
                let opp = self
                    .half_edge(hedge)
                    .opposite
                    .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
                let opp_prev = self.half_edge(opp).prev;
                hedge_opp = self
                    .half_edge(opp_prev)
                    .opposite
                    .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;

                self.face_mut(opp_face).mark = Mark::Deleted;
                collapsed = Some(opp_face);
            } else {
                let opp = self
                    .half_edge(hedge)
                    .opposite
                    .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
                hedge_opp = self.half_edge(opp).next;

                if self.face(opp_face).first_edge == self.half_edge(hedge_opp).prev {
                    self.face_mut(opp_face).first_edge = hedge_opp;
                }
                let new_prev = self.half_edge(self.half_edge(hedge_opp).prev).prev;
                self.half_edge_mut(hedge_opp).prev = new_prev;
                self.half_edge_mut(new_prev).next = hedge_opp;
            }

            let new_prev = self.half_edge(hedge_prev).prev;
            self.half_edge_mut(hedge).prev = new_prev;
            self.half_edge_mut(new_prev).next = hedge;

            self.set_opposite(hedge, hedge_opp);

            // The opposite face lost an edge, so its plane data is stale.
            self.compute_normal_and_centroid(opp_face)?;
        } else {
            self.half_edge_mut(hedge_prev).next = hedge;
            self.half_edge_mut(hedge).prev = hedge_prev;
        }

        Ok(collapsed)
    }

    /// Verifies the topological invariants of a face's boundary.
    pub(crate) fn check_consistency(&self, face: FaceId) -> Result<(), ConvexHull3dError> {
        if self.face(face).num_verts < 3 {
            return Err(ConvexHull3dError::InternalError("degenerate face"));
        }

        let he0 = self.face(face).first_edge;
        let mut num_verts = 0;
        let mut hedge = he0;
        loop {
            let hedge_opp = self
                .half_edge(hedge)
                .opposite
                .ok_or(ConvexHull3dError::InternalError("half-edge without opposite"))?;
            if self.half_edge(hedge_opp).opposite != Some(hedge) {
                return Err(ConvexHull3dError::InternalError(
                    "mismatched opposite half-edge",
                ));
            }
            if self.head(hedge_opp) != self.tail(hedge) || self.head(hedge) != self.tail(hedge_opp)
            {
                return Err(ConvexHull3dError::InternalError(
                    "opposite half-edge vertices do not match",
                ));
            }
            let opp_face = self.half_edge(hedge_opp).face;
            if self.face(opp_face).mark == Mark::Deleted {
                return Err(ConvexHull3dError::InternalError(
                    "deleted neighbor on the hull boundary",
                ));
            }

            num_verts += 1;
            hedge = self.half_edge(hedge).next;
            if hedge == he0 {
                break;
            }
        }

        if num_verts != self.face(face).num_verts {
            return Err(ConvexHull3dError::InternalError(
                "face vertex count mismatch",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mesh_with_points(points: &[DVec3]) -> (Mesh, Vec<VertexId>) {
        let mut mesh = Mesh::new();
        let ids = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                mesh.vertices.push(Vertex::new(p, i as i32));
                VertexId(i as u32)
            })
            .collect();
        (mesh, ids)
    }

    #[test]
    fn triangle_plane_data() {
        let (mut mesh, ids) = mesh_with_points(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ]);
        let face = mesh.create_triangle(ids[0], ids[1], ids[2], 0.0);

        let face = mesh.face(face);
        assert_eq!(face.num_verts, 3);
        assert_relative_eq!(face.normal.x, 0.0);
        assert_relative_eq!(face.normal.y, 0.0);
        assert_relative_eq!(face.normal.z, 1.0);
        // The fan accumulates twice the triangle area.
        assert_relative_eq!(face.area, 4.0);
        assert_relative_eq!(face.plane_offset, 0.0);
        assert_relative_eq!(face.centroid.x, 2.0 / 3.0);
        assert_relative_eq!(face.centroid.y, 2.0 / 3.0);
    }

    #[test]
    fn triangle_edge_cycle() {
        let (mut mesh, ids) = mesh_with_points(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]);
        let face = mesh.create_triangle(ids[0], ids[1], ids[2], 0.0);

        let e0 = mesh.edge_at(face, 0);
        assert_eq!(mesh.edge_at(face, 3), e0);
        assert_eq!(mesh.edge_at(face, -1), mesh.edge_at(face, 2));

        // Each edge runs from the previous head to its own head.
        let e1 = mesh.edge_at(face, 1);
        assert_eq!(mesh.tail(e1), mesh.head(e0));
        assert_eq!(mesh.head(e1), ids[1]);
    }

    #[test]
    fn opposite_pairing_is_involutive() {
        let (mut mesh, ids) = mesh_with_points(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]);
        let f0 = mesh.create_triangle(ids[0], ids[1], ids[2], 0.0);
        let f1 = mesh.create_triangle(ids[1], ids[0], ids[3], 0.0);

        let a = mesh.edge_at(f0, 1);
        let b = mesh.edge_at(f1, 1);
        mesh.set_opposite(a, b);

        assert_eq!(mesh.half_edge(a).opposite, Some(b));
        assert_eq!(mesh.half_edge(b).opposite, Some(a));
        assert_eq!(mesh.opposite_face(a), Some(f1));
        assert_eq!(mesh.opposite_face(b), Some(f0));
    }

    #[test]
    fn small_area_normal_is_stabilized() {
        // A sliver triangle whose longest edge dominates the shape.
        let (mut mesh, ids) = mesh_with_points(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(5.0, 1e-9, 0.0),
        ]);
        let face = mesh.create_triangle(ids[0], ids[1], ids[2], 1.0);

        let normal = mesh.face(face).normal;
        assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
        // The stabilized normal is orthogonal to the longest edge.
        let u = DVec3::X;
        assert_relative_eq!(normal.dot(u), 0.0, epsilon = 1e-12);
    }
}
