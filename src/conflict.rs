//! The intrusive doubly linked list holding outside points.
//!
//! One list instance holds the globally claimed vertices, partitioned into
//! contiguous per-face runs; a second transient instance collects vertices
//! orphaned while the horizon is carved out. The links live on the vertices
//! themselves, so every operation is O(1) apart from splicing a whole chain.

use crate::mesh::{Vertex, VertexId};

/// An intrusive doubly linked list over the vertex arena.
#[derive(Clone, Debug, Default)]
pub(crate) struct VertexList {
    head: Option<VertexId>,
    tail: Option<VertexId>,
}

impl VertexList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the first vertex of the list, if any.
    #[inline]
    pub(crate) fn first(&self) -> Option<VertexId> {
        self.head
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Empties the list without touching the vertices' links.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }

    /// Appends a vertex to the end of the list.
    pub(crate) fn add(&mut self, vtx: VertexId, vertices: &mut [Vertex]) {
        match self.tail {
            Some(tail) => vertices[tail.index()].next = Some(vtx),
            None => self.head = Some(vtx),
        }
        vertices[vtx.index()].prev = self.tail;
        vertices[vtx.index()].next = None;
        self.tail = Some(vtx);
    }

    /// Appends a chain of vertices, linked through their `next` fields, to
    /// the end of the list.
    pub(crate) fn add_all(&mut self, chain: VertexId, vertices: &mut [Vertex]) {
        match self.tail {
            Some(tail) => vertices[tail.index()].next = Some(chain),
            None => self.head = Some(chain),
        }
        vertices[chain.index()].prev = self.tail;

        let mut vtx = chain;
        while let Some(next) = vertices[vtx.index()].next {
            vtx = next;
        }
        self.tail = Some(vtx);
    }

    /// Unlinks a single vertex from the list.
    pub(crate) fn delete(&mut self, vtx: VertexId, vertices: &mut [Vertex]) {
        let prev = vertices[vtx.index()].prev;
        let next = vertices[vtx.index()].next;
        match prev {
            Some(prev) => vertices[prev.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => vertices[next.index()].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Unlinks the contiguous span from `vtx1` through `vtx2`.
    pub(crate) fn delete_span(
        &mut self,
        vtx1: VertexId,
        vtx2: VertexId,
        vertices: &mut [Vertex],
    ) {
        let prev = vertices[vtx1.index()].prev;
        let next = vertices[vtx2.index()].next;
        match prev {
            Some(prev) => vertices[prev.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => vertices[next.index()].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Inserts `vtx` immediately before `next_vtx`.
    pub(crate) fn insert_before(
        &mut self,
        vtx: VertexId,
        next_vtx: VertexId,
        vertices: &mut [Vertex],
    ) {
        let prev = vertices[next_vtx.index()].prev;
        vertices[vtx.index()].prev = prev;
        vertices[vtx.index()].next = Some(next_vtx);
        match prev {
            Some(prev) => vertices[prev.index()].next = Some(vtx),
            None => self.head = Some(vtx),
        }
        vertices[next_vtx.index()].prev = Some(vtx);
    }
}
