//! # Polyhull
//!
//! Robust 3D convex hulls for `f64` point sets.
//!
//! This crate implements the quickhull algorithm with co-planar face
//! merging: the hull is maintained as a half-edge mesh whose faces may grow
//! beyond triangles, and every signed-distance decision is guarded by a
//! tolerance derived from the input extent, so that nearly degenerate
//! inputs still produce a topologically consistent, convex polyhedron.
//!
//! ## References
//!
//! - C. Bradford Barber et al. 1996. [The Quickhull Algorithm for Convex Hulls](https://www.cise.ufl.edu/~ungor/courses/fall06/papers/QuickHull.pdf) (the original paper)
//! - Dirk Gregorius. GDC 2014. [Physics for Game Programmers: Implementing Quickhull](https://archive.org/details/GDC2014Gregorius)

#![warn(missing_docs)]

mod builder;
mod conflict;
mod hull;
mod mesh;

pub use hull::{ConvexHull3d, ConvexHull3dError, DegenerateInput, PolygonFormat};
