//! Property-based tests for hull construction.
//!
//! These verify, over random point clouds, that every successful build
//! passes the verifier, emits well-formed polygons over a subset of the
//! input, and is invariant (as a vertex set) under input permutation and
//! rigid rotation.

use glam::{DQuat, DVec3};
use polyhull::{ConvexHull3d, ConvexHull3dError};
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn finite_coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0
}

fn point_cloud(max_points: usize) -> impl Strategy<Value = Vec<DVec3>> {
    prop::collection::vec(
        (
            finite_coordinate(),
            finite_coordinate(),
            finite_coordinate(),
        ),
        4..=max_points,
    )
    .prop_map(|points| {
        points
            .into_iter()
            .map(|(x, y, z)| DVec3::new(x, y, z))
            .collect()
    })
}

/// Coordinates as sorted bit patterns, for order-independent comparison.
fn point_set(points: &[DVec3]) -> Vec<[u64; 3]> {
    let mut set: Vec<[u64; 3]> = points
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect();
    set.sort_unstable();
    set
}

proptest! {
    /// Every successful build passes the verifier and references only
    /// input points.
    #[test]
    fn prop_hull_passes_verifier(points in point_cloud(60)) {
        match ConvexHull3d::try_from_points(&points) {
            Ok(hull) => {
                let mut diagnostics = Vec::new();
                let ok = hull.check(|msg| diagnostics.push(msg.to_string()), None);
                prop_assert!(ok, "verifier failed: {diagnostics:?}");

                let inputs = point_set(&points);
                for vertex in hull.vertices() {
                    let key = [
                        vertex.x.to_bits(),
                        vertex.y.to_bits(),
                        vertex.z.to_bits(),
                    ];
                    prop_assert!(
                        inputs.binary_search(&key).is_ok(),
                        "hull vertex {vertex:?} is not an input point"
                    );
                }

                for polygon in hull.polygons() {
                    prop_assert!(polygon.len() >= 3);
                    for &index in polygon {
                        prop_assert!((index as usize) < hull.vertices().len());
                    }
                }

                prop_assert!(hull.volume() > 0.0);
            }
            // Random clouds may legitimately collapse to a degenerate shape.
            Err(ConvexHull3dError::DegenerateInput(_)) => {}
            Err(err) => prop_assert!(false, "unexpected build error: {err}"),
        }
    }

    /// Shuffling the input changes at most the vertex order, not the set.
    #[test]
    fn prop_permutation_invariance(
        points in point_cloud(40),
        seed in any::<u64>(),
    ) {
        let Ok(hull) = ConvexHull3d::try_from_points(&points) else {
            return Ok(());
        };

        let mut shuffled = points.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let shuffled_hull = ConvexHull3d::try_from_points(&shuffled);
        prop_assert!(shuffled_hull.is_ok(), "shuffle changed the build outcome");

        prop_assert_eq!(
            point_set(shuffled_hull.unwrap().vertices()),
            point_set(hull.vertices())
        );
    }

    /// Rotating the input rotates the hull vertices and nothing else.
    #[test]
    fn prop_rotation_invariance(
        points in point_cloud(40),
        angle in 0.0..std::f64::consts::TAU,
    ) {
        let Ok(hull) = ConvexHull3d::try_from_points(&points) else {
            return Ok(());
        };

        let rotation = DQuat::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), angle);
        let rotated: Vec<DVec3> = points.iter().map(|&p| rotation * p).collect();
        let rotated_hull = ConvexHull3d::try_from_points(&rotated);
        prop_assert!(rotated_hull.is_ok(), "rotation changed the build outcome");

        let expected: Vec<DVec3> = hull.vertices().iter().map(|&v| rotation * v).collect();
        prop_assert_eq!(
            point_set(rotated_hull.unwrap().vertices()),
            point_set(&expected)
        );
    }
}
