//! The built-in filler-motif table.
//!
//! Clusters are authored against the canonical tile frames the tracer
//! produces: every frame starts at the origin with its first edge running
//! from `(0, 0)` to `(0, 1)`, so every cluster declares that edge as its
//! reference bounds. The five signature classes covered here are the ones a
//! traced arrangement can actually contain:
//!
//! - `LLLL`: two orthogonal lines (axis-aligned or diagonal unit square)
//! - `VCVC`: an axis line crossing a diagonal (unit rhombus)
//! - `LCCLCC`: three lines (unit hexagon)
//! - `CCCCCCCC`: all four line families (regular unit octagon)
//! - `LILILILI`: the consolidated 2×2 focus block (double square with
//!   midpoint vertices)

use crate::fillers::{Cluster, FillerLibrary, FillerShape};
use crate::geometry::Point;
use std::f64::consts::FRAC_1_SQRT_2;

const R22: f64 = FRAC_1_SQRT_2;

/// Reference edge shared by every canonical frame.
const BOUNDS: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

fn flatten(points: &[Point]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in points {
        flat.push(p.x);
        flat.push(p.y);
    }
    flat
}

fn shape(points: &[Point], colour_index: u8) -> FillerShape {
    FillerShape { path: flatten(points), colour_index }
}

fn centroid(points: &[Point]) -> Point {
    let mut sum = Point::new(0.0, 0.0);
    for p in points {
        sum = sum.add(*p);
    }
    sum.scale(1.0 / points.len() as f64)
}

/// Scale a path toward its centroid.
fn shrink(points: &[Point], factor: f64) -> Vec<Point> {
    let c = centroid(points);
    points.iter().map(|p| c.add(p.sub(c).scale(factor))).collect()
}

/// Midpoints of consecutive edges.
fn edge_midpoints(points: &[Point]) -> Vec<Point> {
    let len = points.len();
    (0..len)
        .map(|i| points[i].add(points[(i + 1) % len]).scale(0.5))
        .collect()
}

/// A star polygon alternating the outline's vertices with pulled-in edge
/// midpoints.
fn star_from_outline(points: &[Point], pull: f64) -> Vec<Point> {
    let c = centroid(points);
    let mids = edge_midpoints(points);
    let len = points.len();
    let mut star = Vec::with_capacity(len * 2);
    for i in 0..len {
        star.push(points[i]);
        star.push(c.add(mids[i].sub(c).scale(pull)));
    }
    star
}

fn square_frame() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
    ]
}

fn rhombus_frame() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(R22, 1.0 + R22),
        Point::new(R22, R22),
    ]
}

fn hexagon_frame() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(R22, 1.0 + R22),
        Point::new(1.0 + R22, 1.0 + R22),
        Point::new(1.0 + R22, R22),
        Point::new(1.0, 0.0),
    ]
}

fn octagon_frame() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(R22, 1.0 + R22),
        Point::new(1.0 + R22, 1.0 + R22),
        Point::new(1.0 + 2.0 * R22, 1.0),
        Point::new(1.0 + 2.0 * R22, 0.0),
        Point::new(1.0 + R22, -R22),
        Point::new(R22, -R22),
    ]
}

fn block_frame() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(0.0, 2.0),
        Point::new(1.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 1.0),
        Point::new(2.0, 0.0),
        Point::new(1.0, 0.0),
    ]
}

fn cluster(shapes: Vec<FillerShape>) -> Cluster {
    Cluster { bounds: BOUNDS, shapes }
}

pub(crate) fn builtin_library() -> FillerLibrary {
    let mut lib = FillerLibrary::new();

    // Squares get the classic star-in-square treatments.
    let sq = square_frame();
    lib.insert(
        "LLLL",
        cluster(vec![
            shape(&sq, 2),
            shape(&edge_midpoints(&sq), 1),
            shape(&shrink(&sq, 0.5), 3),
        ]),
    );
    lib.insert(
        "LLLL",
        cluster(vec![
            shape(&sq, 4),
            shape(&edge_midpoints(&sq), 2),
            shape(&shrink(&edge_midpoints(&sq), 0.55), 1),
        ]),
    );
    lib.insert(
        "LLLL",
        cluster(vec![
            shape(&sq, 3),
            shape(&star_from_outline(&edge_midpoints(&sq), 0.35), 1),
            shape(&shrink(&sq, 0.22), 4),
        ]),
    );

    let rh = rhombus_frame();
    lib.insert(
        "VCVC",
        cluster(vec![shape(&rh, 2), shape(&edge_midpoints(&rh), 1)]),
    );
    lib.insert(
        "VCVC",
        cluster(vec![
            shape(&rh, 3),
            shape(&shrink(&rh, 0.55), 4),
            shape(&shrink(&rh, 0.25), 1),
        ]),
    );

    let hex = hexagon_frame();
    lib.insert(
        "LCCLCC",
        cluster(vec![
            shape(&hex, 3),
            shape(&shrink(&hex, 0.55), 1),
            shape(&shrink(&hex, 0.25), 2),
        ]),
    );
    lib.insert(
        "LCCLCC",
        cluster(vec![
            shape(&hex, 2),
            shape(&star_from_outline(&hex, 0.3), 1),
            shape(&shrink(&hex, 0.2), 4),
        ]),
    );

    // Octagons carry the eight-point star: the two squares joining
    // alternating vertices.
    let oct = octagon_frame();
    let even: Vec<Point> = oct.iter().step_by(2).copied().collect();
    let odd: Vec<Point> = oct.iter().skip(1).step_by(2).copied().collect();
    lib.insert(
        "CCCCCCCC",
        cluster(vec![
            shape(&oct, 2),
            shape(&even, 3),
            shape(&odd, 4),
            shape(&shrink(&oct, 0.4), 1),
        ]),
    );
    lib.insert(
        "CCCCCCCC",
        cluster(vec![
            shape(&oct, 4),
            shape(&star_from_outline(&oct, 0.4), 1),
            shape(&shrink(&oct, 0.3), 3),
        ]),
    );

    // The consolidated 2×2 focus block: double square with midpoint
    // vertices; corners and midpoints both land on outline vertices.
    let block = block_frame();
    let corners = vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 0.0),
    ];
    let diamond = vec![
        Point::new(0.0, 1.0),
        Point::new(1.0, 2.0),
        Point::new(2.0, 1.0),
        Point::new(1.0, 0.0),
    ];
    lib.insert(
        "LILILILI",
        cluster(vec![
            shape(&corners, 2),
            shape(&diamond, 3),
            shape(&shrink(&corners, 0.5), 1),
            shape(&shrink(&diamond, 0.35), 4),
        ]),
    );
    lib.insert(
        "LILILILI",
        cluster(vec![
            shape(&corners, 3),
            shape(&star_from_outline(&block, 0.45), 1),
            shape(&shrink(&diamond, 0.4), 2),
        ]),
    );

    lib
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;

    #[test]
    fn frames_match_their_signatures() {
        // Each authoring frame must carry the signature it is filed under,
        // starting from its first vertex.
        assert_eq!(Signature::of_path(&square_frame()).key(), "LLLL");
        assert_eq!(Signature::of_path(&rhombus_frame()).key(), "VCVC");
        assert_eq!(Signature::of_path(&hexagon_frame()).key(), "LCCLCC");
        assert_eq!(Signature::of_path(&octagon_frame()).key(), "CCCCCCCC");
        assert_eq!(Signature::of_path(&block_frame()).key(), "LILILILI");
    }

    #[test]
    fn frames_have_unit_first_edge() {
        for frame in [
            square_frame(),
            rhombus_frame(),
            hexagon_frame(),
            octagon_frame(),
            block_frame(),
        ] {
            assert!((frame[0].distance(frame[1]) - 1.0).abs() < 1e-12);
            assert!(frame[0].distance(Point::new(0.0, 0.0)) < 1e-12);
            assert!(frame[1].distance(Point::new(0.0, 1.0)) < 1e-12);
        }
    }

    #[test]
    fn every_cluster_is_well_formed() {
        let lib = builtin_library();
        lib.validate().unwrap();
        for key in ["LLLL", "VCVC", "LCCLCC", "CCCCCCCC", "LILILILI"] {
            let clusters = lib.get(key).unwrap_or_else(|| panic!("missing {}", key));
            assert!(!clusters.is_empty());
            for c in clusters {
                assert!(!c.shapes.is_empty());
                for s in &c.shapes {
                    assert!(s.path.len() >= 6, "shapes are polygons");
                    assert!(s.colour_index <= 4);
                }
            }
        }
    }

    #[test]
    fn clusters_include_an_accent_shape() {
        // Every cluster layers at least one accent (index 1) detail, so a
        // decorated design always exercises the accent palette slot.
        let lib = builtin_library();
        for key in ["LLLL", "VCVC", "LCCLCC", "CCCCCCCC", "LILILILI"] {
            for c in lib.get(key).unwrap() {
                assert!(
                    c.shapes.iter().any(|s| s.colour_index == 1),
                    "no accent shape under {}",
                    key
                );
            }
        }
    }
}
