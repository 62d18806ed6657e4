//! Boundary tracing: reconstruct the polygon around every multi-user grid
//! vertex, stitch neighbours into a shared frame, and collect the outer
//! boundary. Also consolidates focus-group tiles into composite polygons.

use crate::geometry::Point;
use crate::grid::Grid;
use std::f64::consts::FRAC_1_SQRT_2;

/// One reconstructed tile: the grid vertex it surrounds and its polygon in
/// the stitched trace frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub vertex: Point,
    pub path: Vec<Point>,
}

/// Canonical walk order over the 3×3 compass enumeration (center excluded).
const ORDERED_DIRS: [usize; 8] = [5, 2, 1, 0, 3, 6, 7, 8];

/// Integer raster steps for each compass index.
const INT_DIR_VECS: [Point; 9] = [
    Point::new(-1.0, -1.0),
    Point::new(0.0, -1.0),
    Point::new(1.0, -1.0),
    Point::new(-1.0, 0.0),
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
    Point::new(-1.0, 1.0),
    Point::new(0.0, 1.0),
    Point::new(1.0, 1.0),
];

const R22: f64 = FRAC_1_SQRT_2;

/// Unit direction vectors for each compass index (diagonals normalized).
const DIR_VECS: [Point; 9] = [
    Point::new(-R22, -R22),
    Point::new(0.0, -1.0),
    Point::new(R22, -R22),
    Point::new(-1.0, 0.0),
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
    Point::new(-R22, R22),
    Point::new(0.0, 1.0),
    Point::new(R22, R22),
];

/// Tolerance for matching a tile edge against an alignment hint.
const ALIGN_EPS: f64 = 1e-5;

/// Tolerance for directed-segment cancellation during consolidation.
const SEG_EPS: f64 = 1e-4;

#[inline]
fn compass_index(dx: f64, dy: f64) -> usize {
    ((dy as i32 + 1) * 3 + (dx as i32 + 1)) as usize
}

/// Trace every tile reachable from the first multi-user cell.
///
/// An explicit stack drives the traversal; a popped cell that was already
/// drawn is skipped, which absorbs duplicate stack entries. Each tile's
/// local polygon is built by walking [`ORDERED_DIRS`] and advancing by the
/// 90°-rotated unit step of each used direction, then translated so the edge
/// shared with the tile that discovered it coincides exactly.
///
/// Returns the tiles and the flat list of boundary edge endpoints (pairs of
/// consecutive entries form one unmatched edge).
pub fn trace_tiles(grid: &mut Grid) -> (Vec<Tile>, Vec<Point>) {
    let mut tiles: Vec<Tile> = Vec::new();
    let mut boundary: Vec<Point> = Vec::new();
    let side = grid.side();

    let mut start = None;
    'scan: for y in 0..side {
        for x in 0..side {
            let pt = Point::new(x as f64, y as f64);
            if grid.user_count(pt) >= 2 {
                start = Some(pt);
                break 'scan;
            }
        }
    }
    let Some(start) = start else {
        return (tiles, boundary);
    };

    let mut stack: Vec<(Point, Option<(Point, Point)>)> = vec![(start, None)];

    while let Some((pt, align)) = stack.pop() {
        if grid.is_drawn(pt) {
            continue;
        }
        grid.set_drawn(pt);

        let mut used = [false; 9];
        for l in grid.users(pt) {
            used[compass_index(l.dir.x, l.dir.y)] = true;
            used[compass_index(-l.dir.x, -l.dir.y)] = true;
        }

        // Local polygon around the vertex, independent of absolute position.
        let mut pts: Vec<Point> = Vec::new();
        let mut last = Point::new(0.0, 0.0);
        for &d in &ORDERED_DIRS {
            if used[d] {
                let ddir = DIR_VECS[d];
                let perp = Point::new(-ddir.y, ddir.x);
                pts.push(last);
                last = last.add(perp);
            }
        }

        // Translate so the edge shared with the discovering tile lands on
        // the hint exactly; this stitches neighbours into one frame.
        let mut translation = Point::new(0.0, 0.0);
        if let Some((ap, aq)) = align {
            let delt = ap.sub(aq);
            for idx in 0..pts.len() {
                let v = pts[(idx + 1) % pts.len()].sub(pts[idx]);
                if v.distance(delt) < ALIGN_EPS {
                    translation = aq.sub(pts[idx]);
                    break;
                }
            }
        }
        for p in &mut pts {
            *p = p.add(translation);
        }

        tiles.push(Tile { vertex: pt, path: pts.clone() });

        // Walk to neighbours in the same canonical order; edges with no
        // neighbour belong to the outer boundary.
        let mut vidx = 0;
        for &d in &ORDERED_DIRS {
            if used[d] {
                let a = pts[vidx];
                let b = pts[(vidx + 1) % pts.len()];
                match grid.find_neighbour(pt, INT_DIR_VECS[d]) {
                    Some(neigh) => {
                        if !grid.is_drawn(neigh) {
                            stack.push((neigh, Some((a, b))));
                        }
                    }
                    None => {
                        boundary.push(a);
                        boundary.push(b);
                    }
                }
                vidx += 1;
            }
        }
    }

    (tiles, boundary)
}

/// Merge a set of polygons that exactly tile a simply-connected region into
/// its single outer polygon.
///
/// Every directed edge is collected; an edge and its exact reverse cancel
/// (interior shared edges). The survivors are walked start-to-end by
/// matching consecutive endpoints. A disconnected leftover terminates the
/// walk with the partial boundary rather than spinning.
pub fn merge_tiles(paths: &[Vec<Point>]) -> Vec<Point> {
    let mut segs: Vec<(Point, Point)> = Vec::new();

    for path in paths {
        let len = path.len();
        for idx in 0..len {
            let p = path[idx];
            let q = path[(idx + 1) % len];
            let reverse = segs
                .iter()
                .position(|s| s.0.distance(q) < SEG_EPS && s.1.distance(p) < SEG_EPS);
            match reverse {
                Some(sidx) => {
                    segs.remove(sidx);
                }
                None => segs.push((p, q)),
            }
        }
    }

    if segs.is_empty() {
        return Vec::new();
    }

    let mut ret = vec![segs[0].0];
    let mut last = segs[0].1;
    segs.remove(0);

    while !segs.is_empty() {
        let next = segs.iter().position(|s| s.0.distance(last) < SEG_EPS);
        match next {
            Some(idx) => {
                ret.push(segs[idx].0);
                last = segs[idx].1;
                segs.remove(idx);
            }
            None => break,
        }
    }

    ret
}

/// Replace each focus group's member tiles with one consolidated tile.
///
/// Tags member cells with the group id, removes their tiles from the list
/// (preserving the order of the rest) and appends the merged polygon.
pub fn consolidate_groups(grid: &mut Grid, groups: &[Vec<Point>], tiles: &mut Vec<Tile>) {
    for (gidx, group) in groups.iter().enumerate() {
        for &pt in group {
            if grid.in_bounds(pt) {
                grid.set_group(pt, gidx as i32);
            }
        }

        let mut member_paths: Vec<Vec<Point>> = Vec::new();
        let mut tidx = tiles.len();
        while tidx > 0 {
            tidx -= 1;
            if grid.group_of(tiles[tidx].vertex) == gidx as i32 {
                member_paths.push(tiles.remove(tidx).path);
            }
        }

        if member_paths.is_empty() {
            continue;
        }
        let merged = merge_tiles(&member_paths);
        if !merged.is_empty() {
            tiles.push(Tile { vertex: Point::new(0.0, 0.0), path: merged });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::Line;

    fn horizontal(y: i64) -> Line {
        Line::new(Point::new(0.0, y as f64), Point::new(1.0, 0.0))
    }

    fn vertical(x: i64) -> Line {
        Line::new(Point::new(x as f64, 0.0), Point::new(0.0, 1.0))
    }

    fn crossing_grid() -> Grid {
        let mut grid = Grid::new(9);
        grid.mark_lines(&[horizontal(2), horizontal(6), vertical(2), vertical(6)]);
        grid
    }

    #[test]
    fn traces_all_crossings() {
        let mut grid = crossing_grid();
        let (tiles, _) = trace_tiles(&mut grid);
        assert_eq!(tiles.len(), 4);
        for t in &tiles {
            assert_eq!(t.path.len(), 4, "two orthogonal lines make a square");
        }
    }

    #[test]
    fn two_crossings_share_an_edge() {
        let mut grid = Grid::new(9);
        grid.mark_lines(&[horizontal(4), vertical(2), vertical(6)]);
        let (tiles, _) = trace_tiles(&mut grid);
        assert_eq!(tiles.len(), 2);

        // Adjacent squares stitched into one frame share exactly two vertices.
        let mut shared = 0;
        for a in &tiles[0].path {
            for b in &tiles[1].path {
                if a.distance(*b) < 1e-9 {
                    shared += 1;
                }
            }
        }
        assert_eq!(shared, 2);
    }

    #[test]
    fn boundary_endpoints_have_even_degree() {
        // The outer boundary reassembles into closed loops, so every
        // endpoint appears an even number of times.
        let mut grid = crossing_grid();
        let (_, boundary) = trace_tiles(&mut grid);
        assert!(!boundary.is_empty());
        assert_eq!(boundary.len() % 2, 0);

        let mut counts: Vec<(Point, usize)> = Vec::new();
        for p in &boundary {
            match counts.iter_mut().find(|(q, _)| q.distance(*p) < 1e-6) {
                Some(entry) => entry.1 += 1,
                None => counts.push((*p, 1)),
            }
        }
        let odd = counts.iter().filter(|(_, c)| c % 2 == 1).count();
        assert_eq!(odd, 0, "dangling boundary endpoints: {:?}", counts);
    }

    #[test]
    fn isolated_cells_trace_nothing() {
        let mut grid = Grid::new(9);
        grid.mark_line(horizontal(4));
        let (tiles, boundary) = trace_tiles(&mut grid);
        assert!(tiles.is_empty());
        assert!(boundary.is_empty());
    }

    #[test]
    fn merge_two_triangles_into_rectangle() {
        // Tiles exactly tiling a rectangle merge back into its 4 corners
        // in some cyclic order.
        let t1 = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let t2 = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let merged = merge_tiles(&[t1, t2]);
        assert_eq!(merged.len(), 4);
        let expect = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        for corner in expect {
            assert!(
                merged.iter().any(|p| p.distance(corner) < 1e-9),
                "missing corner {:?} in {:?}",
                corner,
                merged
            );
        }
    }

    #[test]
    fn merge_2x2_squares_keeps_midpoints() {
        let sq = |x: f64, y: f64| {
            vec![
                Point::new(x, y),
                Point::new(x + 1.0, y),
                Point::new(x + 1.0, y + 1.0),
                Point::new(x, y + 1.0),
            ]
        };
        let merged = merge_tiles(&[sq(0.0, 0.0), sq(1.0, 0.0), sq(1.0, 1.0), sq(0.0, 1.0)]);
        // Four shared interior edge pairs cancel; the boundary keeps the
        // four corners plus the four side midpoints.
        assert_eq!(merged.len(), 8);
    }

    #[test]
    fn consolidate_replaces_group_tiles() {
        let mut grid = crossing_grid();
        let (mut tiles, _) = trace_tiles(&mut grid);
        assert_eq!(tiles.len(), 4);

        let group = vec![
            Point::new(2.0, 2.0),
            Point::new(6.0, 2.0),
            Point::new(2.0, 6.0),
            Point::new(6.0, 6.0),
        ];
        consolidate_groups(&mut grid, &[group], &mut tiles);
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].path.len() >= 4);
    }
}
