//! Line arrangement generation: the canonical candidate set, focus-motif
//! carving, and random retention.
//!
//! The candidate list is enumerated in a fixed order: horizontals, then
//! verticals, then the slope −1 family, then the slope +1 family, each family
//! ordered by its anchor. The carving plans below address candidates by
//! position in that list, so the enumeration order is load-bearing and pinned
//! by the tests at the bottom of this file.

use crate::geometry::Point;
use crate::rng::Rng;

/// An infinite line through `pos` with unit direction `dir` (one of the 8
/// compass steps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub pos: Point,
    pub dir: Point,
}

impl Line {
    #[inline]
    pub const fn new(pos: Point, dir: Point) -> Self {
        Self { pos, dir }
    }
}

/// The embedded high-symmetry motif carved into the arrangement, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    /// An 8-fold 2×2-vertex cell.
    Eight,
    /// A 16-fold star cell.
    Sixteen,
}

/// Discrete generation parameters derived from the first RNG draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Grid density `n`; the grid side is `2n + 1`.
    pub density: usize,
    /// Target number of retained lines.
    pub num_lines: usize,
    pub focus: Focus,
}

impl Features {
    #[inline]
    pub fn grid_side(&self) -> usize {
        2 * self.density + 1
    }
}

/// Draw the generation features from the stream: a (density, line-count)
/// pair, then a focus kind.
pub fn select_features(rng: &mut Rng) -> Features {
    let v = rng.next_f64();
    let (density, num_lines) = if v < 0.7 {
        (10, 25)
    } else if v < 0.9 {
        (6, 9)
    } else {
        (20, 40)
    };

    let v = rng.next_f64();
    let focus = if v < 0.75 {
        Focus::None
    } else if v < 0.95 {
        Focus::Eight
    } else {
        Focus::Sixteen
    };

    Features { density, num_lines, focus }
}

/// A generated line arrangement: the retained lines plus zero or one focus
/// group (the grid vertices whose tiles will later be consolidated).
#[derive(Debug, Clone)]
pub struct LinePlan {
    pub lines: Vec<Line>,
    pub groups: Vec<Vec<Point>>,
}

fn line(px: i64, py: i64, dx: i64, dy: i64) -> Line {
    Line::new(
        Point::new(px as f64, py as f64),
        Point::new(dx as f64, dy as f64),
    )
}

/// Build the full candidate set for density `n`: `n+1` horizontals, `n+1`
/// verticals, `2n+1` slope −1 lines, `2n+1` slope +1 lines, all anchored to
/// pass fully through the `(2n+1)²` grid.
fn make_all_lines(n: i64) -> Vec<Line> {
    let mut all = Vec::with_capacity((6 * n + 4) as usize);

    // Horizontal lines, emanating from the left edge.
    for i in 0..n + 1 {
        all.push(line(0, 2 * i, 1, 0));
    }

    // Vertical lines, emanating from the top edge.
    for i in 0..n + 1 {
        all.push(line(2 * i, 0, 0, 1));
    }

    // Slope -1 lines: n+1 pointing NW, then n pointing SE.
    for i in 0..n + 1 {
        all.push(line(2 * n, 2 * i, -1, -1));
    }
    for i in 0..n {
        all.push(line(0, 2 * i + 2, 1, 1));
    }

    // Slope 1 lines: n+1 pointing NE, then n pointing SW.
    for i in 0..n + 1 {
        all.push(line(0, 2 * i, 1, -1));
    }
    for i in 0..n {
        all.push(line(2 * i + 2, 2 * n, 1, -1));
    }

    all
}

/// Carve a 2×2-vertex 8-fold cell at a random offset.
///
/// Three sub-variants: an axis-aligned square block, and two diagonal diamond
/// placements. Each removes a fixed index pattern from the candidate list and
/// moves the four lines bounding the cell into the mandatory keeps.
fn carve_eight(
    rng: &mut Rng,
    n: i64,
    all: &mut Vec<Line>,
    keep: &mut Vec<Line>,
    groups: &mut Vec<Vec<Point>>,
) {
    let pt = |x: i64, y: i64| Point::new(x as f64, y as f64);

    if rng.next_bool(0.5) {
        let ax = rng.next_index(n as usize) as i64;
        let ay = rng.next_index(n as usize) as i64;

        // The three diagonals of each slope crossing the block. The slope -1
        // candidate index repeats: removal shifts the two following lines
        // down onto the same slot.
        let mut rem: Vec<i64> = Vec::new();
        for _ in 0..3 {
            let k = (2 * n + 2) + (n - 1) + ax - ay;
            if (2 * n + 2..4 * n + 3).contains(&k) {
                rem.push(k);
            }
        }
        for i in 0..3 {
            rem.push(4 * n + 3 + i + ax + ay);
        }
        rem.reverse();
        for &i in &rem {
            all.remove(i as usize);
        }

        groups.push(vec![
            pt(2 * ay, 2 * ax),
            pt(2 * ay + 2, 2 * ax),
            pt(2 * ay, 2 * ax + 2),
            pt(2 * ay + 2, 2 * ax + 2),
        ]);

        for &i in &[n + 1 + ay + 1, n + 1 + ay, ax + 1, ax] {
            keep.push(all.remove(i as usize));
        }
    } else {
        let a = rng.next_index(n as usize) as i64;
        let b = rng.next_index((n - 1) as usize) as i64 + 1;

        if rng.next_bool(0.5) {
            all.remove((n + 1 + a + 1) as usize);
            all.remove((n + 1 + a) as usize);
            all.remove(b as usize);
            groups.push(vec![
                pt(2 * a + 1, 2 * b - 1),
                pt(2 * a + 1, 2 * b + 1),
                pt(2 * a, 2 * b),
                pt(2 * a + 2, 2 * b),
            ]);

            for &i in &[
                4 * n + a + b + 1,
                4 * n + a + b,
                3 * n - 1 + b - a,
                3 * n - 2 + b - a,
            ] {
                keep.push(all.remove(i as usize));
            }
        } else {
            all.remove((n + 1 + b) as usize);
            all.remove((a + 1) as usize);
            all.remove(a as usize);
            groups.push(vec![
                pt(2 * b, 2 * a),
                pt(2 * b, 2 * a + 2),
                pt(2 * b - 1, 2 * a + 1),
                pt(2 * b + 1, 2 * a + 1),
            ]);

            for &i in &[
                4 * n + a + b + 1,
                4 * n + a + b,
                3 * n + a - b,
                3 * n - 1 + a - b,
            ] {
                keep.push(all.remove(i as usize));
            }
        }
    }
}

/// Carve a 16-vertex star cell at a random offset `(ax, ay)`, each in
/// `[2, n-2)`.
///
/// The 22-step plan removes the lines crossing the star region and keeps the
/// eight lines bounding it. Steps are ordered by descending index within each
/// family so earlier removals never shift a later target.
fn carve_sixteen(
    rng: &mut Rng,
    n: i64,
    all: &mut Vec<Line>,
    keep: &mut Vec<Line>,
    groups: &mut Vec<Vec<Point>>,
) {
    let ax = rng.next_index((n - 4) as usize) as i64 + 2;
    let ay = rng.next_index((n - 4) as usize) as i64 + 2;

    let plan: [(i64, bool); 22] = [
        (4 * n + 7 + ax + ay, false),
        (4 * n + 6 + ax + ay, true),
        (4 * n + 5 + ax + ay, false),
        (4 * n + 4 + ax + ay, false),
        (4 * n + 3 + ax + ay, false),
        (4 * n + 2 + ax + ay, true),
        (4 * n + 1 + ax + ay, false),
        (3 * n + 5 + ax - ay, false),
        (3 * n + 4 + ax - ay, true),
        (3 * n + 3 + ax - ay, false),
        (3 * n + 2 + ax - ay, false),
        (3 * n + 1 + ax - ay, false),
        (3 * n + ax - ay, true),
        (3 * n - 1 + ax - ay, false),
        (n + 1 + ay + 2, true),
        (n + 1 + ay + 1, false),
        (n + 1 + ay, false),
        (n + 1 + ay - 1, true),
        (ax + 2, true),
        (ax + 1, false),
        (ax, false),
        (ax - 1, true),
    ];

    for &(idx, keep_it) in &plan {
        if keep_it {
            keep.push(all[idx as usize]);
        }
        all.remove(idx as usize);
    }

    let pt = |x: i64, y: i64| Point::new(x as f64, y as f64);
    groups.push(vec![
        pt(2 * ay + 1, 2 * ax - 3),
        pt(2 * ay - 2, 2 * ax - 2),
        pt(2 * ay, 2 * ax - 2),
        pt(2 * ay + 2, 2 * ax - 2),
        pt(2 * ay + 4, 2 * ax - 2),
        pt(2 * ay - 2, 2 * ax),
        pt(2 * ay + 4, 2 * ax),
        pt(2 * ay - 3, 2 * ax + 1),
        pt(2 * ay + 5, 2 * ax + 1),
        pt(2 * ay - 2, 2 * ax + 2),
        pt(2 * ay + 4, 2 * ax + 2),
        pt(2 * ay - 2, 2 * ax + 4),
        pt(2 * ay, 2 * ax + 4),
        pt(2 * ay + 2, 2 * ax + 4),
        pt(2 * ay + 4, 2 * ax + 4),
        pt(2 * ay + 1, 2 * ax + 5),
    ]);
}

/// Build the retained line set for the given features.
///
/// After focus carving, the retention quota is reduced by the mandatory
/// keeps, then filled by drawing uniformly from the remaining pool. When the
/// quota is already met by the keeps, no further lines are added and the
/// arrangement stays sparse.
pub fn create_lines(rng: &mut Rng, features: &Features) -> LinePlan {
    let n = features.density as i64;
    let mut all = make_all_lines(n);
    let mut keep: Vec<Line> = Vec::new();
    let mut groups: Vec<Vec<Point>> = Vec::new();

    match features.focus {
        Focus::None => {}
        Focus::Eight => carve_eight(rng, n, &mut all, &mut keep, &mut groups),
        Focus::Sixteen => carve_sixteen(rng, n, &mut all, &mut keep, &mut groups),
    }

    let mut num = features.num_lines as i64 - keep.len() as i64;
    while !all.is_empty() && num > 0 {
        let ri = rng.next_index(all.len());
        keep.push(all.remove(ri));
        num -= 1;
    }

    LinePlan { lines: keep, groups }
}
