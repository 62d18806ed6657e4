//! The square occupancy grid lines are rasterized into.
//!
//! Each cell records the lines passing through it in marking order. All
//! state is owned by the grid value itself, which in turn is owned by a
//! single generation call.

use crate::geometry::Point;
use crate::lines::Line;

/// One cell of the grid.
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    /// Every line whose raster path crosses this cell, in marking order.
    pub users: Vec<Line>,
    /// Whether the tile around this cell has been emitted by the tracer.
    pub drawn: bool,
    /// Focus-group id this cell belongs to, or -1.
    pub group: i32,
}

/// A `side × side` grid of cells, `side = 2 * density + 1`.
#[derive(Debug, Clone)]
pub struct Grid {
    side: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    pub fn new(side: usize) -> Self {
        let cells = (0..side * side)
            .map(|_| GridCell { users: Vec::new(), drawn: false, group: -1 })
            .collect();
        Self { side, cells }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn in_bounds(&self, pt: Point) -> bool {
        let side = self.side as f64;
        pt.x >= 0.0 && pt.x < side && pt.y >= 0.0 && pt.y < side
    }

    #[inline]
    fn index(&self, pt: Point) -> usize {
        pt.y as usize * self.side + pt.x as usize
    }

    #[inline]
    pub fn users(&self, pt: Point) -> &[Line] {
        &self.cells[self.index(pt)].users
    }

    #[inline]
    pub fn user_count(&self, pt: Point) -> usize {
        self.cells[self.index(pt)].users.len()
    }

    #[inline]
    pub fn is_drawn(&self, pt: Point) -> bool {
        self.cells[self.index(pt)].drawn
    }

    #[inline]
    pub fn set_drawn(&mut self, pt: Point) {
        let idx = self.index(pt);
        self.cells[idx].drawn = true;
    }

    #[inline]
    pub fn group_of(&self, pt: Point) -> i32 {
        self.cells[self.index(pt)].group
    }

    #[inline]
    pub fn set_group(&mut self, pt: Point, group: i32) {
        let idx = self.index(pt);
        self.cells[idx].group = group;
    }

    fn mark_ray(&mut self, line: Line, mut pos: Point, dir: Point) {
        while self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx].users.push(line);
            pos = pos.add(dir);
        }
    }

    /// Rasterize a line into the grid: walk outward from its anchor in both
    /// ray directions, so the anchor cell is visited exactly once.
    pub fn mark_line(&mut self, line: Line) {
        let p = line.pos;
        let d = line.dir;
        self.mark_ray(line, p, d);
        self.mark_ray(line, p.sub(d), d.scale(-1.0));
    }

    pub fn mark_lines(&mut self, lines: &[Line]) {
        for &l in lines {
            self.mark_line(l);
        }
    }

    /// Find the nearest cell with at least two users in raster direction
    /// `dir` from `pt`, scanning outward until the grid edge.
    pub fn find_neighbour(&self, pt: Point, dir: Point) -> Option<Point> {
        let mut pt = pt.add(dir);
        while self.in_bounds(pt) {
            if self.user_count(pt) > 1 {
                return Some(pt);
            }
            pt = pt.add(dir);
        }
        None
    }
}
