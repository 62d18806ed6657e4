//! Rotation-sensitive corner signatures for tile polygons.
//!
//! Each vertex is classified by the dot product of its two incident edge
//! vectors (unit steps by construction). The closed [`Corner`] alphabet is
//! serialized to its `L`/`I`/`V`/`C` letter form only at the filler-library
//! lookup boundary.

use crate::geometry::Point;
use std::fmt;

/// Corner classification of one polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// 90° corner (`L`): incident edges are perpendicular.
    Right,
    /// 180° non-corner (`I`): incident edges are collinear.
    Straight,
    /// Sharp corner (`V`): positive dot product.
    Sharp,
    /// Wide corner (`C`): anything else.
    Wide,
}

impl Corner {
    pub fn letter(self) -> char {
        match self {
            Corner::Right => 'L',
            Corner::Straight => 'I',
            Corner::Sharp => 'V',
            Corner::Wide => 'C',
        }
    }

    /// Classify a vertex `b` with neighbours `a` and `c`.
    pub fn classify(a: Point, b: Point, c: Point) -> Corner {
        let s = a.sub(b).dot(c.sub(b));
        if s.abs() < 1e-4 {
            Corner::Right
        } else if (1.0 + s).abs() < 1e-4 {
            Corner::Straight
        } else if s > 0.0 {
            Corner::Sharp
        } else {
            Corner::Wide
        }
    }
}

/// The corner sequence of a polygon, one entry per vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<Corner>);

impl Signature {
    /// Compute the signature of a polygon path.
    pub fn of_path(path: &[Point]) -> Signature {
        let l = path.len();
        let mut corners = Vec::with_capacity(l);
        for i in 0..l {
            let a = path[(i + l - 1) % l];
            let b = path[i];
            let c = path[(i + 1) % l];
            corners.push(Corner::classify(a, b, c));
        }
        Signature(corners)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rotate the signature one step, matching a one-step rotation of the
    /// polygon's vertex list.
    pub fn rotate(&mut self) {
        if !self.0.is_empty() {
            self.0.rotate_left(1);
        }
    }

    /// The string form used as a filler-library key.
    pub fn key(&self) -> String {
        self.0.iter().map(|c| c.letter()).collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c.letter())?;
        }
        Ok(())
    }
}
