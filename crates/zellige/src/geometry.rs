//! Core geometry types: points, rectangles and affine transforms.
//!
//! The affine type stores the six coefficients of a 2×3 matrix
//! `[[a, b, c], [d, e, f]]` in homogeneous form. Applying it to a point and
//! composing it with another matrix are deliberately two distinct operations
//! (`apply` and `compose`) rather than one overload.

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
///
/// Used both for grid-index points (integer-valued) and for transformed
/// canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.w, self.y + 0.5 * self.h)
    }
}

/// Compute the bounding box of a point set as a [`Rect`].
///
/// Returns `None` for an empty slice.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    if points.is_empty() {
        return None;
    }
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// An affine transform `[[a, b, c], [d, e, f]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Pure translation by `(tx, ty)`.
    #[inline]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Affine::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    /// Uniform scale about the origin.
    #[inline]
    pub const fn scaling(s: f64) -> Self {
        Affine::new(s, 0.0, 0.0, 0.0, s, 0.0)
    }

    /// Apply the transform to a point (matrix × point).
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }

    /// Compose with another transform (matrix × matrix).
    ///
    /// `m.compose(&n)` applies `n` first, then `m`.
    pub fn compose(&self, other: &Affine) -> Affine {
        Affine::new(
            self.a * other.a + self.b * other.d,
            self.a * other.b + self.b * other.e,
            self.a * other.c + self.b * other.f + self.c,
            self.d * other.a + self.e * other.d,
            self.d * other.b + self.e * other.e,
            self.d * other.c + self.e * other.f + self.f,
        )
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Invert the transform.
    ///
    /// Returns `None` when the determinant vanishes, which for this engine
    /// means a degenerate (zero-length) reference segment somewhere in the
    /// filler library.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() < 1e-12 {
            return None;
        }
        Some(Affine::new(
            self.e / det,
            -self.b / det,
            (self.b * self.f - self.c * self.e) / det,
            -self.d / det,
            self.a / det,
            (self.c * self.d - self.a * self.f) / det,
        ))
    }
}

/// The similarity transform mapping the canonical basis segment onto `p → q`.
///
/// Sends `(0, 0)` to `p` and `(1, 0)` to `q`, rotating and scaling without
/// reflection.
pub fn match_seg(p: Point, q: Point) -> Affine {
    Affine::new(q.x - p.x, p.y - q.y, p.x, q.y - p.y, q.x - p.x, p.y)
}

/// The unique similarity mapping segment `p1 → q1` onto segment `p2 → q2`.
///
/// Returns `None` when `p1 → q1` is degenerate (zero length).
pub fn match_two_segs(p1: Point, q1: Point, p2: Point, q2: Point) -> Option<Affine> {
    let inverse = match_seg(p1, q1).invert()?;
    Some(match_seg(p2, q2).compose(&inverse))
}

/// The transform that fits box `from` into box `to`, centered, optionally
/// allowing a 90° rotation when that yields the larger scale.
pub fn fill_box(from: &Rect, to: &Rect, allow_rotate: bool) -> Affine {
    let sc = (to.w / from.w).min(to.h / from.h);
    let rsc = (to.w / from.h).min(to.h / from.w);

    let to_center = to.center();
    let from_center = from.center();
    let recenter = Affine::translation(to_center.x, to_center.y);
    let center = Affine::translation(-from_center.x, -from_center.y);

    if !allow_rotate || sc > rsc {
        recenter.compose(&Affine::scaling(sc).compose(&center))
    } else {
        let quarter_turn = Affine::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0);
        recenter.compose(&Affine::scaling(rsc).compose(&quarter_turn).compose(&center))
    }
}
