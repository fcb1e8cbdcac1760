//! Core geometry types for moodboard.
//!
//! Everything downstream (board partitioning, placement, compositing)
//! works in spread-space rectangles, so the overlap predicates here are
//! the single source of truth for "do these two frames collide".

/// An axis-aligned rectangle in spread-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// A rectangle is degenerate if either dimension is non-positive.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Intersection of two rectangles, or `None` when they do not
    /// overlap. Edge-touching counts as no overlap: the result must
    /// have strictly positive width and height.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right - x > 0.0 && bottom - y > 0.0 {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Margin-aware overlap test.
///
/// Returns true unless `a`, inflated by `margin` on every side, is
/// fully separated from `b` on at least one axis. Symmetric for any
/// `margin >= 0`, and the sole collision test used by every placement
/// strategy: a layout is valid exactly when this is false for all
/// pairs at the spread's spacing.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect, margin: f64) -> bool {
    !(a.x - margin >= b.right()
        || a.right() + margin <= b.x
        || a.y - margin >= b.bottom()
        || a.bottom() + margin <= b.y)
}
