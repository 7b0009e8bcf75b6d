//! Axis-aligned rectangle used as the bounding region of 2D fields.

use crate::float_types::Real;
use nalgebra::{Point2, Vector2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub mins: Point2<Real>,
    pub maxs: Point2<Real>,
}

impl Bounds2 {
    #[inline]
    pub const fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest rectangle holding every point; a degenerate rectangle at the
    /// origin when there are none.
    pub fn from_points<I: IntoIterator<Item = Point2<Real>>>(points: I) -> Self {
        let mut iter = points.into_iter();
        let first = iter.next().unwrap_or_else(Point2::origin);
        let (mins, maxs) = iter.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
        Self { mins, maxs }
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
    }

    #[inline]
    pub fn center(&self) -> Point2<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    #[inline]
    pub fn extents(&self) -> Vector2<Real> {
        self.maxs - self.mins
    }

    pub fn merged(&self, other: &Self) -> Self {
        Self::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }

    /// Overlap of two rectangles, `None` when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(self.mins.sup(&other.mins), self.maxs.inf(&other.maxs)))
    }

    /// Grown by `amount` on every side.
    pub fn loosened(&self, amount: Real) -> Self {
        let d = Vector2::repeat(amount);
        Self::new(self.mins - d, self.maxs + d)
    }

    /// Corners in counter-clockwise order starting at `mins`.
    pub fn vertices(&self) -> [Point2<Real>; 4] {
        [
            self.mins,
            Point2::new(self.maxs.x, self.mins.y),
            self.maxs,
            Point2::new(self.mins.x, self.maxs.y),
        ]
    }

    pub fn contains_point(&self, p: &Point2<Real>) -> bool {
        p.x >= self.mins.x && p.x <= self.maxs.x && p.y >= self.mins.y && p.y <= self.maxs.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_and_merge() {
        let a = Bounds2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let b = Bounds2::new(Point2::new(1.0, -1.0), Point2::new(3.0, 1.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i, Bounds2::new(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)));
        let m = a.merged(&b);
        assert_eq!(m, Bounds2::new(Point2::new(0.0, -1.0), Point2::new(3.0, 2.0)));
        let far = Bounds2::new(Point2::new(5.0, 5.0), Point2::new(6.0, 6.0));
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn from_points_and_center() {
        let b = Bounds2::from_points([Point2::new(-1.0, 4.0), Point2::new(3.0, 0.0)]);
        assert_eq!(b.center(), Point2::new(1.0, 2.0));
        assert!(b.contains_point(&Point2::new(0.0, 1.0)));
        assert!(!b.contains_point(&Point2::new(4.0, 1.0)));
    }
}
