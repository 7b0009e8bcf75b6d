//! Line-segment output of 2D rendering.

use crate::aabb::Bounds2;
use crate::float_types::Real;
use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<Real>,
    pub end: Point2<Real>,
}

impl Segment {
    pub const fn new(start: Point2<Real>, end: Point2<Real>) -> Self {
        Segment { start, end }
    }

    pub fn length(&self) -> Real {
        (self.end - self.start).norm()
    }
}

/// Unordered set of segments approximating the zero contour of a profile.
///
/// Segments are oriented so the inside of the shape lies to their left.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub segments: Vec<Segment>,
}

impl Outline {
    pub fn new(segments: Vec<Segment>) -> Self {
        Outline { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment lengths.
    pub fn perimeter(&self) -> Real {
        self.segments.iter().map(Segment::length).sum()
    }

    pub fn extend(&mut self, other: Outline) {
        self.segments.extend(other.segments);
    }

    /// `None` for an empty outline.
    pub fn bounding_box(&self) -> Option<Bounds2> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Bounds2::from_points(
            self.segments.iter().flat_map(|s| [s.start, s.end]),
        ))
    }
}
