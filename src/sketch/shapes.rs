//! 2D primitive fields, centered at the origin.

use crate::aabb::Bounds2;
use crate::errors::{ValidationError, finite, non_negative, positive};
use crate::float_types::Real;
use crate::sketch::Sdf2;
use nalgebra::{Point2, Vector2};

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    radius: Real,
}

impl Circle {
    pub fn new(radius: Real) -> Result<Self, ValidationError> {
        Ok(Circle { radius: positive("radius", radius)? })
    }
}

impl Sdf2 for Circle {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        p.coords.norm() - self.radius
    }

    fn bounding_box(&self) -> Bounds2 {
        let r = Vector2::repeat(self.radius);
        Bounds2::new(Point2::from(-r), Point2::from(r))
    }
}

/// Rectangle given by its half extents, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    half_extents: Vector2<Real>,
    round: Real,
}

impl Rectangle {
    pub fn new(half_extents: Vector2<Real>, round: Real) -> Result<Self, ValidationError> {
        if !half_extents.iter().all(|c| c.is_finite() && *c > 0.0) {
            return Err(ValidationError::DegenerateExtent(half_extents.push(0.0)));
        }
        let round = non_negative("round", round)?;
        let limit = half_extents.min();
        if round > limit {
            return Err(ValidationError::RoundTooLarge { round, limit });
        }
        Ok(Rectangle { half_extents, round })
    }
}

impl Sdf2 for Rectangle {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let q = p.coords.abs() - self.half_extents + Vector2::repeat(self.round);
        q.sup(&Vector2::zeros()).norm() + q.max().min(0.0) - self.round
    }

    fn bounding_box(&self) -> Bounds2 {
        Bounds2::new(Point2::from(-self.half_extents), Point2::from(self.half_extents))
    }
}

/// Closed simple polygon; the sign uses the even-odd rule, so winding
/// direction does not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point2<Real>>,
    bounding_box: Bounds2,
}

impl Polygon {
    pub fn new(points: Vec<Point2<Real>>) -> Result<Self, ValidationError> {
        if points.len() < 3 {
            return Err(ValidationError::TooFewPoints(points.len()));
        }
        for p in &points {
            finite("point.x", p.x)?;
            finite("point.y", p.y)?;
        }
        let bounding_box = Bounds2::from_points(points.iter().copied());
        if bounding_box.extents().min() <= 0.0 {
            return Err(ValidationError::DegenerateExtent(bounding_box.extents().push(0.0)));
        }
        Ok(Polygon { points, bounding_box })
    }

    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }
}

impl Sdf2 for Polygon {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let v = &self.points;
        let n = v.len();
        let mut d2 = (p - v[0]).norm_squared();
        let mut sign: Real = 1.0;

        let mut j = n - 1;
        for i in 0..n {
            let e = v[j] - v[i];
            let w = p - v[i];
            let len2 = e.norm_squared();
            let t = if len2 > 0.0 { (w.dot(&e) / len2).clamp(0.0, 1.0) } else { 0.0 };
            d2 = d2.min((w - e * t).norm_squared());

            // crossing test for the even-odd rule
            let up = p.y >= v[i].y;
            let down = p.y < v[j].y;
            let left = e.x * w.y > e.y * w.x;
            if (up && down && left) || (!up && !down && !left) {
                sign = -sign;
            }
            j = i;
        }
        sign * d2.sqrt()
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bounding_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_distances() {
        let r = Rectangle::new(Vector2::new(2.0, 1.0), 0.0).unwrap();
        assert!((r.evaluate(&Point2::new(3.0, 0.0)) - 1.0).abs() < 1e-12);
        assert!((r.evaluate(&Point2::origin()) + 1.0).abs() < 1e-12);
        assert!(Rectangle::new(Vector2::new(1.0, 1.0), 1.5).is_err());
    }

    #[test]
    fn polygon_square_matches_rectangle() {
        let square = Polygon::new(vec![
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ])
        .unwrap();
        let rect = Rectangle::new(Vector2::new(1.0, 1.0), 0.0).unwrap();
        for p in [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, -0.25),
            Point2::new(2.0, 0.3),
            Point2::new(-3.0, 4.0),
        ] {
            assert!((square.evaluate(&p) - rect.evaluate(&p)).abs() < 1e-12, "{p}");
        }
    }

    #[test]
    fn polygon_winding_does_not_matter() {
        let ccw = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        ])
        .unwrap();
        let cw = Polygon::new(vec![
            Point2::new(0.0, 3.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        let p = Point2::new(1.0, 1.0);
        assert!(ccw.evaluate(&p) < 0.0);
        assert!((ccw.evaluate(&p) - cw.evaluate(&p)).abs() < 1e-12);
    }

    #[test]
    fn polygon_validation() {
        assert_eq!(
            Polygon::new(vec![Point2::origin(), Point2::new(1.0, 0.0)]).unwrap_err(),
            ValidationError::TooFewPoints(2)
        );
        // collinear points have no area
        assert!(
            Polygon::new(vec![Point2::origin(), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)])
                .is_err()
        );
    }
}
