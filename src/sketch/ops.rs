//! Transforms, booleans and offsets of 2D fields.

use crate::aabb::Bounds2;
use crate::errors::{ValidationError, finite};
use crate::float_types::{Real, tolerance};
use crate::sdf::{Blend, BooleanOp};
use crate::sketch::{Profile, Sdf2};
use nalgebra::{Matrix2, Matrix3, Point2, Rotation2, Vector2};

/// A child profile moved by an invertible 2D affine map.
///
/// Distances are scaled by the smallest singular value of the linear part
/// so they stay a lower bound under non-uniform scaling.
#[derive(Debug, Clone)]
pub struct Transform2 {
    child: Profile,
    inverse: Matrix3<Real>,
    distance_scale: Real,
    bounding_box: Bounds2,
}

impl Transform2 {
    pub fn new(child: Profile, matrix: &Matrix3<Real>) -> Result<Self, ValidationError> {
        if !matrix.iter().all(|v| v.is_finite()) {
            return Err(ValidationError::SingularTransform);
        }
        if matrix[(2, 0)] != 0.0 || matrix[(2, 1)] != 0.0 || matrix[(2, 2)] != 1.0 {
            return Err(ValidationError::SingularTransform);
        }
        let linear: Matrix2<Real> = matrix.fixed_view::<2, 2>(0, 0).into_owned();
        let distance_scale = linear.singular_values().min();
        if !(distance_scale > tolerance()) {
            return Err(ValidationError::SingularTransform);
        }
        let inverse = matrix.try_inverse().ok_or(ValidationError::SingularTransform)?;
        Ok(Self::assemble(child, matrix, inverse, distance_scale))
    }

    /// Rotation by `angle` radians followed by a translation.
    pub fn rigid(child: Profile, angle: Real, translation: Vector2<Real>) -> Self {
        let rotation = Rotation2::new(angle).to_homogeneous();
        let matrix = Matrix3::new_translation(&translation) * rotation;
        let inverse = rotation.transpose() * Matrix3::new_translation(&-translation);
        Self::assemble(child, &matrix, inverse, 1.0)
    }

    fn assemble(
        child: Profile,
        matrix: &Matrix3<Real>,
        inverse: Matrix3<Real>,
        distance_scale: Real,
    ) -> Self {
        let bounding_box = Bounds2::from_points(
            child
                .bounding_box()
                .vertices()
                .iter()
                .map(|v| matrix.transform_point(v)),
        );
        Transform2 { child, inverse, distance_scale, bounding_box }
    }
}

impl Sdf2 for Transform2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.child.evaluate(&self.inverse.transform_point(p)) * self.distance_scale
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bounding_box
    }
}

/// An n-ary boolean node over profiles, folded left to right.
#[derive(Debug, Clone)]
pub struct Combine2 {
    op: BooleanOp,
    blend: Blend,
    operands: Vec<Profile>,
    bounding_box: Bounds2,
}

impl Combine2 {
    pub fn new(op: BooleanOp, operands: Vec<Profile>, blend: Blend) -> Result<Self, ValidationError> {
        if operands.is_empty() {
            return Err(ValidationError::EmptyComposition);
        }
        if let Blend::Smooth(k) = blend {
            Blend::smooth(k)?;
        }
        let bounding_box = combined_box(op, blend, &operands);
        Ok(Combine2 { op, blend, operands, bounding_box })
    }

    pub fn pair(op: BooleanOp, a: Profile, b: Profile, blend: Blend) -> Self {
        let operands = vec![a, b];
        let bounding_box = combined_box(op, blend, &operands);
        Combine2 { op, blend, operands, bounding_box }
    }
}

fn combined_box(op: BooleanOp, blend: Blend, operands: &[Profile]) -> Bounds2 {
    let first = operands[0].bounding_box();
    let rest = operands[1..].iter().map(|s| s.bounding_box());
    match op {
        BooleanOp::Union => rest
            .fold(first, |acc, bb| acc.merged(&bb))
            .loosened(blend.union_growth()),
        BooleanOp::Intersection => {
            let mut acc = Some(first);
            for bb in rest {
                acc = acc.and_then(|a| a.intersection(&bb));
            }
            acc.unwrap_or_else(|| {
                let c = first.center();
                Bounds2::new(c, c)
            })
        }
        BooleanOp::Difference => first,
    }
}

impl Sdf2 for Combine2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let first = self.operands[0].evaluate(p);
        self.operands[1..]
            .iter()
            .fold(first, |acc, s| self.blend.apply(self.op, acc, s.evaluate(p)))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bounding_box
    }
}

/// Outline moved outward by `distance` (inward when negative).
#[derive(Debug, Clone)]
pub struct Offset2 {
    child: Profile,
    distance: Real,
}

impl Offset2 {
    pub fn new(child: Profile, distance: Real) -> Result<Self, ValidationError> {
        Ok(Offset2 { child, distance: finite("distance", distance)? })
    }
}

impl Sdf2 for Offset2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.child.evaluate(p) - self.distance
    }

    fn bounding_box(&self) -> Bounds2 {
        self.child.bounding_box().loosened(self.distance.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_and_rotate_profile() {
        let c = Profile::circle(1.0).unwrap().translate(3.0, 0.0).rotate(90.0);
        assert!(c.evaluate(&Point2::new(0.0, 3.0)) < -0.99);
        let bb = c.bounding_box();
        assert!((bb.maxs.y - 4.0).abs() < 1e-9);
        assert!((bb.mins.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_profile_stays_conservative() {
        let e = Profile::circle(1.0).unwrap().scale(3.0, 1.0).unwrap();
        assert!(e.evaluate(&Point2::new(3.0, 0.0)).abs() < 1e-12);
        let d = e.evaluate(&Point2::new(5.0, 0.0));
        assert!(d > 0.0 && d <= 2.0 + 1e-12);
        assert!(Profile::circle(1.0).unwrap().scale(0.0, 1.0).is_err());
    }

    #[test]
    fn difference_and_offset() {
        let ring = Profile::circle(2.0)
            .unwrap()
            .difference(&Profile::circle(1.0).unwrap());
        assert!(ring.evaluate(&Point2::origin()) > 0.0);
        assert!(ring.evaluate(&Point2::new(1.5, 0.0)) < 0.0);
        let fat = ring.offset(0.25).unwrap();
        assert!(fat.evaluate(&Point2::new(2.2, 0.0)) < 0.0);
        assert!((fat.bounding_box().maxs.x - 2.25).abs() < 1e-12);
    }

    #[test]
    fn union_all_rejects_empty_input() {
        assert_eq!(
            Profile::union_all(&[], Blend::Hard).unwrap_err(),
            ValidationError::EmptyComposition
        );
    }
}
