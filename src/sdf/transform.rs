//! Affine transforms of fields.

use crate::errors::ValidationError;
use crate::float_types::{Aabb, Real, tolerance};
use crate::sdf::{Sdf3, Solid, enclosing_box, is_bounded, unbounded_box};
use nalgebra::{Isometry3, Matrix3, Matrix4, Point3};

/// A child field moved by an invertible affine map.
///
/// Query points are pulled back through the inverse map. The child's
/// distance is then multiplied by the smallest singular value of the linear
/// part, which is the most the map can shrink any length; without that
/// correction a non-uniform scale would overestimate distances and the
/// adaptive sampler would skip cells that contain surface.
#[derive(Debug, Clone)]
pub struct Transform3 {
    child: Solid,
    matrix: Matrix4<Real>,
    inverse: Matrix4<Real>,
    distance_scale: Real,
    bounding_box: Aabb,
}

impl Transform3 {
    pub fn new(child: Solid, matrix: &Matrix4<Real>) -> Result<Self, ValidationError> {
        if !matrix.iter().all(|v| v.is_finite()) {
            return Err(ValidationError::SingularTransform);
        }
        // projective rows are not affine maps
        let last_row = matrix.fixed_view::<1, 4>(3, 0);
        if last_row[(0, 0)] != 0.0
            || last_row[(0, 1)] != 0.0
            || last_row[(0, 2)] != 0.0
            || last_row[(0, 3)] != 1.0
        {
            return Err(ValidationError::SingularTransform);
        }

        let linear: Matrix3<Real> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let distance_scale = linear.singular_values().min();
        if !(distance_scale > tolerance()) {
            return Err(ValidationError::SingularTransform);
        }
        let inverse = matrix.try_inverse().ok_or(ValidationError::SingularTransform)?;

        Ok(Self::assemble(child, *matrix, inverse, distance_scale))
    }

    /// Rotation + translation: lengths are preserved, no correction needed.
    pub fn from_isometry(child: Solid, isometry: &Isometry3<Real>) -> Self {
        Self::assemble(
            child,
            isometry.to_homogeneous(),
            isometry.inverse().to_homogeneous(),
            1.0,
        )
    }

    fn assemble(
        child: Solid,
        matrix: Matrix4<Real>,
        inverse: Matrix4<Real>,
        distance_scale: Real,
    ) -> Self {
        let child_box = child.bounding_box();
        // infinite corners would mix into NaN under rotation
        let bounding_box = if is_bounded(&child_box) {
            enclosing_box(child_box.vertices().iter().map(|v| matrix.transform_point(v)))
        } else {
            unbounded_box()
        };
        Transform3 { child, matrix, inverse, distance_scale, bounding_box }
    }

    pub const fn matrix(&self) -> &Matrix4<Real> {
        &self.matrix
    }

    /// Factor applied to the child's distances.
    pub const fn distance_scale(&self) -> Real {
        self.distance_scale
    }
}

impl Sdf3 for Transform3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.child.evaluate(&self.inverse.transform_point(p)) * self.distance_scale
    }

    fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }
}
