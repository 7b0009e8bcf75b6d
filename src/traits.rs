use crate::errors::ValidationError;
use crate::float_types::{Real, tolerance};
use crate::sdf::{Blend, BooleanOp, Sdf3};
use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion, Vector3};

/// Boolean operations + transformations on field trees.
///
/// Implementors supply the three primitive builders (`combine`, `transform`
/// and `rigid`); everything else is expressed in terms of them. All builders
/// return new trees: fields are immutable once constructed.
pub trait FieldOps: Sdf3 + Sized + Clone {
    /// Join `self` and `other` with a boolean operator.
    fn combine(&self, other: &Self, op: BooleanOp, blend: Blend) -> Self;

    /// Apply an invertible affine transform.
    fn transform(&self, matrix: &Matrix4<Real>) -> Result<Self, ValidationError>;

    /// Apply a rotation + translation (always invertible).
    fn rigid(&self, isometry: &Isometry3<Real>) -> Self;

    fn union(&self, other: &Self) -> Self {
        self.combine(other, BooleanOp::Union, Blend::Hard)
    }

    /// `self` with `other` removed.
    fn difference(&self, other: &Self) -> Self {
        self.combine(other, BooleanOp::Difference, Blend::Hard)
    }

    fn intersection(&self, other: &Self) -> Self {
        self.combine(other, BooleanOp::Intersection, Blend::Hard)
    }

    /// Union with a rounded fillet of radius `k` along the seam.
    fn smooth_union(&self, other: &Self, k: Real) -> Result<Self, ValidationError> {
        Ok(self.combine(other, BooleanOp::Union, Blend::smooth(k)?))
    }

    fn smooth_difference(&self, other: &Self, k: Real) -> Result<Self, ValidationError> {
        Ok(self.combine(other, BooleanOp::Difference, Blend::smooth(k)?))
    }

    fn smooth_intersection(&self, other: &Self, k: Real) -> Result<Self, ValidationError> {
        Ok(self.combine(other, BooleanOp::Intersection, Blend::smooth(k)?))
    }

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.rigid(&Isometry3::from_parts(
            Translation3::from(vector),
            UnitQuaternion::identity(),
        ))
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let center = self.bounding_box().center();
        self.translate(-center.x, -center.y, -center.z)
    }

    /// Translates the field so that the bottom of its bounding box sits at z=0.
    fn float(&self) -> Self {
        let min_z = self.bounding_box().mins.z;
        self.translate(0.0, 0.0, -min_z)
    }

    /// Rotates by x_degrees, y_degrees, z_degrees (applied X, then Y, then Z).
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        // Compose them in the desired order
        let rot = rz * ry * rx;
        self.rigid(&Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_rotation_matrix(&rot),
        ))
    }

    /// Scales by scale_x, scale_y, scale_z.
    ///
    /// Non-uniform scales keep the distance a lower bound by multiplying it
    /// with the smallest scale factor.
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Result<Self, ValidationError> {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    fn scale_uniform(&self, s: Real) -> Result<Self, ValidationError> {
        self.scale(s, s, s)
    }

    /// Reflect (mirror) about the plane `normal · p = offset`.
    ///
    /// `normal` need not be unit length but must not be zero.
    fn mirror(&self, normal: Vector3<Real>, offset: Real) -> Result<Self, ValidationError> {
        let len = normal.norm();
        if !len.is_finite() || len < tolerance() {
            return Err(ValidationError::SingularTransform);
        }
        let n = normal / len;
        let w = offset / len;

        // Translate so the plane crosses the origin
        let plane_offset = n * w;
        let t1 = Translation3::from(-plane_offset).to_homogeneous();

        // R = I - 2 n n^T
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);

        let t2 = Translation3::from(plane_offset).to_homogeneous();
        self.transform(&(t2 * reflect_4 * t1))
    }

    /// Union of `count` copies spaced `spacing` apart along `dir`, starting at self.
    fn distribute_linear(&self, count: usize, dir: Vector3<Real>, spacing: Real) -> Self {
        let len = dir.norm();
        if count < 2 || len < tolerance() {
            return self.clone();
        }
        let step = dir / len * spacing;
        (1..count).fold(self.clone(), |acc, i| {
            acc.union(&self.translate_vector(step * i as Real))
        })
    }

    /// Union of a `rows x cols` grid of copies with spacing `dx`, `dy` in the XY plane.
    fn distribute_grid(&self, rows: usize, cols: usize, dx: Real, dy: Real) -> Self {
        if rows < 1 || cols < 1 {
            return self.clone();
        }
        let mut all = self.clone();
        for r in 0..rows {
            for c in 0..cols {
                if r == 0 && c == 0 {
                    continue;
                }
                all = all.union(&self.translate(c as Real * dx, r as Real * dy, 0.0));
            }
        }
        all
    }

    /// Union of `count` copies arranged on an arc of `radius` in the XY plane,
    /// from `start_angle_deg` to `end_angle_deg`.
    fn distribute_arc(
        &self,
        count: usize,
        radius: Real,
        start_angle_deg: Real,
        end_angle_deg: Real,
    ) -> Self {
        if count < 1 {
            return self.clone();
        }
        let start_rad = start_angle_deg.to_radians();
        let sweep = end_angle_deg.to_radians() - start_rad;

        let copy = |i: usize| {
            let t = if count == 1 {
                0.5
            } else {
                i as Real / ((count - 1) as Real)
            };
            let angle = start_rad + t * sweep;
            let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle);
            // translate out to radius in x, then swing around z
            self.rigid(&(Isometry3::from_parts(Translation3::identity(), rotation)
                * Translation3::new(radius, 0.0, 0.0)))
        };

        (1..count).fold(copy(0), |acc, i| acc.union(&copy(i)))
    }
}
