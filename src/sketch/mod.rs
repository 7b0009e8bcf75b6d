//! Signed distance fields in 2D.
//!
//! Profiles are rendered on their own into [`Outline`]s (line segments) or
//! lifted into 3D with [`Solid::extrude`](crate::sdf::Solid::extrude) and
//! [`Solid::revolve`](crate::sdf::Solid::revolve).

pub mod ops;
pub mod outline;
pub mod shapes;

pub use ops::{Combine2, Offset2, Transform2};
pub use outline::{Outline, Segment};
pub use shapes::{Circle, Polygon, Rectangle};

use crate::aabb::Bounds2;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::sdf::{Blend, BooleanOp};
use nalgebra::{Matrix3, Point2, Vector2};
use std::fmt::Debug;
use std::sync::Arc;

/// The 2D field contract; same rules as [`Sdf3`](crate::sdf::Sdf3).
pub trait Sdf2: Send + Sync + Debug {
    fn evaluate(&self, p: &Point2<Real>) -> Real;

    /// A rectangle containing every point where `evaluate(p) <= 0`.
    fn bounding_box(&self) -> Bounds2;
}

/// Shared, immutable handle to a 2D field tree.
#[derive(Clone, Debug)]
pub struct Profile(Arc<dyn Sdf2>);

impl Profile {
    pub fn new<T: Sdf2 + 'static>(field: T) -> Self {
        Profile(Arc::new(field))
    }

    pub fn circle(radius: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Circle::new(radius)?))
    }

    /// Rectangle of `width` x `height` centered at the origin, with rounded corners.
    pub fn rectangle(width: Real, height: Real, round: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Rectangle::new(Vector2::new(width, height) * 0.5, round)?))
    }

    /// Closed polygon through `points` (either winding).
    pub fn polygon(points: &[Point2<Real>]) -> Result<Self, ValidationError> {
        Ok(Self::new(Polygon::new(points.to_vec())?))
    }

    pub fn union(&self, other: &Profile) -> Profile {
        Self::new(Combine2::pair(BooleanOp::Union, self.clone(), other.clone(), Blend::Hard))
    }

    pub fn difference(&self, other: &Profile) -> Profile {
        Self::new(Combine2::pair(BooleanOp::Difference, self.clone(), other.clone(), Blend::Hard))
    }

    pub fn intersection(&self, other: &Profile) -> Profile {
        Self::new(Combine2::pair(
            BooleanOp::Intersection,
            self.clone(),
            other.clone(),
            Blend::Hard,
        ))
    }

    pub fn smooth_union(&self, other: &Profile, k: Real) -> Result<Profile, ValidationError> {
        Ok(Self::new(Combine2::pair(
            BooleanOp::Union,
            self.clone(),
            other.clone(),
            Blend::smooth(k)?,
        )))
    }

    pub fn smooth_difference(&self, other: &Profile, k: Real) -> Result<Profile, ValidationError> {
        Ok(Self::new(Combine2::pair(
            BooleanOp::Difference,
            self.clone(),
            other.clone(),
            Blend::smooth(k)?,
        )))
    }

    /// Union of any number of profiles.
    pub fn union_all(profiles: &[Profile], blend: Blend) -> Result<Profile, ValidationError> {
        Ok(Self::new(Combine2::new(BooleanOp::Union, profiles.to_vec(), blend)?))
    }

    /// Apply an invertible 2D affine transform in homogeneous form.
    pub fn transform(&self, matrix: &Matrix3<Real>) -> Result<Profile, ValidationError> {
        Ok(Self::new(Transform2::new(self.clone(), matrix)?))
    }

    pub fn translate(&self, x: Real, y: Real) -> Profile {
        Self::new(Transform2::rigid(self.clone(), 0.0, Vector2::new(x, y)))
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotate(&self, degrees: Real) -> Profile {
        Self::new(Transform2::rigid(self.clone(), degrees.to_radians(), Vector2::zeros()))
    }

    pub fn scale(&self, sx: Real, sy: Real) -> Result<Profile, ValidationError> {
        self.transform(&Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)))
    }

    /// Grow (positive) or shrink (negative) the outline by `distance`.
    pub fn offset(&self, distance: Real) -> Result<Profile, ValidationError> {
        Ok(Self::new(Offset2::new(self.clone(), distance)?))
    }
}

impl Sdf2 for Profile {
    #[inline]
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.0.evaluate(p)
    }

    #[inline]
    fn bounding_box(&self) -> Bounds2 {
        self.0.bounding_box()
    }
}
