//! Signed distance fields in 3D.
//!
//! A field is anything implementing [`Sdf3`]: a pure function from a point to
//! a signed distance (negative inside, positive outside, zero on the surface)
//! together with a conservative bounding box. Fields compose into immutable
//! trees of primitives, transforms and combinators, all shared behind the
//! cheap-to-clone [`Solid`] handle.
//!
//! Distances do not have to be exact, but they must never overestimate the
//! true distance to the surface: the adaptive sampler discards whole cells on
//! the strength of a single sample.

pub mod blend;
pub mod combinators;
pub mod extrude;
pub mod modifiers;
pub mod primitives;
pub mod tpms;
pub mod transform;

pub use blend::{Blend, BooleanOp};
pub use combinators::Combine;
pub use extrude::{Extrude, Revolve};
pub use modifiers::{Offset, Shell};
pub use primitives::{Capsule, Cone, Cuboid, Cylinder, Sphere, Torus};
pub use tpms::{Gyroid, SchwarzD, SchwarzP};
pub use transform::Transform3;

use crate::errors::ValidationError;
use crate::float_types::{Aabb, Real, tolerance};
use crate::sketch::Profile;
use crate::traits::FieldOps;
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use std::fmt::Debug;
use std::sync::Arc;

/// The 3D field contract.
///
/// Implementations must be pure and thread-safe: the samplers call
/// `evaluate` concurrently from worker threads without synchronisation.
pub trait Sdf3: Send + Sync + Debug {
    /// Signed distance (or a lower bound on it) from `p` to the surface.
    fn evaluate(&self, p: &Point3<Real>) -> Real;

    /// A box containing every point where `evaluate(p) <= 0`.
    fn bounding_box(&self) -> Aabb;
}

/// Shared, immutable handle to a 3D field tree.
#[derive(Clone, Debug)]
pub struct Solid(Arc<dyn Sdf3>);

impl Solid {
    /// Wrap any field implementation, including ones defined outside this crate.
    pub fn new<T: Sdf3 + 'static>(field: T) -> Self {
        Solid(Arc::new(field))
    }

    pub fn sphere(radius: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Sphere::new(radius)?))
    }

    /// Axis-aligned box centered at the origin with the given half extents.
    pub fn cuboid(half_extents: Vector3<Real>, round: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Cuboid::new(half_extents, round)?))
    }

    /// Box with full side lengths `(x, y, z)`, centered at the origin.
    pub fn box3(x: Real, y: Real, z: Real) -> Result<Self, ValidationError> {
        Self::cuboid(Vector3::new(x, y, z) * 0.5, 0.0)
    }

    pub fn cylinder(height: Real, radius: Real, round: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Cylinder::new(height, radius, round)?))
    }

    pub fn capsule(height: Real, radius: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Capsule::new(height, radius)?))
    }

    pub fn cone(height: Real, r0: Real, r1: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Cone::new(height, r0, r1)?))
    }

    pub fn torus(major: Real, minor: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Torus::new(major, minor)?))
    }

    pub fn gyroid(period: Vector3<Real>) -> Result<Self, ValidationError> {
        Ok(Self::new(Gyroid::new(period)?))
    }

    pub fn schwarz_p(period: Vector3<Real>) -> Result<Self, ValidationError> {
        Ok(Self::new(SchwarzP::new(period)?))
    }

    pub fn schwarz_d(period: Vector3<Real>) -> Result<Self, ValidationError> {
        Ok(Self::new(SchwarzD::new(period)?))
    }

    /// Linear extrusion of a 2D profile along Z, centered on z = 0.
    pub fn extrude(profile: &Profile, height: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Extrude::new(profile.clone(), height)?))
    }

    /// Revolve a 2D profile (x = radius, y = z) around the Z axis.
    pub fn revolve(profile: &Profile) -> Self {
        Self::new(Revolve::new(profile.clone()))
    }

    /// Union of any number of solids.
    pub fn union_all(solids: &[Solid], blend: Blend) -> Result<Self, ValidationError> {
        Ok(Self::new(Combine::new(BooleanOp::Union, solids.to_vec(), blend)?))
    }

    /// Intersection of any number of solids.
    pub fn intersection_all(solids: &[Solid], blend: Blend) -> Result<Self, ValidationError> {
        Ok(Self::new(Combine::new(BooleanOp::Intersection, solids.to_vec(), blend)?))
    }

    /// Hollow out the solid, keeping a wall of `thickness` centered on the surface.
    pub fn shell(&self, thickness: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Shell::new(self.clone(), thickness)?))
    }

    /// Grow (positive) or shrink (negative) the solid by `distance`.
    pub fn offset(&self, distance: Real) -> Result<Self, ValidationError> {
        Ok(Self::new(Offset::new(self.clone(), distance)?))
    }

    /// Estimated outward surface normal at `p`, see [`normal`].
    pub fn normal(&self, p: &Point3<Real>, eps: Real) -> Option<Vector3<Real>> {
        normal(self, p, eps)
    }
}

impl Sdf3 for Solid {
    #[inline]
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.0.evaluate(p)
    }

    #[inline]
    fn bounding_box(&self) -> Aabb {
        self.0.bounding_box()
    }
}

impl FieldOps for Solid {
    fn combine(&self, other: &Self, op: BooleanOp, blend: Blend) -> Self {
        Self::new(Combine::pair(op, self.clone(), other.clone(), blend))
    }

    fn transform(&self, matrix: &Matrix4<Real>) -> Result<Self, ValidationError> {
        Ok(Self::new(Transform3::new(self.clone(), matrix)?))
    }

    fn rigid(&self, isometry: &Isometry3<Real>) -> Self {
        Self::new(Transform3::from_isometry(self.clone(), isometry))
    }
}

/// Central-difference gradient of `field` at `p` with step `eps`.
pub fn gradient<F: Sdf3 + ?Sized>(field: &F, p: &Point3<Real>, eps: Real) -> Vector3<Real> {
    let dx = Vector3::new(eps, 0.0, 0.0);
    let dy = Vector3::new(0.0, eps, 0.0);
    let dz = Vector3::new(0.0, 0.0, eps);
    Vector3::new(
        field.evaluate(&(p + dx)) - field.evaluate(&(p - dx)),
        field.evaluate(&(p + dy)) - field.evaluate(&(p - dy)),
        field.evaluate(&(p + dz)) - field.evaluate(&(p - dz)),
    ) / (2.0 * eps)
}

/// Normalised gradient, or `None` where the gradient vanishes.
pub fn normal<F: Sdf3 + ?Sized>(field: &F, p: &Point3<Real>, eps: Real) -> Option<Vector3<Real>> {
    let g = gradient(field, p, eps);
    let len = g.norm();
    if len.is_finite() && len > tolerance() {
        Some(g / len)
    } else {
        None
    }
}

/// Box covering all of space, for fields that are solid arbitrarily far out.
pub fn unbounded_box() -> Aabb {
    Aabb::new(
        Point3::from(Vector3::repeat(Real::NEG_INFINITY)),
        Point3::from(Vector3::repeat(Real::INFINITY)),
    )
}

pub(crate) fn is_bounded(bb: &Aabb) -> bool {
    bb.mins.iter().chain(bb.maxs.iter()).all(|c| c.is_finite())
}

/// Smallest enclosing box of a set of points.
pub(crate) fn enclosing_box<I: IntoIterator<Item = Point3<Real>>>(points: I) -> Aabb {
    let mut iter = points.into_iter();
    let first = iter.next().unwrap_or_else(Point3::origin);
    let (mins, maxs) = iter.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
    Aabb::new(mins, maxs)
}
