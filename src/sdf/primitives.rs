//! Closed-form primitive fields.
//!
//! All primitives are centered at the origin; rotationally symmetric ones
//! use the Z axis. Distances are exact Euclidean distances.

use crate::errors::{ValidationError, non_negative, positive};
use crate::float_types::{Aabb, Real};
use crate::sdf::Sdf3;
use nalgebra::{Point3, Vector2, Vector3};

/// Ball of the given radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    radius: Real,
}

impl Sphere {
    pub fn new(radius: Real) -> Result<Self, ValidationError> {
        Ok(Sphere { radius: positive("radius", radius)? })
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }
}

impl Sdf3 for Sphere {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        p.coords.norm() - self.radius
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vector3::repeat(self.radius);
        Aabb::new(Point3::from(-r), Point3::from(r))
    }
}

/// Axis-aligned box given by its half extents, optionally with rounded edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    half_extents: Vector3<Real>,
    round: Real,
}

impl Cuboid {
    /// `round` is the edge radius; it must not exceed the smallest half extent.
    pub fn new(half_extents: Vector3<Real>, round: Real) -> Result<Self, ValidationError> {
        if !half_extents.iter().all(|c| c.is_finite() && *c > 0.0) {
            return Err(ValidationError::DegenerateExtent(half_extents));
        }
        let round = non_negative("round", round)?;
        let limit = half_extents.min();
        if round > limit {
            return Err(ValidationError::RoundTooLarge { round, limit });
        }
        Ok(Cuboid { half_extents, round })
    }

    pub const fn half_extents(&self) -> Vector3<Real> {
        self.half_extents
    }
}

impl Sdf3 for Cuboid {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = p.coords.abs() - self.half_extents + Vector3::repeat(self.round);
        let outside = q.sup(&Vector3::zeros()).norm();
        let inside = q.max().min(0.0);
        outside + inside - self.round
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::new(Point3::from(-self.half_extents), Point3::from(self.half_extents))
    }
}

/// Cylinder along Z of total `height`, optionally with rounded rims.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    half_height: Real,
    radius: Real,
    round: Real,
}

impl Cylinder {
    pub fn new(height: Real, radius: Real, round: Real) -> Result<Self, ValidationError> {
        let half_height = positive("height", height)? * 0.5;
        let radius = positive("radius", radius)?;
        let round = non_negative("round", round)?;
        let limit = half_height.min(radius);
        if round > limit {
            return Err(ValidationError::RoundTooLarge { round, limit });
        }
        Ok(Cylinder { half_height, radius, round })
    }
}

impl Sdf3 for Cylinder {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let d = Vector2::new(
            p.xy().coords.norm() - self.radius + self.round,
            p.z.abs() - self.half_height + self.round,
        );
        d.x.max(d.y).min(0.0) + d.sup(&Vector2::zeros()).norm() - self.round
    }

    fn bounding_box(&self) -> Aabb {
        let e = Vector3::new(self.radius, self.radius, self.half_height);
        Aabb::new(Point3::from(-e), Point3::from(e))
    }
}

/// Cylinder with hemispherical ends; `height` is the overall length along Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Capsule {
    half_segment: Real,
    radius: Real,
}

impl Capsule {
    pub fn new(height: Real, radius: Real) -> Result<Self, ValidationError> {
        let height = positive("height", height)?;
        let radius = positive("radius", radius)?;
        if height < 2.0 * radius {
            return Err(ValidationError::RoundTooLarge { round: radius, limit: height * 0.5 });
        }
        Ok(Capsule { half_segment: height * 0.5 - radius, radius })
    }
}

impl Sdf3 for Capsule {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let z = p.z.clamp(-self.half_segment, self.half_segment);
        (p - Point3::new(0.0, 0.0, z)).norm() - self.radius
    }

    fn bounding_box(&self) -> Aabb {
        let e = Vector3::new(self.radius, self.radius, self.half_segment + self.radius);
        Aabb::new(Point3::from(-e), Point3::from(e))
    }
}

/// Truncated cone along Z: radius `r0` at the bottom (z = -height/2),
/// `r1` at the top. Either radius may be zero, not both.
#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    half_height: Real,
    r0: Real,
    r1: Real,
}

impl Cone {
    pub fn new(height: Real, r0: Real, r1: Real) -> Result<Self, ValidationError> {
        let half_height = positive("height", height)? * 0.5;
        let r0 = non_negative("r0", r0)?;
        let r1 = non_negative("r1", r1)?;
        if r0 == 0.0 && r1 == 0.0 {
            return Err(ValidationError::NonPositive { name: "r0 + r1", value: 0.0 });
        }
        Ok(Cone { half_height, r0, r1 })
    }
}

impl Sdf3 for Cone {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let h = self.half_height;
        let q = Vector2::new(p.xy().coords.norm(), p.z);
        let k1 = Vector2::new(self.r1, h);
        let k2 = Vector2::new(self.r1 - self.r0, 2.0 * h);

        // nearest point on the caps
        let cap_r = if q.y < 0.0 { self.r0 } else { self.r1 };
        let ca = Vector2::new(q.x - q.x.min(cap_r), q.y.abs() - h);
        // nearest point on the slanted side
        let t = ((k1 - q).dot(&k2) / k2.norm_squared()).clamp(0.0, 1.0);
        let cb = q - k1 + k2 * t;

        let s = if cb.x < 0.0 && ca.y < 0.0 { -1.0 } else { 1.0 };
        s * ca.norm_squared().min(cb.norm_squared()).sqrt()
    }

    fn bounding_box(&self) -> Aabb {
        let r = self.r0.max(self.r1);
        let e = Vector3::new(r, r, self.half_height);
        Aabb::new(Point3::from(-e), Point3::from(e))
    }
}

/// Ring torus lying in the XY plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    major: Real,
    minor: Real,
}

impl Torus {
    pub fn new(major: Real, minor: Real) -> Result<Self, ValidationError> {
        Ok(Torus {
            major: positive("major radius", major)?,
            minor: positive("minor radius", minor)?,
        })
    }
}

impl Sdf3 for Torus {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = Vector2::new(p.xy().coords.norm() - self.major, p.z);
        q.norm() - self.minor
    }

    fn bounding_box(&self) -> Aabb {
        let r = self.major + self.minor;
        let e = Vector3::new(r, r, self.minor);
        Aabb::new(Point3::from(-e), Point3::from(e))
    }
}
