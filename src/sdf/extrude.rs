//! Lifting 2D profiles into 3D.

use crate::errors::{ValidationError, positive};
use crate::float_types::{Aabb, Real};
use crate::sdf::Sdf3;
use crate::sketch::{Profile, Sdf2};
use nalgebra::{Point2, Point3, Vector2};

/// Profile swept along Z between `-height / 2` and `height / 2`.
///
/// Exact whenever the profile's field is exact.
#[derive(Debug, Clone)]
pub struct Extrude {
    profile: Profile,
    half_height: Real,
}

impl Extrude {
    pub fn new(profile: Profile, height: Real) -> Result<Self, ValidationError> {
        Ok(Extrude { profile, half_height: positive("height", height)? * 0.5 })
    }
}

impl Sdf3 for Extrude {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let d = self.profile.evaluate(&p.xy());
        let w = Vector2::new(d, p.z.abs() - self.half_height);
        w.max().min(0.0) + w.sup(&Vector2::zeros()).norm()
    }

    fn bounding_box(&self) -> Aabb {
        let bb = self.profile.bounding_box();
        Aabb::new(
            Point3::new(bb.mins.x, bb.mins.y, -self.half_height),
            Point3::new(bb.maxs.x, bb.maxs.y, self.half_height),
        )
    }
}

/// Profile spun around the Z axis.
///
/// The profile's X coordinate is the distance from the axis and its Y
/// coordinate becomes Z. Parts of the profile at negative X are mirrored
/// onto the positive side.
#[derive(Debug, Clone)]
pub struct Revolve {
    profile: Profile,
}

impl Revolve {
    pub const fn new(profile: Profile) -> Self {
        Revolve { profile }
    }
}

impl Sdf3 for Revolve {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = Point2::new(p.xy().coords.norm(), p.z);
        self.profile.evaluate(&q)
    }

    fn bounding_box(&self) -> Aabb {
        let bb = self.profile.bounding_box();
        let r = bb.mins.x.abs().max(bb.maxs.x.abs());
        Aabb::new(Point3::new(-r, -r, bb.mins.y), Point3::new(r, r, bb.maxs.y))
    }
}
