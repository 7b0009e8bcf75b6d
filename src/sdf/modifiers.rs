use crate::errors::{ValidationError, finite, positive};
use crate::float_types::parry3d::bounding_volume::BoundingVolume;
use crate::float_types::{Aabb, Real};
use crate::sdf::{Sdf3, Solid};
use nalgebra::Point3;

/// Thin wall of `thickness` centered on the child's surface.
#[derive(Debug, Clone)]
pub struct Shell {
    child: Solid,
    half_thickness: Real,
}

impl Shell {
    pub fn new(child: Solid, thickness: Real) -> Result<Self, ValidationError> {
        Ok(Shell { child, half_thickness: positive("thickness", thickness)? * 0.5 })
    }
}

impl Sdf3 for Shell {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.child.evaluate(p).abs() - self.half_thickness
    }

    fn bounding_box(&self) -> Aabb {
        self.child.bounding_box().loosened(self.half_thickness)
    }
}

/// Child surface moved outward by `distance` (inward when negative).
#[derive(Debug, Clone)]
pub struct Offset {
    child: Solid,
    distance: Real,
}

impl Offset {
    pub fn new(child: Solid, distance: Real) -> Result<Self, ValidationError> {
        Ok(Offset { child, distance: finite("distance", distance)? })
    }
}

impl Sdf3 for Offset {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.child.evaluate(p) - self.distance
    }

    fn bounding_box(&self) -> Aabb {
        // shrinking can only remove material, the child's box still holds
        self.child.bounding_box().loosened(self.distance.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_is_hollow() {
        let s = Solid::sphere(2.0).unwrap().shell(0.5).unwrap();
        assert!(s.evaluate(&Point3::origin()) > 0.0);
        assert!(s.evaluate(&Point3::new(2.0, 0.0, 0.0)) < 0.0);
        assert!((s.evaluate(&Point3::new(2.25, 0.0, 0.0))).abs() < 1e-12);
        assert!((s.bounding_box().maxs.x - 2.25).abs() < 1e-12);
        assert!(Solid::sphere(1.0).unwrap().shell(0.0).is_err());
    }

    #[test]
    fn offset_grows_and_shrinks() {
        let grown = Solid::sphere(1.0).unwrap().offset(0.5).unwrap();
        assert!(grown.evaluate(&Point3::new(1.5, 0.0, 0.0)).abs() < 1e-12);
        assert!((grown.bounding_box().maxs.x - 1.5).abs() < 1e-12);

        let shrunk = Solid::sphere(1.0).unwrap().offset(-0.5).unwrap();
        assert!(shrunk.evaluate(&Point3::new(0.5, 0.0, 0.0)).abs() < 1e-12);
        assert!((shrunk.bounding_box().maxs.x - 1.0).abs() < 1e-12);
    }
}
