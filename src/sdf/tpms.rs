//! Triply‑periodic minimal surfaces as implicit fields.
//!
//! The raw level-set functions are not distances. Each one is divided by a
//! bound on its gradient magnitude so the result never overestimates the
//! distance to its zero set, which keeps adaptive pruning safe.
//!
//! The surfaces fill all of space, so their bounding box is unbounded.
//! Intersect with a bounded solid to cut out a piece; rendering one on its
//! own fails with [`RenderError::UnboundedField`](crate::errors::RenderError).

use crate::errors::{ValidationError, positive};
use crate::float_types::{Aabb, Real, TAU};
use crate::sdf::{Sdf3, unbounded_box};
use nalgebra::{Point3, Vector3};

/// Spatial frequencies and gradient bound shared by all TPMS flavours.
#[derive(Debug, Clone, PartialEq)]
struct Lattice {
    omega: Vector3<Real>,
    inv_lipschitz: Real,
}

impl Lattice {
    /// `gradient_factor` bounds |∂f/∂x_i| / ω_i for the particular surface.
    fn new(period: Vector3<Real>, gradient_factor: Real) -> Result<Self, ValidationError> {
        positive("period.x", period.x)?;
        positive("period.y", period.y)?;
        positive("period.z", period.z)?;
        let omega = period.map(|k| TAU / k);
        Ok(Lattice {
            omega,
            inv_lipschitz: 1.0 / (gradient_factor * omega.norm()),
        })
    }

    #[inline]
    fn scaled(&self, p: &Point3<Real>) -> Vector3<Real> {
        p.coords.component_mul(&self.omega)
    }
}

/// Gyroid surface: `sin x cos y + sin y cos z + sin z cos x = 0`.
///
/// `period` is the repeat length along each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Gyroid {
    lattice: Lattice,
}

impl Gyroid {
    pub fn new(period: Vector3<Real>) -> Result<Self, ValidationError> {
        // each partial is cos·cos - sin·sin of shared terms: at most √2 ω
        Ok(Gyroid { lattice: Lattice::new(period, Real::sqrt(2.0))? })
    }
}

impl Sdf3 for Gyroid {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = self.lattice.scaled(p);
        let (x, y, z) = (q.x, q.y, q.z);
        ((x.sin() * y.cos()) + (y.sin() * z.cos()) + (z.sin() * x.cos()))
            * self.lattice.inv_lipschitz
    }

    fn bounding_box(&self) -> Aabb {
        unbounded_box()
    }
}

/// Schwarz‑P surface:  `cos x + cos y + cos z = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchwarzP {
    lattice: Lattice,
}

impl SchwarzP {
    pub fn new(period: Vector3<Real>) -> Result<Self, ValidationError> {
        Ok(SchwarzP { lattice: Lattice::new(period, 1.0)? })
    }
}

impl Sdf3 for SchwarzP {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = self.lattice.scaled(p);
        (q.x.cos() + q.y.cos() + q.z.cos()) * self.lattice.inv_lipschitz
    }

    fn bounding_box(&self) -> Aabb {
        unbounded_box()
    }
}

/// Schwarz‑D (Diamond) surface:
/// `sin x sin y sin z + sin x cos y cos z + cos x sin y cos z + cos x cos y sin z = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchwarzD {
    lattice: Lattice,
}

impl SchwarzD {
    pub fn new(period: Vector3<Real>) -> Result<Self, ValidationError> {
        Ok(SchwarzD { lattice: Lattice::new(period, Real::sqrt(2.0))? })
    }
}

impl Sdf3 for SchwarzD {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = self.lattice.scaled(p);
        let (sx, cx) = q.x.sin_cos();
        let (sy, cy) = q.y.sin_cos();
        let (sz, cz) = q.z.sin_cos();
        ((sx * sy * sz) + (sx * cy * cz) + (cx * sy * cz) + (cx * cy * sz))
            * self.lattice.inv_lipschitz
    }

    fn bounding_box(&self) -> Aabb {
        unbounded_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::gradient;

    fn max_gradient<F: Sdf3>(field: &F) -> Real {
        let mut worst: Real = 0.0;
        for i in 0..7 {
            for j in 0..7 {
                for k in 0..7 {
                    let p = Point3::new(i as Real * 0.37, j as Real * 0.53, k as Real * 0.71);
                    worst = worst.max(gradient(field, &p, 1e-5).norm());
                }
            }
        }
        worst
    }

    #[test]
    fn gyroid_is_one_lipschitz() {
        let g = Gyroid::new(Vector3::new(2.0, 3.0, 4.0)).unwrap();
        assert!(max_gradient(&g) <= 1.0 + 1e-6);
    }

    #[test]
    fn schwarz_fields_are_one_lipschitz() {
        let p = SchwarzP::new(Vector3::repeat(2.5)).unwrap();
        let d = SchwarzD::new(Vector3::repeat(2.5)).unwrap();
        assert!(max_gradient(&p) <= 1.0 + 1e-6);
        assert!(max_gradient(&d) <= 1.0 + 1e-6);
    }

    #[test]
    fn gyroid_passes_through_origin() {
        let g = Gyroid::new(Vector3::repeat(1.0)).unwrap();
        assert!(g.evaluate(&Point3::origin()).abs() < 1e-12);
    }

    #[test]
    fn surfaces_are_unbounded() {
        let g = Gyroid::new(Vector3::repeat(10.0)).unwrap();
        let bb = g.bounding_box();
        assert_eq!(bb.mins.x, Real::NEG_INFINITY);
        assert_eq!(bb.maxs.z, Real::INFINITY);
        // a hundred periods out the surface repeats unchanged
        assert!(g.evaluate(&Point3::new(1002.5, 1000.0, 1000.0)) > 0.0);
        assert!(g.evaluate(&Point3::new(1007.5, 1000.0, 1000.0)) < 0.0);
    }

    #[test]
    fn period_must_be_positive() {
        assert!(Gyroid::new(Vector3::new(1.0, 0.0, 1.0)).is_err());
        assert!(SchwarzP::new(Vector3::new(-1.0, 1.0, 1.0)).is_err());
    }
}
