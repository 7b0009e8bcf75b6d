//! Boolean and fillet operators on signed distances.
//!
//! The smooth variants use the polynomial smooth-min
//!
//! ```text
//! h = clamp(0.5 + 0.5 * (b - a) / k, 0, 1)
//! smin(a, b, k) = lerp(b, a, h) - k * h * (1 - h)
//! ```
//!
//! which deviates from `min(a, b)` by at most `k / 4` (where `a == b`) and
//! is exactly `min(a, b)` wherever `|a - b| >= k`. Smooth-max is its dual,
//! `-smin(-a, -b, k)`. A radius of zero is the hard operator, bit for bit.

use crate::errors::{ValidationError, non_negative};
use crate::float_types::Real;

/// The boolean operator of a combinator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    /// The first operand minus every following operand.
    Difference,
}

/// How two distances are joined at a seam.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Blend {
    /// Sharp edge: plain `min` / `max`.
    #[default]
    Hard,
    /// Rounded fillet of radius `k`.
    Smooth(Real),
}

impl Blend {
    /// A smooth blend of radius `k`; `k == 0` yields [`Blend::Hard`].
    pub fn smooth(k: Real) -> Result<Self, ValidationError> {
        let k = non_negative("blend radius", k)?;
        Ok(if k == 0.0 { Blend::Hard } else { Blend::Smooth(k) })
    }

    /// Blend radius (zero for hard blends).
    pub const fn radius(&self) -> Real {
        match self {
            Blend::Hard => 0.0,
            Blend::Smooth(k) => *k,
        }
    }

    /// Join two distances with `op`.
    #[inline]
    pub fn apply(&self, op: BooleanOp, a: Real, b: Real) -> Real {
        match op {
            BooleanOp::Union => self.union(a, b),
            BooleanOp::Intersection => self.intersection(a, b),
            BooleanOp::Difference => self.difference(a, b),
        }
    }

    pub fn union(&self, a: Real, b: Real) -> Real {
        smooth_min(a, b, self.radius())
    }

    pub fn intersection(&self, a: Real, b: Real) -> Real {
        smooth_max(a, b, self.radius())
    }

    /// `a` with `b` removed.
    pub fn difference(&self, a: Real, b: Real) -> Real {
        smooth_max(a, -b, self.radius())
    }

    /// How far a blended union can reach beyond the union of its operands.
    ///
    /// The smooth-min is at most `k / 4` below the hard minimum, so a union's
    /// bounding box must grow by that much to stay conservative.
    pub const fn union_growth(&self) -> Real {
        self.radius() * 0.25
    }
}

/// Polynomial smooth minimum; `k == 0` is exactly `a.min(b)`.
#[inline]
pub fn smooth_min(a: Real, b: Real, k: Real) -> Real {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    lerp(b, a, h) - k * h * (1.0 - h)
}

/// Polynomial smooth maximum; `k == 0` is exactly `a.max(b)`.
#[inline]
pub fn smooth_max(a: Real, b: Real, k: Real) -> Real {
    if k <= 0.0 {
        return a.max(b);
    }
    -smooth_min(-a, -b, k)
}

#[inline]
fn lerp(x: Real, y: Real, t: Real) -> Real {
    x + (y - x) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<(Real, Real)> {
        let mut out = Vec::new();
        let values = [-3.0, -1.0, -0.25, 0.0, 0.1, 0.5, 1.0, 2.5, 7.0];
        for &a in &values {
            for &b in &values {
                out.push((a, b));
            }
        }
        out
    }

    #[test]
    fn zero_radius_is_hard_bit_for_bit() {
        let hard = Blend::Hard;
        let zero = Blend::Smooth(0.0);
        for (a, b) in samples() {
            assert_eq!(zero.union(a, b).to_bits(), a.min(b).to_bits());
            assert_eq!(zero.intersection(a, b).to_bits(), a.max(b).to_bits());
            assert_eq!(zero.difference(a, b).to_bits(), a.max(-b).to_bits());
            assert_eq!(hard.union(a, b), zero.union(a, b));
        }
    }

    #[test]
    fn smooth_constructor_folds_zero_into_hard() {
        assert_eq!(Blend::smooth(0.0), Ok(Blend::Hard));
        assert_eq!(Blend::smooth(0.5), Ok(Blend::Smooth(0.5)));
        assert!(Blend::smooth(-1.0).is_err());
    }

    #[test]
    fn smooth_min_is_bounded_by_quarter_radius() {
        let k = 0.8;
        for (a, b) in samples() {
            let s = smooth_min(a, b, k);
            assert!(s <= a.min(b) + 1e-12);
            assert!(s >= a.min(b) - k * 0.25 - 1e-12);
        }
        // Worst case sits exactly on the seam.
        assert!((smooth_min(1.0, 1.0, k) - (1.0 - k * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn smooth_min_matches_hard_far_from_seam() {
        assert_eq!(smooth_min(0.0, 5.0, 1.0), 0.0);
        assert_eq!(smooth_min(5.0, -2.0, 1.0), -2.0);
    }

    #[test]
    fn smooth_max_is_dual_of_smooth_min() {
        let k = 0.3;
        for (a, b) in samples() {
            assert_eq!(smooth_max(a, b, k), -smooth_min(-a, -b, k));
            assert!(smooth_max(a, b, k) >= a.max(b) - 1e-12);
        }
    }

    #[test]
    fn difference_sign_behaviour() {
        let blend = Blend::Smooth(0.2);
        // inside A (-1), outside B (+1) => inside the result
        assert!(blend.difference(-1.0, 1.0) < 0.0);
        // inside both => removed
        assert!(blend.difference(-1.0, -1.0) > 0.0);
    }
}
