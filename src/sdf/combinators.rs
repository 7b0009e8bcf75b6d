//! Boolean composition of fields.

use crate::errors::ValidationError;
use crate::float_types::parry3d::bounding_volume::BoundingVolume;
use crate::float_types::{Aabb, Real};
use crate::sdf::{Blend, BooleanOp, Sdf3, Solid};
use nalgebra::Point3;

/// An n-ary boolean node.
///
/// Distances are folded left to right: for `Difference` the first operand
/// is the base and every later operand is cut away from it.
#[derive(Debug, Clone)]
pub struct Combine {
    op: BooleanOp,
    blend: Blend,
    operands: Vec<Solid>,
    bounding_box: Aabb,
}

impl Combine {
    pub fn new(op: BooleanOp, operands: Vec<Solid>, blend: Blend) -> Result<Self, ValidationError> {
        if operands.is_empty() {
            return Err(ValidationError::EmptyComposition);
        }
        if let Blend::Smooth(k) = blend {
            // validate radii built by hand rather than through Blend::smooth
            Blend::smooth(k)?;
        }
        let bounding_box = combined_box(op, blend, &operands);
        Ok(Combine { op, blend, operands, bounding_box })
    }

    /// Two-operand node; cannot fail because both operands exist.
    pub fn pair(op: BooleanOp, a: Solid, b: Solid, blend: Blend) -> Self {
        let operands = vec![a, b];
        let bounding_box = combined_box(op, blend, &operands);
        Combine { op, blend, operands, bounding_box }
    }

    pub const fn op(&self) -> BooleanOp {
        self.op
    }

    pub const fn blend(&self) -> Blend {
        self.blend
    }

    pub fn operands(&self) -> &[Solid] {
        &self.operands
    }
}

fn combined_box(op: BooleanOp, blend: Blend, operands: &[Solid]) -> Aabb {
    let first = operands[0].bounding_box();
    let rest = operands[1..].iter().map(|s| s.bounding_box());
    match op {
        // every fold of the smooth-min can dip another k / 4 below the hard minimum
        BooleanOp::Union => rest
            .fold(first, |acc, bb| acc.merged(&bb))
            .loosened(blend.union_growth() * (operands.len() - 1) as Real),
        BooleanOp::Intersection => {
            let mut acc = first;
            for bb in rest {
                match acc.intersection(&bb) {
                    Some(overlap) => acc = overlap,
                    // Disjoint operands: nothing is inside, a zero-volume box is still conservative.
                    None => {
                        let c = acc.center();
                        return Aabb::new(c, c);
                    }
                }
            }
            acc
        }
        BooleanOp::Difference => first,
    }
}

impl Sdf3 for Combine {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let first = self.operands[0].evaluate(p);
        self.operands[1..]
            .iter()
            .fold(first, |acc, s| self.blend.apply(self.op, acc, s.evaluate(p)))
    }

    fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }
}
