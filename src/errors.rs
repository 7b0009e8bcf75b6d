//! Construction and render errors

use crate::float_types::Real;
use nalgebra::Vector3;

/// Problems detected while building a field tree, before any rendering work.
///
/// Every parameterised constructor in the crate reports through this type
/// rather than clamping to a degenerate field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A parameter that must be strictly positive was zero or negative
    #[error("(NonPositive) `{name}` must be > 0, got {value}")]
    NonPositive { name: &'static str, value: Real },
    /// A parameter that must be zero or positive was negative
    #[error("(Negative) `{name}` must be >= 0, got {value}")]
    Negative { name: &'static str, value: Real },
    /// A parameter was NaN or infinite
    #[error("(NonFinite) `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: Real },
    /// A box has one or more zero/negative extents
    #[error("(DegenerateExtent) box extents must all be > 0, got {0}")]
    DegenerateExtent(Vector3<Real>),
    /// A rounding radius does not fit inside the shape it rounds
    #[error("(RoundTooLarge) rounding radius {round} exceeds the smallest half extent {limit}")]
    RoundTooLarge { round: Real, limit: Real },
    /// The linear part of an affine transform cannot be inverted
    #[error("(SingularTransform) the transform matrix is not invertible")]
    SingularTransform,
    /// A polygon or polyline has fewer than the minimal number of points
    #[error("(TooFewPoints) need at least 3 points, got {0}")]
    TooFewPoints(usize),
    /// A combinator was given no operands
    #[error("(EmptyComposition) a combinator needs at least one operand")]
    EmptyComposition,
    /// A mesh-backed field was built from a mesh with no triangles
    #[error("(EmptyMesh) cannot build a distance field from an empty mesh")]
    EmptyMesh,
    /// The render resolution parameters are unusable
    #[error("(InvalidResolution) {0}")]
    InvalidResolution(String),
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: Real) -> Result<Real, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { name, value });
    }
    Ok(value)
}

/// Check that `value` is finite and zero or positive.
pub(crate) fn non_negative(name: &'static str, value: Real) -> Result<Real, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { name, value });
    }
    Ok(value)
}

/// Check that `value` is finite (any sign).
pub(crate) fn finite(name: &'static str, value: Real) -> Result<Real, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { name, value })
    }
}

/// Failures of a render invocation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The render configuration itself is malformed
    #[error("invalid render configuration: {0}")]
    InvalidConfig(#[from] ValidationError),
    /// The field's bounding box is empty, inverted or not finite
    #[error("the field's bounding box is empty or unbounded")]
    UnboundedField,
    /// The requested lattice would exceed the configured depth limit
    #[error("resolution too fine: {cells} cells per axis exceeds the limit of {limit}")]
    ResolutionTooFine { cells: usize, limit: usize },
}
