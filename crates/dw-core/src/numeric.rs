//! Scalar guards shared by every calculation. Inputs are rejected, never clamped.

use crate::DwError;

/// Floating point type used for every physical quantity.
pub type Real = f64;

/// Relative tolerance used when comparing converted or recomputed quantities.
pub const DEFAULT_REL_TOL: Real = 1e-9;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DwError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DwError::NonFinite { what, value: v })
    }
}

/// Airflow, friction rate, dimensions, lengths and `K` must be strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, DwError> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DwError::InvalidInput { what, value: v })
    }
}

/// Zero allowed; used for additive constants such as end caps.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, DwError> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(DwError::InvalidInput { what, value: v })
    }
}

/// `|a - b| <= rel * max(|a|, |b|)`, with exact equality for zeros.
pub fn close_to(a: Real, b: Real, rel: Real) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs())
}
