//! Common input guards for sizing calculations.

use crate::error::SizingResult;
use dw_core::numeric::ensure_positive;

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> SizingResult<f64> {
    Ok(ensure_positive(value, what)?)
}
