//! Round-duct diameter from friction rate and airflow.
//!
//! `D = (K * Q^1.82 / FR)^(1/4.86)`, with `K` chosen by the unit system
//! (or overridden by the caller) and `D` in the system's length unit.

use crate::common::check_positive;
use crate::error::SizingResult;
use dw_core::units::FormulaCoefficients;

/// Airflow exponent of the friction formula.
pub const FLOW_EXPONENT: f64 = 1.82;

/// Diameter exponent of the friction formula.
pub const DIAMETER_EXPONENT: f64 = 4.86;

/// Round-duct diameter that carries `airflow` at `friction_rate`.
///
/// Strictly decreasing in `friction_rate`, strictly increasing in `airflow`.
pub fn round_diameter(
    friction_rate: f64,
    airflow: f64,
    coefficients: FormulaCoefficients,
) -> SizingResult<f64> {
    let fr = check_positive(friction_rate, "friction_rate")?;
    let q = check_positive(airflow, "airflow")?;
    let k = check_positive(coefficients.k(), "K")?;

    Ok((k * q.powf(FLOW_EXPONENT) / fr).powf(1.0 / DIAMETER_EXPONENT))
}

/// Friction rate produced by `airflow` through a round duct of `diameter`
/// (or a rectangle with that equivalent diameter).
pub fn friction_rate(
    diameter: f64,
    airflow: f64,
    coefficients: FormulaCoefficients,
) -> SizingResult<f64> {
    let d = check_positive(diameter, "diameter")?;
    let q = check_positive(airflow, "airflow")?;
    let k = check_positive(coefficients.k(), "K")?;

    Ok(k * q.powf(FLOW_EXPONENT) * d.powf(-DIAMETER_EXPONENT))
}
