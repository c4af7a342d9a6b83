//! Circular-equivalent diameter of a rectangular section.
//!
//! `De(a, b) = 1.30 * (a*b)^0.625 / (a+b)^0.25`

use crate::common::check_positive;
use crate::error::SizingResult;

pub const DE_COEFFICIENT: f64 = 1.30;
const AREA_EXPONENT: f64 = 0.625;
const PERIMETER_EXPONENT: f64 = 0.25;

/// Equivalent diameter of a `width` x `height` rectangle. Symmetric in its arguments.
pub fn equivalent_diameter(width: f64, height: f64) -> SizingResult<f64> {
    let a = check_positive(width, "width")?;
    let b = check_positive(height, "height")?;
    Ok(de(a, b))
}

/// Unchecked formula; callers guarantee positive sides.
pub(crate) fn de(a: f64, b: f64) -> f64 {
    DE_COEFFICIENT * (a * b).powf(AREA_EXPONENT) / (a + b).powf(PERIMETER_EXPONENT)
}

/// d De(fixed, x) / dx
pub(crate) fn de_slope(fixed: f64, x: f64) -> f64 {
    let product = fixed * x;
    let sum = fixed + x;
    DE_COEFFICIENT
        * (AREA_EXPONENT * product.powf(AREA_EXPONENT - 1.0) * fixed / sum.powf(PERIMETER_EXPONENT)
            - PERIMETER_EXPONENT * product.powf(AREA_EXPONENT) / sum.powf(PERIMETER_EXPONENT + 1.0))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn symmetric_and_bounded(a in 0.5_f64..500.0, b in 0.5_f64..500.0) {
            let ab = equivalent_diameter(a, b).unwrap();
            let ba = equivalent_diameter(b, a).unwrap();
            prop_assert!((ab - ba).abs() <= 1e-9 * ab);
            prop_assert!(ab > 0.0);
            // Never smaller than the short side, never larger than the long side's square.
            prop_assert!(ab >= a.min(b));
            prop_assert!(ab <= de(a.max(b), a.max(b)) + 1e-9);
        }
    }
}
