//! Rounding of raw dimensions to fabricable sheet-metal sizes.
//!
//! Fabricable sizes are even integers of at least [`MIN_FABRICABLE`] in the
//! working length unit. One policy is chosen per calculation and applied to every
//! dimension the engine produces.

use crate::common::check_positive;
use crate::error::SizingResult;
use serde::{Deserialize, Serialize};

/// Smallest dimension the engine will emit.
pub const MIN_FABRICABLE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Smallest even integer >= x. Never undersizes.
    #[default]
    CeilEven,
    /// Nearest even integer; may undersize by up to one unit.
    NearestEven,
}

impl std::str::FromStr for RoundingPolicy {
    type Err = crate::SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ceil_even" | "ceil" => Ok(RoundingPolicy::CeilEven),
            "nearest_even" | "nearest" => Ok(RoundingPolicy::NearestEven),
            _ => Err(crate::SizingError::InvalidArg {
                what: "rounding policy must be ceil_even or nearest_even",
            }),
        }
    }
}

/// Round a positive raw dimension to a fabricable even integer.
pub fn round_fabricable(x: f64, policy: RoundingPolicy) -> SizingResult<u32> {
    let x = check_positive(x, "dimension")?;
    let halves = match policy {
        RoundingPolicy::CeilEven => (x / 2.0).ceil(),
        RoundingPolicy::NearestEven => (x / 2.0).round(),
    };
    if halves >= f64::from(u32::MAX / 2) {
        return Err(crate::SizingError::InvalidInput {
            what: "dimension",
            value: x,
        });
    }
    Ok((halves as u32 * 2).max(MIN_FABRICABLE))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ceil_even_is_fabricable_and_never_undersized(x in 0.001_f64..10_000.0) {
            let v = round_fabricable(x, RoundingPolicy::CeilEven).unwrap();
            prop_assert_eq!(v % 2, 0);
            prop_assert!(v >= MIN_FABRICABLE);
            prop_assert!(f64::from(v) >= x);
            prop_assert!(f64::from(v) < x + 2.0 || v == MIN_FABRICABLE);
        }

        #[test]
        fn nearest_even_is_within_one_unit(x in 2.0_f64..10_000.0) {
            let v = round_fabricable(x, RoundingPolicy::NearestEven).unwrap();
            prop_assert_eq!(v % 2, 0);
            prop_assert!((f64::from(v) - x).abs() <= 1.0 + 1e-9);
        }
    }
}
