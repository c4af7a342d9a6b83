//! Forward conversion of a round diameter to a rectangle of fixed aspect ratio.

use crate::common::check_positive;
use crate::equivalent::DE_COEFFICIENT;
use crate::error::{SizingError, SizingResult};
use crate::rounding::{MIN_FABRICABLE, RoundingPolicy, round_fabricable};
use serde::{Deserialize, Serialize};

/// Width coefficient for the standard 2:1 rectangle (`W = 1.317 * D`).
pub const TWO_TO_ONE_WIDTH_COEFFICIENT: f64 = 1.317;

/// Fabricable rectangular section. Both sides are even integers >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct RectangularDimensions {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

impl TryFrom<RawDimensions> for RectangularDimensions {
    type Error = SizingError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl RectangularDimensions {
    /// Accepts only fabricable sides.
    pub fn new(width: u32, height: u32) -> SizingResult<Self> {
        for (side, what) in [(width, "width"), (height, "height")] {
            if side < MIN_FABRICABLE || side % 2 != 0 {
                return Err(SizingError::InvalidInput {
                    what,
                    value: f64::from(side),
                });
            }
        }
        Ok(Self { width, height })
    }

    /// Round raw sides with `policy`.
    pub fn from_raw(width: f64, height: f64, policy: RoundingPolicy) -> SizingResult<Self> {
        Ok(Self {
            width: round_fabricable(width, policy)?,
            height: round_fabricable(height, policy)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }

    /// Larger side; drives gauge selection.
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn area(&self) -> f64 {
        self.width_f64() * self.height_f64()
    }
}

impl std::fmt::Display for RectangularDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Width-to-height ratio used by the automatic conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl Default for AspectRatio {
    fn default() -> Self {
        Self(2.0)
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = SizingError;

    fn try_from(ratio: f64) -> Result<Self, Self::Error> {
        Self::new(ratio)
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

impl AspectRatio {
    pub fn new(ratio: f64) -> SizingResult<Self> {
        Ok(Self(check_positive(ratio, "aspect_ratio")?))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `c` in `W = c * D`.
    ///
    /// 2:1 uses the tabulated 1.317. Other ratios solve `De(r*h, h) = D` exactly:
    /// `c = r^0.375 * (1 + r)^0.25 / 1.30`.
    pub fn width_coefficient(&self) -> f64 {
        let r = self.0;
        if r == 2.0 {
            TWO_TO_ONE_WIDTH_COEFFICIENT
        } else {
            r.powf(0.375) * (1.0 + r).powf(0.25) / DE_COEFFICIENT
        }
    }
}

/// Rectangle for a round diameter at a fixed aspect ratio. Closed form.
pub fn rectangular_from_diameter(
    diameter: f64,
    aspect: AspectRatio,
    policy: RoundingPolicy,
) -> SizingResult<RectangularDimensions> {
    let d = check_positive(diameter, "diameter")?;
    let width_raw = aspect.width_coefficient() * d;
    let height_raw = width_raw / aspect.value();
    RectangularDimensions::from_raw(width_raw, height_raw, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalent::equivalent_diameter;

    #[test]
    fn reference_conversion() {
        let dims =
            rectangular_from_diameter(13.870, AspectRatio::default(), RoundingPolicy::CeilEven)
                .unwrap();
        assert_eq!((dims.width(), dims.height()), (20, 10));

        let dims =
            rectangular_from_diameter(13.870, AspectRatio::default(), RoundingPolicy::NearestEven)
                .unwrap();
        assert_eq!((dims.width(), dims.height()), (18, 10));
    }

    #[test]
    fn derived_coefficient_is_exact() {
        for &r in &[1.0, 1.5, 3.0, 4.0] {
            let aspect = AspectRatio::new(r).unwrap();
            let d = 24.0;
            let w = aspect.width_coefficient() * d;
            let h = w / r;
            let back = equivalent_diameter(w, h).unwrap();
            assert!((back - d).abs() < 1e-9, "r={r}: {back}");
        }
        // The tabulated 2:1 constant is within half a percent of the exact value.
        let exact = 2.0_f64.powf(0.375) * 3.0_f64.powf(0.25) / 1.30;
        assert!((TWO_TO_ONE_WIDTH_COEFFICIENT - exact).abs() / exact < 5e-3);
    }

    #[test]
    fn dimensions_validate() {
        assert!(RectangularDimensions::new(20, 10).is_ok());
        assert!(RectangularDimensions::new(21, 10).is_err());
        assert!(RectangularDimensions::new(20, 0).is_err());
        let dims = RectangularDimensions::new(12, 30).unwrap();
        assert_eq!(dims.max_side(), 30);
        assert_eq!(dims.to_string(), "12x30");
    }

    #[test]
    fn serde_rejects_odd_sides() {
        let ok: RectangularDimensions = serde_json::from_str(r#"{"width":20,"height":10}"#).unwrap();
        assert_eq!(ok.width(), 20);
        assert!(serde_json::from_str::<RectangularDimensions>(r#"{"width":21,"height":10}"#).is_err());
        assert!(serde_json::from_str::<AspectRatio>("-1.0").is_err());
    }

    #[test]
    fn rejects_bad_diameter_and_ratio() {
        assert!(
            rectangular_from_diameter(-10.0, AspectRatio::default(), RoundingPolicy::CeilEven)
                .is_err()
        );
        assert!(AspectRatio::new(0.0).is_err());
    }
}
