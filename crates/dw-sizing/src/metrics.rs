//! Quantities derived from a sized rectangle: velocity, sheet area, gauge.

use crate::common::check_positive;
use crate::error::{SizingError, SizingResult};
use crate::rectangular::RectangularDimensions;
use dw_core::{UnitSystem, ensure_non_negative};
use dw_core::units::convert::mm_to_in;
use serde::{Deserialize, Serialize};

/// Perimeter factor of the sheet-area formula (inch sides, metre run, ft^2 result).
pub const SHEET_PERIMETER_FACTOR: f64 = 0.545;

/// End-cap constant for straight duct runs.
pub const STANDARD_RUN_END_CAP: f64 = 1.0;

/// End-cap constant for vent-header fittings.
pub const VENT_HEADER_END_CAP: f64 = 4.0;

/// Air velocity through a `width` x `height` section.
///
/// IP: cfm and inches give fpm (`144 * Q / (W * H)`).
/// SI: L/s and millimetres give m/s (`1000 * Q / (W * H)`).
pub fn velocity(airflow: f64, width: f64, height: f64, unit_system: UnitSystem) -> SizingResult<f64> {
    let q = check_positive(airflow, "airflow")?;
    let w = check_positive(width, "width")?;
    let h = check_positive(height, "height")?;
    Ok(unit_system.velocity_multiplier() * q / (w * h))
}

/// Sheet-metal area `(0.545 * (W + H) + C) * L`.
///
/// `width`/`height` in inches, `length` in metres, result in ft^2. `end_cap` is
/// the fitting-specific constant ([`STANDARD_RUN_END_CAP`], [`VENT_HEADER_END_CAP`]).
pub fn sheet_metal_area(width: f64, height: f64, length: f64, end_cap: f64) -> SizingResult<f64> {
    let w = check_positive(width, "width")?;
    let h = check_positive(height, "height")?;
    let l = check_positive(length, "length")?;
    let end_cap = ensure_non_negative(end_cap, "end_cap")?;
    Ok((SHEET_PERIMETER_FACTOR * (w + h) + end_cap) * l)
}

/// Sheet-metal gauge number. Larger numbers are thinner sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gauge(pub u8);

impl std::fmt::Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeThreshold {
    /// Largest side (inches) this gauge covers
    pub max_dimension: f64,
    pub gauge: Gauge,
}

/// Ordered `(max_dimension, gauge)` thresholds with a single fallback gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeTable {
    pub thresholds: Vec<GaugeThreshold>,
    pub else_gauge: Gauge,
}

impl Default for GaugeTable {
    fn default() -> Self {
        let row = |max_dimension, gauge| GaugeThreshold {
            max_dimension,
            gauge: Gauge(gauge),
        };
        Self {
            thresholds: vec![row(12.0, 26), row(30.0, 24), row(54.0, 22), row(84.0, 20)],
            else_gauge: Gauge(18),
        }
    }
}

impl GaugeTable {
    /// Thresholds strictly increasing, gauges non-increasing, fallback no thinner
    /// than the last row.
    pub fn validate(&self) -> SizingResult<()> {
        let mut previous: Option<&GaugeThreshold> = None;
        for row in &self.thresholds {
            check_positive(row.max_dimension, "gauge threshold")?;
            if let Some(prev) = previous {
                if row.max_dimension <= prev.max_dimension {
                    return Err(SizingError::InvalidArg {
                        what: "gauge thresholds must be strictly increasing",
                    });
                }
                if row.gauge > prev.gauge {
                    return Err(SizingError::InvalidArg {
                        what: "gauge numbers must not increase with duct size",
                    });
                }
            }
            previous = Some(row);
        }
        if let Some(last) = previous {
            if self.else_gauge > last.gauge {
                return Err(SizingError::InvalidArg {
                    what: "fallback gauge must not be thinner than the last threshold",
                });
            }
        }
        Ok(())
    }

    /// Gauge for the larger of `width`/`height` (inches).
    pub fn classify(&self, width: f64, height: f64) -> Gauge {
        let largest = width.max(height);
        self.thresholds
            .iter()
            .find(|row| largest <= row.max_dimension)
            .map(|row| row.gauge)
            .unwrap_or(self.else_gauge)
    }

    /// Gauge for a sized section in its working unit; SI millimetres are
    /// converted to inches first.
    pub fn classify_section(&self, dims: &RectangularDimensions, unit_system: UnitSystem) -> Gauge {
        let (w, h) = match unit_system {
            UnitSystem::Ip => (dims.width_f64(), dims.height_f64()),
            UnitSystem::Si => (mm_to_in(dims.width_f64()), mm_to_in(dims.height_f64())),
        };
        self.classify(w, h)
    }
}

/// Gauge from the standard table. `width`/`height` in inches.
pub fn gauge_class(width: f64, height: f64) -> Gauge {
    GaugeTable::default().classify(width, height)
}
