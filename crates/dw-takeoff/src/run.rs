//! Takeoff items: straight duct runs and vent headers.
//!
//! Sheet area is always computed with inch sides and metre lengths (ft^2 result);
//! SI rows are converted on the way in.

use crate::error::{TakeoffError, TakeoffResult};
use dw_core::{UnitSystem, ensure_positive};
use dw_core::units::convert::{ft_to_m, mm_to_in};
use dw_sizing::{
    RectangularDimensions, STANDARD_RUN_END_CAP, SizingOutcome, VENT_HEADER_END_CAP,
    sheet_metal_area,
};
use serde::{Deserialize, Serialize};

/// Straight run of one sized section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctRun {
    pub id: String,
    pub dimensions: RectangularDimensions,
    /// Feet (IP) or metres (SI)
    pub length: f64,
}

impl DuctRun {
    pub fn from_outcome(id: impl Into<String>, outcome: &SizingOutcome, length: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: outcome.dimensions,
            length,
        }
    }

    /// Sheet area in ft^2.
    pub fn sheet_area_ft2(&self, unit_system: UnitSystem) -> TakeoffResult<f64> {
        let (w, h) = sides_in_inches(
            self.dimensions.width_f64(),
            self.dimensions.height_f64(),
            unit_system,
        );
        let length_m = run_length_m(self.length, unit_system)?;
        Ok(sheet_metal_area(w, h, length_m, STANDARD_RUN_END_CAP)?)
    }
}

/// Supply header with `head_count` identical outlets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentHeader {
    /// Working length unit
    pub width: f64,
    /// Working length unit
    pub height: f64,
    /// Outlet (spigot) duct size in the working length unit
    pub spigot_size: f64,
    pub head_count: u32,
}

impl VentHeader {
    /// Effective connection length of one head, metres.
    ///
    /// IP: `(Ds + 2) * 0.025` with `Ds` in inches.
    /// SI: `(Ds + 50) / 1000` with `Ds` in millimetres.
    pub fn connection_length_m(&self, unit_system: UnitSystem) -> TakeoffResult<f64> {
        let ds = ensure_positive(self.spigot_size, "spigot_size")?;
        Ok(match unit_system {
            UnitSystem::Ip => (ds + 2.0) * 0.025,
            UnitSystem::Si => (ds + 50.0) / 1000.0,
        })
    }

    /// Sheet area of all heads in ft^2.
    pub fn sheet_area_ft2(&self, unit_system: UnitSystem) -> TakeoffResult<f64> {
        if self.head_count == 0 {
            return Err(TakeoffError::InvalidInput {
                what: "head_count",
                value: 0.0,
            });
        }
        let (w, h) = sides_in_inches(self.width, self.height, unit_system);
        let per_head = sheet_metal_area(
            w,
            h,
            self.connection_length_m(unit_system)?,
            VENT_HEADER_END_CAP,
        )?;
        Ok(per_head * f64::from(self.head_count))
    }
}

fn sides_in_inches(width: f64, height: f64, unit_system: UnitSystem) -> (f64, f64) {
    match unit_system {
        UnitSystem::Ip => (width, height),
        UnitSystem::Si => (mm_to_in(width), mm_to_in(height)),
    }
}

fn run_length_m(length: f64, unit_system: UnitSystem) -> TakeoffResult<f64> {
    let length = ensure_positive(length, "length")?;
    Ok(match unit_system {
        UnitSystem::Ip => ft_to_m(length),
        UnitSystem::Si => length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> RectangularDimensions {
        RectangularDimensions::new(w, h).unwrap()
    }

    #[test]
    fn ip_run_area() {
        let run = DuctRun {
            id: "r1".into(),
            dimensions: dims(20, 10),
            length: 10.0,
        };
        let area = run.sheet_area_ft2(UnitSystem::Ip).unwrap();
        let expected = (0.545 * 30.0 + 1.0) * 3.048;
        assert!((area - expected).abs() < 1e-9, "got {area}");
    }

    #[test]
    fn si_run_converts_sides() {
        let run = DuctRun {
            id: "r1".into(),
            dimensions: dims(508, 254),
            length: 3.048,
        };
        let si = run.sheet_area_ft2(UnitSystem::Si).unwrap();
        let ip = DuctRun {
            id: "r1".into(),
            dimensions: dims(20, 10),
            length: 10.0,
        }
        .sheet_area_ft2(UnitSystem::Ip)
        .unwrap();
        assert!((si - ip).abs() < 1e-6);
    }

    #[test]
    fn vent_header_lengths_and_area() {
        let header = VentHeader {
            width: 12.0,
            height: 8.0,
            spigot_size: 8.0,
            head_count: 3,
        };
        assert!((header.connection_length_m(UnitSystem::Ip).unwrap() - 0.25).abs() < 1e-12);
        let area = header.sheet_area_ft2(UnitSystem::Ip).unwrap();
        assert!((area - (0.545 * 20.0 + 4.0) * 0.25 * 3.0).abs() < 1e-9);

        let si = VentHeader {
            width: 300.0,
            height: 200.0,
            spigot_size: 200.0,
            head_count: 1,
        };
        assert!((si.connection_length_m(UnitSystem::Si).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_header_and_bad_length() {
        let header = VentHeader {
            width: 12.0,
            height: 8.0,
            spigot_size: 8.0,
            head_count: 0,
        };
        assert!(header.sheet_area_ft2(UnitSystem::Ip).is_err());

        let run = DuctRun {
            id: "r".into(),
            dimensions: dims(20, 10),
            length: -2.0,
        };
        assert!(matches!(
            run.sheet_area_ft2(UnitSystem::Ip),
            Err(TakeoffError::InvalidInput { what: "length", .. })
        ));

        let header = VentHeader {
            width: 12.0,
            height: 8.0,
            spigot_size: f64::NAN,
            head_count: 1,
        };
        assert!(matches!(
            header.connection_length_m(UnitSystem::Ip),
            Err(TakeoffError::NonFinite { what: "spigot_size", .. })
        ));
    }
}
