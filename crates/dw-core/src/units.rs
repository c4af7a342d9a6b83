// dw-core/src/units.rs

use crate::{DwError, Real, ensure_positive};

/// Working unit system of a sizing calculation.
///
/// SI: friction rate in Pa/m, airflow in L/s, dimensions in mm.
/// IP: friction rate in in.wg/100ft, airflow in cfm, dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSystem {
    #[cfg_attr(feature = "serde", serde(rename = "SI", alias = "si"))]
    Si,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "IP", alias = "ip"))]
    Ip,
}

impl UnitSystem {
    /// Default friction-formula coefficient for this system.
    pub fn default_k(self) -> Real {
        match self {
            UnitSystem::Si => K_SI,
            UnitSystem::Ip => K_IP,
        }
    }

    /// Multiplier turning `airflow / (width * height)` into a velocity
    /// (fpm for IP, m/s for SI).
    pub fn velocity_multiplier(self) -> Real {
        match self {
            UnitSystem::Si => 1000.0,
            UnitSystem::Ip => 144.0,
        }
    }

    pub fn friction_rate_unit(self) -> &'static str {
        match self {
            UnitSystem::Si => "Pa/m",
            UnitSystem::Ip => "in.wg/100ft",
        }
    }

    pub fn airflow_unit(self) -> &'static str {
        match self {
            UnitSystem::Si => "L/s",
            UnitSystem::Ip => "cfm",
        }
    }

    pub fn length_unit(self) -> &'static str {
        match self {
            UnitSystem::Si => "mm",
            UnitSystem::Ip => "in",
        }
    }

    pub fn velocity_unit(self) -> &'static str {
        match self {
            UnitSystem::Si => "m/s",
            UnitSystem::Ip => "fpm",
        }
    }

    /// Unit of sheet-metal takeoff areas.
    pub fn area_unit(self) -> &'static str {
        match self {
            UnitSystem::Si => "m^2",
            UnitSystem::Ip => "ft^2",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Si => write!(f, "SI"),
            UnitSystem::Ip => write!(f, "IP"),
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = DwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SI" => Ok(UnitSystem::Si),
            "IP" => Ok(UnitSystem::Ip),
            _ => Err(DwError::InvalidArg {
                what: "unit system must be SI or IP",
            }),
        }
    }
}

/// IP coefficient: in.wg/100ft, cfm, inches.
pub const K_IP: Real = 0.12317;

/// SI coefficient: Pa/m, L/s, millimetres.
pub const K_SI: Real = 26_352_202.0;

/// Coefficient `K` of the round-duct friction formula.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaCoefficients {
    k: Real,
}

impl FormulaCoefficients {
    /// Custom coefficient, e.g. for a material-specific roughness. `k` must be positive.
    pub fn new(k: Real) -> Result<Self, DwError> {
        Ok(Self {
            k: ensure_positive(k, "K")?,
        })
    }

    pub fn for_system(system: UnitSystem) -> Self {
        Self {
            k: system.default_k(),
        }
    }

    /// Coefficient for `system`, honouring an optional caller override.
    pub fn resolve(system: UnitSystem, k_override: Option<Real>) -> Result<Self, DwError> {
        match k_override {
            Some(k) => Self::new(k),
            None => Ok(Self::for_system(system)),
        }
    }

    pub fn k(&self) -> Real {
        self.k
    }
}

pub mod convert {
    //! SI <-> IP conversions for the quantities a sizing row carries.

    use uom::si::area::{square_foot, square_meter};
    use uom::si::f64::{Area, Length, Velocity, VolumeRate};
    use uom::si::length::{foot, inch, meter, millimeter};
    use uom::si::velocity::{foot_per_minute, meter_per_second};
    use uom::si::volume_rate::{cubic_foot_per_minute, liter_per_second};

    /// One inch of water column (at 4 °C) in pascal.
    pub const PA_PER_INCH_OF_WATER: f64 = 249.0889;

    pub fn cfm_to_lps(cfm: f64) -> f64 {
        VolumeRate::new::<cubic_foot_per_minute>(cfm).get::<liter_per_second>()
    }

    pub fn lps_to_cfm(lps: f64) -> f64 {
        VolumeRate::new::<liter_per_second>(lps).get::<cubic_foot_per_minute>()
    }

    pub fn in_to_mm(inches: f64) -> f64 {
        Length::new::<inch>(inches).get::<millimeter>()
    }

    pub fn mm_to_in(mm: f64) -> f64 {
        Length::new::<millimeter>(mm).get::<inch>()
    }

    pub fn ft_to_m(ft: f64) -> f64 {
        Length::new::<foot>(ft).get::<meter>()
    }

    pub fn m_to_ft(m: f64) -> f64 {
        Length::new::<meter>(m).get::<foot>()
    }

    pub fn fpm_to_mps(fpm: f64) -> f64 {
        Velocity::new::<foot_per_minute>(fpm).get::<meter_per_second>()
    }

    pub fn mps_to_fpm(mps: f64) -> f64 {
        Velocity::new::<meter_per_second>(mps).get::<foot_per_minute>()
    }

    pub fn ft2_to_m2(ft2: f64) -> f64 {
        Area::new::<square_foot>(ft2).get::<square_meter>()
    }

    pub fn m2_to_ft2(m2: f64) -> f64 {
        Area::new::<square_meter>(m2).get::<square_foot>()
    }

    fn hundred_feet_in_m() -> f64 {
        Length::new::<foot>(100.0).get::<meter>()
    }

    /// in.wg per 100 ft -> Pa/m.
    pub fn in_wg_per_100ft_to_pa_per_m(fr: f64) -> f64 {
        fr * PA_PER_INCH_OF_WATER / hundred_feet_in_m()
    }

    /// Pa/m -> in.wg per 100 ft.
    pub fn pa_per_m_to_in_wg_per_100ft(fr: f64) -> f64 {
        fr * hundred_feet_in_m() / PA_PER_INCH_OF_WATER
    }
}


#[cfg(test)]
mod proptests {
    use super::convert::*;
    use crate::close_to;
    use proptest::prelude::*;

    const REL: f64 = 1e-12;

    proptest! {
        #[test]
        fn conversion_pairs_invert(v in 1e-3_f64..1e6) {
            prop_assert!(close_to(lps_to_cfm(cfm_to_lps(v)), v, REL));
            prop_assert!(close_to(mm_to_in(in_to_mm(v)), v, REL));
            prop_assert!(close_to(m_to_ft(ft_to_m(v)), v, REL));
            prop_assert!(close_to(mps_to_fpm(fpm_to_mps(v)), v, REL));
            prop_assert!(close_to(m2_to_ft2(ft2_to_m2(v)), v, REL));
            prop_assert!(close_to(
                pa_per_m_to_in_wg_per_100ft(in_wg_per_100ft_to_pa_per_m(v)),
                v,
                REL
            ));
        }

        #[test]
        fn conversions_are_linear(v in 1e-3_f64..1e4, k in 1.0_f64..100.0) {
            prop_assert!(close_to(cfm_to_lps(k * v), k * cfm_to_lps(v), 1e-12));
            prop_assert!(close_to(in_to_mm(k * v), k * in_to_mm(v), 1e-12));
        }
    }
}
