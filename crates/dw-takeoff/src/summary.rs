//! Per-gauge sheet totals and the cost estimate built on them.

use crate::error::{TakeoffError, TakeoffResult};
use crate::run::{DuctRun, VentHeader};
use dw_core::{UnitSystem, ensure_non_negative};
use dw_core::units::convert::ft2_to_m2;
use dw_sizing::{Gauge, GaugeTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Allowance added to every gauge's base area unless overridden.
pub const DEFAULT_ALLOWANCE_PCT: f64 = 25.0;

/// Hanger and support cost as a share of sheet cost.
pub const DEFAULT_HANGER_PCT: f64 = 40.0;

/// Gauge used for vent-header fittings.
pub const DEFAULT_VENT_HEADER_GAUGE: Gauge = Gauge(22);

const IP_UNIT_COSTS: [(u8, f64); 5] = [(26, 40.0), (24, 43.0), (22, 48.0), (20, 59.0), (18, 75.0)];
const IP_INSULATION_UNIT_COST: f64 = 32.0;
/// SI prices are per m^2.
const SI_PRICE_FACTOR: f64 = 10.0;

/// Pricing inputs. Costs are per unit of display area (ft^2 for IP, m^2 for SI);
/// unset prices fall back to the unit system's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    pub allowance_pct: f64,
    pub allowance_overrides: BTreeMap<Gauge, f64>,
    pub unit_costs: Option<BTreeMap<Gauge, f64>>,
    pub hanger_pct: f64,
    pub insulation_unit_cost: Option<f64>,
    pub vent_header_gauge: Gauge,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            allowance_pct: DEFAULT_ALLOWANCE_PCT,
            allowance_overrides: BTreeMap::new(),
            unit_costs: None,
            hanger_pct: DEFAULT_HANGER_PCT,
            insulation_unit_cost: None,
            vent_header_gauge: DEFAULT_VENT_HEADER_GAUGE,
        }
    }
}

impl CostSettings {
    pub fn validate(&self) -> TakeoffResult<()> {
        check_non_negative(self.allowance_pct, "allowance_pct")?;
        check_non_negative(self.hanger_pct, "hanger_pct")?;
        for pct in self.allowance_overrides.values() {
            check_non_negative(*pct, "allowance override")?;
        }
        if let Some(costs) = &self.unit_costs {
            for cost in costs.values() {
                check_non_negative(*cost, "unit cost")?;
            }
        }
        if let Some(cost) = self.insulation_unit_cost {
            check_non_negative(cost, "insulation_unit_cost")?;
        }
        Ok(())
    }

    pub fn allowance_for(&self, gauge: Gauge) -> f64 {
        self.allowance_overrides
            .get(&gauge)
            .copied()
            .unwrap_or(self.allowance_pct)
    }

    pub fn unit_cost(&self, gauge: Gauge, unit_system: UnitSystem) -> TakeoffResult<f64> {
        let configured = match &self.unit_costs {
            Some(costs) => costs.get(&gauge).copied(),
            None => IP_UNIT_COSTS
                .iter()
                .find(|(g, _)| *g == gauge.0)
                .map(|(_, cost)| price_for(*cost, unit_system)),
        };
        configured.ok_or(TakeoffError::MissingUnitCost { gauge: gauge.0 })
    }

    pub fn insulation_cost_per_area(&self, unit_system: UnitSystem) -> f64 {
        self.insulation_unit_cost
            .unwrap_or_else(|| price_for(IP_INSULATION_UNIT_COST, unit_system))
    }
}

fn price_for(ip_price: f64, unit_system: UnitSystem) -> f64 {
    match unit_system {
        UnitSystem::Ip => ip_price,
        UnitSystem::Si => ip_price * SI_PRICE_FACTOR,
    }
}

fn check_non_negative(value: f64, what: &'static str) -> TakeoffResult<()> {
    ensure_non_negative(value, what)?;
    Ok(())
}

/// One gauge's row of the summary. Areas are in display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeLine {
    pub gauge: Gauge,
    pub base_area: f64,
    pub allowance_pct: f64,
    pub adjusted_area: f64,
    pub unit_cost: f64,
    pub line_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Takeoff {
    pub unit_system: UnitSystem,
    /// Thinnest gauge first
    pub lines: Vec<GaugeLine>,
    pub total_adjusted_area: f64,
    pub sheet_cost: f64,
    pub hanger_cost: f64,
    pub insulation_cost: f64,
    pub grand_total: f64,
}

impl Takeoff {
    pub fn line(&self, gauge: Gauge) -> Option<&GaugeLine> {
        self.lines.iter().find(|line| line.gauge == gauge)
    }
}

/// Groups runs by gauge, books vent headers to the configured header gauge and
/// prices the result.
pub fn build_takeoff(
    runs: &[DuctRun],
    headers: &[VentHeader],
    table: &GaugeTable,
    settings: &CostSettings,
    unit_system: UnitSystem,
) -> TakeoffResult<Takeoff> {
    table.validate()?;
    settings.validate()?;

    // Every gauge the table can produce gets a line, even when empty.
    let mut base_ft2: BTreeMap<Gauge, f64> = table
        .thresholds
        .iter()
        .map(|row| row.gauge)
        .chain([table.else_gauge, settings.vent_header_gauge])
        .map(|gauge| (gauge, 0.0))
        .collect();

    for run in runs {
        let gauge = table.classify_section(&run.dimensions, unit_system);
        let area = run.sheet_area_ft2(unit_system)?;
        debug!(id = %run.id, %gauge, area_ft2 = area, "run booked");
        *base_ft2.entry(gauge).or_insert(0.0) += area;
    }
    for header in headers {
        let area = header.sheet_area_ft2(unit_system)?;
        *base_ft2.entry(settings.vent_header_gauge).or_insert(0.0) += area;
    }

    let mut lines = Vec::with_capacity(base_ft2.len());
    for (gauge, ft2) in base_ft2.into_iter().rev() {
        let base_area = match unit_system {
            UnitSystem::Ip => ft2,
            UnitSystem::Si => ft2_to_m2(ft2),
        };
        let allowance_pct = settings.allowance_for(gauge);
        let adjusted_area = base_area * (1.0 + allowance_pct / 100.0);
        let unit_cost = settings.unit_cost(gauge, unit_system)?;
        lines.push(GaugeLine {
            gauge,
            base_area,
            allowance_pct,
            adjusted_area,
            unit_cost,
            line_cost: adjusted_area * unit_cost,
        });
    }

    let total_adjusted_area: f64 = lines.iter().map(|l| l.adjusted_area).sum();
    let sheet_cost: f64 = lines.iter().map(|l| l.line_cost).sum();
    let hanger_cost = sheet_cost * settings.hanger_pct / 100.0;
    let insulation_cost = total_adjusted_area * settings.insulation_cost_per_area(unit_system);
    let grand_total = sheet_cost + hanger_cost + insulation_cost;

    info!(
        runs = runs.len(),
        headers = headers.len(),
        total_adjusted_area,
        grand_total,
        "takeoff built"
    );

    Ok(Takeoff {
        unit_system,
        lines,
        total_adjusted_area,
        sheet_cost,
        hanger_cost,
        insulation_cost,
        grand_total,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use dw_sizing::RectangularDimensions;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_is_sum_of_parts(
            sides in prop::collection::vec((1u32..60, 1u32..60, 1.0f64..100.0), 0..12),
            allowance in 0.0f64..50.0,
            hanger in 0.0f64..80.0,
        ) {
            let runs: Vec<DuctRun> = sides
                .iter()
                .enumerate()
                .map(|(i, (w, h, len))| DuctRun {
                    id: format!("r{i}"),
                    dimensions: RectangularDimensions::new(w * 2, h * 2).unwrap(),
                    length: *len,
                })
                .collect();
            let settings = CostSettings { allowance_pct: allowance, hanger_pct: hanger, ..CostSettings::default() };
            let takeoff = build_takeoff(&runs, &[], &GaugeTable::default(), &settings, UnitSystem::Ip).unwrap();

            let base: f64 = runs.iter().map(|r| r.sheet_area_ft2(UnitSystem::Ip).unwrap()).sum();
            let booked: f64 = takeoff.lines.iter().map(|l| l.base_area).sum();
            prop_assert!((base - booked).abs() < 1e-6 * base.max(1.0));
            prop_assert!(takeoff.grand_total >= takeoff.sheet_cost);
        }
    }
}
