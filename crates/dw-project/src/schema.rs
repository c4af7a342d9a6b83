//! Job file schema definitions.

use dw_core::UnitSystem;
use dw_sizing::{DimensionConstraint, GaugeTable, SizingOptions, SizingRequest, SizingResult};
use dw_takeoff::{CostSettings, VentHeader};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: JobSettings,
    #[serde(default)]
    pub rows: Vec<RowDef>,
    #[serde(default)]
    pub vent_headers: Vec<VentHeaderDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JobSettings {
    pub unit_system: UnitSystem,
    /// Used by rows that carry no friction rate of their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_friction_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_override: Option<f64>,
    pub sizing: SizingOptions,
    pub gauge_table: GaugeTable,
    pub cost: CostSettings,
}

/// One duct section. Values are in the job's working units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowDef {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub airflow: f64,
    /// Run length: feet (IP) or metres (SI)
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_height: Option<f64>,
}

impl RowDef {
    pub fn friction_rate_or(&self, settings: &JobSettings) -> Option<f64> {
        self.friction_rate.or(settings.default_friction_rate)
    }

    pub fn constraint(&self) -> SizingResult<DimensionConstraint> {
        DimensionConstraint::from_manual(self.manual_width, self.manual_height)
    }

    /// `None` when neither the row nor the settings give a friction rate.
    pub fn request(&self, settings: &JobSettings) -> Option<SizingRequest> {
        let friction_rate = self.friction_rate_or(settings)?;
        let request = SizingRequest::new(friction_rate, self.airflow, settings.unit_system);
        Some(match settings.k_override {
            Some(k) => request.with_k(k),
            None => request,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VentHeaderDef {
    #[serde(default)]
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub spigot_size: f64,
    pub head_count: u32,
}

impl From<&VentHeaderDef> for VentHeader {
    fn from(def: &VentHeaderDef) -> Self {
        Self {
            width: def.width,
            height: def.height,
            spigot_size: def.spigot_size,
            head_count: def.head_count,
        }
    }
}
