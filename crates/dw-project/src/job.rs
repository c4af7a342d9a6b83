//! Evaluating a loaded job: size every row, then price the sheet metal.

use crate::schema::Job;
use crate::validate::ValidationError;
use crate::{ProjectError, ProjectResult};
use dw_core::UnitSystem;
use dw_sizing::{SizingOutcome, size_rows};
use dw_takeoff::{DuctRun, Takeoff, VentHeader, build_takeoff};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub airflow: f64,
    pub friction_rate: f64,
    pub outcome: SizingOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub name: String,
    pub unit_system: UnitSystem,
    pub rows: Vec<RowReport>,
    pub takeoff: Takeoff,
}

impl JobReport {
    /// Rows whose dimension solve missed its tolerance.
    pub fn unconverged(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| !row.outcome.converged())
    }
}

pub fn run_job(job: &Job) -> ProjectResult<JobReport> {
    let settings = &job.settings;

    let mut inputs = Vec::with_capacity(job.rows.len());
    for row in &job.rows {
        let request = row
            .request(settings)
            .ok_or_else(|| ValidationError::MissingFrictionRate { id: row.id.clone() })?;
        let constraint = row.constraint().map_err(|source| ProjectError::Row {
            id: row.id.clone(),
            source,
        })?;
        inputs.push((request, constraint));
    }

    let outcomes = size_rows(&inputs, &settings.sizing);

    let mut rows = Vec::with_capacity(outcomes.len());
    let mut runs = Vec::with_capacity(outcomes.len());
    for ((row, (request, _)), outcome) in job.rows.iter().zip(&inputs).zip(outcomes) {
        let outcome = outcome.map_err(|source| ProjectError::Row {
            id: row.id.clone(),
            source,
        })?;
        if !outcome.converged() {
            warn!(id = %row.id, dimensions = %outcome.dimensions, "row sized without convergence");
        }
        runs.push(DuctRun::from_outcome(row.id.clone(), &outcome, row.length));
        rows.push(RowReport {
            id: row.id.clone(),
            label: row.label.clone(),
            airflow: row.airflow,
            friction_rate: request.friction_rate,
            outcome,
        });
    }

    let headers: Vec<VentHeader> = job.vent_headers.iter().map(VentHeader::from).collect();
    let takeoff = build_takeoff(
        &runs,
        &headers,
        &settings.gauge_table,
        &settings.cost,
        settings.unit_system,
    )?;

    info!(job = %job.name, rows = rows.len(), grand_total = takeoff.grand_total, "job evaluated");

    Ok(JobReport {
        name: job.name.clone(),
        unit_system: settings.unit_system,
        rows,
        takeoff,
    })
}
