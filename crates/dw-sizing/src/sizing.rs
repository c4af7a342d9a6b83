//! Sizing entry points: airflow + friction rate (or a target diameter) to a
//! fabricable rectangle and its derived quantities.

use crate::common::check_positive;
use crate::diameter::{friction_rate, round_diameter};
use crate::equivalent::de;
use crate::error::{SizingError, SizingResult};
use crate::inverse::solve_free_side;
use crate::metrics::velocity;
use crate::rectangular::{AspectRatio, RectangularDimensions, rectangular_from_diameter};
use crate::rounding::{RoundingPolicy, round_fabricable};
use dw_core::{FormulaCoefficients, UnitSystem};
use dw_solver::{NewtonConfig, SolverResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One sizing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// Pa/m (SI) or in.wg/100ft (IP)
    pub friction_rate: f64,
    /// L/s (SI) or cfm (IP)
    pub airflow: f64,
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Replaces the unit system's default `K`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_override: Option<f64>,
}

impl SizingRequest {
    pub fn new(friction_rate: f64, airflow: f64, unit_system: UnitSystem) -> Self {
        Self {
            friction_rate,
            airflow,
            unit_system,
            k_override: None,
        }
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k_override = Some(k);
        self
    }

    pub fn coefficients(&self) -> SizingResult<FormulaCoefficients> {
        Ok(FormulaCoefficients::resolve(self.unit_system, self.k_override)?)
    }

    pub fn validate(&self) -> SizingResult<()> {
        check_positive(self.friction_rate, "friction_rate")?;
        check_positive(self.airflow, "airflow")?;
        self.coefficients()?;
        Ok(())
    }
}

/// Which side, if any, the caller pins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum DimensionConstraint {
    /// Both sides from the diameter at the configured aspect ratio
    #[default]
    Auto,
    /// Width pinned, height solved
    WidthFixed(f64),
    /// Height pinned, width solved
    HeightFixed(f64),
}

impl DimensionConstraint {
    /// Build from UI-style manual entries. Pinning both sides is rejected rather
    /// than silently preferring one.
    pub fn from_manual(width: Option<f64>, height: Option<f64>) -> SizingResult<Self> {
        match (width, height) {
            (Some(_), Some(_)) => Err(SizingError::AmbiguousConstraint),
            (Some(w), None) => Ok(DimensionConstraint::WidthFixed(w)),
            (None, Some(h)) => Ok(DimensionConstraint::HeightFixed(h)),
            (None, None) => Ok(DimensionConstraint::Auto),
        }
    }

    pub fn validate(&self) -> SizingResult<()> {
        match *self {
            DimensionConstraint::Auto => Ok(()),
            DimensionConstraint::WidthFixed(v) | DimensionConstraint::HeightFixed(v) => {
                check_positive(v, "fixed dimension").map(|_| ())
            }
        }
    }
}

/// Knobs shared by every row of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingOptions {
    pub aspect_ratio: AspectRatio,
    pub rounding: RoundingPolicy,
    pub newton: NewtonConfig,
}

/// Solver outcome plus the residual left after rounding the free side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverReport {
    pub solver: SolverResult,
    /// `De(fixed, rounded) - target`
    pub post_rounding_residual: f64,
}

/// Geometry of a sized section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizedSection {
    pub dimensions: RectangularDimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverReport>,
}

/// Full result of [`size_duct`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingOutcome {
    pub unit_system: UnitSystem,
    /// Round diameter from the friction formula
    pub round_diameter: f64,
    pub dimensions: RectangularDimensions,
    /// Equivalent diameter of the rounded rectangle
    pub equivalent_diameter: f64,
    /// Friction rate the rounded rectangle actually produces
    pub achieved_friction_rate: f64,
    /// fpm (IP) or m/s (SI)
    pub velocity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverReport>,
}

impl SizingOutcome {
    /// False only when a solver ran and missed its tolerance.
    pub fn converged(&self) -> bool {
        self.solver.is_none_or(|report| report.solver.converged)
    }

    /// Turn a flagged, best-effort outcome into `SolverNonConvergence`.
    pub fn require_converged(self) -> SizingResult<Self> {
        match self.solver {
            Some(report) if !report.solver.converged => Err(SizingError::SolverNonConvergence {
                iterations: report.solver.iterations,
                residual: report.solver.residual,
            }),
            _ => Ok(self),
        }
    }
}

/// Size a rectangle for a known target diameter.
///
/// A pinned side is itself rounded with the configured policy before the other
/// side is solved, so every returned side is fabricable.
pub fn size_from_diameter(
    target_diameter: f64,
    constraint: DimensionConstraint,
    options: &SizingOptions,
) -> SizingResult<SizedSection> {
    let target = check_positive(target_diameter, "target diameter")?;
    constraint.validate()?;

    let section = match constraint {
        DimensionConstraint::Auto => SizedSection {
            dimensions: rectangular_from_diameter(target, options.aspect_ratio, options.rounding)?,
            solver: None,
        },
        DimensionConstraint::WidthFixed(w) => {
            let width = round_fabricable(w, options.rounding)?;
            let (height, report) = solve_and_round(width, target, options)?;
            SizedSection {
                dimensions: RectangularDimensions::new(width, height)?,
                solver: Some(report),
            }
        }
        DimensionConstraint::HeightFixed(h) => {
            let height = round_fabricable(h, options.rounding)?;
            let (width, report) = solve_and_round(height, target, options)?;
            SizedSection {
                dimensions: RectangularDimensions::new(width, height)?,
                solver: Some(report),
            }
        }
    };

    Ok(section)
}

fn solve_and_round(
    fixed: u32,
    target: f64,
    options: &SizingOptions,
) -> SizingResult<(u32, SolverReport)> {
    let fixed = f64::from(fixed);
    let solver = solve_free_side(fixed, target, &options.newton)?;
    let free = round_fabricable(solver.value, options.rounding)?;
    let post_rounding_residual = de(fixed, f64::from(free)) - target;

    if !solver.converged {
        warn!(
            fixed,
            target,
            raw = solver.value,
            residual = solver.residual,
            "free side did not converge; result is best effort"
        );
    }
    debug!(fixed, target, free, post_rounding_residual, "free side rounded");

    Ok((
        free,
        SolverReport {
            solver,
            post_rounding_residual,
        },
    ))
}

/// Size one duct row.
pub fn size_duct(
    request: &SizingRequest,
    constraint: DimensionConstraint,
    options: &SizingOptions,
) -> SizingResult<SizingOutcome> {
    request.validate()?;
    let coefficients = request.coefficients()?;

    let diameter = round_diameter(request.friction_rate, request.airflow, coefficients)?;
    let section = size_from_diameter(diameter, constraint, options)?;
    let dims = section.dimensions;

    let equivalent_diameter = de(dims.width_f64(), dims.height_f64());
    let achieved_friction_rate = friction_rate(equivalent_diameter, request.airflow, coefficients)?;
    let velocity = velocity(
        request.airflow,
        dims.width_f64(),
        dims.height_f64(),
        request.unit_system,
    )?;

    Ok(SizingOutcome {
        unit_system: request.unit_system,
        round_diameter: diameter,
        dimensions: dims,
        equivalent_diameter,
        achieved_friction_rate,
        velocity,
        solver: section.solver,
    })
}

/// Size independent rows in parallel. Output order matches input order.
pub fn size_rows(
    rows: &[(SizingRequest, DimensionConstraint)],
    options: &SizingOptions,
) -> Vec<SizingResult<SizingOutcome>> {
    info!(rows = rows.len(), "sizing rows");
    rows.par_iter()
        .map(|(request, constraint)| size_duct(request, *constraint, options))
        .collect()
}
