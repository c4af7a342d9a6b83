mod error;

use clap::{Parser, Subcommand, ValueEnum};
use dw_core::UnitSystem;
use dw_core::units::convert;
use dw_project::JobReport;
use dw_sizing::{
    AspectRatio, DimensionConstraint, GaugeTable, RoundingPolicy, STANDARD_RUN_END_CAP,
    SizingOptions, SizingOutcome, SizingRequest, VENT_HEADER_END_CAP, equivalent_diameter,
    sheet_metal_area, size_duct, velocity,
};
use error::AppResult;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(about = "Ductwise CLI - rectangular duct sizing and sheet-metal takeoff", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one duct from friction rate and airflow
    Size {
        /// in.wg/100ft (IP) or Pa/m (SI)
        #[arg(long)]
        friction_rate: f64,
        /// cfm (IP) or L/s (SI)
        #[arg(long)]
        airflow: f64,
        /// IP or SI
        #[arg(long, default_value = "IP")]
        units: UnitSystem,
        /// Override the friction-formula coefficient K
        #[arg(long)]
        k: Option<f64>,
        /// Pin the width and solve the height
        #[arg(long, conflicts_with = "height")]
        width: Option<f64>,
        /// Pin the height and solve the width
        #[arg(long)]
        height: Option<f64>,
        /// Width:height ratio for unconstrained sizing
        #[arg(long, default_value_t = 2.0)]
        aspect_ratio: f64,
        /// ceil_even or nearest_even
        #[arg(long, default_value = "ceil_even")]
        rounding: RoundingPolicy,
        /// Fail instead of returning a best-effort size when the solve misses
        #[arg(long)]
        strict: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Circular equivalent diameter of a rectangle
    Equivalent { width: f64, height: f64 },
    /// Air velocity through a rectangle
    Velocity {
        #[arg(long)]
        airflow: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, default_value = "IP")]
        units: UnitSystem,
    },
    /// Sheet-metal area (inch sides, metre length, ft^2 result)
    Area {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        length: f64,
        #[arg(long, value_enum, default_value_t = Fitting::Run)]
        fitting: Fitting,
    },
    /// Sheet-metal gauge for a section
    Gauge {
        width: f64,
        height: f64,
        /// IP sides are inches, SI sides millimetres
        #[arg(long, default_value = "IP")]
        units: UnitSystem,
    },
    /// Convert a value from one unit system to the other
    Convert {
        #[arg(value_enum)]
        quantity: Quantity,
        value: f64,
        /// Unit system the value is given in
        #[arg(long, default_value = "IP")]
        from: UnitSystem,
    },
    /// Validate job file syntax and structure
    Validate {
        /// Path to the job YAML or JSON file
        job_path: PathBuf,
    },
    /// Size every row of a job and print the takeoff
    Takeoff {
        /// Path to the job YAML or JSON file
        job_path: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Fitting {
    Run,
    VentHeader,
}

#[derive(Clone, Copy, ValueEnum)]
enum Quantity {
    FrictionRate,
    Airflow,
    Dimension,
    Length,
    Velocity,
    Area,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Size {
            friction_rate,
            airflow,
            units,
            k,
            width,
            height,
            aspect_ratio,
            rounding,
            strict,
            json,
        } => {
            let mut request = SizingRequest::new(friction_rate, airflow, units);
            if let Some(k) = k {
                request = request.with_k(k);
            }
            let options = SizingOptions {
                aspect_ratio: AspectRatio::new(aspect_ratio)?,
                rounding,
                ..SizingOptions::default()
            };
            let constraint = DimensionConstraint::from_manual(width, height)?;
            cmd_size(&request, constraint, &options, strict, json)
        }
        Commands::Equivalent { width, height } => {
            println!("De = {:.3}", equivalent_diameter(width, height)?);
            Ok(())
        }
        Commands::Velocity {
            airflow,
            width,
            height,
            units,
        } => {
            let v = velocity(airflow, width, height, units)?;
            println!("V = {:.2} {}", v, units.velocity_unit());
            Ok(())
        }
        Commands::Area {
            width,
            height,
            length,
            fitting,
        } => {
            let end_cap = match fitting {
                Fitting::Run => STANDARD_RUN_END_CAP,
                Fitting::VentHeader => VENT_HEADER_END_CAP,
            };
            let area = sheet_metal_area(width, height, length, end_cap)?;
            println!("Area = {:.2} ft^2", area);
            Ok(())
        }
        Commands::Gauge {
            width,
            height,
            units,
        } => {
            let dims = dw_sizing::RectangularDimensions::from_raw(
                width,
                height,
                RoundingPolicy::default(),
            )?;
            let gauge = GaugeTable::default().classify_section(&dims, units);
            println!("{} {}: gauge {}", dims, units.length_unit(), gauge);
            Ok(())
        }
        Commands::Convert {
            quantity,
            value,
            from,
        } => cmd_convert(quantity, value, from),
        Commands::Validate { job_path } => cmd_validate(&job_path),
        Commands::Takeoff { job_path, json } => cmd_takeoff(&job_path, json),
    }
}

fn cmd_size(
    request: &SizingRequest,
    constraint: DimensionConstraint,
    options: &SizingOptions,
    strict: bool,
    json: bool,
) -> AppResult<()> {
    let mut outcome = size_duct(request, constraint, options)?;
    if strict {
        outcome = outcome.require_converged()?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &SizingOutcome) {
    let units = outcome.unit_system;
    let len = units.length_unit();
    let gauge = GaugeTable::default().classify_section(&outcome.dimensions, units);

    println!("  Round diameter:  {:.2} {}", outcome.round_diameter, len);
    println!("  Rectangular:     {} {}", outcome.dimensions, len);
    println!("  Equivalent De:   {:.2} {}", outcome.equivalent_diameter, len);
    println!(
        "  Friction rate:   {:.4} {}",
        outcome.achieved_friction_rate,
        units.friction_rate_unit()
    );
    println!("  Velocity:        {:.2} {}", outcome.velocity, units.velocity_unit());
    println!("  Gauge:           {}", gauge);

    if let Some(report) = &outcome.solver {
        let solver = &report.solver;
        if solver.converged {
            println!(
                "✓ Solver converged in {} iterations (post-rounding residual {:+.3})",
                solver.iterations, report.post_rounding_residual
            );
        } else {
            println!(
                "⚠ Solver did not converge after {} iterations (residual {:.3e}); size is best effort",
                solver.iterations, solver.residual
            );
        }
    }
}

fn cmd_convert(quantity: Quantity, value: f64, from: UnitSystem) -> AppResult<()> {
    let to = match from {
        UnitSystem::Ip => UnitSystem::Si,
        UnitSystem::Si => UnitSystem::Ip,
    };
    let (converted, from_unit, to_unit) = match (quantity, from) {
        (Quantity::FrictionRate, UnitSystem::Ip) => (
            convert::in_wg_per_100ft_to_pa_per_m(value),
            from.friction_rate_unit(),
            to.friction_rate_unit(),
        ),
        (Quantity::FrictionRate, UnitSystem::Si) => (
            convert::pa_per_m_to_in_wg_per_100ft(value),
            from.friction_rate_unit(),
            to.friction_rate_unit(),
        ),
        (Quantity::Airflow, UnitSystem::Ip) => (
            convert::cfm_to_lps(value),
            from.airflow_unit(),
            to.airflow_unit(),
        ),
        (Quantity::Airflow, UnitSystem::Si) => (
            convert::lps_to_cfm(value),
            from.airflow_unit(),
            to.airflow_unit(),
        ),
        (Quantity::Dimension, UnitSystem::Ip) => (
            convert::in_to_mm(value),
            from.length_unit(),
            to.length_unit(),
        ),
        (Quantity::Dimension, UnitSystem::Si) => (
            convert::mm_to_in(value),
            from.length_unit(),
            to.length_unit(),
        ),
        (Quantity::Length, UnitSystem::Ip) => (convert::ft_to_m(value), "ft", "m"),
        (Quantity::Length, UnitSystem::Si) => (convert::m_to_ft(value), "m", "ft"),
        (Quantity::Velocity, UnitSystem::Ip) => (
            convert::fpm_to_mps(value),
            from.velocity_unit(),
            to.velocity_unit(),
        ),
        (Quantity::Velocity, UnitSystem::Si) => (
            convert::mps_to_fpm(value),
            from.velocity_unit(),
            to.velocity_unit(),
        ),
        (Quantity::Area, UnitSystem::Ip) => (
            convert::ft2_to_m2(value),
            from.area_unit(),
            to.area_unit(),
        ),
        (Quantity::Area, UnitSystem::Si) => (
            convert::m2_to_ft2(value),
            from.area_unit(),
            to.area_unit(),
        ),
    };
    println!("{} {} = {:.4} {}", value, from_unit, converted, to_unit);
    Ok(())
}

fn cmd_validate(job_path: &Path) -> AppResult<()> {
    println!("Validating job: {}", job_path.display());
    let job = dw_project::load(job_path)?;
    println!(
        "✓ Job is valid ({} rows, {} vent headers)",
        job.rows.len(),
        job.vent_headers.len()
    );
    Ok(())
}

fn cmd_takeoff(job_path: &Path, json: bool) -> AppResult<()> {
    debug!(path = %job_path.display(), "loading job");
    let job = dw_project::load(job_path)?;
    let report = dw_project::run_job(&job)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &JobReport) {
    let units = report.unit_system;
    let area_unit = units.area_unit();

    println!("Job: {} ({})", report.name, units);
    println!("\nRows:");
    for row in &report.rows {
        let outcome = &row.outcome;
        let flag = if outcome.converged() { "" } else { "  (not converged)" };
        println!(
            "  {:<16} {:>8.0} {}  ->  {:>9} {}  {:>7.1} {}{}",
            row.id,
            row.airflow,
            units.airflow_unit(),
            outcome.dimensions.to_string(),
            units.length_unit(),
            outcome.velocity,
            units.velocity_unit(),
            flag
        );
    }

    let takeoff = &report.takeoff;
    println!("\nSheet metal:");
    for line in &takeoff.lines {
        println!(
            "  Gauge {:>2}: {:>9.2} {a} +{:>4.1}% = {:>9.2} {a} x {:>7.2} = {:>11.2}",
            line.gauge.0,
            line.base_area,
            line.allowance_pct,
            line.adjusted_area,
            line.unit_cost,
            line.line_cost,
            a = area_unit,
        );
    }
    println!("\n  Sheet cost:       {:>12.2}", takeoff.sheet_cost);
    println!("  Hangers:          {:>12.2}", takeoff.hanger_cost);
    println!("  Insulation:       {:>12.2}", takeoff.insulation_cost);
    println!("  Grand total:      {:>12.2}", takeoff.grand_total);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn size_parses_units_and_rounding() {
        let cli = Cli::try_parse_from([
            "dw-cli",
            "size",
            "--friction-rate",
            "1.0",
            "--airflow",
            "500",
            "--units",
            "si",
            "--rounding",
            "nearest-even",
        ])
        .unwrap();
        match cli.command {
            Commands::Size {
                units, rounding, ..
            } => {
                assert_eq!(units, UnitSystem::Si);
                assert_eq!(rounding, RoundingPolicy::NearestEven);
            }
            _ => panic!("expected size"),
        }
    }

    #[test]
    fn size_rejects_both_sides() {
        let parsed = Cli::try_parse_from([
            "dw-cli",
            "size",
            "--friction-rate",
            "0.1",
            "--airflow",
            "1000",
            "--width",
            "20",
            "--height",
            "10",
        ]);
        assert!(parsed.is_err());
    }
}
