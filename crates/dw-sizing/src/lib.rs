//! dw-sizing: duct-sizing and equivalent-diameter engine.
//!
//! Turns an airflow and a target friction rate into fabricable rectangular duct
//! dimensions:
//! - round-duct diameter from the friction formula
//! - forward conversion to a fixed-aspect rectangle
//! - inverse solve of one side when the other is pinned
//! - even-integer rounding shared by every path
//! - velocity, sheet-metal area and gauge classification
//!
//! Every function is pure; rows may be memoized or sized in parallel.
//!
//! # Example
//!
//! ```
//! use dw_core::UnitSystem;
//! use dw_sizing::{DimensionConstraint, SizingOptions, SizingRequest, size_duct};
//!
//! let request = SizingRequest::new(0.1, 1000.0, UnitSystem::Ip);
//! let outcome = size_duct(&request, DimensionConstraint::Auto, &SizingOptions::default()).unwrap();
//! assert_eq!(outcome.dimensions.to_string(), "20x10");
//! ```

pub mod common;
pub mod diameter;
pub mod equivalent;
pub mod error;
pub mod inverse;
pub mod metrics;
pub mod rectangular;
pub mod rounding;
pub mod sizing;

// Re-exports
pub use diameter::{friction_rate, round_diameter};
pub use equivalent::equivalent_diameter;
pub use error::{SizingError, SizingResult};
pub use inverse::solve_free_side;
pub use metrics::{
    Gauge, GaugeTable, GaugeThreshold, STANDARD_RUN_END_CAP, VENT_HEADER_END_CAP, gauge_class,
    sheet_metal_area, velocity,
};
pub use rectangular::{AspectRatio, RectangularDimensions, rectangular_from_diameter};
pub use rounding::{RoundingPolicy, round_fabricable};
pub use sizing::{
    DimensionConstraint, SizedSection, SizingOptions, SizingOutcome, SizingRequest, SolverReport,
    size_duct, size_from_diameter, size_rows,
};
