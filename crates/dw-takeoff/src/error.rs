//! Error types for takeoff operations.

use dw_core::error::DwError;
use dw_sizing::SizingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TakeoffError {
    #[error("Invalid input for {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("No unit cost configured for gauge {gauge}")]
    MissingUnitCost { gauge: u8 },

    #[error("Sizing error: {0}")]
    Sizing(#[from] SizingError),
}

pub type TakeoffResult<T> = Result<T, TakeoffError>;

impl From<TakeoffError> for DwError {
    fn from(e: TakeoffError) -> Self {
        match e {
            TakeoffError::InvalidInput { what, value } => DwError::InvalidInput { what, value },
            TakeoffError::NonFinite { what, value } => DwError::NonFinite { what, value },
            TakeoffError::MissingUnitCost { .. } => DwError::InvalidArg {
                what: "missing unit cost for gauge",
            },
            TakeoffError::Sizing(e) => e.into(),
        }
    }
}

impl From<DwError> for TakeoffError {
    fn from(e: DwError) -> Self {
        match e {
            DwError::InvalidInput { what, value } => TakeoffError::InvalidInput { what, value },
            DwError::NonFinite { what, value } => TakeoffError::NonFinite { what, value },
            other => TakeoffError::Sizing(other.into()),
        }
    }
}
