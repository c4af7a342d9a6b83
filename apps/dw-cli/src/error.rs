//! Error type for the command-line front end.

use dw_core::DwError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Job error: {0}")]
    Job(#[from] dw_project::ProjectError),

    #[error("{0}")]
    Engine(#[from] DwError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<dw_sizing::SizingError> for AppError {
    fn from(err: dw_sizing::SizingError) -> Self {
        AppError::Engine(err.into())
    }
}

impl From<dw_takeoff::TakeoffError> for AppError {
    fn from(err: dw_takeoff::TakeoffError) -> Self {
        AppError::Engine(err.into())
    }
}
