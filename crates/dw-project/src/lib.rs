//! dw-project: job file format, validation and batch evaluation.

pub mod job;
pub mod migrate;
pub mod schema;
pub mod validate;

pub use job::{JobReport, RowReport, run_job};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_job};

use dw_sizing::SizingError;
use dw_takeoff::TakeoffError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Row {id}: {source}")]
    Row { id: String, source: SizingError },

    #[error("Takeoff error: {0}")]
    Takeoff(#[from] TakeoffError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ProjectResult<Job> {
    let job: Job = serde_yaml::from_str(content)?;
    finish(job)
}

pub fn parse_json(content: &str) -> ProjectResult<Job> {
    let job: Job = serde_json::from_str(content)?;
    finish(job)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Job> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Job> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

/// Picks the loader from the file extension; anything but `.json` is YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<Job> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn finish(job: Job) -> ProjectResult<Job> {
    let job = migrate_to_latest(job)?;
    validate_job(&job)?;
    Ok(job)
}
