//! Job validation logic.

use crate::schema::{Job, RowDef, VentHeaderDef};
use dw_core::{DwError, ensure_positive};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Row {id}: width and height are both fixed")]
    AmbiguousConstraint { id: String },

    #[error("Row {id}: no friction rate and no default_friction_rate in settings")]
    MissingFrictionRate { id: String },

    #[error("Invalid settings: {what}")]
    InvalidSettings { what: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_job(job: &Job) -> Result<(), ValidationError> {
    if job.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: job.version,
        });
    }

    validate_settings(job)?;

    let mut row_ids = HashSet::new();
    for row in &job.rows {
        if !row_ids.insert(&row.id) {
            return Err(ValidationError::DuplicateId {
                id: row.id.clone(),
                context: "rows".to_string(),
            });
        }
        validate_row(job, row)?;
    }

    let mut header_ids = HashSet::new();
    for header in &job.vent_headers {
        if !header_ids.insert(&header.id) {
            return Err(ValidationError::DuplicateId {
                id: header.id.clone(),
                context: "vent_headers".to_string(),
            });
        }
        validate_header(header)?;
    }

    Ok(())
}

fn validate_settings(job: &Job) -> Result<(), ValidationError> {
    let settings = &job.settings;
    if let Some(fr) = settings.default_friction_rate {
        positive("settings.default_friction_rate", fr)?;
    }
    if let Some(k) = settings.k_override {
        positive("settings.k_override", k)?;
    }
    settings
        .sizing
        .newton
        .validate()
        .map_err(|e| invalid_settings(e.to_string()))?;
    settings
        .gauge_table
        .validate()
        .map_err(|e| invalid_settings(e.to_string()))?;
    settings
        .cost
        .validate()
        .map_err(|e| invalid_settings(e.to_string()))?;
    Ok(())
}

fn validate_row(job: &Job, row: &RowDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("rows[{}].{}", row.id, name);

    positive(&field("airflow"), row.airflow)?;
    positive(&field("length"), row.length)?;

    match row.friction_rate {
        Some(fr) => positive(&field("friction_rate"), fr)?,
        None if job.settings.default_friction_rate.is_none() => {
            return Err(ValidationError::MissingFrictionRate { id: row.id.clone() });
        }
        None => {}
    }

    if row.manual_width.is_some() && row.manual_height.is_some() {
        return Err(ValidationError::AmbiguousConstraint { id: row.id.clone() });
    }
    if let Some(w) = row.manual_width {
        positive(&field("manual_width"), w)?;
    }
    if let Some(h) = row.manual_height {
        positive(&field("manual_height"), h)?;
    }
    Ok(())
}

fn validate_header(header: &VentHeaderDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("vent_headers[{}].{}", header.id, name);

    positive(&field("width"), header.width)?;
    positive(&field("height"), header.height)?;
    positive(&field("spigot_size"), header.spigot_size)?;
    if header.head_count == 0 {
        return Err(ValidationError::InvalidValue {
            field: field("head_count"),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    ensure_positive(value, "value")
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: match e {
                DwError::NonFinite { .. } => "must be finite".to_string(),
                _ => "must be positive".to_string(),
            },
        })
}

fn invalid_settings(what: String) -> ValidationError {
    ValidationError::InvalidSettings { what }
}
