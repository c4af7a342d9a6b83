//! Job file version upgrades.

use crate::ProjectError;
use crate::schema::Job;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut job: Job) -> Result<Job, ProjectError> {
    while job.version < LATEST_VERSION {
        job = migrate_one_version(job)?;
    }
    Ok(job)
}

fn migrate_one_version(job: Job) -> Result<Job, ProjectError> {
    match job.version {
        0 => migrate_v0_to_v1(job),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// Version 0 files predate the `version` key and stored no row ids.
fn migrate_v0_to_v1(mut job: Job) -> Result<Job, ProjectError> {
    for (idx, row) in job.rows.iter_mut().enumerate() {
        if row.id.is_empty() {
            row.id = format!("row-{}", idx + 1);
        }
    }
    for (idx, header) in job.vent_headers.iter_mut().enumerate() {
        if header.id.is_empty() {
            header.id = format!("header-{}", idx + 1);
        }
    }
    job.version = 1;
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{JobSettings, RowDef};

    #[test]
    fn v0_rows_get_ids() {
        let job = Job {
            version: 0,
            name: "legacy".into(),
            settings: JobSettings::default(),
            rows: vec![RowDef {
                id: String::new(),
                label: None,
                airflow: 1000.0,
                length: 10.0,
                friction_rate: Some(0.1),
                manual_width: None,
                manual_height: None,
            }],
            vent_headers: Vec::new(),
        };
        let job = migrate_to_latest(job).unwrap();
        assert_eq!(job.version, LATEST_VERSION);
        assert_eq!(job.rows[0].id, "row-1");
    }
}
