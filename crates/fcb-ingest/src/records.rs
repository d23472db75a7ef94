//! Read project records back out of a built database

use crate::engine::{self, TABLE_NAME};
use chrono::NaiveDate;
use fcb_common::types::{AreaRole, ProjectRecord};
use fcb_common::{FcbError, Result};
use std::path::Path;

// Dates and flags are cast to text so databases built from either path
// (DATE columns or raw strings) read the same way.
const SELECT_RECORDS: &str = "SELECT id, project_name, area_role, registry_name, methodology, \
     project_type, continent, country, project_developer, \
     CAST(project_start_date AS VARCHAR), CAST(project_end_date AS VARCHAR), \
     CAST(entry_date AS VARCHAR), processing_approach, \
     TRY_CAST(pd_declined AS BOOLEAN), filename, geometry";

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.get(..10)?, "%Y-%m-%d").ok())
}

struct RawRow {
    id: String,
    project_name: Option<String>,
    area_role: String,
    registry_name: Option<String>,
    methodology: Option<String>,
    project_type: Option<String>,
    continent: String,
    country: Option<String>,
    project_developer: Option<String>,
    project_start_date: Option<String>,
    project_end_date: Option<String>,
    entry_date: Option<String>,
    processing_approach: Option<String>,
    pd_declined: Option<bool>,
    filename: Option<String>,
    geometry: Vec<u8>,
}

impl TryFrom<RawRow> for ProjectRecord {
    type Error = FcbError;

    fn try_from(row: RawRow) -> Result<Self> {
        let area_role: AreaRole = row.area_role.parse().map_err(|_| {
            FcbError::Database(format!("record {} has area_role '{}'", row.id, row.area_role))
        })?;
        let continent = row.continent.parse().map_err(|_| {
            FcbError::Database(format!("record {} has continent '{}'", row.id, row.continent))
        })?;

        Ok(ProjectRecord {
            id: row.id,
            project_name: row.project_name,
            area_role,
            registry_name: row.registry_name,
            methodology: row.methodology,
            project_type: row.project_type,
            continent,
            country: row.country,
            project_developer: row.project_developer,
            project_start_date: parse_date(row.project_start_date),
            project_end_date: parse_date(row.project_end_date),
            entry_date: parse_date(row.entry_date),
            processing_approach: row.processing_approach,
            pd_declined: row.pd_declined,
            filename: row.filename,
            geometry: row.geometry,
        })
    }
}

/// Read up to `limit` records in table order
pub fn read_records(db_path: &Path, limit: usize) -> Result<Vec<ProjectRecord>> {
    let conn = engine::open_read_only(db_path)?;
    let mut stmt = conn
        .prepare(&format!("{SELECT_RECORDS} FROM {TABLE_NAME} LIMIT {limit}"))
        .map_err(FcbError::database)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                project_name: row.get(1)?,
                area_role: row.get(2)?,
                registry_name: row.get(3)?,
                methodology: row.get(4)?,
                project_type: row.get(5)?,
                continent: row.get(6)?,
                country: row.get(7)?,
                project_developer: row.get(8)?,
                project_start_date: row.get(9)?,
                project_end_date: row.get(10)?,
                entry_date: row.get(11)?,
                processing_approach: row.get(12)?,
                pd_declined: row.get(13)?,
                filename: row.get(14)?,
                geometry: row.get(15)?,
            })
        })
        .map_err(FcbError::database)?;

    let records = rows
        .map(|row| row.map_err(FcbError::database).and_then(ProjectRecord::try_from))
        .collect::<Result<Vec<_>>>()?;
    Ok(records)
}
