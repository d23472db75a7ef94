//! DuckDB connection helpers
//!
//! Thin wrappers around `duckdb::Connection` that load the extensions a
//! statement needs and translate engine errors into [`FcbError`].

use duckdb::{AccessMode, Config, Connection};
use fcb_common::{FcbError, Result};
use std::path::Path;
use tracing::debug;

/// Name of the single table every database holds.
pub const TABLE_NAME: &str = "projects";

/// Engine extensions used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Geometry types and `ST_*` functions
    Spatial,
    /// `http(s)://` and object-store reads
    Httpfs,
}

impl Extension {
    fn name(self) -> &'static str {
        match self {
            Extension::Spatial => "spatial",
            Extension::Httpfs => "httpfs",
        }
    }
}

/// Quote a value as a SQL string literal
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote values for an `IN` clause, e.g. `('a', 'b')`
pub fn sql_in_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| sql_literal(v)).collect();
    format!("({})", items.join(", "))
}

/// Open (or create) a database file for writing
pub fn open(path: &Path) -> Result<Connection> {
    Connection::open(path).map_err(|e| {
        FcbError::Database(format!("cannot open database {}: {}", path.display(), e))
    })
}

/// Open an existing database file read-only
pub fn open_read_only(path: &Path) -> Result<Connection> {
    if !path.exists() {
        return Err(FcbError::not_found(format!(
            "database {} does not exist",
            path.display()
        )));
    }

    let config = Config::default()
        .access_mode(AccessMode::ReadOnly)
        .map_err(FcbError::database)?;

    Connection::open_with_flags(path, config).map_err(|e| {
        FcbError::Database(format!("cannot open database {}: {}", path.display(), e))
    })
}

/// Install (if needed) and load extensions on a connection
pub fn load_extensions(conn: &Connection, extensions: &[Extension]) -> Result<()> {
    for ext in extensions {
        debug!(extension = ext.name(), "Loading engine extension");
        conn.execute_batch(&format!("INSTALL {name}; LOAD {name};", name = ext.name()))
            .map_err(|e| load_error(*ext, e))?;
    }
    Ok(())
}

/// Failure to install or load an extension. httpfs is only needed for
/// remote inputs, so failing to fetch it is a data source problem.
fn load_error(ext: Extension, detail: impl std::fmt::Display) -> FcbError {
    let msg = format!("cannot load the {} extension: {}", ext.name(), detail);
    match ext {
        Extension::Httpfs => FcbError::DataSource(msg),
        Extension::Spatial => FcbError::Database(msg),
    }
}

/// Row count of the projects table
pub fn count_rows(conn: &Connection) -> Result<i64> {
    conn.query_row(&format!("SELECT count(*) FROM {}", TABLE_NAME), [], |row| {
        row.get(0)
    })
    .map_err(FcbError::database)
}

/// Column count of the projects table
pub fn count_columns(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT count(*) FROM information_schema.columns WHERE table_name = ?",
        [TABLE_NAME],
        |row| row.get(0),
    )
    .map_err(FcbError::database)
}
