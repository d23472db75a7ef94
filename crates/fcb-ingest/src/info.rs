//! Database metadata record
//!
//! After each successful build a small JSON record describing the database is
//! written to the cache directory, so `fcb info` can report on it without
//! opening the database. There is one record per user: building another
//! database replaces it.

use crate::engine;
use chrono::{DateTime, Utc};
use fcb_common::{FcbError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the record inside the cache directory.
pub const INFO_FILE_NAME: &str = "db_info.json";

/// Metadata about the most recently built database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbInfo {
    /// Absolute path of the database file
    pub db_path: PathBuf,

    /// When the database was built
    pub db_date: DateTime<Utc>,

    /// File size in bytes
    pub db_size: u64,

    /// Rows in the projects table
    pub nrecords: i64,

    /// Columns in the projects table
    pub ncols: i64,
}

impl DbInfo {
    /// Recompute the record from a database on disk
    pub fn collect(db_path: &Path) -> Result<Self> {
        let conn = engine::open_read_only(db_path)?;
        let nrecords = engine::count_rows(&conn)?;
        let ncols = engine::count_columns(&conn)?;
        drop(conn);

        let db_path = std::fs::canonicalize(db_path)?;
        let metadata = std::fs::metadata(&db_path)?;
        let db_date = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(Self {
            db_path,
            db_date,
            db_size: metadata.len(),
            nrecords,
            ncols,
        })
    }
}

/// Single-slot store for [`DbInfo`]
#[derive(Debug, Clone)]
pub struct InfoCache {
    path: PathBuf,
}

impl InfoCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record stored under `cache_dir`
    pub fn in_dir(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join(INFO_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record.
    ///
    /// Returns `NotFound` when nothing has been built yet and `CorruptCache`
    /// when the file exists but cannot be decoded.
    pub fn load(&self) -> Result<DbInfo> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FcbError::not_found(format!(
                    "no metadata record at {}",
                    self.path.display()
                )));
            },
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            FcbError::CorruptCache(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Overwrite the record
    pub fn save(&self, info: &DbInfo) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(info)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Saved metadata record");
        Ok(())
    }
}
