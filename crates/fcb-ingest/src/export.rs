//! Export the projects table to a zstd-compressed parquet file

use crate::engine::{self, sql_literal, TABLE_NAME};
use fcb_common::{FcbError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The only supported export format.
pub const EXPORT_EXTENSION: &str = "parquet";

/// Resolve the final destination: no extension gets `.parquet` appended,
/// `.parquet` is kept, anything else is rejected
pub fn resolve_destination(dest: &Path) -> Result<PathBuf> {
    match dest.extension().and_then(|e| e.to_str()) {
        None => {
            let mut with_ext = dest.as_os_str().to_owned();
            with_ext.push(".");
            with_ext.push(EXPORT_EXTENSION);
            Ok(PathBuf::from(with_ext))
        },
        Some(ext) if ext.eq_ignore_ascii_case(EXPORT_EXTENSION) => Ok(dest.to_path_buf()),
        Some(ext) => Err(FcbError::unsupported_format(format!(
            "'.{}' (only .{} exports are supported): {}",
            ext,
            EXPORT_EXTENSION,
            dest.display()
        ))),
    }
}

/// Copy the full table at `db_path` into a parquet file at `dest`.
///
/// The destination is validated before anything is opened or written.
#[instrument(skip_all, fields(dest = %dest.display(), db = %db_path.display()))]
pub fn export_parquet(dest: &Path, db_path: &Path) -> Result<PathBuf> {
    let dest = resolve_destination(dest)?;
    let conn = engine::open_read_only(db_path)?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let sql = format!(
        "COPY {TABLE_NAME} TO {} (FORMAT parquet, COMPRESSION zstd)",
        sql_literal(&dest.to_string_lossy())
    );
    conn.execute_batch(&sql).map_err(FcbError::database)?;

    info!(path = %dest.display(), "Exported table");
    Ok(dest)
}
