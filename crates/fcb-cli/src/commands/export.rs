//! `fcb export` command implementation

use crate::error::Result;
use crate::progress::{create_spinner, format_bytes};
use colored::Colorize;
use fcb_common::FcbError;
use fcb_ingest::export::{export_parquet, resolve_destination};
use fcb_ingest::{IngestConfig, InfoCache};
use std::path::Path;

/// Export the projects table to parquet.
///
/// Without `--db` the database recorded by the last build is exported.
pub async fn run(dest: &Path, db: Option<&Path>, verbose: bool) -> Result<()> {
    // Reject bad destinations before looking for a database
    let dest = resolve_destination(dest)?;

    let db_path = match db {
        Some(path) => path.to_path_buf(),
        None => {
            let config = IngestConfig::from_env()?;
            InfoCache::in_dir(&config.cache_dir).load()?.db_path
        },
    };

    let spinner = create_spinner(&format!("Exporting to {}...", dest.display()), verbose);
    let result = tokio::task::spawn_blocking(move || export_parquet(&dest, &db_path))
        .await
        .map_err(|e| FcbError::Internal(format!("export task failed: {}", e)));
    spinner.finish_and_clear();
    let out = result??;

    let size = std::fs::metadata(&out).map(|m| m.len()).unwrap_or(0);
    println!("{} Exported {} ({})", "✓".green(), out.display(), format_bytes(size));

    Ok(())
}
