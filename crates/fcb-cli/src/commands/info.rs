//! `fcb info` command implementation
//!
//! Shows the metadata record of the last build, optionally recomputed from
//! the database file, and a sample of its records.

use crate::error::Result;
use crate::progress::format_bytes;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use fcb_common::types::ProjectRecord;
use fcb_ingest::records::read_records;
use fcb_ingest::{DbInfo, IngestConfig, InfoCache};

/// Shown when no build has recorded a database yet
pub const NOT_BUILT: &str = "No database has been built yet. Run 'fcb build' first.";

/// Show database information
pub async fn run(refresh: bool, sample: Option<usize>) -> Result<()> {
    let config = IngestConfig::from_env()?;
    let cache = InfoCache::in_dir(&config.cache_dir);

    let mut info = match cache.load() {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            println!("{}", NOT_BUILT);
            return Ok(());
        },
        Err(e) => return Err(e.into()),
    };
    if refresh {
        info = DbInfo::collect(&info.db_path)?;
        cache.save(&info)?;
    }

    print_info(&info);

    if let Some(limit) = sample {
        let records = read_records(&info.db_path, limit)?;
        println!();
        println!("{}", sample_table(&records));
    }

    Ok(())
}

fn print_info(info: &DbInfo) {
    println!("{}", "Database:".cyan().bold());
    println!();
    println!("{:<10} {}", "path:", info.db_path.display());
    println!("{:<10} {}", "built:", info.db_date.to_rfc3339());
    println!("{:<10} {}", "size:", format_bytes(info.db_size));
    println!("{:<10} {}", "records:", info.nrecords);
    println!("{:<10} {}", "columns:", info.ncols);
}

fn sample_table(records: &[ProjectRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["id", "area_role", "continent", "country", "project_name", "registry"]);

    for record in records {
        table.add_row(vec![
            record.id.clone(),
            record.area_role.to_string(),
            record.continent.to_string(),
            record.country.clone().unwrap_or_else(|| "-".to_string()),
            record.project_name.clone().unwrap_or_else(|| "-".to_string()),
            record.registry_name.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table
}
