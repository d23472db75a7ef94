//! `fcb build` command implementation
//!
//! Builds the local database from a release artifact or the raw sources.

use crate::error::Result;
use crate::progress::{create_spinner, format_bytes};
use colored::Colorize;
use fcb_common::types::BuildSource;
use fcb_ingest::{BuildOptions, Builder, IngestConfig};
use std::path::PathBuf;

/// Arguments for `fcb build`
#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub path: PathBuf,
    pub source: BuildSource,
    pub continents: Vec<String>,
    pub tag: String,
    pub force: bool,
    pub dry_run: bool,
}

impl BuildArgs {
    fn options(&self) -> BuildOptions {
        BuildOptions {
            path: self.path.clone(),
            source: self.source,
            continents: self.continents.clone(),
            tag: self.tag.clone(),
            force: self.force,
        }
    }
}

/// Build the database
pub async fn run(args: BuildArgs, verbose: bool) -> Result<()> {
    let builder = Builder::new(IngestConfig::from_env()?)?;
    let options = args.options();

    if args.dry_run {
        let plan = builder.plan(&options).await?;
        for location in plan.locations() {
            eprintln!("{} {}", "reads".cyan(), location);
        }
        println!("{};", plan.sql());
        return Ok(());
    }

    let existing = options.path.exists() && !options.force;

    let spinner = create_spinner(
        &format!("Building {} from {}...", options.path.display(), options.source),
        verbose,
    );
    let result = builder.build(&options).await;
    spinner.finish_and_clear();
    let path = result?;

    if existing {
        println!(
            "{} Database already exists at {} (use --force to rebuild)",
            "ℹ".cyan(),
            path.display()
        );
        return Ok(());
    }

    let info = builder.info_cache().load()?;
    println!(
        "{} Built {} ({} records, {})",
        "✓".green(),
        path.display(),
        info.nrecords,
        format_bytes(info.db_size)
    );

    Ok(())
}
