//! FCB CLI Library
//!
//! Command-line interface for building and querying a local database of
//! forest carbon project boundaries.
//!
//! # Overview
//!
//! - **Building**: Create the database from a release or the raw sources (`fcb build`)
//! - **Exporting**: Write the table to a parquet file (`fcb export`)
//! - **Inspecting**: Show the metadata of the last build (`fcb info`)
//! - **Locations**: Print the URLs a build would read (`fcb urls`)
//! - **Configuration**: Show effective settings (`fcb config`)

pub mod commands;
pub mod error;
pub mod progress;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use fcb_common::types::BuildSource;
use std::path::PathBuf;

/// Comma-separated continent list used when none is given.
pub const ALL_CONTINENTS: &str = "africa,asia,europe,north_america,oceania,south_america";

/// FCB - Forest Carbon Boundaries
#[derive(Parser, Debug)]
#[command(name = "fcb")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the local database
    Build {
        /// Database file to create
        #[arg(short, long, default_value = fcb_ingest::DEFAULT_DB_FILE)]
        path: PathBuf,

        /// Where to build from (release, source)
        #[arg(short, long, default_value = "release")]
        source: BuildSource,

        /// Continents to include
        #[arg(short, long, value_delimiter = ',', default_value = ALL_CONTINENTS)]
        continents: Vec<String>,

        /// Release tag (release builds only)
        #[arg(short, long, default_value = "latest")]
        tag: String,

        /// Rebuild even if the database exists
        #[arg(short, long)]
        force: bool,

        /// Print the SQL that would run instead of building
        #[arg(long)]
        dry_run: bool,
    },

    /// Export the projects table to parquet
    Export {
        /// Destination file (".parquet" is appended when no extension is given)
        dest: PathBuf,

        /// Database to export (defaults to the last built database)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show information about the last built database
    Info {
        /// Recompute the metadata from the database file
        #[arg(short, long)]
        refresh: bool,

        /// Also print the first N records
        #[arg(long, value_name = "N")]
        sample: Option<usize>,
    },

    /// Print data locations
    Urls {
        #[command(subcommand)]
        command: UrlsCommand,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Location subcommands
#[derive(Subcommand, Debug)]
pub enum UrlsCommand {
    /// Raw per-continent source files
    Source {
        /// Continents to resolve
        #[arg(short, long, value_delimiter = ',', default_value = ALL_CONTINENTS)]
        continents: Vec<String>,
    },

    /// Release artifact download URL
    Release {
        /// Release tag
        #[arg(short, long, default_value = "latest")]
        tag: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["fcb", "build"]).unwrap();
        let Commands::Build {
            path,
            source,
            continents,
            tag,
            force,
            dry_run,
        } = cli.command
        else {
            panic!("expected build");
        };

        assert_eq!(path, PathBuf::from("forest_carbon_boundaries.duckdb"));
        assert_eq!(source, BuildSource::Release);
        assert_eq!(continents.len(), 6);
        assert_eq!(tag, "latest");
        assert!(!force);
        assert!(!dry_run);
    }

    #[test]
    fn test_build_parses_continent_list() {
        let cli =
            Cli::try_parse_from(["fcb", "build", "--source", "source", "-c", "europe,asia"]).unwrap();
        let Commands::Build {
            source, continents, ..
        } = cli.command
        else {
            panic!("expected build");
        };

        assert_eq!(source, BuildSource::Source);
        assert_eq!(continents, vec!["europe", "asia"]);
    }

    #[test]
    fn test_build_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["fcb", "build", "--source", "mirror"]).is_err());
    }
}
