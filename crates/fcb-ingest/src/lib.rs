//! FCB Ingest Library
//!
//! Builds a local DuckDB database of forest carbon project boundaries and
//! exposes the operations around it.
//!
//! # Build Paths
//!
//! - **release**: download the pre-processed release artifact and keep the
//!   requested continents
//! - **source**: read the raw per-continent files, clean geometries and
//!   dates, and pivot the three area roles into long format
//!
//! # Example
//!
//! ```no_run
//! use fcb_ingest::{BuildOptions, Builder, IngestConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let builder = Builder::new(IngestConfig::from_env()?)?;
//!     let path = builder.build(&BuildOptions::default()).await?;
//!     fcb_ingest::export::export_parquet("boundaries".as_ref(), &path)?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod builder;
pub mod config;
pub mod engine;
pub mod export;
pub mod info;
pub mod pipeline;
pub mod records;
pub mod release;
pub mod urls;

pub use builder::{BuildOptions, BuildPlan, Builder, DEFAULT_DB_FILE};
pub use config::IngestConfig;
pub use info::{DbInfo, InfoCache};
pub use release::{GithubReleases, ReleaseHost};
