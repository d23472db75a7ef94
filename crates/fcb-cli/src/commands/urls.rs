//! `fcb urls` command implementation
//!
//! Prints the locations a build would read, one per line.

use crate::error::Result;
use fcb_ingest::release::GithubReleases;
use fcb_ingest::{urls, IngestConfig};

/// Print the raw source file location of each continent
pub fn source(continents: &[String]) -> Result<()> {
    let config = IngestConfig::from_env()?;
    for url in urls::source_urls(&config.source_base_url, continents)? {
        println!("{}", url);
    }
    Ok(())
}

/// Print the release artifact URL for `tag`
pub async fn release(tag: &str) -> Result<()> {
    let config = IngestConfig::from_env()?;
    let host = GithubReleases::from_config(&config)?;
    println!("{}", urls::release_url(&config.release_base_url, tag, &host).await?);
    Ok(())
}
