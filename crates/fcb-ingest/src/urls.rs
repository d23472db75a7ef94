//! Source and release URL builders

use crate::release::ReleaseHost;
use fcb_common::types::{parse_continents, Continent};
use fcb_common::{FcbError, Result};
use tracing::{debug, warn};

/// File name of the pre-processed release artifact.
pub const RELEASE_ARTIFACT: &str = "forest_carbon_boundaries.parquet";

/// Tag meaning "most recent release"; never checked against the host.
pub const LATEST_TAG: &str = "latest";

fn join(base: &str, tail: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), tail)
}

/// Location of the raw file for each continent, in the given order
pub fn continent_urls(base_url: &str, continents: &[Continent]) -> Vec<String> {
    continents
        .iter()
        .map(|c| join(base_url, &c.source_file_name()))
        .collect()
}

/// Validate region identifiers and map each to its raw file location.
///
/// Fails with `InvalidArgument` on an empty list or any unknown identifier,
/// without returning the locations that did resolve.
pub fn source_urls<S: AsRef<str>>(base_url: &str, regions: &[S]) -> Result<Vec<String>> {
    let continents = parse_continents(regions)?;
    Ok(continent_urls(base_url, &continents))
}

/// Download location of the release artifact for `tag`.
///
/// Any tag other than [`LATEST_TAG`] must be published on `host`.
pub async fn release_url(base_url: &str, tag: &str, host: &dyn ReleaseHost) -> Result<String> {
    if tag == LATEST_TAG {
        return Ok(join(base_url, &format!("latest/download/{}", RELEASE_ARTIFACT)));
    }

    if tag.trim().is_empty() {
        return Err(FcbError::invalid_argument("release tag must not be empty"));
    }

    let tags = host.list_tags().await?;
    if !tags.iter().any(|t| t == tag) {
        warn!(tag = %tag, known = tags.len(), "Release tag not found");
        return Err(FcbError::invalid_argument(format!(
            "release tag '{}' does not exist (known tags: {})",
            tag,
            if tags.is_empty() { "none".to_string() } else { tags.join(", ") }
        )));
    }

    debug!(tag = %tag, "Release tag verified");
    Ok(join(base_url, &format!("download/{}/{}", tag, RELEASE_ARTIFACT)))
}

/// True when a location needs the engine's HTTP file system
pub fn is_remote(location: &str) -> bool {
    ["http://", "https://", "s3://", "gs://", "gcs://"]
        .iter()
        .any(|scheme| location.starts_with(scheme))
}
