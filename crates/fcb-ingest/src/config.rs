//! Configuration for data locations and the metadata cache
//!
//! Defaults point at the public source bucket and the GitHub release page;
//! every value can be overridden through `FCB_*` environment variables.

use fcb_common::{FcbError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Public bucket holding one raw parquet file per continent.
pub const DEFAULT_SOURCE_BASE_URL: &str =
    "https://storage.googleapis.com/forest-carbon-boundaries/source";

/// Release page; artifacts live under `<base>/download/<tag>/`.
pub const DEFAULT_RELEASE_BASE_URL: &str =
    "https://github.com/forest-carbon/forest-carbon-boundaries/releases";

/// Releases API used to list known tags.
pub const DEFAULT_RELEASE_API_URL: &str =
    "https://api.github.com/repos/forest-carbon/forest-carbon-boundaries/releases";

/// Default timeout for release API requests in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Base location of the raw per-continent files (URL or local directory)
    pub source_base_url: String,

    /// Base location of release downloads (URL or local directory)
    pub release_base_url: String,

    /// Releases API endpoint listing tags
    pub release_api_url: String,

    /// Directory holding the metadata record
    pub cache_dir: PathBuf,

    pub http_timeout_secs: u64,

    /// Bearer token for the releases API, if any
    #[serde(skip_serializing)]
    pub github_token: Option<String>,
}

impl IngestConfig {
    /// Create a new config with default values
    pub fn new() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| FcbError::Config("Could not determine cache directory".to_string()))?
            .join("fcb");

        Ok(Self::with_cache_dir(cache_dir))
    }

    /// Defaults with an explicit cache directory
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            release_api_url: DEFAULT_RELEASE_API_URL.to_string(),
            cache_dir: cache_dir.into(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            github_token: None,
        }
    }

    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("FCB_CACHE_DIR") {
            Ok(dir) => Self::with_cache_dir(dir),
            Err(_) => Self::new()?,
        };

        if let Ok(url) = std::env::var("FCB_SOURCE_BASE_URL") {
            config.source_base_url = url;
        }

        if let Ok(url) = std::env::var("FCB_RELEASE_BASE_URL") {
            config.release_base_url = url;
        }

        if let Ok(url) = std::env::var("FCB_RELEASE_API_URL") {
            config.release_api_url = url;
        }

        if let Ok(secs) = std::env::var("FCB_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = secs.parse().map_err(|_| {
                FcbError::Config(format!("FCB_HTTP_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
        }

        config.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(config)
    }
}
