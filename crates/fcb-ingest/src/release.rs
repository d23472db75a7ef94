//! Release host client
//!
//! Lists the tags published on the release host so a requested tag can be
//! validated before anything is downloaded.

use crate::config::IngestConfig;
use async_trait::async_trait;
use fcb_common::{FcbError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Page size requested from the releases API (its maximum).
const RELEASES_PER_PAGE: u32 = 100;

/// Anything that can enumerate published release tags.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// GitHub releases API client
pub struct GithubReleases {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubReleases {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fcb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FcbError::network)?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: None,
        })
    }

    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        let mut host = Self::new(
            config.release_api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )?;
        host.token = config.github_token.clone();
        Ok(host)
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Release>> {
        let mut request = self
            .client
            .get(&self.api_url)
            .header("Accept", "application/vnd.github+json")
            .query(&[("per_page", RELEASES_PER_PAGE), ("page", page)]);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FcbError::network(format!("listing releases at {}: {}", self.api_url, e)))?;

        response.json().await.map_err(|e| {
            FcbError::network(format!("decoding releases from {}: {}", self.api_url, e))
        })
    }
}

#[async_trait]
impl ReleaseHost for GithubReleases {
    async fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        let mut page = 1;

        loop {
            let releases = self.fetch_page(page).await?;
            let count = releases.len();
            tags.extend(releases.into_iter().map(|r| r.tag_name));

            if count < RELEASES_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        debug!(count = tags.len(), "Listed release tags");
        Ok(tags)
    }
}
