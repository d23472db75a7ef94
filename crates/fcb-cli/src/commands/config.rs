//! `fcb config` command implementation
//!
//! Configuration comes from environment variables; these commands show the
//! effective values.

use crate::error::{CliError, Result};
use colored::Colorize;
use fcb_ingest::IngestConfig;

/// Keys accepted by `fcb config get`, with their environment variables
const KEYS: &[(&str, &str)] = &[
    ("source_base_url", "FCB_SOURCE_BASE_URL"),
    ("release_base_url", "FCB_RELEASE_BASE_URL"),
    ("release_api_url", "FCB_RELEASE_API_URL"),
    ("cache_dir", "FCB_CACHE_DIR"),
    ("http_timeout_secs", "FCB_HTTP_TIMEOUT_SECS"),
];

fn value(config: &IngestConfig, key: &str) -> Option<String> {
    match key {
        "source_base_url" => Some(config.source_base_url.clone()),
        "release_base_url" => Some(config.release_base_url.clone()),
        "release_api_url" => Some(config.release_api_url.clone()),
        "cache_dir" => Some(config.cache_dir.display().to_string()),
        "http_timeout_secs" => Some(config.http_timeout_secs.to_string()),
        _ => None,
    }
}

/// Get configuration value
pub fn get(key: &str) -> Result<()> {
    let config = IngestConfig::from_env()?;

    let value = value(&config, key).ok_or_else(|| {
        let known: Vec<&str> = KEYS.iter().map(|(k, _)| *k).collect();
        CliError::config(format!("Unknown config key: {} (known keys: {})", key, known.join(", ")))
    })?;
    println!("{}", value);

    Ok(())
}

/// Show all configuration
pub fn show() -> Result<()> {
    let config = IngestConfig::from_env()?;

    println!("{}", "FCB Configuration:".cyan().bold());
    println!();
    for (key, _) in KEYS {
        if let Some(value) = value(&config, key) {
            println!("{:<20} {}", format!("{}:", key), value);
        }
    }
    println!(
        "{:<20} {}",
        "github_token:",
        if config.github_token.is_some() { "set" } else { "not set" }
    );
    println!();
    println!("{}", "Environment Variables:".cyan());
    for (_, var) in KEYS {
        println!("  {}", var);
    }
    println!("  GITHUB_TOKEN");

    Ok(())
}
