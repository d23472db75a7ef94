//! CLI command implementations
//!
//! Each subcommand has its own module.

pub mod build;
pub mod config;
pub mod export;
pub mod info;
pub mod urls;
