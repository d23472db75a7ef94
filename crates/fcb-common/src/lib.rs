//! FCB Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the forest carbon boundaries tools.
//!
//! # Overview
//!
//! This crate provides functionality used by every workspace member:
//!
//! - **Error Handling**: [`FcbError`] with the failure kinds callers branch on
//! - **Types**: continents, area roles, build sources and the output table schema
//! - **Logging**: `tracing` subscriber setup shared by the binaries
//!
//! # Example
//!
//! ```
//! use fcb_common::types::Continent;
//! use fcb_common::{FcbError, Result};
//!
//! fn pick(name: &str) -> Result<Continent> {
//!     name.parse()
//! }
//!
//! assert_eq!(pick("europe").unwrap(), Continent::Europe);
//! assert!(matches!(pick("atlantis"), Err(FcbError::InvalidArgument(_))));
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{FcbError, Result};
