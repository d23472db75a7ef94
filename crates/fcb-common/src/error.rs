//! Error types for FCB

use thiserror::Error;

/// Result type alias for FCB operations
pub type Result<T> = std::result::Result<T, FcbError>;

/// Main error type for FCB
#[derive(Error, Debug)]
pub enum FcbError {
    /// A region, tag, build source or similar value was rejected before any I/O
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A remote or local parquet source could not be fetched or read
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Export destination has an extension other than `.parquet`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The metadata record or the database file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The metadata record exists but cannot be decoded
    #[error("Corrupt cache record: {0}")]
    CorruptCache(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FcbError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Wrap an engine error; the engine's error type stays out of this crate
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    /// True for the "nothing built yet" condition, which callers usually report
    /// instead of treating as a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinct_from_corrupt_cache() {
        assert!(FcbError::not_found("db_info.json").is_not_found());
        assert!(!FcbError::CorruptCache("bad json".into()).is_not_found());
        assert!(!FcbError::data_source("europe.parquet").is_not_found());
    }

    #[test]
    fn test_database_wraps_display() {
        let err = FcbError::database("Catalog Error: Table projects does not exist");
        assert_eq!(
            err.to_string(),
            "Database error: Catalog Error: Table projects does not exist"
        );
    }
}
