//! Error types for FCB CLI
//!
//! Wraps library errors with messages that tell the user what to do next.

use fcb_common::FcbError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// User-facing error for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// No database has been built, or the given one is missing
    #[error("No database has been built yet. Run 'fcb build' first. ({0})")]
    NoDatabase(String),

    /// Argument rejected before anything was done
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Export destination has the wrong extension
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Remote or local input could not be read during a build
    #[error("Could not read the input data: {0}. Check your connection and the FCB_*_BASE_URL settings.")]
    DataSource(String),

    /// Metadata record is unreadable
    #[error("The metadata record is corrupt: {0}. Rebuild with 'fcb build --force' to rewrite it.")]
    CorruptCache(String),

    /// Release host request failed
    #[error("Network request failed: {0}. Check your internet connection or set GITHUB_TOKEN if rate limited.")]
    Network(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Any other library error
    #[error(transparent)]
    Library(FcbError),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<FcbError> for CliError {
    fn from(err: FcbError) -> Self {
        match err {
            FcbError::NotFound(msg) => Self::NoDatabase(msg),
            FcbError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            FcbError::UnsupportedFormat(msg) => Self::UnsupportedFormat(msg),
            FcbError::DataSource(msg) => Self::DataSource(msg),
            FcbError::CorruptCache(msg) => Self::CorruptCache(msg),
            FcbError::Network(msg) => Self::Network(msg),
            FcbError::Config(msg) => Self::Config(msg),
            FcbError::Io(e) => Self::Io(e),
            other => Self::Library(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_suggests_build() {
        let err: CliError = FcbError::not_found("no metadata record").into();
        let msg = err.to_string();
        assert!(msg.starts_with("No database has been built yet. Run 'fcb build' first."));
        assert!(msg.contains("no metadata record"));
    }

    #[test]
    fn test_kinds_are_preserved() {
        assert!(matches!(
            CliError::from(FcbError::invalid_argument("unknown continent 'mars'")),
            CliError::InvalidArgument(_)
        ));
        assert!(matches!(
            CliError::from(FcbError::unsupported_format("'.csv'")),
            CliError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            CliError::from(FcbError::Database("locked".into())),
            CliError::Library(FcbError::Database(_))
        ));
    }

    #[test]
    fn test_library_errors_are_transparent() {
        let err = CliError::from(FcbError::Internal("task panicked".into()));
        assert_eq!(err.to_string(), FcbError::Internal("task panicked".into()).to_string());
    }
}
