//! Errors raised while resolving the engine version.

use thiserror::Error;

/// Errors arising from engine version parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The string is not a semantic version.
    #[error("not a valid version: {value} ({reason})")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of the parse failure.
        reason: String,
    },
}

/// Result type alias using [`VersionError`].
pub type Result<T> = std::result::Result<T, VersionError>;
