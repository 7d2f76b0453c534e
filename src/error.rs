//! Error types for operations that abort a run.
//!
//! Problems with a single rule file are not errors at this level; they are
//! recorded as [`FailureReason`](crate::sync::FailureReason) values in the
//! run summary so the remaining rules are still processed.

use std::io;
use std::path::PathBuf;

/// Errors that stop a sync before or instead of processing rules
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target or rules directory could not be created
    #[error("Failed to create rules directory {}: {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The `--filter` pattern could not be compiled
    #[error("Invalid filter pattern '{pattern}': {reason}")]
    InvalidFilter { pattern: String, reason: String },

    /// A manifest entry is empty, duplicated, or escapes the rules directory
    #[error("Invalid rule manifest: {0}")]
    InvalidManifest(String),

    /// The configuration file could not be read or parsed
    #[error("Configuration error at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// The remote base location is not a usable URL
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(String),
}

impl Error {
    /// Whether the error stems from invalid user input rather than the environment
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidFilter { .. })
    }
}

/// Result type alias for rule-sync operations
pub type Result<T> = std::result::Result<T, Error>;
