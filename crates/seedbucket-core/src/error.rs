//! Error types.
//!
//! Two small taxonomies: [`ConfigError`] for environment loading, raised up
//! front instead of surfacing deep inside the SDK at first use, and
//! [`StoreError`] for everything that can go wrong talking to the store or
//! reading local source files.

use std::path::PathBuf;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// Name of the variable that was not set.
        name: &'static str,
    },

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        name: &'static str,
        /// The raw value found in the environment.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised by object-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A request to the remote store failed.
    #[error("{op} failed for bucket {bucket}: {message}")]
    Request {
        /// The store operation that failed (e.g. `head_bucket`).
        op: &'static str,
        /// The bucket the operation targeted.
        bucket: String,
        /// Rendered error chain from the client.
        message: String,
    },

    /// A local source path could not be read.
    #[error("cannot read source path {path}: {message}")]
    ReadSource {
        /// The path that could not be read.
        path: PathBuf,
        /// Rendered I/O error.
        message: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::Request`] from any displayable client error.
    pub fn request(op: &'static str, bucket: &str, err: impl std::fmt::Display) -> Self {
        Self::Request {
            op,
            bucket: bucket.to_owned(),
            message: err.to_string(),
        }
    }

    /// Build a [`StoreError::ReadSource`] from any displayable I/O error.
    pub fn read_source(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::ReadSource {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
