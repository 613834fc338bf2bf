//! Environment-driven configuration.
//!
//! Provides [`Config`] for the whole run. Required variables are checked up
//! front so a missing credential fails before the first network call rather
//! than deep inside the SDK.

use crate::error::ConfigError;
use crate::policy::ObjectReadAccess;

/// Default bound for the upload worker pool.
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 8;

/// Runtime configuration, sourced once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint host (or full URL) of the S3-compatible store.
    pub endpoint: String,
    /// Bucket to provision and seed.
    pub bucket: String,
    /// Region the bucket is created in.
    pub region: String,
    /// Access key, also used as the policy principal's user name.
    pub access_key: String,
    /// Secret key.
    pub secret_key: String,
    /// Project identifier, used only to build the policy principal ARN.
    pub project_id: String,
    /// Effect for the policy's object-read statement.
    pub object_read: ObjectReadAccess,
    /// Maximum number of uploads in flight at once.
    pub upload_concurrency: usize,
    /// Log level filter string (e.g. `"info"`, `"debug"`).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required (no defaults): `S3_ENDPOINT`, `S3_BUCKET`, `S3_REGION`,
    /// `S3_KEY`, `S3_SECRET`, `S3_PROJECTID`.
    ///
    /// Optional:
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `S3_OBJECT_READ` | `deny` |
    /// | `S3_UPLOAD_CONCURRENCY` | `8` |
    /// | `LOG_LEVEL` | `info` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: required("S3_ENDPOINT")?,
            bucket: required("S3_BUCKET")?,
            region: required("S3_REGION")?,
            access_key: required("S3_KEY")?,
            secret_key: required("S3_SECRET")?,
            project_id: required("S3_PROJECTID")?,
            object_read: parse_object_read("S3_OBJECT_READ")?,
            upload_concurrency: parse_concurrency("S3_UPLOAD_CONCURRENCY")?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| String::from("info")),
        })
    }
}

/// Read a required variable, rejecting empty values.
fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

fn parse_object_read(name: &'static str) -> Result<ObjectReadAccess, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|reason| ConfigError::InvalidValue {
                name,
                value,
                reason,
            }),
        Err(_) => Ok(ObjectReadAccess::default()),
    }
}

fn parse_concurrency(name: &'static str) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(value) => {
            let n: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
                name,
                value: value.clone(),
                reason: String::from("not an unsigned integer"),
            })?;
            if n == 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value,
                    reason: String::from("must be at least 1"),
                });
            }
            Ok(n)
        }
        Err(_) => Ok(DEFAULT_UPLOAD_CONCURRENCY),
    }
}
