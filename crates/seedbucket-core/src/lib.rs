//! Provision an S3-compatible bucket, seed it with local files, and list
//! the result back for confirmation.
//!
//! The crate is glue over `aws-sdk-s3`: it checks whether a bucket exists,
//! creates it and attaches a templated access policy when it does not,
//! uploads the entries of a local directory under a fixed key prefix on a
//! bounded worker pool, and drains a recursive listing to completion.
//!
//! All orchestration logic runs against the [`ObjectStore`] trait, so tests
//! can substitute an in-memory store for the real endpoint.

pub mod config;
pub mod error;
pub mod list;
pub mod policy;
pub mod provision;
pub mod s3;
pub mod store;
pub mod upload;

pub use config::Config;
pub use error::{ConfigError, StoreError};
pub use list::list_all;
pub use policy::{ObjectReadAccess, PolicyTemplate};
pub use provision::{ProvisionOutcome, ensure_bucket};
pub use s3::{S3Store, build_client};
pub use store::{ObjectPage, ObjectStore, RemoteObject};
pub use upload::{KEY_PREFIX, UploadReport, upload_dir};
