//! The seam between orchestration logic and the remote object store.
//!
//! Everything in [`crate::provision`], [`crate::upload`], and [`crate::list`]
//! runs against [`ObjectStore`] rather than a concrete client, so tests can
//! substitute an in-memory store and stay hermetic.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StoreError;

/// One object observed in a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    /// Full object key, prefix included.
    pub key: String,
    /// Object size in bytes.
    pub size: i64,
}

/// One page of a recursive bucket listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects in this page, in listing order.
    pub objects: Vec<RemoteObject>,
    /// Continuation token for the next page, if the listing is truncated.
    pub next: Option<String>,
}

/// Client-side operations this utility needs from an S3-compatible store.
///
/// The surface is exactly what the run requires: bucket existence, bucket
/// creation, policy get/set, single-file upload, and paged listing. The
/// store is presumed safe for concurrent use; uploads call
/// [`ObjectStore::put_file`] from multiple tasks at once.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether the bucket exists. A missing bucket is `Ok(false)`, not an
    /// error.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    /// Create the bucket in the given region.
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError>;

    /// Fetch the policy document attached to the bucket, if any.
    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>, StoreError>;

    /// Attach a policy document to the bucket.
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), StoreError>;

    /// Upload one local file under `key`, stamped with `content_type`.
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Fetch one page of a recursive listing, resuming from `continuation`.
    async fn list_objects_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, StoreError>;
}
