//! [`ObjectStore`] backed by a real S3-compatible endpoint.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::store::{ObjectPage, ObjectStore, RemoteObject};

/// Build an S3 client for the configured endpoint.
///
/// Credentials are static, taken from the configuration; path-style
/// addressing is forced because S3-compatible endpoints rarely resolve
/// virtual-hosted bucket subdomains.
#[must_use]
pub fn build_client(config: &Config) -> aws_sdk_s3::Client {
    let creds = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "seedbucket",
    );

    let sdk_config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url(&config.endpoint))
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(sdk_config)
}

/// Turn a bare endpoint host into a URL. TLS is the default; an explicit
/// scheme in the configured value wins.
fn endpoint_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_owned()
    } else {
        format!("https://{endpoint}")
    }
}

/// Store implementation over `aws_sdk_s3::Client`.
///
/// The SDK client is internally reference-counted, so the store is cheap to
/// clone and safe to share across concurrent upload tasks.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Wrap an already-configured client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StoreError::request(
                        "head_bucket",
                        bucket,
                        DisplayErrorContext(&service_err),
                    ))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError> {
        let constraint = BucketLocationConstraint::from(region);
        let bucket_config = CreateBucketConfiguration::builder()
            .location_constraint(constraint)
            .build();

        self.client
            .create_bucket()
            .bucket(bucket)
            .create_bucket_configuration(bucket_config)
            .send()
            .await
            .map_err(|e| StoreError::request("create_bucket", bucket, DisplayErrorContext(&e)))?;

        debug!(bucket = %bucket, region = %region, "create_bucket completed");
        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>, StoreError> {
        match self.client.get_bucket_policy().bucket(bucket).send().await {
            Ok(output) => Ok(output.policy().map(ToOwned::to_owned)),
            Err(err) => {
                // A bucket with no policy is reported as an error code, not
                // an empty document.
                let service_err = err.into_service_error();
                if service_err.code() == Some("NoSuchBucketPolicy") {
                    Ok(None)
                } else {
                    Err(StoreError::request(
                        "get_bucket_policy",
                        bucket,
                        DisplayErrorContext(&service_err),
                    ))
                }
            }
        }
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), StoreError> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(|e| {
                StoreError::request("put_bucket_policy", bucket, DisplayErrorContext(&e))
            })?;

        debug!(bucket = %bucket, "put_bucket_policy completed");
        Ok(())
    }

    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StoreError::read_source(path, DisplayErrorContext(&e)))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::request("put_object", bucket, DisplayErrorContext(&e)))?;

        debug!(bucket = %bucket, key = %key, "put_object completed");
        Ok(())
    }

    async fn list_objects_page(
        &self,
        bucket: &str,
        continuation: Option<String>,
    ) -> Result<ObjectPage, StoreError> {
        let mut request = self.client.list_objects_v2().bucket(bucket);
        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::request("list_objects_v2", bucket, DisplayErrorContext(&e)))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|obj| {
                obj.key().map(|key| RemoteObject {
                    key: key.to_owned(),
                    size: obj.size().unwrap_or(0),
                })
            })
            .collect();

        let next = if response.is_truncated() == Some(true) {
            response.next_continuation_token().map(ToOwned::to_owned)
        } else {
            None
        };

        Ok(ObjectPage { objects, next })
    }
}
