//! seedbucket - provision an S3-compatible bucket, seed it with the
//! contents of `test-files/`, and list the result.
//!
//! The run is strictly linear: provision, then upload, then list. Only the
//! upload step is internally concurrent, and the listing is drained to
//! completion before the process exits, so the final count always prints.
//!
//! # Usage
//!
//! ```text
//! S3_ENDPOINT=storage.example.com S3_BUCKET=demo S3_REGION=eu-central-1 \
//! S3_KEY=... S3_SECRET=... S3_PROJECTID=... seedbucket
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `S3_ENDPOINT` | *(required)* | Endpoint host or URL |
//! | `S3_BUCKET` | *(required)* | Bucket to provision and seed |
//! | `S3_REGION` | *(required)* | Region for bucket creation |
//! | `S3_KEY` | *(required)* | Access key |
//! | `S3_SECRET` | *(required)* | Secret key |
//! | `S3_PROJECTID` | *(required)* | Project id for the policy principal |
//! | `S3_OBJECT_READ` | `deny` | Policy effect for `s3:GetObject` |
//! | `S3_UPLOAD_CONCURRENCY` | `8` | Uploads in flight at once |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seedbucket_core::{
    Config, PolicyTemplate, ProvisionOutcome, S3Store, build_client, ensure_bucket, list_all,
    upload_dir,
};

/// Crate version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local directory whose entries get uploaded. Never created on the user's
/// behalf; a missing directory fails the run.
const SOURCE_DIR: &str = "test-files";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("loading configuration from environment")?;
    init_tracing(&config.log_level)?;

    info!(
        endpoint = %config.endpoint,
        bucket = %config.bucket,
        region = %config.region,
        version = VERSION,
        "starting seedbucket",
    );

    let client = build_client(&config);
    let store = S3Store::new(client);

    let template = PolicyTemplate {
        bucket: config.bucket.clone(),
        project_id: config.project_id.clone(),
        access_key: config.access_key.clone(),
        object_read: config.object_read,
    };

    // Provisioning failures halt the run; an existing bucket is benign.
    match ensure_bucket(&store, &config.region, &template)
        .await
        .context("provisioning bucket")?
    {
        ProvisionOutcome::Created => {
            info!(bucket = %config.bucket, region = %config.region, "bucket provisioned");
        }
        ProvisionOutcome::Existed { policy } => {
            info!(bucket = %config.bucket, "bucket already provisioned");
            if let Some(policy) = policy {
                info!(%policy, "current bucket policy");
            }
        }
    }

    let report = upload_dir(
        &store,
        &config.bucket,
        Path::new(SOURCE_DIR),
        config.upload_concurrency,
    )
    .await
    .with_context(|| format!("uploading directory {SOURCE_DIR}"))?;

    info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "upload finished",
    );
    for (name, reason) in &report.failed {
        warn!(file = %name, %reason, "upload failed");
    }

    let objects = list_all(&store, &config.bucket)
        .await
        .context("listing bucket")?;

    info!(total = objects.len(), "listing complete");
    for object in &objects {
        info!(key = %object.key, size = object.size, "object");
    }

    Ok(())
}
