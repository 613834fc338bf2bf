//! Bucket provisioning.

use tracing::info;

use crate::error::StoreError;
use crate::policy::PolicyTemplate;
use crate::store::ObjectStore;

/// What [`ensure_bucket`] found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The bucket was already there; creation and policy application were
    /// skipped. Carries the currently attached policy, if any.
    Existed {
        /// The policy document currently attached to the bucket.
        policy: Option<String>,
    },
    /// The bucket was created and the rendered policy attached.
    Created,
}

/// Make sure the bucket named in `template` exists and, when newly created,
/// carries the templated policy.
///
/// "Already exists" is an outcome, not an error. Store failures propagate
/// so the caller decides whether to halt or continue.
pub async fn ensure_bucket(
    store: &dyn ObjectStore,
    region: &str,
    template: &PolicyTemplate,
) -> Result<ProvisionOutcome, StoreError> {
    let bucket = template.bucket.as_str();

    if store.bucket_exists(bucket).await? {
        let policy = store.get_bucket_policy(bucket).await?;
        info!(bucket = %bucket, has_policy = policy.is_some(), "bucket already exists");
        return Ok(ProvisionOutcome::Existed { policy });
    }

    store.create_bucket(bucket, region).await?;
    store.put_bucket_policy(bucket, &template.render()).await?;
    info!(bucket = %bucket, region = %region, "bucket created and policy attached");

    Ok(ProvisionOutcome::Created)
}
