//! Produce-to-completion bucket listing.

use crate::error::StoreError;
use crate::store::{ObjectStore, RemoteObject};

/// List every object in the bucket.
///
/// Follows continuation tokens until the store reports no further pages, so
/// the returned vector is the complete listing at the time of the call. The
/// caller can rely on the result being final before it reports counts.
pub async fn list_all(
    store: &dyn ObjectStore,
    bucket: &str,
) -> Result<Vec<RemoteObject>, StoreError> {
    let mut objects = Vec::new();
    let mut continuation = None;

    loop {
        let page = store.list_objects_page(bucket, continuation.take()).await?;
        objects.extend(page.objects);

        match page.next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(objects)
}
