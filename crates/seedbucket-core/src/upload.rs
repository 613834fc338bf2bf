//! Concurrent directory upload.

use std::path::Path;

use futures::StreamExt;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::store::ObjectStore;

/// Key prefix every uploaded object lands under.
pub const KEY_PREFIX: &str = "test/";

/// Aggregate result of a directory upload.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// File names whose upload completed, sorted.
    pub succeeded: Vec<String>,
    /// File names whose upload failed, with the reason.
    pub failed: Vec<(String, StoreError)>,
}

impl UploadReport {
    /// Total number of attempted uploads.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Upload every entry of `dir` to `bucket` under [`KEY_PREFIX`].
///
/// Entries are not filtered by type: anything that cannot be read as a file
/// (a subdirectory, a file deleted mid-run) is recorded as a failure rather
/// than aborting the batch. Every object is stamped `text/plain` whatever
/// its extension. At most `concurrency` uploads run at once; the call
/// returns only when every upload has settled.
///
/// Failing to enumerate `dir` itself is an error; the directory is never
/// created on the caller's behalf.
pub async fn upload_dir(
    store: &dyn ObjectStore,
    bucket: &str,
    dir: &Path,
    concurrency: usize,
) -> Result<UploadReport, StoreError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| StoreError::read_source(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::read_source(dir, e))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let results: Vec<(String, Result<(), StoreError>)> =
        futures::stream::iter(names.into_iter().map(|name| {
            let key = format!("{KEY_PREFIX}{name}");
            let path = dir.join(&name);
            async move {
                info!(file = %name, key = %key, "uploading file");
                let result = store
                    .put_file(bucket, &key, &path, mime::TEXT_PLAIN.as_ref())
                    .await;
                (name, result)
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = UploadReport::default();
    for (name, result) in results {
        match result {
            Ok(()) => {
                info!(file = %name, "file uploaded");
                report.succeeded.push(name);
            }
            Err(err) => {
                warn!(file = %name, error = %err, "file upload failed");
                report.failed.push((name, err));
            }
        }
    }
    report.succeeded.sort();
    report.failed.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(report)
}
