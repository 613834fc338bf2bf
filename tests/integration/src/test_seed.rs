//! Upload and listing integration tests.

#[cfg(test)]
mod tests {
    use seedbucket_core::{
        KEY_PREFIX, ObjectReadAccess, PolicyTemplate, ensure_bucket, list_all, upload_dir,
    };
    use tempfile::TempDir;

    use crate::{cleanup_bucket, s3_client, store, test_bucket_name};

    async fn provisioned_bucket(prefix: &str) -> String {
        let bucket = test_bucket_name(prefix);
        let template = PolicyTemplate {
            bucket: bucket.clone(),
            project_id: "1234".to_owned(),
            access_key: "minioadmin".to_owned(),
            object_read: ObjectReadAccess::Allow,
        };
        ensure_bucket(&store(), "us-east-1", &template)
            .await
            .expect("provision");
        bucket
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_seed_directory_and_list_it_back() {
        let client = s3_client();
        let store = store();
        let bucket = provisioned_bucket("seed").await;

        let dir = TempDir::new().expect("tempdir");
        for (name, data) in [("a.txt", "alpha"), ("b.txt", "beta"), ("c.txt", "gamma")] {
            std::fs::write(dir.path().join(name), data).expect("write fixture");
        }

        let report = upload_dir(&store, &bucket, dir.path(), 4)
            .await
            .expect("upload");
        assert_eq!(report.succeeded.len(), 3);
        assert!(report.failed.is_empty());

        let keys: Vec<String> = list_all(&store, &bucket)
            .await
            .expect("list")
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, vec!["test/a.txt", "test/b.txt", "test/c.txt"]);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_stamp_text_plain_content_type() {
        let client = s3_client();
        let store = store();
        let bucket = provisioned_bucket("ctype").await;

        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("image.png"), b"\x89PNG").expect("write fixture");

        upload_dir(&store, &bucket, dir.path(), 1)
            .await
            .expect("upload");

        let resp = client
            .head_object()
            .bucket(&bucket)
            .key(format!("{KEY_PREFIX}image.png"))
            .send()
            .await
            .expect("head_object");
        assert_eq!(resp.content_type(), Some("text/plain"));

        cleanup_bucket(&client, &bucket).await;
    }
}
