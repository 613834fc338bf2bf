//! Provisioning integration tests.

#[cfg(test)]
mod tests {
    use seedbucket_core::{ObjectReadAccess, PolicyTemplate, ProvisionOutcome, ensure_bucket};

    use crate::{cleanup_bucket, s3_client, store, test_bucket_name};

    fn template(bucket: &str, object_read: ObjectReadAccess) -> PolicyTemplate {
        PolicyTemplate {
            bucket: bucket.to_owned(),
            project_id: "1234".to_owned(),
            access_key: "minioadmin".to_owned(),
            object_read,
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_provision_bucket_idempotently() {
        let client = s3_client();
        let store = store();
        let bucket = test_bucket_name("provision");
        let template = template(&bucket, ObjectReadAccess::Deny);

        let first = ensure_bucket(&store, "us-east-1", &template)
            .await
            .expect("first provision");
        assert_eq!(first, ProvisionOutcome::Created);

        let second = ensure_bucket(&store, "us-east-1", &template)
            .await
            .expect("second provision");
        assert!(
            matches!(second, ProvisionOutcome::Existed { .. }),
            "second call must report existence"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_attach_policy_with_deny_object_read() {
        let client = s3_client();
        let store = store();
        let bucket = test_bucket_name("policy");

        ensure_bucket(&store, "us-east-1", &template(&bucket, ObjectReadAccess::Deny))
            .await
            .expect("provision");

        let resp = client
            .get_bucket_policy()
            .bucket(&bucket)
            .send()
            .await
            .expect("get_bucket_policy");
        let doc: serde_json::Value =
            serde_json::from_str(resp.policy().expect("policy attached")).expect("valid JSON");

        let statements = doc["Statement"].as_array().expect("statements");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0]["Effect"], "Allow");
        assert_eq!(statements[1]["Effect"], "Deny");
        assert_eq!(statements[1]["Action"], serde_json::json!(["s3:GetObject"]));

        cleanup_bucket(&client, &bucket).await;
    }
}
