//! Bucket access policy template.
//!
//! The deployment this tool replaces attached a policy that allows the
//! project user to list the bucket and fetch its location while *denying*
//! that same user `s3:GetObject`. Whether the deny was intended cannot be
//! determined from the document alone, so the object-read effect is a named
//! template parameter rather than a baked-in constant: the operator picks
//! [`ObjectReadAccess::Deny`] (the historical behavior, the default) or
//! [`ObjectReadAccess::Allow`].

use serde::Serialize;

/// Policy language version understood by S3-compatible stores.
const POLICY_VERSION: &str = "2012-10-17";

/// Effect applied to the `s3:GetObject` statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectReadAccess {
    /// The principal may list the bucket but not read objects.
    #[default]
    Deny,
    /// The principal may list the bucket and read objects.
    Allow,
}

impl ObjectReadAccess {
    fn effect(self) -> &'static str {
        match self {
            Self::Deny => "Deny",
            Self::Allow => "Allow",
        }
    }
}

impl std::str::FromStr for ObjectReadAccess {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deny" => Ok(Self::Deny),
            "allow" => Ok(Self::Allow),
            other => Err(format!("expected \"allow\" or \"deny\", got {other:?}")),
        }
    }
}

/// Parameters for rendering a bucket policy document.
#[derive(Debug, Clone)]
pub struct PolicyTemplate {
    /// Bucket the policy applies to.
    pub bucket: String,
    /// Project identifier used to build the principal ARN.
    pub project_id: String,
    /// Access key of the principal the policy targets.
    pub access_key: String,
    /// Effect for the object-read statement.
    pub object_read: ObjectReadAccess,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument {
    version: &'static str,
    statement: Vec<Statement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Statement {
    sid: &'static str,
    effect: &'static str,
    principal: Principal,
    action: Vec<&'static str>,
    resource: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Principal {
    #[serde(rename = "AWS")]
    aws: String,
}

impl PolicyTemplate {
    fn principal(&self) -> Principal {
        Principal {
            aws: format!("arn:aws:iam:::user/p{}:{}", self.project_id, self.access_key),
        }
    }

    /// Render the policy as the JSON document the store expects.
    ///
    /// Two statements: an Allow for `s3:GetBucketLocation` / `s3:ListBucket`
    /// on the bucket, and an `s3:GetObject` statement on every key whose
    /// effect follows [`PolicyTemplate::object_read`].
    #[must_use]
    pub fn render(&self) -> String {
        let document = PolicyDocument {
            version: POLICY_VERSION,
            statement: vec![
                Statement {
                    sid: "allow-user-to-access-to-bucket",
                    effect: "Allow",
                    principal: self.principal(),
                    action: vec!["s3:GetBucketLocation", "s3:ListBucket"],
                    resource: vec![format!("arn:aws:s3:::{}", self.bucket)],
                },
                Statement {
                    sid: "allow-user-to-read-objects",
                    effect: self.object_read.effect(),
                    principal: self.principal(),
                    action: vec!["s3:GetObject"],
                    resource: vec![format!("arn:aws:s3:::{}/*", self.bucket)],
                },
            ],
        };

        serde_json::to_string(&document).expect("policy document serializes to JSON")
    }
}
