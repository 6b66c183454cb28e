//! IAM policy document construction.
//!
//! Builds the three document shapes the graph needs: the replication trust
//! policy, the per-rule replication permission policy, and the bucket access
//! policy attached to the issued IAM user. Documents serialize with
//! lexicographically sorted keys so the emitted JSON is byte-identical on
//! every build.

use bucketstack_model::CannedAcl;
use serde::{Deserialize, Serialize};

use crate::error::BuildResult;

/// Policy language version used by every emitted document.
pub const POLICY_VERSION: &str = "2012-10-17";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

/// A structured access-policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version.
    pub version: String,

    /// Ordered statement list.
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Create a document with the fixed policy version.
    #[must_use]
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement,
        }
    }

    /// Serialize with lexicographically sorted keys.
    ///
    /// Goes through [`serde_json::Value`] (a sorted map) rather than
    /// serializing the struct directly, so key order never depends on field
    /// declaration order.
    pub fn to_json(&self) -> BuildResult<String> {
        let value = serde_json::to_value(self)?;
        Ok(value.to_string())
    }
}

/// One statement within a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// Statement id. Serialized even when empty; omitted only when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Whether the statement allows or denies the listed actions.
    pub effect: Effect,

    /// Principal the statement applies to (trust policies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,

    /// Action or action list.
    pub action: OneOrMany,

    /// Resource or resource list the actions apply to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<OneOrMany>,
}

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The statement grants the listed actions.
    Allow,
    /// The statement denies the listed actions.
    Deny,
}

/// A service principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    /// The service allowed to act, e.g. `s3.amazonaws.com`.
    pub service: String,
}

/// A policy element that is either a single string or a list of strings.
///
/// IAM accepts both spellings; which one a document uses is part of its
/// byte-level shape, so the distinction is kept explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single value.
    One(String),
    /// A list of values.
    Many(Vec<String>),
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

// ---------------------------------------------------------------------------
// Document generators
// ---------------------------------------------------------------------------

/// Trust policy allowing the storage service to assume a replication role.
#[must_use]
pub fn assume_role_policy() -> PolicyDocument {
    PolicyDocument::new(vec![PolicyStatement {
        sid: Some(String::new()),
        effect: Effect::Allow,
        principal: Some(Principal {
            service: "s3.amazonaws.com".to_owned(),
        }),
        action: "sts:AssumeRole".into(),
        resource: None,
    }])
}

/// Permission policy for one replication rule.
///
/// `source_arn` and `destination_arn` are interpolation references to the
/// two bucket ARNs; the destination is never resolved to a literal ARN here.
#[must_use]
pub fn replication_permissions(source_arn: &str, destination_arn: &str) -> PolicyDocument {
    PolicyDocument::new(vec![
        PolicyStatement {
            sid: None,
            effect: Effect::Allow,
            principal: None,
            action: vec![
                "s3:GetReplicationConfiguration".to_owned(),
                "s3:ListBucket".to_owned(),
            ]
            .into(),
            resource: Some(vec![source_arn.to_owned(), destination_arn.to_owned()].into()),
        },
        PolicyStatement {
            sid: None,
            effect: Effect::Allow,
            principal: None,
            action: vec![
                "s3:GetObjectVersion".to_owned(),
                "s3:GetObjectVersionAcl".to_owned(),
            ]
            .into(),
            resource: Some(vec![format!("{source_arn}/*")].into()),
        },
        PolicyStatement {
            sid: None,
            effect: Effect::Allow,
            principal: None,
            action: vec![
                "s3:ReplicateObject".to_owned(),
                "s3:ReplicateDelete".to_owned(),
            ]
            .into(),
            resource: Some(format!("{destination_arn}/*").into()),
        },
    ])
}

/// Access policy for the IAM user issued alongside the bucket.
///
/// Grants list access on the bucket and object access under it; object ACL
/// writes and object tagging are added only when the spec asks for them.
#[must_use]
pub fn bucket_access_policy(
    bucket_arn: &str,
    acl: Option<CannedAcl>,
    allow_object_tagging: bool,
) -> PolicyDocument {
    let mut object_actions = vec!["s3:*Object".to_owned()];
    if acl == Some(CannedAcl::PublicRead) {
        object_actions.push("s3:PutObjectAcl".to_owned());
    }
    if allow_object_tagging {
        object_actions.push("s3:*ObjectTagging".to_owned());
    }

    PolicyDocument::new(vec![
        PolicyStatement {
            sid: Some("ListObjectsInBucket".to_owned()),
            effect: Effect::Allow,
            principal: None,
            action: vec!["s3:ListBucket".to_owned(), "s3:PutBucketCORS".to_owned()].into(),
            resource: Some(bucket_arn.into()),
        },
        PolicyStatement {
            sid: Some("AllObjectActions".to_owned()),
            effect: Effect::Allow,
            principal: None,
            action: object_actions.into(),
            resource: Some(format!("{bucket_arn}/*").into()),
        },
    ])
}
