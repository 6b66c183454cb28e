//! Canonical bucket specification consumed by the graph builder.
//!
//! The spec arrives already validated and normalized by the upstream schema
//! layer: enumerations are checked, booleans coerced, required fields present.
//! Unknown fields are not an error; they are collected into [`BucketSpec::extra`]
//! and passed through verbatim as bucket resource attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

use crate::types::{AwsRegion, CannedAcl, DestinationType, RequestPayer, StorageClass};

// ---------------------------------------------------------------------------
// BucketSpec
// ---------------------------------------------------------------------------

/// Desired state of one bucket and its satellite resources.
///
/// The `identifier` seeds every derived resource name and is never changed
/// after construction.
///
/// # Examples
///
/// ```
/// use bucketstack_model::BucketSpec;
///
/// let spec = BucketSpec::builder()
///     .identifier("test-s3".to_owned())
///     .output_prefix("output_prefix_s3_bucket".to_owned())
///     .build();
/// assert!(spec.versioning);
/// assert_eq!(spec.region.as_str(), "us-east-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct BucketSpec {
    /// Globally unique bucket name. Seeds every derived resource id.
    pub identifier: String,

    /// Prefix for every emitted output name.
    pub output_prefix: String,

    /// Region the bucket lives in.
    #[serde(default)]
    #[builder(default)]
    pub region: AwsRegion,

    /// Ordered tag-sets forwarded to the provider configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub default_tags: Vec<Value>,

    /// Server-side encryption rule. Defaults to a single AES256 rule.
    #[serde(default)]
    #[builder(default)]
    pub server_side_encryption_configuration: SseConfiguration,

    /// Whether object versioning is enabled. Defaults to true.
    #[serde(default = "default_versioning")]
    #[builder(default = true)]
    pub versioning: bool,

    /// Storage class noncurrent versions transition into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub storage_class: Option<StorageClass>,

    /// Legacy canned ACL attribute. Only widens the issued IAM policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub acl: Option<CannedAcl>,

    /// Whether the issued credentials may tag and untag objects.
    #[serde(default)]
    #[builder(default)]
    pub allow_object_tagging: bool,

    /// CORS rule objects, forwarded verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub cors_rules: Vec<Value>,

    /// Lifecycle rule objects. Each must carry a string `id` and a boolean
    /// `enabled`; everything else is opaque to this system.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub lifecycle_rules: Vec<Map<String, Value>>,

    /// Access-log delivery target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub s3_bucket_logging: Option<LoggingTarget>,

    /// Static website configuration, forwarded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub website: Option<Map<String, Value>>,

    /// Who pays for requests and data transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub request_payer: Option<RequestPayer>,

    /// Raw bucket policy document (JSON string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub bucket_policy: Option<String>,

    /// Cross-bucket replication rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub replication_configurations: Vec<ReplicationRule>,

    /// Event notification routing rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub event_notifications: Vec<EventNotification>,

    /// Bucket name prefix, forwarded to the bucket resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub bucket_prefix: Option<String>,

    /// Whether a non-empty bucket may be destroyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub force_destroy: Option<bool>,

    /// Whether object lock is enabled on the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub object_lock_enabled: Option<bool>,

    /// Tags applied to the bucket resource itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub tags: Option<Map<String, Value>>,

    /// Unknown fields, passed through to the bucket resource unchanged.
    #[serde(flatten)]
    #[builder(default)]
    pub extra: Map<String, Value>,
}

fn default_versioning() -> bool {
    true
}

impl BucketSpec {
    /// Attribute map for the bucket resource itself: the bucket name plus
    /// every pass-through field that is set, plus the unknown extras.
    #[must_use]
    pub fn passthrough_attributes(&self) -> Map<String, Value> {
        let mut attributes = self.extra.clone();
        attributes.insert("bucket".to_owned(), Value::String(self.identifier.clone()));
        if let Some(prefix) = &self.bucket_prefix {
            attributes.insert("bucket_prefix".to_owned(), Value::String(prefix.clone()));
        }
        if let Some(force_destroy) = self.force_destroy {
            attributes.insert("force_destroy".to_owned(), Value::Bool(force_destroy));
        }
        if let Some(object_lock) = self.object_lock_enabled {
            attributes.insert("object_lock_enabled".to_owned(), Value::Bool(object_lock));
        }
        if let Some(tags) = &self.tags {
            attributes.insert("tags".to_owned(), Value::Object(tags.clone()));
        }
        attributes
    }
}

// ---------------------------------------------------------------------------
// SseConfiguration
// ---------------------------------------------------------------------------

/// Server-side encryption configuration: a single opaque rule object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SseConfiguration {
    /// The encryption rule applied to the bucket.
    pub rule: Value,
}

impl Default for SseConfiguration {
    fn default() -> Self {
        Self {
            rule: serde_json::json!({
                "apply_server_side_encryption_by_default": {"sse_algorithm": "AES256"}
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingTarget
// ---------------------------------------------------------------------------

/// Access-log delivery target: another bucket plus an object key prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingTarget {
    /// Identifier of the bucket receiving the access logs.
    pub identifier: String,

    /// Key prefix for delivered log objects. Defaults to empty.
    #[serde(default)]
    pub target_prefix: String,
}

// ---------------------------------------------------------------------------
// ReplicationRule
// ---------------------------------------------------------------------------

/// One cross-bucket replication target.
///
/// Each rule produces exactly one IAM role + policy + attachment triple,
/// named deterministically from the bucket identifier and the rule name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationRule {
    /// Rule name, unique within the specification.
    pub rule_name: String,

    /// Rule status, forwarded verbatim.
    pub status: String,

    /// Identifier of the destination bucket. Must differ from the source.
    pub destination_bucket_identifier: String,

    /// Storage class replicas are stored in at the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<StorageClass>,
}

// ---------------------------------------------------------------------------
// EventNotification / Destination
// ---------------------------------------------------------------------------

/// One event-routing rule delivering bucket events to a queue or topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNotification {
    /// Destination kind. Each entry routes to exactly one.
    pub destination_type: DestinationType,

    /// Full destination ARN, or a bare resource name to look up at apply time.
    pub destination_identifier: String,

    /// Event types this rule matches (e.g. `s3:ObjectCreated:*`).
    pub event_type: Vec<String>,

    /// Object key prefix filter.
    pub filter_prefix: String,

    /// Object key suffix filter.
    pub filter_suffix: String,
}

impl EventNotification {
    /// How the destination is addressed: a full ARN is used verbatim, a bare
    /// name is resolved through a lookup data source at apply time.
    #[must_use]
    pub fn destination(&self) -> Destination<'_> {
        if self.destination_identifier.starts_with("arn:") {
            Destination::Arn(&self.destination_identifier)
        } else {
            Destination::Name(&self.destination_identifier)
        }
    }

    /// Logical destination name: the trailing segment of an ARN, otherwise
    /// the identifier verbatim.
    #[must_use]
    pub fn resolved_identifier(&self) -> &str {
        match self.destination() {
            Destination::Arn(arn) => match arn.rsplit_once(':') {
                Some((_, name)) => name,
                None => arn,
            },
            Destination::Name(name) => name,
        }
    }
}

/// A notification destination, split into its two addressing cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    /// A full ARN, consumed verbatim. Never triggers a lookup.
    Arn(&'a str),
    /// A bare resource name, resolved through a lookup data source.
    Name(&'a str),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
