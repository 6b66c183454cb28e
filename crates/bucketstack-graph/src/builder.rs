//! The resource graph builder.
//!
//! Assembles the graph in a fixed step order: bucket root, ownership
//! controls, ACL, logging, encryption, lifecycle rules, versioning, storage
//! class, CORS, replication, notifications, bucket policy, IAM credentials,
//! website, request payer, outputs. Each step is independently gated on the
//! spec; the order itself never changes, because later nodes depend on
//! earlier ones.

use std::collections::BTreeSet;

use bucketstack_model::BucketSpec;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{BuildResult, GraphError};
use crate::graph::ResourceGraph;
use crate::kind::ResourceKind;
use crate::node::{NodeRef, ResourceNode};
use crate::{notification, outputs, policy, replication};

/// Build the resource graph for one bucket specification.
///
/// Pure and deterministic: the spec is never mutated (rule maps are cloned
/// before normalization), and an unchanged spec yields an identical graph.
/// Any consistency error aborts the whole build; a partial graph is never
/// returned.
pub fn build(spec: &BucketSpec) -> BuildResult<ResourceGraph> {
    info!(bucket = %spec.identifier, "building resource graph");
    let mut graph = ResourceGraph::new();

    let bucket = push_bucket(&mut graph, spec)?;
    let ownership = push_ownership_controls(&mut graph, &bucket)?;
    push_acl(&mut graph, &bucket, &ownership)?;
    push_logging(&mut graph, spec, &bucket)?;
    push_encryption(&mut graph, spec, &bucket)?;
    let rule_ids = push_lifecycle_rules(&mut graph, spec, &bucket)?;
    push_versioning(&mut graph, spec, &bucket, &rule_ids)?;
    push_storage_class(&mut graph, spec, &bucket, &rule_ids)?;
    push_cors(&mut graph, spec, &bucket)?;
    replication::configure(&mut graph, spec, &bucket)?;
    notification::configure(&mut graph, spec, &bucket)?;
    push_bucket_policy(&mut graph, spec, &bucket)?;
    let access_key = push_iam_credentials(&mut graph, spec, &bucket)?;
    push_website(&mut graph, spec, &bucket)?;
    push_request_payer(&mut graph, spec, &bucket)?;
    outputs::emit(&mut graph, spec, &access_key);

    debug!(
        nodes = graph.len(),
        outputs = graph.outputs().len(),
        "resource graph complete"
    );
    Ok(graph)
}

// ---------------------------------------------------------------------------
// Builder steps
// ---------------------------------------------------------------------------

fn push_bucket(graph: &mut ResourceGraph, spec: &BucketSpec) -> BuildResult<NodeRef> {
    let node = ResourceNode::new(ResourceKind::Bucket, spec.identifier.clone())
        .attrs(spec.passthrough_attributes());
    graph.push(node)
}

fn push_ownership_controls(graph: &mut ResourceGraph, bucket: &NodeRef) -> BuildResult<NodeRef> {
    let node = ResourceNode::new(
        ResourceKind::BucketOwnershipControls,
        "bucket_ownership_controls",
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr(
        "rule",
        serde_json::json!({"object_ownership": "BucketOwnerPreferred"}),
    )
    .depends_on(bucket);
    graph.push(node)
}

fn push_acl(graph: &mut ResourceGraph, bucket: &NodeRef, ownership: &NodeRef) -> BuildResult<()> {
    // Ownership controls supersede the legacy ACL input: the ACL resource is
    // always private, whatever the spec carries.
    let node = ResourceNode::new(ResourceKind::BucketAcl, "bucket_acl")
        .attr("bucket", bucket.attr_ref("id"))
        .attr("acl", "private")
        .depends_on(bucket)
        .depends_on(ownership);
    graph.push(node)?;
    Ok(())
}

fn push_logging(graph: &mut ResourceGraph, spec: &BucketSpec, bucket: &NodeRef) -> BuildResult<()> {
    let Some(logging) = &spec.s3_bucket_logging else {
        return Ok(());
    };
    // The target bucket is managed elsewhere; it is referenced by address
    // without becoming a graph dependency.
    let target = NodeRef::new(ResourceKind::Bucket, logging.identifier.clone());
    let node = ResourceNode::new(
        ResourceKind::BucketLogging,
        format!("{}-logging", spec.identifier),
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr("target_bucket", target.attr_ref("id"))
    .attr("target_prefix", logging.target_prefix.clone())
    .depends_on(bucket);
    graph.push(node)?;
    debug!(target = %logging.identifier, "configured access logging");
    Ok(())
}

fn push_encryption(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<()> {
    let node = ResourceNode::new(ResourceKind::BucketServerSideEncryption, "s3ss_enc_conf")
        .attr("bucket", bucket.attr_ref("id"))
        .attr(
            "rule",
            Value::Array(vec![spec.server_side_encryption_configuration.rule.clone()]),
        )
        .depends_on(bucket);
    graph.push(node)?;
    Ok(())
}

fn push_lifecycle_rules(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<BTreeSet<String>> {
    let mut seen = BTreeSet::new();
    for (index, rule) in spec.lifecycle_rules.iter().enumerate() {
        let (id, normalized) = normalize_lifecycle_rule(rule, index)?;
        if !seen.insert(id.clone()) {
            return Err(GraphError::DuplicateLifecycleRuleId { id });
        }
        let node = ResourceNode::new(ResourceKind::BucketLifecycleConfiguration, id)
            .attr("bucket", bucket.attr_ref("id"))
            .attr("rule", Value::Array(vec![Value::Object(normalized)]))
            .depends_on(bucket);
        graph.push(node)?;
    }
    Ok(seen)
}

/// Clone the rule and replace its `enabled` flag with the `status` string
/// the provisioning backend expects. The rule id doubles as the node id.
fn normalize_lifecycle_rule(
    rule: &Map<String, Value>,
    index: usize,
) -> BuildResult<(String, Map<String, Value>)> {
    let mut normalized = rule.clone();
    let id = match normalized.get("id") {
        Some(Value::String(id)) => id.clone(),
        _ => return Err(GraphError::MalformedLifecycleRule { index, field: "id" }),
    };
    let enabled = match normalized.remove("enabled") {
        Some(Value::Bool(enabled)) => enabled,
        _ => {
            return Err(GraphError::MalformedLifecycleRule {
                index,
                field: "enabled",
            });
        }
    };
    let status = if enabled { "Enabled" } else { "Disabled" };
    normalized.insert("status".to_owned(), Value::String(status.to_owned()));
    Ok((id, normalized))
}

fn push_versioning(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
    user_rule_ids: &BTreeSet<String>,
) -> BuildResult<()> {
    if !spec.versioning {
        return Ok(());
    }
    let node = ResourceNode::new(ResourceKind::BucketVersioning, "bucket_versioning")
        .attr("bucket", bucket.attr_ref("id"))
        .attr(
            "versioning_configuration",
            serde_json::json!({"status": "Enabled"}),
        )
        .depends_on(bucket);
    graph.push(node)?;

    // The default expiration rule would conflict with a caller-managed one,
    // so it is only synthesized when no user rule touches noncurrent
    // expiration.
    if has_noncurrent_expiration_rule(spec) {
        return Ok(());
    }
    let rule_id = "expire_noncurrent_versions";
    if user_rule_ids.contains(rule_id) {
        return Err(GraphError::DuplicateLifecycleRuleId {
            id: rule_id.to_owned(),
        });
    }
    let node = ResourceNode::new(
        ResourceKind::BucketLifecycleConfiguration,
        "noncurrent_version_expiration_lifecycle_rule",
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr(
        "rule",
        serde_json::json!([{
            "id": rule_id,
            "status": "Enabled",
            "noncurrent_version_expiration": {"noncurrent_days": 30},
        }]),
    )
    .depends_on(bucket);
    graph.push(node)?;
    debug!("synthesized noncurrent version expiration rule");
    Ok(())
}

/// Whether any caller-supplied rule already manages noncurrent expiration.
fn has_noncurrent_expiration_rule(spec: &BucketSpec) -> bool {
    spec.lifecycle_rules
        .iter()
        .any(|rule| rule.contains_key("noncurrent_version_expiration"))
}

fn push_storage_class(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
    user_rule_ids: &BTreeSet<String>,
) -> BuildResult<()> {
    let Some(class) = spec.storage_class else {
        return Ok(());
    };
    let rule_id = format!("{class}_storage_class");
    if user_rule_ids.contains(&rule_id) {
        return Err(GraphError::DuplicateLifecycleRuleId { id: rule_id });
    }
    let node = ResourceNode::new(
        ResourceKind::BucketLifecycleConfiguration,
        "storage_class_lifecycle_rule",
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr(
        "rule",
        serde_json::json!([{
            "id": rule_id,
            "status": "Enabled",
            "noncurrent_version_transition": [{
                "noncurrent_days": class.minimum_transition_days(),
                "storage_class": class.as_str(),
            }],
        }]),
    )
    .depends_on(bucket);
    graph.push(node)?;
    debug!(storage_class = %class, "synthesized storage class transition rule");
    Ok(())
}

fn push_cors(graph: &mut ResourceGraph, spec: &BucketSpec, bucket: &NodeRef) -> BuildResult<()> {
    if spec.cors_rules.is_empty() {
        return Ok(());
    }
    let node = ResourceNode::new(ResourceKind::BucketCorsConfiguration, "bucket_cors_config")
        .attr("bucket", bucket.attr_ref("id"))
        .attr("cors_rule", Value::Array(spec.cors_rules.clone()))
        .depends_on(bucket);
    graph.push(node)?;
    Ok(())
}

fn push_bucket_policy(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<()> {
    let Some(document) = &spec.bucket_policy else {
        return Ok(());
    };
    let node = ResourceNode::new(
        ResourceKind::BucketPolicy,
        format!("{}-bucket_policy", spec.identifier),
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr("policy", document.clone())
    .depends_on(bucket);
    graph.push(node)?;
    Ok(())
}

/// Every bucket ships with a dedicated programmatic credential pair: user,
/// access key, access policy, and the attachment binding them.
fn push_iam_credentials(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<NodeRef> {
    let user = graph.push(
        ResourceNode::new(ResourceKind::IamUser, format!("{}_user", spec.identifier))
            .attr("name", spec.identifier.clone())
            .depends_on(bucket),
    )?;
    let access_key = graph.push(
        ResourceNode::new(
            ResourceKind::IamAccessKey,
            format!("{}_iam_key", spec.identifier),
        )
        .attr("user", user.attr_ref("id"))
        .depends_on(&user),
    )?;

    let document =
        policy::bucket_access_policy(&bucket.attr_ref("arn"), spec.acl, spec.allow_object_tagging);
    let iam_policy = graph.push(
        ResourceNode::new(
            ResourceKind::IamPolicy,
            format!("{}iam_policy", spec.identifier),
        )
        .attr("policy", document.to_json()?)
        .depends_on(bucket),
    )?;
    graph.push(
        ResourceNode::new(
            ResourceKind::IamUserPolicyAttachment,
            format!("{}iam_policy_attachment", spec.identifier),
        )
        .attr("user", user.attr_ref("name"))
        .attr("policy_arn", iam_policy.attr_ref("arn"))
        .depends_on(&user)
        .depends_on(&iam_policy),
    )?;
    Ok(access_key)
}

fn push_website(graph: &mut ResourceGraph, spec: &BucketSpec, bucket: &NodeRef) -> BuildResult<()> {
    let Some(website) = &spec.website else {
        return Ok(());
    };
    let node = ResourceNode::new(
        ResourceKind::BucketWebsiteConfiguration,
        format!("{}-website-conf", spec.identifier),
    )
    .attrs(website.clone())
    .attr("bucket", bucket.attr_ref("id"))
    .depends_on(bucket);
    graph.push(node)?;
    Ok(())
}

fn push_request_payer(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<()> {
    let Some(payer) = spec.request_payer else {
        return Ok(());
    };
    let node = ResourceNode::new(
        ResourceKind::BucketRequestPaymentConfiguration,
        format!("{}-request-payer", spec.identifier),
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr("payer", payer.as_str())
    .depends_on(bucket);
    graph.push(node)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
