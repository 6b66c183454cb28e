//! Replication IAM wiring.
//!
//! Each replication rule fans out into an independent three-node subgraph:
//! an IAM role the storage service may assume, a permission policy scoped to
//! the source and destination buckets, and the attachment binding the two.

use std::collections::BTreeSet;

use bucketstack_model::{BucketSpec, ReplicationRule};
use tracing::debug;

use crate::error::{BuildResult, GraphError};
use crate::graph::ResourceGraph;
use crate::kind::ResourceKind;
use crate::node::{NodeRef, ResourceNode};
use crate::policy;

/// Append the IAM role, policy, and attachment for every replication rule.
///
/// Rule names must be unique and no rule may target the source bucket
/// itself; either inconsistency aborts the build.
pub(crate) fn configure(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<()> {
    let mut seen = BTreeSet::new();
    for rule in &spec.replication_configurations {
        if !seen.insert(rule.rule_name.as_str()) {
            return Err(GraphError::DuplicateReplicationRule {
                rule_name: rule.rule_name.clone(),
            });
        }
        if rule.destination_bucket_identifier == spec.identifier {
            return Err(GraphError::ReplicationDestinationIsSource {
                rule_name: rule.rule_name.clone(),
                bucket: spec.identifier.clone(),
            });
        }
        configure_rule(graph, spec, bucket, rule)?;
    }
    Ok(())
}

/// One rule, one subgraph. The three nodes share the `<bucket>_<rule>` id;
/// their kinds keep the addresses distinct.
fn configure_rule(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
    rule: &ReplicationRule,
) -> BuildResult<()> {
    let id = format!("{}_{}", spec.identifier, rule.rule_name);
    debug!(rule = %rule.rule_name, destination = %rule.destination_bucket_identifier, "configuring replication rule");

    let role = graph.push(
        ResourceNode::new(ResourceKind::IamRole, id.clone())
            .attr("name", format!("{}_iam_role", rule.rule_name))
            .attr("assume_role_policy", policy::assume_role_policy().to_json()?)
            .depends_on(bucket),
    )?;

    // The destination bucket lives in another specification; reference it by
    // address only, without a graph edge.
    let destination = NodeRef::new(
        ResourceKind::Bucket,
        rule.destination_bucket_identifier.clone(),
    );
    let document =
        policy::replication_permissions(&bucket.attr_ref("arn"), &destination.attr_ref("arn"));
    let iam_policy = graph.push(
        ResourceNode::new(ResourceKind::IamPolicy, id.clone())
            .attr("name", format!("{}_iam_policy", rule.rule_name))
            .attr("policy", document.to_json()?)
            .depends_on(bucket),
    )?;

    graph.push(
        ResourceNode::new(ResourceKind::IamRolePolicyAttachment, id)
            .attr("role", role.attr_ref("name"))
            .attr("policy_arn", iam_policy.attr_ref("arn"))
            .depends_on(&role)
            .depends_on(&iam_policy),
    )?;
    Ok(())
}
