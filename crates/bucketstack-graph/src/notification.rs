//! Event notification aggregation.
//!
//! The provisioning backend forbids more than one notification resource per
//! bucket, so every entry is folded into a single aggregate node with one
//! list per destination type. Bare destination names are resolved through
//! by-name lookup nodes; raw ARNs pass through untouched.

use bucketstack_model::{BucketSpec, Destination, DestinationType, EventNotification};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::BuildResult;
use crate::graph::ResourceGraph;
use crate::kind::ResourceKind;
use crate::node::{NodeRef, ResourceNode};

/// Append the lookup nodes and the aggregate notification node.
pub(crate) fn configure(
    graph: &mut ResourceGraph,
    spec: &BucketSpec,
    bucket: &NodeRef,
) -> BuildResult<()> {
    if spec.event_notifications.is_empty() {
        return Ok(());
    }

    let mut queue = Vec::new();
    let mut topic = Vec::new();
    let mut lookups = Vec::new();
    for notification in &spec.event_notifications {
        let arn = resolve_arn(graph, notification, &mut lookups)?;
        match notification.destination_type {
            DestinationType::Sqs => queue.push(entry(notification, "queue_arn", arn)),
            DestinationType::Sns => topic.push(entry(notification, "topic_arn", arn)),
        }
    }
    debug!(
        queues = queue.len(),
        topics = topic.len(),
        "configured event notifications"
    );

    let mut node = ResourceNode::new(
        ResourceKind::BucketNotification,
        format!("{}-event-notifications", spec.identifier),
    )
    .attr("bucket", bucket.attr_ref("id"))
    .attr("queue", Value::Array(queue))
    .attr("topic", Value::Array(topic))
    .depends_on(bucket);
    for lookup in &lookups {
        node = node.depends_on(lookup);
    }
    graph.push(node)?;
    Ok(())
}

/// Resolve a destination to an ARN value, creating the by-name lookup node
/// on first use. Lookups are shared across entries naming the same resource.
fn resolve_arn(
    graph: &mut ResourceGraph,
    notification: &EventNotification,
    lookups: &mut Vec<NodeRef>,
) -> BuildResult<Value> {
    let name = match notification.destination() {
        Destination::Arn(arn) => return Ok(Value::from(arn)),
        Destination::Name(name) => name,
    };
    let (kind, suffix) = match notification.destination_type {
        DestinationType::Sqs => (ResourceKind::SqsQueueLookup, "sqs-ds"),
        DestinationType::Sns => (ResourceKind::SnsTopicLookup, "sns-ds"),
    };
    let lookup = NodeRef::new(kind, format!("{name}-{suffix}"));
    if !graph.contains(&lookup) {
        let created = graph.push(ResourceNode::new(kind, lookup.id()).attr("name", name))?;
        lookups.push(created);
    }
    Ok(Value::from(lookup.attr_ref("arn")))
}

fn entry(notification: &EventNotification, arn_key: &str, arn: Value) -> Value {
    let mut entry = Map::new();
    entry.insert(
        "events".to_owned(),
        serde_json::json!(notification.event_type),
    );
    entry.insert(arn_key.to_owned(), arn);
    entry.insert(
        "filter_prefix".to_owned(),
        Value::String(notification.filter_prefix.clone()),
    );
    entry.insert(
        "filter_suffix".to_owned(),
        Value::String(notification.filter_suffix.clone()),
    );
    Value::Object(entry)
}
