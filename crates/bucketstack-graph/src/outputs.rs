//! Named output bindings.
//!
//! Output names are `<output_prefix>` plus a fixed suffix per field. The
//! suffixes are consumed by downstream secret syncing and must stay stable.

use bucketstack_model::BucketSpec;
use serde_json::Value;

use crate::graph::{Output, ResourceGraph};
use crate::node::NodeRef;

/// Emit the output set for one bucket: identifier, region, endpoint, and the
/// credential pair issued for it.
pub(crate) fn emit(graph: &mut ResourceGraph, spec: &BucketSpec, access_key: &NodeRef) {
    let prefix = &spec.output_prefix;
    graph.push_output(Output::new(
        format!("{prefix}__bucket"),
        Value::from(spec.identifier.clone()),
    ));
    graph.push_output(Output::new(
        format!("{prefix}__aws_region"),
        Value::from(spec.region.as_str()),
    ));
    graph.push_output(Output::new(
        format!("{prefix}__endpoint"),
        Value::from(spec.region.s3_endpoint()),
    ));
    graph.push_output(Output::sensitive(
        format!("{prefix}__aws_access_key_id"),
        Value::from(access_key.attr_ref("id")),
    ));
    graph.push_output(Output::sensitive(
        format!("{prefix}__aws_secret_access_key"),
        Value::from(access_key.attr_ref("secret")),
    ));
}
