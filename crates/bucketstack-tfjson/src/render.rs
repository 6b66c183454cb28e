//! Graph to Terraform JSON document rendering.

use std::collections::BTreeMap;

use bucketstack_graph::{Output, ResourceGraph, ResourceNode};
use bucketstack_model::AppInput;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RenderError;

/// AWS profile the backend uses to reach the shared state bucket.
const STATE_PROFILE: &str = "external-resources-state";

/// Render the complete Terraform JSON document for one build.
#[must_use]
pub fn render(input: &AppInput, graph: &ResourceGraph) -> Value {
    let mut document = Map::new();
    document.insert("terraform".to_owned(), backend_block(input));
    document.insert("provider".to_owned(), provider_block(input));

    let mut resources: BTreeMap<&str, Map<String, Value>> = BTreeMap::new();
    let mut data_sources: BTreeMap<&str, Map<String, Value>> = BTreeMap::new();
    for node in graph.nodes() {
        let target = if node.kind().is_data_source() {
            &mut data_sources
        } else {
            &mut resources
        };
        target
            .entry(node.kind().terraform_type())
            .or_default()
            .insert(node.id().to_owned(), render_node(node));
    }
    if !resources.is_empty() {
        document.insert("resource".to_owned(), type_block(resources));
    }
    if !data_sources.is_empty() {
        document.insert("data".to_owned(), type_block(data_sources));
    }

    if !graph.outputs().is_empty() {
        let outputs = graph
            .outputs()
            .iter()
            .map(|output| (output.name().to_owned(), render_output(output)))
            .collect();
        document.insert("output".to_owned(), Value::Object(outputs));
    }

    debug!(
        resources = graph.len(),
        outputs = graph.outputs().len(),
        "rendered document"
    );
    Value::Object(document)
}

/// Render to the pretty-printed JSON string handed to the backend.
pub fn render_json(input: &AppInput, graph: &ResourceGraph) -> Result<String, RenderError> {
    let document = render(input, graph);
    Ok(serde_json::to_string_pretty(&document)?)
}

fn backend_block(input: &AppInput) -> Value {
    let state = &input.provision.module_provision_data;
    serde_json::json!({
        "backend": {
            "s3": {
                "bucket": state.tf_state_bucket,
                "key": state.tf_state_key,
                "region": state.tf_state_region,
                "dynamodb_table": state.tf_state_dynamodb_table,
                "encrypt": true,
                "profile": STATE_PROFILE,
            }
        }
    })
}

fn provider_block(input: &AppInput) -> Value {
    let mut provider = Map::new();
    provider.insert("region".to_owned(), Value::from(input.data.region.as_str()));
    if !input.data.default_tags.is_empty() {
        provider.insert(
            "default_tags".to_owned(),
            Value::Array(input.data.default_tags.clone()),
        );
    }
    serde_json::json!({"aws": [provider]})
}

fn type_block(groups: BTreeMap<&str, Map<String, Value>>) -> Value {
    Value::Object(
        groups
            .into_iter()
            .map(|(tf_type, nodes)| (tf_type.to_owned(), Value::Object(nodes)))
            .collect(),
    )
}

fn render_node(node: &ResourceNode) -> Value {
    let mut attributes = node.attributes().clone();
    if !node.dependencies().is_empty() {
        let addresses = node
            .dependencies()
            .iter()
            .map(|dependency| Value::from(dependency.address()))
            .collect();
        attributes.insert("depends_on".to_owned(), Value::Array(addresses));
    }
    Value::Object(attributes)
}

fn render_output(output: &Output) -> Value {
    let mut block = Map::new();
    block.insert("value".to_owned(), output.value().clone());
    if output.is_sensitive() {
        block.insert("sensitive".to_owned(), Value::Bool(true));
    }
    Value::Object(block)
}
