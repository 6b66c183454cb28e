//! The resource graph accumulator.

use serde_json::Value;

use crate::error::{BuildResult, GraphError};
use crate::node::{NodeRef, ResourceNode};

// ---------------------------------------------------------------------------
// ResourceGraph
// ---------------------------------------------------------------------------

/// Insertion-ordered collection of resource nodes plus named outputs.
///
/// Owned exclusively by the builder for the duration of one build, then
/// handed immutably to the serialization layer. [`ResourceGraph::push`]
/// rejects a second node with an already-claimed address, so node addresses
/// are unique by construction.
#[derive(Debug, Default, PartialEq)]
pub struct ResourceGraph {
    nodes: Vec<ResourceNode>,
    outputs: Vec<Output>,
}

impl ResourceGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, returning a reference addressing it.
    ///
    /// Fails when a node with the same kind and id is already present.
    pub fn push(&mut self, node: ResourceNode) -> BuildResult<NodeRef> {
        let node_ref = node.node_ref();
        if self.contains(&node_ref) {
            return Err(GraphError::DuplicateResourceAddress {
                address: node_ref.address(),
            });
        }
        self.nodes.push(node);
        Ok(node_ref)
    }

    /// Append a named output binding.
    pub fn push_output(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Whether a node with the given address is present.
    #[must_use]
    pub fn contains(&self, node_ref: &NodeRef) -> bool {
        self.nodes
            .iter()
            .any(|node| node.kind() == node_ref.kind() && node.id() == node_ref.id())
    }

    /// The nodes in emission order.
    #[must_use]
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// The outputs in emission order.
    #[must_use]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One named output binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    name: String,
    value: Value,
    sensitive: bool,
}

impl Output {
    /// Create a non-sensitive output.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            sensitive: false,
        }
    }

    /// Create a sensitive output (masked by the provisioning backend).
    #[must_use]
    pub fn sensitive(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            sensitive: true,
        }
    }

    /// The output name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the output is sensitive.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }
}
