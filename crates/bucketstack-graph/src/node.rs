//! Resource nodes and references between them.

use serde_json::{Map, Value};

use crate::kind::ResourceKind;

// ---------------------------------------------------------------------------
// NodeRef
// ---------------------------------------------------------------------------

/// Address of a resource node: its kind plus its deterministic id.
///
/// A `NodeRef` does not have to point into the graph being built; detached
/// refs are how interpolation strings for externally managed resources (e.g.
/// a replication destination bucket) are produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    kind: ResourceKind,
    id: String,
}

impl NodeRef {
    /// Create a reference from a kind and an id.
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// The kind of the referenced node.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The id of the referenced node.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Terraform address of the node, e.g. `aws_s3_bucket.test-s3` or
    /// `data.aws_sqs_queue.events-sqs-ds`.
    #[must_use]
    pub fn address(&self) -> String {
        if self.kind.is_data_source() {
            format!("data.{}.{}", self.kind.terraform_type(), self.id)
        } else {
            format!("{}.{}", self.kind.terraform_type(), self.id)
        }
    }

    /// Interpolation reference to one of the node's attributes, e.g.
    /// `${aws_s3_bucket.test-s3.arn}`.
    #[must_use]
    pub fn attr_ref(&self, attr: &str) -> String {
        format!("${{{}.{attr}}}", self.address())
    }
}

// ---------------------------------------------------------------------------
// ResourceNode
// ---------------------------------------------------------------------------

/// One declared resource: kind, deterministic id, attribute map, and the
/// in-graph nodes it depends on.
///
/// Attributes live in a sorted map so the node serializes identically on
/// every build. Dependencies list in-graph nodes only; references to
/// resources outside the graph stay interpolation strings inside attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    kind: ResourceKind,
    id: String,
    attributes: Map<String, Value>,
    depends_on: Vec<NodeRef>,
}

impl ResourceNode {
    /// Create a node with no attributes and no dependencies.
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            attributes: Map::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set one attribute.
    #[must_use]
    pub fn attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }

    /// Merge a whole attribute map into the node.
    #[must_use]
    pub fn attrs(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Record a dependency on another in-graph node.
    #[must_use]
    pub fn depends_on(mut self, node: &NodeRef) -> Self {
        self.depends_on.push(node.clone());
        self
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The node's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node's attribute map.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// The nodes this node depends on, in recording order.
    #[must_use]
    pub fn dependencies(&self) -> &[NodeRef] {
        &self.depends_on
    }

    /// A reference addressing this node.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.kind, self.id.clone())
    }
}
