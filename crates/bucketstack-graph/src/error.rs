//! Build-time error types.
//!
//! Every variant of [`GraphError`] is fatal to the build that raised it: the
//! builder returns the error instead of a partially constructed graph.

/// Consistency errors detected while constructing the resource graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A lifecycle rule is missing a required key or carries a mistyped value.
    #[error("malformed lifecycle rule at index {index}: missing or invalid `{field}`")]
    MalformedLifecycleRule {
        /// Position of the offending rule in the spec's rule list.
        index: usize,
        /// The key that is missing or of the wrong type.
        field: &'static str,
    },

    /// Two lifecycle rules share an id. Covers collisions among user-supplied
    /// rules and collisions between a user rule and a synthesized one.
    #[error("duplicate lifecycle rule id: {id}")]
    DuplicateLifecycleRuleId {
        /// The id appearing more than once.
        id: String,
    },

    /// Two replication rules share a name.
    #[error("duplicate replication rule name: {rule_name}")]
    DuplicateReplicationRule {
        /// The rule name appearing more than once.
        rule_name: String,
    },

    /// A replication rule's destination aliases the source bucket.
    #[error("replication rule `{rule_name}` targets its own source bucket: {bucket}")]
    ReplicationDestinationIsSource {
        /// The offending rule.
        rule_name: String,
        /// The bucket identifier used as both source and destination.
        bucket: String,
    },

    /// Two nodes resolved to the same address.
    #[error("duplicate resource address: {address}")]
    DuplicateResourceAddress {
        /// The Terraform address claimed twice.
        address: String,
    },

    /// A policy document failed to serialize.
    #[error("policy document serialization failed: {0}")]
    PolicySerialization(#[from] serde_json::Error),
}

/// Convenience result type for graph construction.
pub type BuildResult<T> = Result<T, GraphError>;
