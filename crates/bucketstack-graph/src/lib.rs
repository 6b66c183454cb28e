//! Resource graph construction for bucketstack.
//!
//! Given a validated [`BucketSpec`](bucketstack_model::BucketSpec), [`build`]
//! decides which resources must exist, how they reference each other, and in
//! what order dependent resources must be declared, and returns the finished
//! [`ResourceGraph`]. The build is a pure in-memory transform: deterministic,
//! synchronous, and all-or-nothing (a consistency error aborts the whole
//! build; partial graphs are never returned).
//!
//! # Architecture
//!
//! ```text
//! BucketSpec (bucketstack-model)
//!        |
//!        v
//!    build() — fixed-order builder steps
//!        |
//!        +-- policy        (IAM policy documents)
//!        +-- replication   (role/policy/attachment per rule)
//!        +-- notification  (destination lookups + aggregate node)
//!        +-- outputs       (named output bindings)
//!        |
//!        v
//!  ResourceGraph (ordered nodes + outputs)
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod kind;
pub mod node;
mod notification;
mod outputs;
pub mod policy;
mod replication;

pub use builder::build;
pub use error::{BuildResult, GraphError};
pub use graph::{Output, ResourceGraph};
pub use kind::ResourceKind;
pub use node::{NodeRef, ResourceNode};
