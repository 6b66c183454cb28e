//! Terraform JSON rendering for bucketstack.
//!
//! This crate is the serialization boundary: it turns a built
//! [`ResourceGraph`](bucketstack_graph::ResourceGraph) plus the provisioning
//! envelope into one Terraform-JSON document the provisioning backend can
//! plan and apply directly.
//!
//! # Document shape
//!
//! - `terraform.backend.s3` — remote state coordinates from the envelope
//! - `provider.aws` — region and optional default tags
//! - `resource.<type>.<id>` / `data.<type>.<id>` — one entry per graph node,
//!   dependency edges rendered as `depends_on` address lists
//! - `output.<name>` — named outputs, `sensitive: true` where flagged
//!
//! All maps are sorted on serialization, so rendering the same graph twice
//! yields byte-identical documents.

pub mod error;
pub mod render;

pub use error::RenderError;
pub use render::{render, render_json};
