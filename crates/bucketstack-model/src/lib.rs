//! Canonical bucket specification model for bucketstack.
//!
//! This crate defines the validated input contract consumed by the resource
//! graph builder: the [`BucketSpec`] describing the desired bucket state
//! (encryption, versioning, lifecycle, replication, event routing, access
//! policy), the closed enumerations it is built from, and the [`AppInput`]
//! envelope that pairs the spec with provisioning-backend metadata.
//!
//! Validation and normalization of raw input happen upstream; values arriving
//! here are already coerced (enumerations validated, booleans real booleans).
//! The model therefore favors closed enums and typed fields over stringly
//! data, keeping opaque pass-through payloads (CORS rules, lifecycle rule
//! bodies, website configuration) as plain JSON maps.

mod input;
mod spec;
mod types;

pub use input::{AppInput, ModuleProvisionData, Provision};
pub use spec::{
    BucketSpec, Destination, EventNotification, LoggingTarget, ReplicationRule, SseConfiguration,
};
pub use types::{
    AwsRegion, CannedAcl, DestinationType, ParseStorageClassError, RequestPayer, StorageClass,
};
