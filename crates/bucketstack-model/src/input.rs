//! Input envelope handed over by the upstream schema layer.
//!
//! The envelope pairs the bucket specification with provisioning metadata.
//! The metadata configures the state backend binding only; the graph builder
//! never reads it.

use serde::{Deserialize, Serialize};

use crate::spec::BucketSpec;

/// Top-level input record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInput {
    /// The validated bucket specification.
    pub data: BucketSpec,

    /// Provisioning-backend metadata.
    pub provision: Provision,
}

/// Provisioning metadata for one managed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provision {
    /// Cloud provider this resource is provisioned in.
    pub provision_provider: String,

    /// Account or organization unit owning the resource.
    pub provisioner: String,

    /// Resource provider name (e.g. `s3`).
    pub provider: String,

    /// Identifier of the provisioning request itself.
    pub identifier: String,

    /// Cluster the consuming workload runs in.
    pub target_cluster: String,

    /// Namespace the consuming workload runs in.
    pub target_namespace: String,

    /// Secret the issued credentials are written to.
    pub target_secret_name: String,

    /// Remote state coordinates for the backend block.
    pub module_provision_data: ModuleProvisionData,
}

/// Remote Terraform state coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleProvisionData {
    /// Bucket holding the state object.
    pub tf_state_bucket: String,

    /// Region of the state bucket.
    pub tf_state_region: String,

    /// Lock table for state access.
    pub tf_state_dynamodb_table: String,

    /// Key of the state object within the bucket.
    pub tf_state_key: String,
}
