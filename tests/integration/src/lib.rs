//! Integration tests for bucketstack.
//!
//! These tests exercise the public API end-to-end: envelope parsing, graph
//! construction, and Terraform-JSON rendering. Everything is pure in-memory,
//! so they run during normal `cargo test`.

use bucketstack_model::AppInput;
use serde_json::{Value, json};

/// The minimal provisioning envelope used across the test modules.
#[must_use]
pub fn sample_input() -> AppInput {
    input_with_data(json!({
        "identifier": "test-s3",
        "output_prefix": "output_prefix_s3_bucket",
    }))
}

/// Build an envelope around the given `data` record.
#[must_use]
pub fn input_with_data(data: Value) -> AppInput {
    serde_json::from_value(json!({
        "data": data,
        "provision": {
            "provision_provider": "aws",
            "provisioner": "app-int-example-01",
            "provider": "s3",
            "identifier": "test-23",
            "target_cluster": "appint-ex-01",
            "target_namespace": "external-resources-poc",
            "target_secret_name": "test-s3",
            "module_provision_data": {
                "tf_state_bucket": "external-resources-terraform-state-dev",
                "tf_state_region": "us-east-1",
                "tf_state_dynamodb_table": "external-resources-terraform-lock",
                "tf_state_key": "aws/app-int-example-01/s3/test-23/terraform.tfstate",
            },
        },
    }))
    .expect("fixture envelope should deserialize")
}

mod test_build;
mod test_notifications;
mod test_replication;
