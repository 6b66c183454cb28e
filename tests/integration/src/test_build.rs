//! Graph construction integration tests.

#[cfg(test)]
mod tests {
    use bucketstack_graph::{GraphError, ResourceGraph, ResourceKind, ResourceNode, build};
    use serde_json::json;

    use crate::{input_with_data, sample_input};

    fn nodes_of(graph: &ResourceGraph, kind: ResourceKind) -> Vec<&ResourceNode> {
        graph
            .nodes()
            .iter()
            .filter(|node| node.kind() == kind)
            .collect()
    }

    #[test]
    fn test_should_build_the_documented_example_scenario() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "acl": "private",
            "versioning": false,
            "server_side_encryption_configuration": {
                "rule": {
                    "apply_server_side_encryption_by_default": {"sse_algorithm": "AES256"}
                },
            },
            "lifecycle_rules": [{
                "id": "cleanup_noncurrent_versions",
                "enabled": true,
                "noncurrent_version_expiration": {"days": 1},
                "expiration": {"expired_object_delete_marker": true},
            }],
            "default_tags": [{"tags": {"app": "app-sre-infra"}}],
            "tags": {
                "app": "external-resources-poc",
                "cluster": "appint-ex-01",
                "environment": "stage",
                "managed_by_integration": "external_resources",
                "namespace": "external-resources-poc",
            },
        }));
        let graph = build(&input.data).unwrap();

        let bucket = &graph.nodes()[0];
        assert_eq!(bucket.kind(), ResourceKind::Bucket);
        assert_eq!(bucket.id(), "test-s3");
        assert_eq!(bucket.attributes()["bucket"], "test-s3");
        assert_eq!(
            bucket.attributes()["tags"]["managed_by_integration"],
            "external_resources"
        );

        let lifecycle = nodes_of(&graph, ResourceKind::BucketLifecycleConfiguration);
        assert_eq!(lifecycle.len(), 1);
        assert_eq!(lifecycle[0].id(), "cleanup_noncurrent_versions");
        let rule = &lifecycle[0].attributes()["rule"][0];
        assert_eq!(rule["status"], "Enabled");
        assert_eq!(rule["noncurrent_version_expiration"], json!({"days": 1}));

        // Versioning is off, so neither the versioning node nor the
        // synthesized expiration rule appears.
        assert!(nodes_of(&graph, ResourceKind::BucketVersioning).is_empty());

        let bucket_output = graph
            .outputs()
            .iter()
            .find(|output| output.name() == "output_prefix_s3_bucket__bucket")
            .unwrap();
        assert_eq!(bucket_output.value(), &json!("test-s3"));
    }

    #[test]
    fn test_should_emit_bucket_before_all_other_nodes() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "storage_class": "GLACIER",
            "cors_rules": [{"allowed_methods": ["GET"]}],
            "request_payer": "BucketOwner",
        }));
        let graph = build(&input.data).unwrap();

        assert_eq!(graph.nodes()[0].kind(), ResourceKind::Bucket);
        let position = |kind| {
            graph
                .nodes()
                .iter()
                .position(|node| node.kind() == kind)
                .unwrap()
        };
        assert!(
            position(ResourceKind::BucketOwnershipControls) < position(ResourceKind::BucketAcl)
        );
    }

    #[test]
    fn test_should_synthesize_expiration_rule_only_when_caller_does_not() {
        let versioned = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "versioning": true,
        }));
        let graph = build(&versioned.data).unwrap();
        let lifecycle = nodes_of(&graph, ResourceKind::BucketLifecycleConfiguration);
        assert_eq!(lifecycle.len(), 1);
        assert_eq!(lifecycle[0].id(), "noncurrent_version_expiration_lifecycle_rule");
        assert_eq!(
            lifecycle[0].attributes()["rule"][0]["noncurrent_version_expiration"],
            json!({"noncurrent_days": 30})
        );

        let caller_managed = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "versioning": true,
            "lifecycle_rules": [{
                "id": "cleanup",
                "enabled": true,
                "noncurrent_version_expiration": {"noncurrent_days": 7},
            }],
        }));
        let graph = build(&caller_managed.data).unwrap();
        let lifecycle = nodes_of(&graph, ResourceKind::BucketLifecycleConfiguration);
        assert_eq!(lifecycle.len(), 1);
        assert_eq!(lifecycle[0].id(), "cleanup");
    }

    #[test]
    fn test_should_apply_platform_minimum_transition_days() {
        for (class, days) in [
            ("standard_ia", 30),
            ("ONEZONE_IA", 30),
            ("GLACIER", 1),
            ("DEEP_ARCHIVE", 1),
        ] {
            let input = input_with_data(json!({
                "identifier": "test-s3",
                "output_prefix": "output_prefix_s3_bucket",
                "versioning": false,
                "storage_class": class,
            }));
            let graph = build(&input.data).unwrap();
            let lifecycle = nodes_of(&graph, ResourceKind::BucketLifecycleConfiguration);
            assert_eq!(
                lifecycle[0].attributes()["rule"][0]["noncurrent_version_transition"][0]
                    ["noncurrent_days"],
                json!(days),
                "storage class {class}"
            );
        }
    }

    #[test]
    fn test_should_issue_credentials_for_any_specification() {
        let input = sample_input();
        let graph = build(&input.data).unwrap();

        assert_eq!(nodes_of(&graph, ResourceKind::IamUser).len(), 1);
        assert_eq!(nodes_of(&graph, ResourceKind::IamAccessKey).len(), 1);
        assert_eq!(nodes_of(&graph, ResourceKind::IamPolicy).len(), 1);
        assert_eq!(nodes_of(&graph, ResourceKind::IamUserPolicyAttachment).len(), 1);
    }

    #[test]
    fn test_should_widen_issued_policy_for_public_read_and_tagging() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "acl": "public-read",
            "allow_object_tagging": true,
        }));
        let graph = build(&input.data).unwrap();
        let document = nodes_of(&graph, ResourceKind::IamPolicy)[0].attributes()["policy"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(document.contains("s3:PutObjectAcl"));
        assert!(document.contains("s3:*ObjectTagging"));

        let input = sample_input();
        let graph = build(&input.data).unwrap();
        let document = nodes_of(&graph, ResourceKind::IamPolicy)[0].attributes()["policy"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(!document.contains("s3:PutObjectAcl"));
        assert!(!document.contains("s3:*ObjectTagging"));
    }

    #[test]
    fn test_should_abort_on_duplicate_lifecycle_rule_ids() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "lifecycle_rules": [
                {"id": "cleanup", "enabled": true},
                {"id": "cleanup", "enabled": false},
            ],
        }));
        let err = build(&input.data).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateLifecycleRuleId { .. }));
    }

    #[test]
    fn test_should_abort_on_malformed_lifecycle_rule() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "lifecycle_rules": [{"enabled": true}],
        }));
        let err = build(&input.data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed lifecycle rule at index 0: missing or invalid `id`"
        );
    }

    #[test]
    fn test_should_pass_unknown_attributes_through_to_bucket() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "force_destroy": true,
            "object_lock_enabled": false,
            "bucket_prefix": "poc-",
            "acceleration_status": "Enabled",
        }));
        let graph = build(&input.data).unwrap();

        let bucket = &graph.nodes()[0];
        assert_eq!(bucket.attributes()["force_destroy"], json!(true));
        assert_eq!(bucket.attributes()["object_lock_enabled"], json!(false));
        assert_eq!(bucket.attributes()["bucket_prefix"], "poc-");
        assert_eq!(bucket.attributes()["acceleration_status"], "Enabled");
        // Fields consumed by dedicated nodes never leak into the bucket.
        assert!(bucket.attributes().get("versioning").is_none());
        assert!(bucket.attributes().get("output_prefix").is_none());
        assert!(bucket.attributes().get("identifier").is_none());
    }
}
