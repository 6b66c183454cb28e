//! Replication fan-out integration tests.

#[cfg(test)]
mod tests {
    use bucketstack_graph::{GraphError, ResourceKind, build};
    use serde_json::json;

    use crate::{input_with_data, sample_input};

    #[test]
    fn test_should_fan_out_three_nodes_per_replication_rule() {
        let plain = build(&sample_input().data).unwrap();

        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "replication_configurations": [
                {
                    "rule_name": "mirror-east",
                    "status": "Enabled",
                    "destination_bucket_identifier": "backup-east",
                },
                {
                    "rule_name": "mirror-west",
                    "status": "Enabled",
                    "destination_bucket_identifier": "backup-west",
                    "storage_class": "GLACIER",
                },
            ],
        }));
        let graph = build(&input.data).unwrap();

        assert_eq!(graph.len(), plain.len() + 6);
        for kind in [
            ResourceKind::IamRole,
            ResourceKind::IamPolicy,
            ResourceKind::IamRolePolicyAttachment,
        ] {
            let ids: Vec<_> = graph
                .nodes()
                .iter()
                .filter(|node| node.kind() == kind)
                .map(|node| node.id().to_owned())
                .collect();
            assert!(ids.contains(&"test-s3_mirror-east".to_owned()), "{kind:?}");
            assert!(ids.contains(&"test-s3_mirror-west".to_owned()), "{kind:?}");
        }
    }

    #[test]
    fn test_should_attach_fixed_trust_policy_to_role() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "replication_configurations": [{
                "rule_name": "mirror",
                "status": "Enabled",
                "destination_bucket_identifier": "backup",
            }],
        }));
        let graph = build(&input.data).unwrap();

        let role = graph
            .nodes()
            .iter()
            .find(|node| node.kind() == ResourceKind::IamRole)
            .unwrap();
        assert_eq!(role.attributes()["name"], "mirror_iam_role");
        assert_eq!(
            role.attributes()["assume_role_policy"],
            json!(
                r#"{"Statement":[{"Action":"sts:AssumeRole","Effect":"Allow","Principal":{"Service":"s3.amazonaws.com"},"Sid":""}],"Version":"2012-10-17"}"#
            )
        );
    }

    #[test]
    fn test_should_reference_destination_bucket_by_address() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "replication_configurations": [{
                "rule_name": "mirror",
                "status": "Enabled",
                "destination_bucket_identifier": "backup",
            }],
        }));
        let graph = build(&input.data).unwrap();

        let policy = graph
            .nodes()
            .iter()
            .find(|node| {
                node.kind() == ResourceKind::IamPolicy && node.id() == "test-s3_mirror"
            })
            .unwrap();
        let document = policy.attributes()["policy"].as_str().unwrap();
        assert!(document.contains(r#""Resource":["${aws_s3_bucket.test-s3.arn}","${aws_s3_bucket.backup.arn}"]"#));
        assert!(document.contains(r#""Resource":["${aws_s3_bucket.test-s3.arn}/*"]"#));
        assert!(document.contains(r#""Resource":"${aws_s3_bucket.backup.arn}/*""#));

        // The destination bucket is not part of this graph.
        assert!(
            !graph
                .nodes()
                .iter()
                .any(|node| node.kind() == ResourceKind::Bucket && node.id() == "backup")
        );
    }

    #[test]
    fn test_should_abort_on_duplicate_rule_names() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "replication_configurations": [
                {
                    "rule_name": "mirror",
                    "status": "Enabled",
                    "destination_bucket_identifier": "backup-east",
                },
                {
                    "rule_name": "mirror",
                    "status": "Enabled",
                    "destination_bucket_identifier": "backup-west",
                },
            ],
        }));
        let err = build(&input.data).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateReplicationRule { .. }));
    }

    #[test]
    fn test_should_abort_when_destination_aliases_source() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "replication_configurations": [{
                "rule_name": "mirror",
                "status": "Enabled",
                "destination_bucket_identifier": "test-s3",
            }],
        }));
        let err = build(&input.data).unwrap_err();
        assert!(matches!(
            err,
            GraphError::ReplicationDestinationIsSource { .. }
        ));
    }
}
