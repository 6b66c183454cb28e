//! Event notification integration tests.

#[cfg(test)]
mod tests {
    use bucketstack_graph::{ResourceKind, build};
    use serde_json::json;

    use crate::input_with_data;

    #[test]
    fn test_should_aggregate_mixed_destinations_into_one_node() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "event_notifications": [
                {
                    "destination_type": "sqs",
                    "destination_identifier": "jobs",
                    "event_type": ["s3:ObjectCreated:*"],
                    "filter_prefix": "incoming/",
                    "filter_suffix": ".csv",
                },
                {
                    "destination_type": "sqs",
                    "destination_identifier": "audit",
                    "event_type": ["s3:ObjectRemoved:*"],
                    "filter_prefix": "",
                    "filter_suffix": "",
                },
                {
                    "destination_type": "sns",
                    "destination_identifier": "alerts",
                    "event_type": ["s3:ObjectCreated:Put"],
                    "filter_prefix": "",
                    "filter_suffix": "",
                },
            ],
        }));
        let graph = build(&input.data).unwrap();

        let aggregates: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|node| node.kind() == ResourceKind::BucketNotification)
            .collect();
        assert_eq!(aggregates.len(), 1);
        let aggregate = aggregates[0];
        assert_eq!(aggregate.id(), "test-s3-event-notifications");
        assert_eq!(aggregate.attributes()["queue"].as_array().unwrap().len(), 2);
        assert_eq!(aggregate.attributes()["topic"].as_array().unwrap().len(), 1);
        assert_eq!(
            aggregate.attributes()["queue"][0],
            json!({
                "events": ["s3:ObjectCreated:*"],
                "queue_arn": "${data.aws_sqs_queue.jobs-sqs-ds.arn}",
                "filter_prefix": "incoming/",
                "filter_suffix": ".csv",
            })
        );
    }

    #[test]
    fn test_should_bypass_lookup_for_arn_destinations() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "event_notifications": [{
                "destination_type": "sns",
                "destination_identifier": "arn:aws:sns:us-east-1:123456789012:alerts",
                "event_type": ["s3:ObjectCreated:*"],
                "filter_prefix": "",
                "filter_suffix": "",
            }],
        }));
        let graph = build(&input.data).unwrap();

        assert!(
            !graph
                .nodes()
                .iter()
                .any(|node| node.kind() == ResourceKind::SnsTopicLookup)
        );
        let aggregate = graph
            .nodes()
            .iter()
            .find(|node| node.kind() == ResourceKind::BucketNotification)
            .unwrap();
        assert_eq!(
            aggregate.attributes()["topic"][0]["topic_arn"],
            "arn:aws:sns:us-east-1:123456789012:alerts"
        );
    }

    #[test]
    fn test_should_share_one_lookup_per_named_destination() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "event_notifications": [
                {
                    "destination_type": "sqs",
                    "destination_identifier": "jobs",
                    "event_type": ["s3:ObjectCreated:*"],
                    "filter_prefix": "a/",
                    "filter_suffix": "",
                },
                {
                    "destination_type": "sqs",
                    "destination_identifier": "jobs",
                    "event_type": ["s3:ObjectRemoved:*"],
                    "filter_prefix": "b/",
                    "filter_suffix": "",
                },
            ],
        }));
        let graph = build(&input.data).unwrap();

        let lookups: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|node| node.kind() == ResourceKind::SqsQueueLookup)
            .collect();
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].id(), "jobs-sqs-ds");
        assert_eq!(lookups[0].attributes()["name"], "jobs");

        let aggregate = graph
            .nodes()
            .iter()
            .find(|node| node.kind() == ResourceKind::BucketNotification)
            .unwrap();
        assert_eq!(aggregate.attributes()["queue"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_should_depend_on_bucket_and_created_lookups() {
        let input = input_with_data(json!({
            "identifier": "test-s3",
            "output_prefix": "output_prefix_s3_bucket",
            "event_notifications": [{
                "destination_type": "sqs",
                "destination_identifier": "jobs",
                "event_type": ["s3:ObjectCreated:*"],
                "filter_prefix": "",
                "filter_suffix": "",
            }],
        }));
        let graph = build(&input.data).unwrap();

        let aggregate = graph
            .nodes()
            .iter()
            .find(|node| node.kind() == ResourceKind::BucketNotification)
            .unwrap();
        let addresses: Vec<_> = aggregate
            .dependencies()
            .iter()
            .map(bucketstack_graph::NodeRef::address)
            .collect();
        assert_eq!(
            addresses,
            vec!["aws_s3_bucket.test-s3", "data.aws_sqs_queue.jobs-sqs-ds"]
        );
    }
}
