//! The closed set of resource kinds this system can emit.

use std::fmt;

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Kind tag of a resource node.
///
/// One variant per Terraform type the builder may declare. Keeping the set
/// closed means an unknown resource combination fails at construction time,
/// not at serialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The bucket itself. Root of every graph.
    Bucket,
    /// Object-ownership controls for the bucket.
    BucketOwnershipControls,
    /// Canned ACL grant on the bucket.
    BucketAcl,
    /// Access-log delivery configuration.
    BucketLogging,
    /// Server-side encryption configuration.
    BucketServerSideEncryption,
    /// One lifecycle configuration (one rule per node).
    BucketLifecycleConfiguration,
    /// Object versioning toggle.
    BucketVersioning,
    /// CORS rule set.
    BucketCorsConfiguration,
    /// The single aggregate event-notification resource.
    BucketNotification,
    /// Bucket policy document attachment.
    BucketPolicy,
    /// Static website configuration.
    BucketWebsiteConfiguration,
    /// Request-payment configuration.
    BucketRequestPaymentConfiguration,
    /// IAM user issued for programmatic access to the bucket.
    IamUser,
    /// Access key for the issued IAM user.
    IamAccessKey,
    /// IAM policy (bucket access or replication permissions).
    IamPolicy,
    /// IAM role assumed by the storage service for replication.
    IamRole,
    /// Attachment binding a replication policy to its role.
    IamRolePolicyAttachment,
    /// Attachment binding the bucket access policy to the issued user.
    IamUserPolicyAttachment,
    /// By-name queue lookup for a notification destination (data source).
    SqsQueueLookup,
    /// By-name topic lookup for a notification destination (data source).
    SnsTopicLookup,
}

impl ResourceKind {
    /// The Terraform type string for this kind.
    #[must_use]
    pub fn terraform_type(&self) -> &'static str {
        match self {
            Self::Bucket => "aws_s3_bucket",
            Self::BucketOwnershipControls => "aws_s3_bucket_ownership_controls",
            Self::BucketAcl => "aws_s3_bucket_acl",
            Self::BucketLogging => "aws_s3_bucket_logging",
            Self::BucketServerSideEncryption => "aws_s3_bucket_server_side_encryption_configuration",
            Self::BucketLifecycleConfiguration => "aws_s3_bucket_lifecycle_configuration",
            Self::BucketVersioning => "aws_s3_bucket_versioning",
            Self::BucketCorsConfiguration => "aws_s3_bucket_cors_configuration",
            Self::BucketNotification => "aws_s3_bucket_notification",
            Self::BucketPolicy => "aws_s3_bucket_policy",
            Self::BucketWebsiteConfiguration => "aws_s3_bucket_website_configuration",
            Self::BucketRequestPaymentConfiguration => {
                "aws_s3_bucket_request_payment_configuration"
            }
            Self::IamUser => "aws_iam_user",
            Self::IamAccessKey => "aws_iam_access_key",
            Self::IamPolicy => "aws_iam_policy",
            Self::IamRole => "aws_iam_role",
            Self::IamRolePolicyAttachment => "aws_iam_role_policy_attachment",
            Self::IamUserPolicyAttachment => "aws_iam_user_policy_attachment",
            Self::SqsQueueLookup => "aws_sqs_queue",
            Self::SnsTopicLookup => "aws_sns_topic",
        }
    }

    /// Whether this kind is a data source rather than a managed resource.
    ///
    /// Data sources render under the `data` block and their addresses carry
    /// a `data.` prefix.
    #[must_use]
    pub fn is_data_source(&self) -> bool {
        matches!(self, Self::SqsQueueLookup | Self::SnsTopicLookup)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.terraform_type())
    }
}
