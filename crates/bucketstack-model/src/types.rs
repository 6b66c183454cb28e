//! Closed enumerations and small value types used across the specification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// AwsRegion
// ---------------------------------------------------------------------------

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region when the specification omits one.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Regional S3 endpoint hostname (`s3.<region>.amazonaws.com`).
    #[must_use]
    pub fn s3_endpoint(&self) -> String {
        format!("s3.{}.amazonaws.com", self.0)
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// StorageClass
// ---------------------------------------------------------------------------

/// Storage classes a bucket may transition noncurrent versions into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageClass {
    /// S3 Glacier Flexible Retrieval.
    Glacier,
    /// S3 Standard-Infrequent Access.
    StandardIa,
    /// S3 One Zone-Infrequent Access.
    OnezoneIa,
    /// S3 Intelligent-Tiering.
    IntelligentTiering,
    /// S3 Glacier Deep Archive.
    DeepArchive,
    /// S3 Glacier Instant Retrieval.
    GlacierIr,
}

impl StorageClass {
    /// Return the string representation of the storage class.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Glacier => "GLACIER",
            Self::StandardIa => "STANDARD_IA",
            Self::OnezoneIa => "ONEZONE_IA",
            Self::IntelligentTiering => "INTELLIGENT_TIERING",
            Self::DeepArchive => "DEEP_ARCHIVE",
            Self::GlacierIr => "GLACIER_IR",
        }
    }

    /// Whether this is one of the Infrequent Access classes.
    #[must_use]
    pub fn is_infrequent_access(&self) -> bool {
        matches!(self, Self::StandardIa | Self::OnezoneIa)
    }

    /// Minimum number of days before a noncurrent version may transition
    /// into this class.
    ///
    /// The Infrequent Access classes carry a 30-day platform minimum; every
    /// other class can transition after a single day.
    #[must_use]
    pub fn minimum_transition_days(&self) -> u32 {
        if self.is_infrequent_access() { 30 } else { 1 }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StorageClass`] from a string fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown storage class: {0}")]
pub struct ParseStorageClassError(String);

impl FromStr for StorageClass {
    type Err = ParseStorageClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GLACIER" => Ok(Self::Glacier),
            "STANDARD_IA" => Ok(Self::StandardIa),
            "ONEZONE_IA" => Ok(Self::OnezoneIa),
            "INTELLIGENT_TIERING" => Ok(Self::IntelligentTiering),
            "DEEP_ARCHIVE" => Ok(Self::DeepArchive),
            "GLACIER_IR" => Ok(Self::GlacierIr),
            _ => Err(ParseStorageClassError(s.to_owned())),
        }
    }
}

// The upstream schema accepts lowercase storage classes; normalize before
// matching so `standard_ia` and `STANDARD_IA` deserialize identically.
impl<'de> Deserialize<'de> for StorageClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.to_uppercase().parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CannedAcl
// ---------------------------------------------------------------------------

/// Predefined (canned) ACL grants accepted by the legacy `acl` attribute.
///
/// The builder never forwards this to the bucket ACL resource (ownership
/// controls force `private`); it only widens the issued IAM policy when set
/// to `public-read`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    /// Owner gets `FULL_CONTROL`. No one else has access rights (default).
    #[default]
    Private,
    /// Owner gets `FULL_CONTROL`. The `AllUsers` group gets `READ` access.
    PublicRead,
    /// Owner gets `FULL_CONTROL`. The `AllUsers` group gets `READ` and `WRITE` access.
    PublicReadWrite,
    /// Owner gets `FULL_CONTROL`. Amazon EC2 gets `READ` access to GET an
    /// Amazon Machine Image (AMI) bundle from Amazon S3.
    AwsExecRead,
    /// Owner gets `FULL_CONTROL`. The `AuthenticatedUsers` group gets `READ` access.
    AuthenticatedRead,
    /// Object owner gets `FULL_CONTROL`. Bucket owner gets `READ` access.
    BucketOwnerRead,
    /// Both the object owner and the bucket owner get `FULL_CONTROL` over the object.
    BucketOwnerFullControl,
}

impl CannedAcl {
    /// Return the string representation of the canned ACL.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AwsExecRead => "aws-exec-read",
            Self::AuthenticatedRead => "authenticated-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequestPayer
// ---------------------------------------------------------------------------

/// Who bears the cost of requests and data transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestPayer {
    /// The bucket owner pays (the S3 default).
    BucketOwner,
    /// The requester pays.
    Requester,
}

impl RequestPayer {
    /// Return the string representation of the payer mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BucketOwner => "BucketOwner",
            Self::Requester => "Requester",
        }
    }
}

impl fmt::Display for RequestPayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DestinationType
// ---------------------------------------------------------------------------

/// Event notification destination kind. Each notification entry routes to
/// exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    /// An SQS queue.
    Sqs,
    /// An SNS topic.
    Sns,
}

impl DestinationType {
    /// Return the string representation of the destination type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqs => "sqs",
            Self::Sns => "sns",
        }
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
