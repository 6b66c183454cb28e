//! Rendering errors.

/// Errors raised while turning a resource graph into Terraform JSON.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The assembled document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}
