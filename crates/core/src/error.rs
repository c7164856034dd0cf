//! Error types for document parsing.

use thiserror::Error;

/// Failure to turn raw text into an [`OpenApiDocument`](crate::spec::OpenApiDocument).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
