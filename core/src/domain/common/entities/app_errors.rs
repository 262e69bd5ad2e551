use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Patient not found")]
    NotFound,

    #[error("Generation service is not configured: {0}")]
    ConfigurationError(String),

    #[error("Generation service failed: {0}")]
    UpstreamError(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Machine-readable failure category carried next to the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Configuration,
    Upstream,
    Invalid,
    Storage,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound => ErrorKind::NotFound,
            CoreError::ConfigurationError(_) => ErrorKind::Configuration,
            CoreError::UpstreamError(_) => ErrorKind::Upstream,
            CoreError::Invalid(_) => ErrorKind::Invalid,
            CoreError::StorageError(_) => ErrorKind::Storage,
        }
    }

    /// Whether a caller may reasonably retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::UpstreamError(_))
    }
}
