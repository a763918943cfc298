//! Error types for esorm-model

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] esorm_query::Error),

    #[error("Unsupported operation on {entity}: {operation}")]
    UnsupportedOperation { entity: String, operation: String },

    #[error("Attribute conversion error: {0}")]
    Json(#[from] serde_json::Error),
}
