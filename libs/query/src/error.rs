//! Error types for esorm-query

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Query builder errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("No target index set (call `index()` before executing the query)")]
    MissingIndex,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Search service error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a transport-level failure without altering it.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
