//! Error types for esorm-codegen

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Code generation errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mapping for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Cannot derive a type name from index '{0}'")]
    InvalidTypeName(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
