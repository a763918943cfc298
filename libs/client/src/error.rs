//! Error types for esorm-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Search client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("No search hosts configured")]
    NoHosts,

    #[error("Invalid host URL {host}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Index {0} has no mapping properties")]
    MissingMapping(String),
}

impl From<Error> for esorm_query::Error {
    fn from(err: Error) -> Self {
        esorm_query::Error::transport(err)
    }
}
