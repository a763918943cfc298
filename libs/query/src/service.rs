//! Boundary between the builder and the search engine.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// The four engine operations the builder relies on.
///
/// Implementations own transport concerns (hosts, auth, timeouts). Responses
/// are passed through as raw JSON and decoded by the builder.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run a search. Expected shape: `{"hits": {"hits": [...]}, "aggregations": {...}}`.
    async fn search(&self, index: &str, body: &JsonValue) -> Result<JsonValue>;

    /// Count matching documents. Expected shape: `{"count": n}`.
    async fn count(&self, index: &str, body: &JsonValue) -> Result<JsonValue>;

    /// Fetch one document by id; `Ok(None)` when the engine reports it missing.
    async fn get(&self, index: &str, id: &str) -> Result<Option<JsonValue>>;

    /// Fetch several documents. Expected shape: `{"docs": [{"found": bool, ...}]}`.
    async fn mget(&self, index: &str, ids: &[String]) -> Result<JsonValue>;
}
