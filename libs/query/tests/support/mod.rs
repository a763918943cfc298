//! In-memory search service that records every dispatched request.

#![allow(dead_code)]

use async_trait::async_trait;
use esorm_query::{Error, Result, SearchService};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { index: String, body: JsonValue },
    Count { index: String, body: JsonValue },
    Get { index: String, id: String },
    MultiGet { index: String, ids: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct ConnectionRefused;

#[derive(Default)]
pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    search_response: Mutex<Option<JsonValue>>,
    count_response: Mutex<Option<JsonValue>>,
    documents: Mutex<HashMap<String, JsonValue>>,
    fail: bool,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_search_response(self, response: JsonValue) -> Self {
        *self.search_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_count_response(self, response: JsonValue) -> Self {
        *self.count_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_document(self, id: &str, source: JsonValue) -> Self {
        self.documents.lock().unwrap().insert(id.to_string(), source);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(Error::transport(ConnectionRefused));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchService for RecordingService {
    async fn search(&self, index: &str, body: &JsonValue) -> Result<JsonValue> {
        self.record(Call::Search {
            index: index.to_string(),
            body: body.clone(),
        })?;
        Ok(self
            .search_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| json!({"hits": {"hits": []}})))
    }

    async fn count(&self, index: &str, body: &JsonValue) -> Result<JsonValue> {
        self.record(Call::Count {
            index: index.to_string(),
            body: body.clone(),
        })?;
        Ok(self
            .count_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| json!({})))
    }

    async fn get(&self, index: &str, id: &str) -> Result<Option<JsonValue>> {
        self.record(Call::Get {
            index: index.to_string(),
            id: id.to_string(),
        })?;
        Ok(self.documents.lock().unwrap().get(id).map(|source| {
            json!({"_index": index, "_id": id, "found": true, "_source": source})
        }))
    }

    async fn mget(&self, index: &str, ids: &[String]) -> Result<JsonValue> {
        self.record(Call::MultiGet {
            index: index.to_string(),
            ids: ids.to_vec(),
        })?;
        let documents = self.documents.lock().unwrap();
        let docs: Vec<JsonValue> = ids
            .iter()
            .map(|id| match documents.get(id) {
                Some(source) => {
                    json!({"_index": index, "_id": id, "found": true, "_source": source})
                }
                None => json!({"_index": index, "_id": id, "found": false}),
            })
            .collect();
        Ok(json!({ "docs": docs }))
    }
}
