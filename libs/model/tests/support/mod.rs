//! Scripted search service for model tests.

#![allow(dead_code)]

use async_trait::async_trait;
use esorm_query::{Result, SearchService};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct ScriptedService {
    search_response: Option<JsonValue>,
    documents: HashMap<String, JsonValue>,
    searches: Mutex<Vec<(String, JsonValue)>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_response(mut self, response: JsonValue) -> Self {
        self.search_response = Some(response);
        self
    }

    pub fn with_document(mut self, id: &str, source: JsonValue) -> Self {
        self.documents.insert(id.to_string(), source);
        self
    }

    pub fn searches(&self) -> Vec<(String, JsonValue)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchService for ScriptedService {
    async fn search(&self, index: &str, body: &JsonValue) -> Result<JsonValue> {
        self.searches
            .lock()
            .unwrap()
            .push((index.to_string(), body.clone()));
        Ok(self
            .search_response
            .clone()
            .unwrap_or_else(|| json!({"hits": {"hits": []}})))
    }

    async fn count(&self, _index: &str, _body: &JsonValue) -> Result<JsonValue> {
        Ok(json!({"count": self.documents.len()}))
    }

    async fn get(&self, index: &str, id: &str) -> Result<Option<JsonValue>> {
        Ok(self.documents.get(id).map(|source| {
            json!({"_index": index, "_id": id, "found": true, "_source": source})
        }))
    }

    async fn mget(&self, index: &str, ids: &[String]) -> Result<JsonValue> {
        let docs: Vec<JsonValue> = ids
            .iter()
            .map(|id| match self.documents.get(id) {
                Some(source) => {
                    json!({"_index": index, "_id": id, "found": true, "_source": source})
                }
                None => json!({"_index": index, "_id": id, "found": false}),
            })
            .collect();
        Ok(json!({ "docs": docs }))
    }
}
