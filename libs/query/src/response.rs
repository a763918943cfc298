//! Decoded search-engine responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Aggregation name to bucket list.
pub type Buckets = BTreeMap<String, Vec<JsonValue>>;

/// A raw document as returned by search hits, `get` and `mget`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(rename = "_source", default, deserialize_with = "null_as_default")]
    pub source: Map<String, JsonValue>,

    /// Present on `get`/`mget` results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,

    /// Collapsed groups keyed by inner-hit name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inner_hits: BTreeMap<String, InnerHits>,
}

impl Document {
    /// `mget` entries without an explicit `found: true` are treated as misses.
    pub fn is_found(&self) -> bool {
        self.found == Some(true)
    }
}

/// One inner-hit group attached to a collapsed hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerHits {
    #[serde(default)]
    pub hits: Hits,
}

/// The `hits` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<Document>,
}

/// Result of `QueryBuilder::get`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Matched documents, in engine order.
    Documents(Vec<Document>),
    /// Bucket lists, returned instead of documents when aggregations were requested.
    Buckets(Buckets),
}

impl QueryOutput {
    pub fn into_documents(self) -> Option<Vec<Document>> {
        match self {
            Self::Documents(documents) => Some(documents),
            Self::Buckets(_) => None,
        }
    }

    pub fn into_buckets(self) -> Option<Buckets> {
        match self {
            Self::Buckets(buckets) => Some(buckets),
            Self::Documents(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aggregations: Map<String, JsonValue>,
}

impl SearchResponse {
    pub(crate) fn into_buckets(self) -> Buckets {
        self.aggregations
            .into_iter()
            .map(|(name, aggregation)| {
                let buckets = match aggregation.get("buckets") {
                    Some(JsonValue::Array(buckets)) => buckets.clone(),
                    Some(JsonValue::Object(keyed)) => keyed_buckets(keyed),
                    _ => Vec::new(),
                };
                (name, buckets)
            })
            .collect()
    }
}

/// Flatten `keyed` / `filters` buckets into list form, in response order.
/// The map key becomes the entry's `key` unless the bucket already has one.
fn keyed_buckets(keyed: &Map<String, JsonValue>) -> Vec<JsonValue> {
    keyed
        .iter()
        .map(|(key, bucket)| {
            let mut entry = match bucket {
                JsonValue::Object(fields) => fields.clone(),
                other => {
                    let mut fields = Map::new();
                    fields.insert("value".into(), other.clone());
                    fields
                }
            };
            entry
                .entry("key")
                .or_insert_with(|| JsonValue::String(key.clone()));
            JsonValue::Object(entry)
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CountResponse {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MultiGetResponse {
    #[serde(default)]
    pub docs: Vec<Document>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
