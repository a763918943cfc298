//! Elasticsearch-compatible HTTP search service

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use esorm_query::SearchService;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// HTTP client speaking the `_search`, `_count`, `_doc`, `_mget` and
/// `_mapping` endpoints.
///
/// Requests rotate over the configured hosts. A host that cannot be reached
/// is skipped in favour of the next one; every host is tried at most once per
/// request.
pub struct SearchClient {
    http: Client,
    hosts: Vec<String>,
    next_host: AtomicUsize,
    username: Option<String>,
    password: Option<String>,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.hosts.is_empty() {
            return Err(Error::NoHosts);
        }
        let hosts = config
            .hosts
            .iter()
            .map(|host| normalize_host(host))
            .collect::<Result<Vec<_>>>()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            hosts,
            next_host: AtomicUsize::new(0),
            username: config.username,
            password: config.password,
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Field definitions (`properties`) of an index mapping.
    ///
    /// When `index` is an alias, the first concrete index in the response wins.
    pub async fn get_mapping(&self, index: &str) -> Result<Map<String, JsonValue>> {
        let path = format!("{}/_mapping", urlencoding::encode(index));
        let response = self.send(Method::GET, &path, None).await?;
        let raw = json_body(Method::GET, response).await?;

        raw.as_object()
            .and_then(|indices| indices.values().next())
            .and_then(|entry| entry.pointer("/mappings/properties"))
            .and_then(JsonValue::as_object)
            .cloned()
            .ok_or_else(|| Error::MissingMapping(index.to_string()))
    }

    /// Send to the next host in rotation, failing over on connection errors.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<Response> {
        let start = self.next_host.fetch_add(1, Ordering::Relaxed);
        let mut last_error = None;

        for attempt in 0..self.hosts.len() {
            let host = &self.hosts[(start + attempt) % self.hosts.len()];
            let url = format!("{host}/{path}");

            tracing::debug!(method = %method, url = %url, "sending search request");
            match self.request(method.clone(), &url, body).send().await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_connect() || err.is_timeout() => {
                    tracing::warn!(
                        host = %host,
                        error = %err,
                        "search host unavailable, failing over"
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(last_error.map(Error::Http).unwrap_or(Error::NoHosts))
    }

    fn request(&self, method: Method, url: &str, body: Option<&JsonValue>) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }
}

#[async_trait]
impl SearchService for SearchClient {
    async fn search(&self, index: &str, body: &JsonValue) -> esorm_query::Result<JsonValue> {
        let path = index_path(index, "_search");
        let response = self.send(Method::POST, &path, Some(body)).await?;
        Ok(json_body(Method::POST, response).await?)
    }

    async fn count(&self, index: &str, body: &JsonValue) -> esorm_query::Result<JsonValue> {
        let path = index_path(index, "_count");
        let response = self.send(Method::POST, &path, Some(body)).await?;
        Ok(json_body(Method::POST, response).await?)
    }

    async fn get(&self, index: &str, id: &str) -> esorm_query::Result<Option<JsonValue>> {
        let path = format!(
            "{}/_doc/{}",
            urlencoding::encode(index),
            urlencoding::encode(id)
        );
        let response = self.send(Method::GET, &path, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(json_body(Method::GET, response).await?))
    }

    async fn mget(&self, index: &str, ids: &[String]) -> esorm_query::Result<JsonValue> {
        let path = index_path(index, "_mget");
        let body = json!({ "ids": ids });
        let response = self.send(Method::POST, &path, Some(&body)).await?;
        Ok(json_body(Method::POST, response).await?)
    }
}

fn index_path(index: &str, endpoint: &str) -> String {
    format!("{}/{endpoint}", urlencoding::encode(index))
}

/// Validate a configured host and strip trailing slashes. Bare `host:port`
/// entries get an `http://` scheme.
fn normalize_host(host: &str) -> Result<String> {
    let trimmed = host.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|source| Error::InvalidHost {
        host: host.to_string(),
        source,
    })?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

async fn json_body(method: Method, response: Response) -> Result<JsonValue> {
    let status = response.status();
    if !status.is_success() {
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Status {
            method: method.to_string(),
            url,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}
