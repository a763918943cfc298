//! Connection settings for the search cluster.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "http://localhost:9200";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hosts and credentials used by [`SearchClient`](crate::SearchClient).
///
/// Hosts may omit the scheme (`localhost:9200`); `http://` is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub hosts: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: vec![DEFAULT_HOST.to_string()],
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_point_at_local_node() {
        let config = ClientConfig::default();
        assert_eq!(config.hosts, vec!["http://localhost:9200"]);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.username.is_none());
    }

    #[test]
    fn deserializes_partial_settings() {
        let config: ClientConfig = serde_json::from_value(json!({
            "hosts": ["localhost:9200"],
            "username": "user",
            "password": "pass"
        }))
        .unwrap();

        assert_eq!(config.hosts, vec!["localhost:9200"]);
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("pass"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn builder_helpers() {
        let config = ClientConfig::with_hosts(["es1:9200", "es2:9200"])
            .with_credentials("elastic", Some("changeme".into()));
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.username.as_deref(), Some("elastic"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
