//! HTTP transport for esorm
//!
//! [`SearchClient`] implements [`esorm_query::SearchService`] against an
//! Elasticsearch-compatible cluster, so query builders and models can run
//! against a live index.
//!
//! ```rust,no_run
//! use esorm_client::{ClientConfig, SearchClient};
//! use esorm_query::{QueryBuilder, SearchService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SearchClient::new(ClientConfig::with_hosts(["localhost:9200"]))?;
//! let service: Arc<dyn SearchService> = Arc::new(client);
//!
//! let total = QueryBuilder::for_index(service, "posts")
//!     .where_eq("status", "published")
//!     .count()
//!     .await?;
//! println!("{total} published posts");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::SearchClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
