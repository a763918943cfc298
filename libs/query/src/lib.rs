//! Fluent query builder for document search engines
//!
//! Accumulates predicates, projection, pagination, sorting, collapsing and
//! aggregations through chained calls, compiles them into a single
//! Elasticsearch-style request body and executes it through a pluggable
//! [`SearchService`].
//!
//! ```rust,no_run
//! use esorm_query::{QueryBuilder, QueryOutput, SearchService};
//! use std::sync::Arc;
//!
//! # async fn example(service: Arc<dyn SearchService>) -> esorm_query::Result<()> {
//! let mut query = QueryBuilder::for_index(service, "posts");
//! query
//!     .where_eq("status", "published")
//!     .where_gte("likes", 10.0)
//!     .order_by("createdAt", "desc")
//!     .limit(20);
//!
//! if let QueryOutput::Documents(posts) = query.get().await? {
//!     println!("{} posts", posts.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod clauses;
pub mod error;
pub mod response;
pub mod service;

pub use builder::{QueryBuilder, SearchRequest};
pub use clauses::{GroupSpec, Predicate, RangeMode, RangeOp, SortClause, SortDirection};
pub use error::{Error, Result};
pub use response::{Buckets, Document, Hits, InnerHits, QueryOutput};
pub use service::SearchService;
