//! Entity mapping for esorm
//!
//! A [`Model`] wraps the attribute map of one document of kind `K` and owns a
//! [`QueryBuilder`](esorm_query::QueryBuilder) pinned to `K`'s index. Clause
//! calls are forwarded through [`Queryable`]; terminal calls map the raw
//! response back into models, attaching collapsed inner hits as child models.
//!
//! ```rust,no_run
//! use esorm_model::{DocumentKind, Model, Queryable};
//! use esorm_query::{SearchService, SortDirection};
//! use std::sync::Arc;
//!
//! struct Post;
//! impl DocumentKind for Post {}
//!
//! # async fn example(service: Arc<dyn SearchService>) -> esorm_model::Result<()> {
//! let mut posts = Model::<Post>::new(service);
//! let latest = posts
//!     .where_eq("status", "published")
//!     .group_by_sorted("userId", 2, "createdAt", SortDirection::Desc)
//!     .get()
//!     .await?;
//!
//! for post in &latest {
//!     let recent = post.collapsed("userId").unwrap_or_default();
//!     println!("{} -> {} recent posts", post["userId"], recent.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod forward;
pub mod kind;
pub mod model;

pub use error::{Error, Result};
pub use forward::Queryable;
pub use kind::{derived_index_name, DocumentKind};
pub use model::{Collapsed, Model};
