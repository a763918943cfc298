//! Fluent query builder.
//!
//! Clause calls accumulate into a [`QueryState`]; terminal calls take that
//! state out of the builder (leaving a fresh one behind), compile it into a
//! request body and dispatch it through the [`SearchService`].

use crate::clauses::{
    terms_aggregation, GroupSpec, Predicate, RangeFilter, RangeMode, RangeOp, SortClause,
    SortDirection,
};
use crate::error::{Error, Result};
use crate::response::{CountResponse, Document, MultiGetResponse, QueryOutput, SearchResponse};
use crate::service::SearchService;
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

/// A compiled request: target index plus request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub index: String,
    pub body: JsonValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Search,
    Count,
}

/// Everything a terminal operation clears.
#[derive(Debug, Clone, Default)]
struct QueryState {
    projection: Vec<String>,
    musts: Vec<Predicate>,
    must_nots: Vec<Predicate>,
    ranges: RangeFilter,
    sorts: Vec<SortClause>,
    aggregations: Map<String, JsonValue>,
    limit: Option<usize>,
    offset: usize,
    group: Option<GroupSpec>,
}

impl QueryState {
    fn compile(&self, kind: BodyKind) -> JsonValue {
        let mut body = Map::new();

        body.insert(
            "query".to_string(),
            json!({
                "bool": {
                    "filter": self.ranges.to_clauses(),
                    "must": self.musts.iter().map(Predicate::to_json).collect::<Vec<_>>(),
                    "must_not": self.must_nots.iter().map(Predicate::to_json).collect::<Vec<_>>(),
                }
            }),
        );

        // Count bodies carry only the query. `_count` rejects sort, collapse,
        // paging and source filtering, so those are dropped on purpose.
        if kind == BodyKind::Count {
            return JsonValue::Object(body);
        }

        body.insert(
            "sort".to_string(),
            JsonValue::Array(self.sorts.iter().map(SortClause::to_json).collect()),
        );

        if let Some(group) = &self.group {
            body.insert("collapse".to_string(), group.to_json());
        }

        body.insert("from".to_string(), json!(self.offset));
        if let Some(limit) = self.limit {
            body.insert("size".to_string(), json!(limit));
        }

        if !self.aggregations.is_empty() {
            body.insert("_source".to_string(), JsonValue::Bool(false));
            body.insert(
                "aggs".to_string(),
                JsonValue::Object(self.aggregations.clone()),
            );
        } else if !self.projection.is_empty() {
            body.insert("_source".to_string(), json!(self.projection));
        }

        JsonValue::Object(body)
    }
}

/// Query builder bound to one index and one search service.
pub struct QueryBuilder {
    service: Arc<dyn SearchService>,
    index: Option<String>,
    range_mode: RangeMode,
    state: QueryState,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("index", &self.index)
            .field("range_mode", &self.range_mode)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl QueryBuilder {
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self {
            service,
            index: None,
            range_mode: RangeMode::default(),
            state: QueryState::default(),
        }
    }

    pub fn for_index(service: Arc<dyn SearchService>, index: impl Into<String>) -> Self {
        let mut builder = Self::new(service);
        builder.index = Some(index.into());
        builder
    }

    pub fn with_range_mode(mut self, range_mode: RangeMode) -> Self {
        self.range_mode = range_mode;
        self
    }

    /// Switch how repeated bounds on one field combine. Ranges already
    /// collected are kept; the mode applies to later `where_*` bounds.
    pub fn set_range_mode(&mut self, range_mode: RangeMode) -> &mut Self {
        self.range_mode = range_mode;
        self
    }

    pub fn service(&self) -> &Arc<dyn SearchService> {
        &self.service
    }

    pub fn range_mode(&self) -> RangeMode {
        self.range_mode
    }

    /// Set the target index. Survives resets.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// A fresh builder on the same index and service, without any clauses.
    pub fn new_query(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            index: self.index.clone(),
            range_mode: self.range_mode,
            state: QueryState::default(),
        }
    }

    // ----------------------------------------------------------------------
    // Projection, pagination, ordering
    // ----------------------------------------------------------------------

    /// Add fields to the projection. Already-selected fields are skipped.
    pub fn select<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.state.projection.contains(&field) {
                self.state.projection.push(field);
            }
        }
        self
    }

    pub fn limit(&mut self, limit: usize) -> &mut Self {
        self.state.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: usize) -> &mut Self {
        self.state.offset = offset;
        self
    }

    pub fn order_by(
        &mut self,
        field: impl Into<String>,
        direction: impl Into<SortDirection>,
    ) -> &mut Self {
        self.state.sorts.push(SortClause::Field {
            field: field.into(),
            direction: direction.into(),
        });
        self
    }

    pub fn order_by_raw(&mut self, sort: JsonValue) -> &mut Self {
        self.state.sorts.push(SortClause::Raw(sort));
        self
    }

    // ----------------------------------------------------------------------
    // Grouping
    // ----------------------------------------------------------------------

    /// Collapse on `field`, keeping `size` hits per group ordered by the
    /// grouping field ascending.
    pub fn group_by(&mut self, field: impl Into<String>, size: usize) -> &mut Self {
        let field = field.into();
        let sort_field = field.clone();
        self.install_group(field, size, sort_field, SortDirection::Asc)
    }

    /// Collapse on `field`, keeping `size` hits per group ordered by `sort_field`.
    ///
    /// The direction is typed. For a free-form direction use
    /// [`group_by_directed`](Self::group_by_directed).
    pub fn group_by_sorted(
        &mut self,
        field: impl Into<String>,
        size: usize,
        sort_field: impl Into<String>,
        sort_direction: SortDirection,
    ) -> &mut Self {
        self.install_group(field.into(), size, sort_field.into(), sort_direction)
    }

    /// Like [`group_by_sorted`](Self::group_by_sorted), with the direction as
    /// text. Only `"desc"` sorts descending; anything else is ascending.
    pub fn group_by_directed(
        &mut self,
        field: impl Into<String>,
        size: usize,
        sort_field: impl Into<String>,
        sort_direction: &str,
    ) -> &mut Self {
        let sort_direction = SortDirection::parse_or(sort_direction, SortDirection::Asc);
        self.install_group(field.into(), size, sort_field.into(), sort_direction)
    }

    pub fn group_by_raw(&mut self, collapse: JsonValue) -> &mut Self {
        self.state.group = Some(GroupSpec::Raw(collapse));
        self
    }

    fn install_group(
        &mut self,
        field: String,
        size: usize,
        sort_field: String,
        sort_direction: SortDirection,
    ) -> &mut Self {
        self.state.group = Some(GroupSpec::Field {
            field,
            size,
            sort_field,
            sort_direction,
            source: self.state.projection.clone(),
        });
        self
    }

    // ----------------------------------------------------------------------
    // Predicates
    // ----------------------------------------------------------------------

    pub fn where_eq(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.state.musts.push(Predicate::Term {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn where_not(
        &mut self,
        field: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.state.must_nots.push(Predicate::Term {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn where_like(
        &mut self,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> &mut Self {
        self.state.musts.push(Predicate::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        });
        self
    }

    pub fn where_not_like(
        &mut self,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> &mut Self {
        self.state.must_nots.push(Predicate::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        });
        self
    }

    pub fn where_in<I, V>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.state.musts.push(Predicate::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn where_not_in<I, V>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.state.must_nots.push(Predicate::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn where_has(&mut self, field: impl Into<String>) -> &mut Self {
        self.state.musts.push(Predicate::Exists {
            field: field.into(),
        });
        self
    }

    pub fn where_has_not(&mut self, field: impl Into<String>) -> &mut Self {
        self.state.must_nots.push(Predicate::Exists {
            field: field.into(),
        });
        self
    }

    pub fn where_gt(&mut self, field: &str, value: f64) -> &mut Self {
        self.push_range(field, RangeOp::Gt, value)
    }

    pub fn where_gte(&mut self, field: &str, value: f64) -> &mut Self {
        self.push_range(field, RangeOp::Gte, value)
    }

    pub fn where_lt(&mut self, field: &str, value: f64) -> &mut Self {
        self.push_range(field, RangeOp::Lt, value)
    }

    pub fn where_lte(&mut self, field: &str, value: f64) -> &mut Self {
        self.push_range(field, RangeOp::Lte, value)
    }

    /// Append an engine-native clause to `must` as-is.
    pub fn where_raw(&mut self, clause: JsonValue) -> &mut Self {
        self.state.musts.push(Predicate::Raw(clause));
        self
    }

    fn push_range(&mut self, field: &str, op: RangeOp, value: f64) -> &mut Self {
        self.state.ranges.apply(self.range_mode, field, op, value);
        self
    }

    // ----------------------------------------------------------------------
    // Aggregations
    // ----------------------------------------------------------------------

    /// Install a `terms` aggregation named `name`. Replaces any aggregation
    /// with the same name.
    pub fn aggr(&mut self, name: impl Into<String>, field: &str, size: Option<usize>) -> &mut Self {
        self.state
            .aggregations
            .insert(name.into(), terms_aggregation(field, size));
        self
    }

    pub fn aggr_raw(&mut self, name: impl Into<String>, aggregation: JsonValue) -> &mut Self {
        self.state.aggregations.insert(name.into(), aggregation);
        self
    }

    // ----------------------------------------------------------------------
    // Introspection
    // ----------------------------------------------------------------------

    /// The request `get()` would send right now. Does not reset anything.
    pub fn to_request(&self) -> Result<SearchRequest> {
        Ok(SearchRequest {
            index: self.require_index()?,
            body: self.state.compile(BodyKind::Search),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_request()?)?)
    }

    // ----------------------------------------------------------------------
    // Terminal operations
    // ----------------------------------------------------------------------

    /// Run the search. Returns bucket lists when aggregations were requested,
    /// matched documents otherwise.
    pub async fn get(&mut self) -> Result<QueryOutput> {
        let state = self.take_state();
        let index = self.require_index()?;
        let body = state.compile(BodyKind::Search);

        tracing::debug!(index = %index, operation = "search", "dispatching query");
        let raw = self.service.search(&index, &body).await?;
        let response: SearchResponse = serde_json::from_value(raw)?;

        if state.aggregations.is_empty() {
            Ok(QueryOutput::Documents(response.hits.hits))
        } else {
            Ok(QueryOutput::Buckets(response.into_buckets()))
        }
    }

    /// Count the documents matching the current predicates.
    pub async fn count(&mut self) -> Result<u64> {
        let state = self.take_state();
        let index = self.require_index()?;
        let body = state.compile(BodyKind::Count);

        tracing::debug!(index = %index, operation = "count", "dispatching query");
        let raw = self.service.count(&index, &body).await?;
        let response: CountResponse = serde_json::from_value(raw)?;
        Ok(response.count)
    }

    /// Fetch one document. A missing document is `Ok(None)`.
    pub async fn find(&mut self, id: impl ToString) -> Result<Option<Document>> {
        self.take_state();
        let index = self.require_index()?;
        let id = id.to_string();

        tracing::debug!(index = %index, id = %id, operation = "get", "dispatching query");
        let Some(raw) = self.service.get(&index, &id).await? else {
            return Ok(None);
        };

        let document: Document = serde_json::from_value(raw)?;
        if document.found == Some(false) {
            return Ok(None);
        }
        Ok(Some(document))
    }

    /// Fetch several documents. Every requested id yields one entry, in
    /// engine order; misses carry `found: false`.
    pub async fn find_many<I, T>(&mut self, ids: I) -> Result<Vec<Document>>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.take_state();
        let index = self.require_index()?;
        let ids: Vec<String> = ids.into_iter().map(|id| id.to_string()).collect();

        tracing::debug!(index = %index, ids = ids.len(), operation = "mget", "dispatching query");
        let raw = self.service.mget(&index, &ids).await?;
        let response: MultiGetResponse = serde_json::from_value(raw)?;
        Ok(response.docs)
    }

    fn take_state(&mut self) -> QueryState {
        std::mem::take(&mut self.state)
    }

    fn require_index(&self) -> Result<String> {
        self.index.clone().ok_or(Error::MissingIndex)
    }
}
