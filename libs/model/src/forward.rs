//! Clause forwarding from an entity to its query builder.

use esorm_query::{QueryBuilder, RangeMode, SortDirection};
use serde_json::Value as JsonValue;

/// Every clause operation an entity forwards to its owned [`QueryBuilder`].
///
/// Clause methods return the implementor for chaining. `index`, `aggr` and
/// `aggr_raw` hand back the builder itself, so whatever follows them runs on
/// the raw builder rather than the entity.
pub trait Queryable {
    fn query_builder(&mut self) -> &mut QueryBuilder;

    fn select<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_builder().select(fields);
        self
    }

    fn limit(&mut self, limit: usize) -> &mut Self {
        self.query_builder().limit(limit);
        self
    }

    fn offset(&mut self, offset: usize) -> &mut Self {
        self.query_builder().offset(offset);
        self
    }

    fn order_by(
        &mut self,
        field: impl Into<String>,
        direction: impl Into<SortDirection>,
    ) -> &mut Self {
        self.query_builder().order_by(field, direction);
        self
    }

    fn order_by_raw(&mut self, sort: JsonValue) -> &mut Self {
        self.query_builder().order_by_raw(sort);
        self
    }

    fn set_range_mode(&mut self, range_mode: RangeMode) -> &mut Self {
        self.query_builder().set_range_mode(range_mode);
        self
    }

    fn group_by(&mut self, field: impl Into<String>, size: usize) -> &mut Self {
        self.query_builder().group_by(field, size);
        self
    }

    fn group_by_sorted(
        &mut self,
        field: impl Into<String>,
        size: usize,
        sort_field: impl Into<String>,
        sort_direction: SortDirection,
    ) -> &mut Self {
        self.query_builder()
            .group_by_sorted(field, size, sort_field, sort_direction);
        self
    }

    fn group_by_directed(
        &mut self,
        field: impl Into<String>,
        size: usize,
        sort_field: impl Into<String>,
        sort_direction: &str,
    ) -> &mut Self {
        self.query_builder()
            .group_by_directed(field, size, sort_field, sort_direction);
        self
    }

    fn group_by_raw(&mut self, collapse: JsonValue) -> &mut Self {
        self.query_builder().group_by_raw(collapse);
        self
    }

    fn where_eq(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.query_builder().where_eq(field, value);
        self
    }

    fn where_not(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.query_builder().where_not(field, value);
        self
    }

    fn where_like(&mut self, field: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.query_builder().where_like(field, pattern);
        self
    }

    fn where_not_like(
        &mut self,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> &mut Self {
        self.query_builder().where_not_like(field, pattern);
        self
    }

    fn where_in<I, V>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.query_builder().where_in(field, values);
        self
    }

    fn where_not_in<I, V>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.query_builder().where_not_in(field, values);
        self
    }

    fn where_has(&mut self, field: impl Into<String>) -> &mut Self {
        self.query_builder().where_has(field);
        self
    }

    fn where_has_not(&mut self, field: impl Into<String>) -> &mut Self {
        self.query_builder().where_has_not(field);
        self
    }

    fn where_gt(&mut self, field: &str, value: f64) -> &mut Self {
        self.query_builder().where_gt(field, value);
        self
    }

    fn where_gte(&mut self, field: &str, value: f64) -> &mut Self {
        self.query_builder().where_gte(field, value);
        self
    }

    fn where_lt(&mut self, field: &str, value: f64) -> &mut Self {
        self.query_builder().where_lt(field, value);
        self
    }

    fn where_lte(&mut self, field: &str, value: f64) -> &mut Self {
        self.query_builder().where_lte(field, value);
        self
    }

    fn where_raw(&mut self, clause: JsonValue) -> &mut Self {
        self.query_builder().where_raw(clause);
        self
    }

    fn index(&mut self, index: impl Into<String>) -> &mut QueryBuilder {
        self.query_builder().index(index)
    }

    fn aggr(
        &mut self,
        name: impl Into<String>,
        field: &str,
        size: Option<usize>,
    ) -> &mut QueryBuilder {
        self.query_builder().aggr(name, field, size)
    }

    fn aggr_raw(&mut self, name: impl Into<String>, aggregation: JsonValue) -> &mut QueryBuilder {
        self.query_builder().aggr_raw(name, aggregation)
    }
}
