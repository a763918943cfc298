//! Clause primitives and their translation into request JSON.
//!
//! Each primitive knows how to render itself as the engine-native fragment
//! that the builder places under `query.bool`, `sort` or `collapse`.

use serde_json::{json, Map, Value as JsonValue};

/// Sort direction for `sort` clauses and collapsed inner hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse exactly `asc` or `desc`, returning `fallback` for anything else.
    pub fn parse_or(value: &str, fallback: Self) -> Self {
        match value {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => fallback,
        }
    }
}

/// Anything but `"asc"` becomes descending. Matching is case-sensitive.
impl From<&str> for SortDirection {
    fn from(value: &str) -> Self {
        Self::parse_or(value, Self::Desc)
    }
}

/// A single predicate placed in `must` or `must_not`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact value match.
    Term { field: String, value: JsonValue },
    /// Wildcard pattern (`*`, `?`).
    Wildcard { field: String, pattern: String },
    /// Membership in a value set.
    Terms {
        field: String,
        values: Vec<JsonValue>,
    },
    /// Field presence.
    Exists { field: String },
    /// Engine-native clause passed through untouched.
    Raw(JsonValue),
}

impl Predicate {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Self::Wildcard { field, pattern } => {
                json!({ "wildcard": { field.as_str(): pattern } })
            }
            Self::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            Self::Exists { field } => json!({ "exists": { "field": field } }),
            Self::Raw(clause) => clause.clone(),
        }
    }
}

/// Range comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    fn is_lower(self) -> bool {
        matches!(self, Self::Gt | Self::Gte)
    }
}

/// How successive range calls combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Bounds accumulate per field: one lower and one upper bound each.
    #[default]
    Accumulate,
    /// Every range call replaces the whole range filter.
    LastWins,
}

/// Lower and upper bound on one field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeBounds {
    lower: Option<(RangeOp, f64)>,
    upper: Option<(RangeOp, f64)>,
}

impl RangeBounds {
    fn set(&mut self, op: RangeOp, value: f64) {
        if op.is_lower() {
            self.lower = Some((op, value));
        } else {
            self.upper = Some((op, value));
        }
    }

    fn to_json(self) -> JsonValue {
        let mut bounds = Map::new();
        for (op, value) in [self.lower, self.upper].into_iter().flatten() {
            bounds.insert(op.as_str().to_string(), JsonValue::from(value));
        }
        JsonValue::Object(bounds)
    }
}

/// The range constraints of a query, in first-touched field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFilter {
    fields: Vec<(String, RangeBounds)>,
}

impl RangeFilter {
    pub fn apply(&mut self, mode: RangeMode, field: &str, op: RangeOp, value: f64) {
        if mode == RangeMode::LastWins {
            self.fields.clear();
        }

        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, bounds)) => bounds.set(op, value),
            None => {
                let mut bounds = RangeBounds::default();
                bounds.set(op, value);
                self.fields.push((field.to_string(), bounds));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One `range` clause per field, for the `filter` context.
    pub fn to_clauses(&self) -> Vec<JsonValue> {
        self.fields
            .iter()
            .map(|(field, bounds)| json!({ "range": { field.as_str(): bounds.to_json() } }))
            .collect()
    }
}

/// A `sort` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SortClause {
    Field {
        field: String,
        direction: SortDirection,
    },
    Raw(JsonValue),
}

impl SortClause {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Field { field, direction } => {
                json!({ field.as_str(): { "order": direction.as_str() } })
            }
            Self::Raw(sort) => sort.clone(),
        }
    }
}

/// A `collapse` instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSpec {
    /// Collapse on `field`, keeping `size` inner hits per group under the
    /// inner-hit name `field`.
    Field {
        field: String,
        size: usize,
        sort_field: String,
        sort_direction: SortDirection,
        /// Projection applied to inner hits; empty means all fields.
        source: Vec<String>,
    },
    Raw(JsonValue),
}

impl GroupSpec {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Field {
                field,
                size,
                sort_field,
                sort_direction,
                source,
            } => {
                let mut inner_hits = json!({
                    "name": field,
                    "size": size,
                    "sort": { sort_field.as_str(): sort_direction.as_str() },
                });
                if !source.is_empty() {
                    inner_hits["_source"] = json!(source);
                }
                json!({ "field": field, "inner_hits": inner_hits })
            }
            Self::Raw(collapse) => collapse.clone(),
        }
    }
}

/// `terms` aggregation on `field`, optionally capped at `size` buckets.
pub fn terms_aggregation(field: &str, size: Option<usize>) -> JsonValue {
    let mut terms = json!({ "field": field });
    if let Some(size) = size.filter(|size| *size > 0) {
        terms["size"] = json!(size);
    }
    json!({ "terms": terms })
}
