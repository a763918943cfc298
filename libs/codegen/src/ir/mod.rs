//! Intermediate Representation (IR)
//!
//! Language-agnostic view of an index mapping: one entry per top-level field,
//! with the engine type already folded into a small set of kinds.

use serde::{Deserialize, Serialize};

/// Every top-level field of one index, in mapping order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSchema {
    pub index: String,
    pub fields: Vec<FieldDefinition>,
}

impl IndexSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A single mapped field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Name as stored in the index.
    pub name: String,
    pub kind: FieldKind,
    /// Holds a list of values. Mappings cannot express this, so it is opted
    /// into per field by the caller.
    pub is_array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `nested`
    Nested,
    /// `long`, `integer`
    Integer,
    /// `float`, `double`
    Float,
    /// `text`, `keyword`, `string`
    Text,
    Boolean,
    /// Explicit `object` or untyped entry with sub-properties.
    Object,
    /// Anything else (dates, geo points, ...), kept under its engine name.
    Other(String),
}

impl FieldKind {
    /// Fold an engine mapping type into a kind.
    pub fn from_mapping_type(mapping_type: &str) -> Self {
        match mapping_type {
            "nested" => Self::Nested,
            "long" | "integer" => Self::Integer,
            "float" | "double" => Self::Float,
            "text" | "keyword" | "string" => Self::Text,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            other => Self::Other(other.to_string()),
        }
    }
}
