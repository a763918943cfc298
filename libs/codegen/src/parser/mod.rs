//! Parser for index mappings
//!
//! Turns the `properties` object of an index mapping into an [`IndexSchema`].

use crate::error::{Error, Result};
use crate::ir::{FieldDefinition, FieldKind, IndexSchema};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Parse top-level mapping properties. Fields listed in `array_fields` are
/// marked as lists.
pub fn parse_properties(
    index: &str,
    properties: &Map<String, Value>,
    array_fields: &BTreeSet<String>,
) -> Result<IndexSchema> {
    let fields = properties
        .iter()
        .map(|(name, definition)| parse_field(name, definition, array_fields.contains(name)))
        .collect::<Result<Vec<_>>>()?;

    Ok(IndexSchema {
        index: index.to_string(),
        fields,
    })
}

fn parse_field(name: &str, definition: &Value, is_array: bool) -> Result<FieldDefinition> {
    let definition = definition.as_object().ok_or_else(|| Error::InvalidField {
        field: name.to_string(),
        reason: "mapping entry is not an object".into(),
    })?;

    let kind = match definition.get("type") {
        Some(Value::String(mapping_type)) => FieldKind::from_mapping_type(mapping_type),
        Some(other) => {
            return Err(Error::InvalidField {
                field: name.to_string(),
                reason: format!("'type' must be a string, got {other}"),
            })
        }
        // Objects are mapped implicitly by their sub-properties.
        None if definition.contains_key("properties") => FieldKind::Object,
        None => {
            return Err(Error::InvalidField {
                field: name.to_string(),
                reason: "missing 'type'".into(),
            })
        }
    };

    Ok(FieldDefinition {
        name: name.to_string(),
        kind,
        is_array,
    })
}
