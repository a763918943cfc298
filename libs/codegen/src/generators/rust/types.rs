//! Struct and field emission

use crate::generators::GeneratorConfig;
use crate::ir::{FieldDefinition, FieldKind, IndexSchema};
use heck::ToSnakeCase;
use std::collections::HashSet;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Generate the document struct for a schema.
pub fn generate_struct(schema: &IndexSchema, type_name: &str, config: &GeneratorConfig) -> String {
    let mut code = String::new();

    if config.generate_docs {
        code.push_str(&format!("/// Document stored in the `{}` index.\n", schema.index));
    }
    code.push_str("#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n");
    code.push_str(&format!("pub struct {type_name} {{\n"));

    let mut taken = HashSet::new();
    for field in &schema.fields {
        let ident = unique_ident(field_ident(&field.name), &mut taken);
        code.push_str(&generate_field(field, &ident));
    }

    code.push('}');
    code
}

/// `impl DocumentKind` pinning the index name.
pub fn generate_kind_impl(schema: &IndexSchema, type_name: &str) -> String {
    format!(
        "impl DocumentKind for {type_name} {{\n    const INDEX: Option<&'static str> = Some({:?});\n}}",
        schema.index
    )
}

fn generate_field(field: &FieldDefinition, ident: &str) -> String {
    let mut attributes = Vec::new();
    if ident.trim_start_matches("r#") != field.name {
        attributes.push(format!("rename = {:?}", field.name));
    }
    attributes.push("skip_serializing_if = \"Option::is_none\"".to_string());

    format!(
        "    #[serde({})]\n    pub {}: Option<{}>,\n",
        attributes.join(", "),
        ident,
        field_type(field)
    )
}

/// Rust type for a field, before the `Option` wrapper.
pub fn field_type(field: &FieldDefinition) -> String {
    let base = match &field.kind {
        FieldKind::Nested => return "Vec<serde_json::Value>".to_string(),
        FieldKind::Integer => "i64",
        FieldKind::Float => "f64",
        FieldKind::Text => "String",
        FieldKind::Boolean => "bool",
        FieldKind::Object => "serde_json::Map<String, serde_json::Value>",
        FieldKind::Other(_) => "serde_json::Value",
    };

    if field.is_array {
        format!("Vec<{base}>")
    } else {
        base.to_string()
    }
}

/// snake_case identifier for a stored field name.
pub fn field_ident(name: &str) -> String {
    let mut snake = name.to_snake_case();
    if snake.is_empty() || snake.starts_with(|c: char| c.is_ascii_digit()) {
        snake = format!("field_{snake}");
    }

    if NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else if KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

fn unique_ident(ident: String, taken: &mut HashSet<String>) -> String {
    let mut candidate = ident.clone();
    let mut suffix = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{ident}_{suffix}");
        suffix += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, kind: FieldKind, is_array: bool) -> FieldDefinition {
        FieldDefinition {
            name: name.into(),
            kind,
            is_array,
        }
    }

    #[test]
    fn identifiers() {
        assert_eq!(field_ident("createdAt"), "created_at");
        assert_eq!(field_ident("title"), "title");
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("2fa"), "field_2fa");
        assert_eq!(field_ident("@timestamp"), "timestamp");
    }

    #[test]
    fn types_follow_mapping_kinds() {
        assert_eq!(field_type(&field("n", FieldKind::Nested, false)), "Vec<serde_json::Value>");
        assert_eq!(field_type(&field("n", FieldKind::Nested, true)), "Vec<serde_json::Value>");
        assert_eq!(field_type(&field("l", FieldKind::Integer, false)), "i64");
        assert_eq!(field_type(&field("l", FieldKind::Integer, true)), "Vec<i64>");
        assert_eq!(field_type(&field("f", FieldKind::Float, false)), "f64");
        assert_eq!(field_type(&field("t", FieldKind::Text, true)), "Vec<String>");
        assert_eq!(
            field_type(&field("d", FieldKind::Other("date".into()), false)),
            "serde_json::Value"
        );
    }

    #[test]
    fn renamed_fields_carry_serde_rename() {
        let code = generate_field(&field("createdAt", FieldKind::Text, false), "created_at");
        assert_eq!(
            code,
            "    #[serde(rename = \"createdAt\", skip_serializing_if = \"Option::is_none\")]\n    pub created_at: Option<String>,\n"
        );

        let raw = generate_field(&field("type", FieldKind::Text, false), "r#type");
        assert!(raw.starts_with("    #[serde(skip_serializing_if"));
    }

    #[test]
    fn colliding_identifiers_get_suffixes() {
        let schema = IndexSchema {
            index: "users".into(),
            fields: vec![
                field("userId", FieldKind::Text, false),
                field("user_id", FieldKind::Text, false),
            ],
        };
        let code = generate_struct(&schema, "User", &GeneratorConfig::default());
        assert!(code.contains("pub user_id: Option<String>"));
        assert!(code.contains("pub user_id_2: Option<String>"));
    }
}
