//! Rust code generator for index documents

mod types;

pub use types::{field_ident, field_type};

use crate::error::{Error, Result};
use crate::generators::{Generator, GeneratorConfig};
use crate::ir::IndexSchema;
use heck::{ToSnakeCase, ToUpperCamelCase};

/// Output of the Rust generator
#[derive(Debug, Clone, PartialEq)]
pub struct RustOutput {
    pub type_name: String,
    /// Suggested file name (`snake_case.rs`)
    pub file_name: String,
    pub code: String,
}

pub struct RustGenerator {
    config: GeneratorConfig,
}

impl RustGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }

    fn type_name(&self, schema: &IndexSchema) -> Result<String> {
        let name = match &self.config.type_name {
            Some(name) => name.clone(),
            None => schema.index.to_upper_camel_case(),
        };

        match name.chars().next() {
            None => Err(Error::InvalidTypeName(schema.index.clone())),
            Some(first) if first.is_ascii_digit() => Ok(format!("Index{name}")),
            Some(_) if name.chars().all(|c| c.is_alphanumeric() || c == '_') => Ok(name),
            Some(_) => Err(Error::InvalidTypeName(name)),
        }
    }
}

impl Generator for RustGenerator {
    type Output = RustOutput;

    fn generate(&self, schema: &IndexSchema) -> Result<RustOutput> {
        let type_name = self.type_name(schema)?;
        let mut code = String::new();

        if self.config.generate_docs {
            code.push_str(&format!("//! `{}` document type\n", schema.index));
            code.push_str("//!\n//! Generated from the index mapping by `esorm meta`.\n\n");
        }

        if self.config.generate_kind_impl {
            code.push_str("use esorm_model::DocumentKind;\n");
        }
        code.push_str("use serde::{Deserialize, Serialize};\n\n");

        code.push_str(&types::generate_struct(schema, &type_name, &self.config));
        code.push('\n');

        if self.config.generate_kind_impl {
            code.push('\n');
            code.push_str(&types::generate_kind_impl(schema, &type_name));
            code.push('\n');
        }

        Ok(RustOutput {
            file_name: format!("{}.rs", type_name.to_snake_case()),
            type_name,
            code,
        })
    }
}
