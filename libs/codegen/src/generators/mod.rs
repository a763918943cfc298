//! Code generators
//!
//! Each target implements [`Generator`] over the [`IndexSchema`] IR.

pub mod rust;

use crate::error::Result;
use crate::ir::IndexSchema;

pub trait Generator {
    type Output;

    fn generate(&self, schema: &IndexSchema) -> Result<Self::Output>;
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Struct name; derived from the index name when unset.
    pub type_name: Option<String>,
    /// Whether to emit doc comments on the struct and module
    pub generate_docs: bool,
    /// Whether to emit the `DocumentKind` impl pinning the index name
    pub generate_kind_impl: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            type_name: None,
            generate_docs: true,
            generate_kind_impl: true,
        }
    }
}
