//! Document type generator
//!
//! Turns the `properties` of a live index mapping into a typed Rust struct
//! that implements `esorm_model::DocumentKind`.
//!
//! ## Architecture
//!
//! 1. **Parser**: reads mapping properties into the IR
//! 2. **IR**: one [`FieldDefinition`](ir::FieldDefinition) per top-level field
//! 3. **Generators**: emit source from the IR
//!
//! ```rust
//! use esorm_codegen::{generate_rust, GeneratorConfig};
//! use serde_json::json;
//! use std::collections::BTreeSet;
//!
//! let properties = json!({"title": {"type": "text"}, "likes": {"type": "long"}});
//! let output = generate_rust(
//!     "posts",
//!     properties.as_object().unwrap(),
//!     &BTreeSet::new(),
//!     GeneratorConfig::default(),
//! )
//! .unwrap();
//! assert!(output.code.contains("pub likes: Option<i64>"));
//! ```

pub mod error;
pub mod generators;
pub mod ir;
pub mod parser;
pub mod utils;

pub use error::{Error, Result};
pub use generators::rust::{RustGenerator, RustOutput};
pub use generators::{Generator, GeneratorConfig};
pub use ir::{FieldDefinition, FieldKind, IndexSchema};

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Parse mapping properties and run the Rust generator over them.
pub fn generate_rust(
    index: &str,
    properties: &Map<String, Value>,
    array_fields: &BTreeSet<String>,
    config: GeneratorConfig,
) -> Result<RustOutput> {
    let schema = parser::parse_properties(index, properties, array_fields)?;
    RustGenerator::new(config).generate(&schema)
}
