//! Schema Registry (C1): loads, validates, caches, and watches the versioned
//! PALD attribute schema.

pub mod default_schema;
pub mod model;
pub mod parse;
pub mod registry;

pub use default_schema::default_schema as built_in_schema;
pub use model::{FieldDescriptor, FieldType, Schema, SECTION_NAMES};
pub use parse::{parse_schema, SchemaParseError};
pub use registry::SchemaRegistry;
