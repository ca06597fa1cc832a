//! Schema types. Descriptors are represented as a tagged tree (per the "cyclic
//! references" design note) rather than a generic JSON map, so a typed language
//! can pattern-match on them instead of re-parsing JSON at every use site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SECTION_NAMES: [&str; 3] = [
    "global_design_level",
    "middle_design_level",
    "detailed_level",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl FieldType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// Whether a value of the given `Value::type_name()` satisfies this type.
    /// Integers also satisfy `Number` (a permitted widening, matching the
    /// language-agnostic type map the extractor validates against).
    pub fn accepts(&self, value_type_name: &str) -> bool {
        match self {
            FieldType::Number => value_type_name == "number" || value_type_name == "integer",
            _ => format!("{self:?}").to_lowercase() == value_type_name,
        }
    }
}

/// A field descriptor: one or more permitted types, an optional enum
/// constraint, an optional numeric range, and optional nested properties.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub types: Vec<FieldType>,
    pub enum_values: Option<Vec<String>>,
    pub range: Option<(f64, f64)>,
    pub properties: Option<BTreeMap<String, FieldDescriptor>>,
}

impl FieldDescriptor {
    pub fn accepts_type(&self, value_type_name: &str) -> bool {
        if self.types.is_empty() {
            return true;
        }
        self.types.iter().any(|t| t.accepts(value_type_name))
    }
}

/// The three-section attribute schema.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schema {
    pub global_design_level: BTreeMap<String, FieldDescriptor>,
    pub middle_design_level: BTreeMap<String, FieldDescriptor>,
    pub detailed_level: BTreeMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, FieldDescriptor>> {
        match name {
            "global_design_level" => Some(&self.global_design_level),
            "middle_design_level" => Some(&self.middle_design_level),
            "detailed_level" => Some(&self.detailed_level),
            _ => None,
        }
    }

    pub fn field(&self, section: &str, field: &str) -> Option<&FieldDescriptor> {
        self.section(section)?.get(field)
    }
}
