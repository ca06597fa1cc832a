//! The discriminated value type used for record fields (see the "dynamic typing"
//! design note): the source treats attribute values as heterogeneous JSON-ish
//! data, so record fields target this enum rather than a generic `serde_json::Value`
//! map, with explicit conversions performed at validation sites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A record field value. `BTreeMap` (not `HashMap`) keeps object key order
/// deterministic, which matters for compressed-prompt assembly and test fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// A value is "meaningful" per the diff engine's definition: not null, not an
    /// empty (post-trim) string, not an empty container.
    pub fn is_meaningful(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => !s.trim().is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The JSON Schema type name this value would report as, used when
    /// validating against a `FieldDescriptor`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                let joined: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", joined.join(", "))
            }
            Value::Object(_) => write!(f, "<object>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_not_meaningful() {
        assert!(!Value::String("   ".into()).is_meaningful());
        assert!(Value::String("x".into()).is_meaningful());
    }

    #[test]
    fn empty_containers_not_meaningful() {
        assert!(!Value::List(vec![]).is_meaningful());
        assert!(!Value::Object(BTreeMap::new()).is_meaningful());
        assert!(!Value::Null.is_meaningful());
    }

    #[test]
    fn type_names_match_schema_vocabulary() {
        assert_eq!(Value::Int(1).type_name(), "integer");
        assert_eq!(Value::from("x").type_name(), "string");
    }
}
