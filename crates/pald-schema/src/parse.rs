//! Direct and wrapped JSON schema parsing.

use crate::model::{FieldDescriptor, FieldType, Schema, SECTION_NAMES};
use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum SchemaParseError {
    #[error("schema JSON is not an object")]
    NotAnObject,
    #[error("schema is missing required sections: {0:?}")]
    MissingSections(Vec<&'static str>),
}

/// Parse either the "direct" shape (sections at root) or the "wrapped" shape
/// (sections under `properties`). Unknown top-level sections are permitted —
/// they are simply ignored here and flagged as warnings at record-validation
/// time, not at schema-parse time.
pub fn parse_schema(raw: &Json) -> Result<Schema, SchemaParseError> {
    let root = raw.as_object().ok_or(SchemaParseError::NotAnObject)?;

    let sections_obj = if let Some(Json::Object(props)) = root.get("properties") {
        props
    } else {
        root
    };

    let missing: Vec<&'static str> = SECTION_NAMES
        .iter()
        .filter(|name| !sections_obj.contains_key(**name))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(SchemaParseError::MissingSections(missing));
    }

    let section = |name: &str| -> BTreeMap<String, FieldDescriptor> {
        match sections_obj.get(name) {
            Some(Json::Object(fields)) => fields
                .iter()
                .map(|(k, v)| (k.clone(), parse_descriptor(v)))
                .collect(),
            _ => BTreeMap::new(),
        }
    };

    Ok(Schema {
        global_design_level: section("global_design_level"),
        middle_design_level: section("middle_design_level"),
        detailed_level: section("detailed_level"),
    })
}

fn parse_descriptor(raw: &Json) -> FieldDescriptor {
    let Some(obj) = raw.as_object() else {
        return FieldDescriptor::default();
    };

    let types = match obj.get("type") {
        Some(Json::String(s)) => FieldType::from_str(s).into_iter().collect(),
        Some(Json::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .filter_map(FieldType::from_str)
            .collect(),
        _ => Vec::new(),
    };

    let enum_values = obj.get("enum").and_then(|v| v.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect()
    });

    let range = match (obj.get("minimum"), obj.get("maximum")) {
        (Some(min), Some(max)) => match (min.as_f64(), max.as_f64()) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        },
        _ => None,
    };

    let properties = obj.get("properties").and_then(|v| v.as_object()).map(|props| {
        props
            .iter()
            .map(|(k, v)| (k.clone(), parse_descriptor(v)))
            .collect()
    });

    FieldDescriptor {
        types,
        enum_values,
        range,
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_direct_shape() {
        let raw = json!({
            "global_design_level": {"type": {"type": "string", "enum": ["human", "cartoon"]}},
            "middle_design_level": {"role": {"type": "string"}},
            "detailed_level": {"age": {"type": ["string", "integer"]}},
        });
        let schema = parse_schema(&raw).unwrap();
        assert!(schema.global_design_level.contains_key("type"));
        assert_eq!(
            schema.global_design_level["type"].enum_values.as_ref().unwrap().len(),
            2
        );
    }

    #[test]
    fn parses_wrapped_shape() {
        let raw = json!({
            "properties": {
                "global_design_level": {"type": {"type": "string"}},
                "middle_design_level": {},
                "detailed_level": {},
            }
        });
        assert!(parse_schema(&raw).is_ok());
    }

    #[test]
    fn missing_section_is_an_error() {
        let raw = json!({"global_design_level": {}});
        assert!(parse_schema(&raw).is_err());
    }
}
