//! The built-in fallback schema, ported field-for-field from
//! `PALDSchemaLoader.get_default_schema` in
//! `original_source/config/pald_enhancement.py`. Returned whenever the schema
//! file is absent, malformed, or fails section-presence validation.

use crate::model::{FieldDescriptor, FieldType, Schema};
use std::collections::BTreeMap;

fn string_field() -> FieldDescriptor {
    FieldDescriptor {
        types: vec![FieldType::String],
        ..Default::default()
    }
}

fn enum_field(values: &[&str]) -> FieldDescriptor {
    FieldDescriptor {
        types: vec![FieldType::String],
        enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
        ..Default::default()
    }
}

fn int_range_field(min: f64, max: f64) -> FieldDescriptor {
    FieldDescriptor {
        types: vec![FieldType::Integer],
        range: Some((min, max)),
        ..Default::default()
    }
}

pub fn default_schema() -> Schema {
    let mut global = BTreeMap::new();
    global.insert(
        "type".to_string(),
        enum_field(&["human", "cartoon", "object", "animal", "fantasy_figure"]),
    );
    let mut cartoon_props = BTreeMap::new();
    cartoon_props.insert("representation".to_string(), string_field());
    cartoon_props.insert("animation".to_string(), enum_field(&["animated", "static"]));
    global.insert(
        "cartoon".to_string(),
        FieldDescriptor {
            types: vec![FieldType::Object],
            properties: Some(cartoon_props),
            ..Default::default()
        },
    );
    global.insert("object_type".to_string(), string_field());
    global.insert("animal_type".to_string(), string_field());
    global.insert("fantasy_figure_type".to_string(), string_field());
    global.insert("other_characteristics".to_string(), string_field());

    let mut middle = BTreeMap::new();
    for scale in [
        "lifelikeness",
        "realism",
        "animation_level",
        "likeability",
        "competence",
    ] {
        middle.insert(scale.to_string(), int_range_field(1.0, 7.0));
    }
    middle.insert("role".to_string(), string_field());
    middle.insert("partial_representation".to_string(), string_field());
    middle.insert("role_model".to_string(), string_field());

    let mut detailed = BTreeMap::new();
    detailed.insert(
        "age".to_string(),
        FieldDescriptor {
            types: vec![FieldType::String, FieldType::Integer],
            ..Default::default()
        },
    );
    detailed.insert(
        "gender".to_string(),
        enum_field(&["female", "male", "non-binary", "other"]),
    );
    detailed.insert("clothing".to_string(), string_field());
    detailed.insert("weight".to_string(), string_field());
    detailed.insert("other_features".to_string(), string_field());

    Schema {
        global_design_level: global,
        middle_design_level: middle,
        detailed_level: detailed,
    }
}
