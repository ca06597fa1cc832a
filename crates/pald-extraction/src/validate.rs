//! Record validation against a [`Schema`], ported from `validate_extraction`
//! (`original_source/src/logic/pald_light_extraction.py`): type/enum/range
//! checks, with type and range violations as errors and enum/unknown-field
//! deviations as warnings.

use crate::record::{Issue, LightRecord};
use pald_schema::Schema;

pub fn validate_record(record: &mut LightRecord, schema: &Schema) {
    let sections: Vec<(String, Vec<String>)> = record
        .sections
        .iter()
        .map(|(s, f)| (s.clone(), f.keys().cloned().collect()))
        .collect();

    for (section, fields) in sections {
        let Some(section_schema) = schema.section(&section) else {
            record.validation_issues.push(Issue::warning(
                &section,
                format!("unknown schema section: {section}"),
            ));
            continue;
        };

        for field in fields {
            let path = format!("{section}.{field}");
            let Some(descriptor) = section_schema.get(&field) else {
                record
                    .validation_issues
                    .push(Issue::warning(&path, format!("unknown field: {path}")));
                continue;
            };

            let Some(value) = record.sections[&section].get(&field) else {
                continue;
            };

            if !descriptor.accepts_type(value.type_name()) {
                record.validation_issues.push(Issue::error(
                    &path,
                    format!(
                        "type mismatch: expected one of {:?}, got {}",
                        descriptor.types,
                        value.type_name()
                    ),
                ));
            }

            if let Some(enum_values) = &descriptor.enum_values {
                if let Some(s) = value.as_str() {
                    if !enum_values.iter().any(|v| v == s) {
                        record.validation_issues.push(Issue::warning(
                            &path,
                            format!("value {s:?} is not in enum {enum_values:?}"),
                        ));
                    }
                }
            }

            if let Some((min, max)) = descriptor.range {
                if let Some(n) = value.as_f64() {
                    if n < min || n > max {
                        record.validation_issues.push(Issue::error(
                            &path,
                            format!("value {n} out of range [{min}, {max}]"),
                        ));
                    }
                }
            }
        }
    }
}

/// Sorted dotted paths of every field the schema defines, used to compute
/// `filled_fields`/`missing_fields`.
pub fn schema_field_paths(schema: &Schema) -> Vec<String> {
    let mut paths = Vec::new();
    for section_name in pald_schema::SECTION_NAMES {
        if let Some(section) = schema.section(section_name) {
            for field in section.keys() {
                paths.push(format!("{section_name}.{field}"));
            }
        }
    }
    paths.sort();
    paths
}
