//! Light Extractor (C2): converts free text into a schema-conformant attribute
//! record plus a compressed prompt, grounded on
//! `original_source/src/logic/pald_light_extraction.py`.

pub mod compress;
pub mod confidence;
pub mod extract;
pub mod patterns;
pub mod record;
pub mod validate;

use pald_schema::Schema;
use record::{CompressedPrompt, LightRecord};
use tracing::warn;

pub struct ExtractionOutcome {
    pub record: LightRecord,
    pub compressed_prompt: CompressedPrompt,
}

/// `extract(description, embodiment) -> LightRecord + CompressedPrompt + Issues
/// + Confidence`. Never panics out to the caller: any internal panic is caught
/// at this boundary and converted to the degraded fallback shape, per the
/// fallbacks-over-exceptions design note.
pub fn extract(description: &str, embodiment: Option<&str>, schema: &Schema) -> ExtractionOutcome {
    let text = extract::combined_text(description, embodiment);

    let outcome = std::panic::catch_unwind(|| extract_inner(&text, schema));
    match outcome {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("extraction panicked, falling back to degraded record");
            let record = extract::fallback_record(description, "internal extraction error");
            ExtractionOutcome {
                compressed_prompt: CompressedPrompt("person".to_string()),
                record,
            }
        }
    }
}

fn extract_inner(text: &str, schema: &Schema) -> ExtractionOutcome {
    if text.trim().is_empty() {
        let mut record = extract::fallback_record(text, "empty input");
        // §4.2 "Zero-length input yields confidence 0", overriding
        // `fallback_record`'s general 0.1 (used for non-empty failures).
        record.confidence = 0.0;
        return ExtractionOutcome {
            compressed_prompt: CompressedPrompt("person".to_string()),
            record,
        };
    }

    let mut record = LightRecord::default();
    extract::extract_global_design_level(text, &mut record);
    extract::extract_middle_design_level(text, &mut record);
    extract::extract_detailed_level(text, &mut record);
    record.drop_empty_sections();

    validate::validate_record(&mut record, schema);

    let all_paths = validate::schema_field_paths(schema);
    let filled_paths = record.field_paths();
    let filled_set: std::collections::HashSet<&String> = filled_paths.iter().collect();
    let missing_paths: Vec<String> = all_paths
        .iter()
        .filter(|p| !filled_set.contains(p))
        .cloned()
        .collect();

    // §4.2: fill_rate is filled fields over total fields *in the produced
    // record*, not the schema's full field count — the record never holds a
    // null/empty placeholder, so every field present in it is already filled.
    record.confidence = confidence::calculate_confidence(filled_paths.len(), filled_paths.len(), text.len());
    record.filled_fields = filled_paths;
    record.missing_fields = missing_paths;

    let compressed_prompt = compress::compress_for_prompt(&record);

    ExtractionOutcome {
        record,
        compressed_prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pald_schema::built_in_schema;

    #[test]
    fn empty_description_yields_fallback() {
        let schema = built_in_schema();
        let outcome = extract("", None, &schema);
        assert_eq!(outcome.record.confidence, 0.0);
        assert_eq!(outcome.compressed_prompt.0, "person");
    }

    #[test]
    fn scenario_a_human_teacher() {
        let schema = built_in_schema();
        let outcome = extract(
            "A friendly female teacher wearing a blue dress, she looks realistic and competent",
            None,
            &schema,
        );
        assert_eq!(
            outcome.record.get("global_design_level", "type").unwrap().as_str(),
            Some("human")
        );
        assert_eq!(
            outcome.record.get("middle_design_level", "role").unwrap().as_str(),
            Some("teacher")
        );
        assert_eq!(
            outcome.record.get("detailed_level", "gender").unwrap().as_str(),
            Some("female")
        );
        let clothing = outcome.record.get("detailed_level", "clothing").unwrap().as_str().unwrap();
        assert!(clothing.contains("blue dress"));
        assert!(outcome.record.confidence > 0.0);
        assert!(outcome.compressed_prompt.0.contains("teacher"));
    }

    #[test]
    fn scenario_b_cartoon_character() {
        let schema = built_in_schema();
        let outcome = extract("An animated Mickey Mouse character that moves around", None, &schema);
        assert_eq!(
            outcome.record.get("global_design_level", "type").unwrap().as_str(),
            Some("cartoon")
        );
        let cartoon = outcome.record.get("global_design_level", "cartoon").unwrap();
        if let pald_utils::Value::Object(fields) = cartoon {
            assert_eq!(fields.get("animation").unwrap().as_str(), Some("animated"));
            assert!(fields
                .get("representation")
                .unwrap()
                .as_str()
                .unwrap()
                .contains("mickey mouse"));
        } else {
            panic!("expected cartoon object");
        }
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let schema = built_in_schema();
        let a = extract("A young male assistant wearing a suit", None, &schema);
        let b = extract("A young male assistant wearing a suit", None, &schema);
        assert_eq!(a.record.field_paths(), b.record.field_paths());
        assert_eq!(a.compressed_prompt, b.compressed_prompt);
    }
}
