//! Diff Engine (C3), ported from `PALDDiffCalculator` in
//! `original_source/src/logic/pald_diff_calculation.py`.

use pald_extraction::record::LightRecord;
use pald_utils::Value;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    Match,
    Hallucination,
    Missing,
}

#[derive(Clone, Debug)]
pub struct DiffEntry {
    pub description_value: Option<Value>,
    pub embodiment_value: Option<Value>,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct DiffMetadata {
    pub error: bool,
    pub error_message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DiffResult {
    pub matches: BTreeMap<String, DiffEntry>,
    pub hallucinations: BTreeMap<String, DiffEntry>,
    pub missing: BTreeMap<String, DiffEntry>,
    pub similarity: f64,
    pub classifications: BTreeMap<String, FieldStatus>,
    pub summary: String,
    pub metadata: DiffMetadata,
}

impl Default for DiffResult {
    fn default() -> Self {
        Self {
            matches: BTreeMap::new(),
            hallucinations: BTreeMap::new(),
            missing: BTreeMap::new(),
            similarity: 1.0,
            classifications: BTreeMap::new(),
            summary: String::new(),
            metadata: DiffMetadata::default(),
        }
    }
}

fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => {
            x.trim().eq_ignore_ascii_case(y.trim())
        }
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() <= 1.0,
            _ => a == b,
        },
    }
}

fn is_more_specific(candidate: &Value, baseline: &Value) -> bool {
    match (candidate, baseline) {
        (Value::String(c), Value::String(b)) => c.trim().len() > b.trim().len(),
        (Value::Object(c), Value::Object(b)) => c.len() > b.len(),
        _ => false,
    }
}

fn classify(
    desc: Option<&Value>,
    emb: Option<&Value>,
) -> (FieldStatus, String) {
    let desc_meaningful = desc.map(|v| v.is_meaningful()).unwrap_or(false);
    let emb_meaningful = emb.map(|v| v.is_meaningful()).unwrap_or(false);

    match (desc_meaningful, emb_meaningful) {
        (true, true) => {
            let (d, e) = (desc.unwrap(), emb.unwrap());
            if values_match(d, e) {
                (FieldStatus::Match, "values match".to_string())
            } else if is_more_specific(e, d) {
                (
                    FieldStatus::Hallucination,
                    "embodiment is more specific than description".to_string(),
                )
            } else {
                (FieldStatus::Match, "acceptable variant".to_string())
            }
        }
        (false, true) => (
            FieldStatus::Hallucination,
            "added in embodiment".to_string(),
        ),
        (true, false) => (FieldStatus::Missing, "missing from embodiment".to_string()),
        (false, false) => (FieldStatus::Match, "both absent".to_string()),
    }
}

fn union_paths(description: &LightRecord, embodiment: &LightRecord) -> Vec<String> {
    let mut paths: std::collections::BTreeSet<String> = description.field_paths().into_iter().collect();
    paths.extend(embodiment.field_paths());
    paths.into_iter().collect()
}

pub fn diff(description: &LightRecord, embodiment: &LightRecord) -> DiffResult {
    let outcome = std::panic::catch_unwind(|| diff_inner(description, embodiment));
    match outcome {
        Ok(result) => result,
        Err(_) => {
            warn!("diff computation panicked, returning error diff result");
            DiffResult {
                similarity: 0.0,
                summary: "Error calculating diff: internal diff error".to_string(),
                metadata: DiffMetadata {
                    error: true,
                    error_message: Some("internal diff error".to_string()),
                },
                ..Default::default()
            }
        }
    }
}

fn diff_inner(description: &LightRecord, embodiment: &LightRecord) -> DiffResult {
    let paths = union_paths(description, embodiment);

    let mut matches = BTreeMap::new();
    let mut hallucinations = BTreeMap::new();
    let mut missing = BTreeMap::new();
    let mut classifications = BTreeMap::new();

    for path in &paths {
        let desc_value = description.value_at_path(path).cloned();
        let emb_value = embodiment.value_at_path(path).cloned();
        let (status, reason) = classify(desc_value.as_ref(), emb_value.as_ref());

        let entry = DiffEntry {
            description_value: desc_value,
            embodiment_value: emb_value,
            reason,
        };

        classifications.insert(path.clone(), status);
        match status {
            FieldStatus::Match => {
                matches.insert(path.clone(), entry);
            }
            FieldStatus::Hallucination => {
                hallucinations.insert(path.clone(), entry);
            }
            FieldStatus::Missing => {
                missing.insert(path.clone(), entry);
            }
        }
    }

    let similarity = similarity_score(matches.len(), hallucinations.len(), missing.len(), paths.len());
    let summary = generate_summary(&matches, &hallucinations, &missing, similarity);

    DiffResult {
        matches,
        hallucinations,
        missing,
        similarity,
        classifications,
        summary,
        metadata: DiffMetadata::default(),
    }
}

fn similarity_score(matches: usize, hallucinations: usize, missing: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    let raw = (matches as f64 - 0.5 * hallucinations as f64 - 0.8 * missing as f64) / total as f64;
    (raw.max(0.0) * 1000.0).round() / 1000.0
}

fn generate_summary(
    matches: &BTreeMap<String, DiffEntry>,
    hallucinations: &BTreeMap<String, DiffEntry>,
    missing: &BTreeMap<String, DiffEntry>,
    similarity: f64,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "PALD Comparison Summary (Similarity: {:.1}%)",
        similarity * 100.0
    ));
    lines.push(format!("\u{2713} {} matching fields", matches.len()));

    if !hallucinations.is_empty() {
        lines.push(format!(
            "\u{26a0} {} potential hallucinations",
            hallucinations.len()
        ));
        for path in hallucinations.keys().take(3) {
            lines.push(format!("  - {path}: added in embodiment"));
        }
    }

    if !missing.is_empty() {
        lines.push(format!("\u{274c} {} missing fields", missing.len()));
        for path in missing.keys().take(3) {
            lines.push(format!("  - {path}: missing from embodiment"));
        }
    }

    let band = if similarity >= 0.8 {
        "High"
    } else if similarity >= 0.6 {
        "Moderate"
    } else if similarity >= 0.4 {
        "Low"
    } else {
        "Poor"
    };
    lines.push(format!("Assessment: {band} consistency"));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pald_extraction::record::LightRecord;

    fn record_from(pairs: &[(&str, &str, Value)]) -> LightRecord {
        let mut r = LightRecord::default();
        for (section, field, value) in pairs {
            r.set(section, field, value.clone());
        }
        r
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let a = record_from(&[("global_design_level", "type", Value::from("human"))]);
        let b = record_from(&[("detailed_level", "gender", Value::from("female"))]);
        let result = diff(&a, &b);
        let total: usize = result.matches.len() + result.hallucinations.len() + result.missing.len();
        assert_eq!(total, result.classifications.len());
    }

    #[test]
    fn identical_records_have_similarity_one() {
        let a = record_from(&[("global_design_level", "type", Value::from("human"))]);
        let result = diff(&a, &a.clone());
        assert_eq!(result.similarity, 1.0);
    }

    #[test]
    fn swapping_inputs_exchanges_hallucination_and_missing() {
        let a = record_from(&[("detailed_level", "clothing", Value::from("suit"))]);
        let b = record_from(&[("middle_design_level", "lifelikeness", Value::Int(5))]);

        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        assert_eq!(forward.matches.len(), backward.matches.len());
        assert_eq!(forward.hallucinations.len(), backward.missing.len());
        assert_eq!(forward.missing.len(), backward.hallucinations.len());
    }

    #[test]
    fn scenario_c_hallucination_and_missing() {
        let desc = record_from(&[
            ("global_design_level", "type", Value::from("human")),
            ("middle_design_level", "role", Value::from("teacher")),
            ("middle_design_level", "competence", Value::Int(7)),
            ("detailed_level", "age", Value::Int(30)),
            ("detailed_level", "gender", Value::from("female")),
            ("detailed_level", "clothing", Value::from("professional suit")),
        ]);
        let emb = record_from(&[
            ("global_design_level", "type", Value::from("human")),
            ("middle_design_level", "role", Value::from("teacher")),
            ("middle_design_level", "competence", Value::Int(6)),
            ("middle_design_level", "lifelikeness", Value::Int(5)),
            ("detailed_level", "age", Value::Int(30)),
            ("detailed_level", "gender", Value::from("female")),
        ]);

        let result = diff(&desc, &emb);
        assert!(result.matches.contains_key("global_design_level.type"));
        assert!(result.matches.contains_key("middle_design_level.role"));
        assert!(result.matches.contains_key("detailed_level.age"));
        assert!(result.matches.contains_key("detailed_level.gender"));
        assert!(result.matches.contains_key("middle_design_level.competence"));
        assert_eq!(result.hallucinations.len(), 1);
        assert!(result.hallucinations.contains_key("middle_design_level.lifelikeness"));
        assert_eq!(result.missing.len(), 1);
        assert!(result.missing.contains_key("detailed_level.clothing"));
        assert!(result.similarity >= 0.5 && result.similarity <= 0.9);
        assert!(result.summary.contains("1 potential hallucinations"));
        assert!(result.summary.contains("1 missing fields"));
    }
}
