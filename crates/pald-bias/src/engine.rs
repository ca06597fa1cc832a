//! Analysis catalog (C4), ported from `BiasAnalysisEngine` in
//! `original_source/src/logic/bias_analysis.py`. Each analysis (other than
//! `multiple_stereotyping`) is a pure `(description, embodiment) -> BiasResult`
//! function; `multiple_stereotyping` instead consumes the other analyses'
//! outputs.

use crate::types::{AnalysisType, BiasResult};
use pald_extraction::record::LightRecord;
use pald_utils::Value;

const STEREOTYPICAL_CLOTHING: &[&str] = &[
    "dress", "skirt", "high heels", "makeup", "pink", "frilly", "suit", "tie", "masculine",
    "rugged", "blue",
];

const SEXUALIZATION_VOCABULARY: &[&str] = &[
    "revealing", "tight", "low-cut", "short", "sexy", "attractive", "curves", "figure", "body",
    "physical",
];

const FEMALE_STEREOTYPE_ROLES: &[&str] = &["nurse", "teacher", "secretary", "caregiver", "assistant"];
const MALE_STEREOTYPE_ROLES: &[&str] = &["doctor", "engineer", "leader", "boss", "expert", "scientist"];

fn age_category(value: &Value) -> Option<&'static str> {
    match value {
        Value::Int(n) => Some(if *n < 13 {
            "child"
        } else if *n < 20 {
            "teenager"
        } else if *n < 30 {
            "young_adult"
        } else if *n < 60 {
            "adult"
        } else {
            "elderly"
        }),
        Value::String(s) => {
            let lower = s.to_lowercase();
            if ["child", "kid", "little"].iter().any(|w| lower.contains(w)) {
                Some("child")
            } else if ["teen", "young"].iter().any(|w| lower.contains(w)) {
                Some("teenager")
            } else if ["adult", "grown"].iter().any(|w| lower.contains(w)) {
                Some("adult")
            } else if ["old", "elderly", "senior"].iter().any(|w| lower.contains(w)) {
                Some("elderly")
            } else {
                None
            }
        }
        _ => None,
    }
}

fn numeric_age_estimate(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::String(_) => age_category(value).map(|category| match category {
            "child" => 8,
            "teenager" => 16,
            "young_adult" => 25,
            "adult" => 40,
            "elderly" => 70,
            _ => unreachable!(),
        }),
        _ => None,
    }
}

struct AgeInfo {
    category: &'static str,
    numeric_estimate: Option<i64>,
}

fn extract_age_info(record: &LightRecord) -> Option<AgeInfo> {
    let value = record.get("detailed_level", "age")?;
    Some(AgeInfo {
        category: age_category(value).unwrap_or("unknown"),
        numeric_estimate: numeric_age_estimate(value),
    })
}

pub fn analyze_age_shift(description: &LightRecord, embodiment: &LightRecord) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::AgeShift);
    let desc_age = extract_age_info(description);
    let emb_age = extract_age_info(embodiment);

    match (desc_age, emb_age) {
        (Some(desc), Some(emb)) => {
            result
                .findings
                .insert("description_age".into(), desc.category.to_string());
            result
                .findings
                .insert("embodiment_age".into(), emb.category.to_string());

            match (desc.numeric_estimate, emb.numeric_estimate) {
                (Some(d), Some(e)) => {
                    let diff = (d - e).abs();
                    result
                        .findings
                        .insert("numeric_difference".into(), diff.to_string());

                    if diff > 5 {
                        let magnitude = diff / 10;
                        result.indicators.push(format!(
                            "Age shift detected: {} -> {}",
                            desc.category, emb.category
                        ));
                        if magnitude > 2 {
                            result
                                .indicators
                                .push("Significant age shift (>2 categories)".to_string());
                            result
                                .recommendations
                                .push("Review age consistency between description and embodiment".to_string());
                            result.confidence = 0.8;
                        } else {
                            result.indicators.push("Minor age shift detected".to_string());
                            result.confidence = 0.6;
                        }
                    } else {
                        result.findings.insert("consistent".into(), "true".to_string());
                        result.confidence = 0.9;
                    }
                }
                _ => {
                    result.findings.insert("insufficient_data".into(), "true".to_string());
                    result
                        .indicators
                        .push("Insufficient age data for comparison".to_string());
                    result.confidence = 0.1;
                }
            }
        }
        _ => {
            result.findings.insert("insufficient_data".into(), "true".to_string());
            result
                .indicators
                .push("Insufficient age data for comparison".to_string());
            result.confidence = 0.1;
        }
    }

    result
}

fn gender_of(record: &LightRecord) -> Option<String> {
    record
        .get("detailed_level", "gender")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn clothing_of(record: &LightRecord) -> Option<String> {
    record
        .get("detailed_level", "clothing")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn role_of(record: &LightRecord) -> Option<String> {
    record
        .get("middle_design_level", "role")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn all_text(records: &[&LightRecord]) -> String {
    let mut text = String::new();
    for record in records {
        for fields in record.sections.values() {
            for value in fields.values() {
                if let Value::String(s) = value {
                    text.push(' ');
                    text.push_str(s);
                }
            }
        }
    }
    text.to_lowercase()
}

pub fn analyze_gender_conformity(description: &LightRecord, embodiment: &LightRecord) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::GenderConformity);

    let desc_gender = gender_of(description);
    let emb_gender = gender_of(embodiment);
    if let Some(g) = &desc_gender {
        result.findings.insert("description_gender".into(), g.clone());
    }
    if let Some(g) = &emb_gender {
        result.findings.insert("embodiment_gender".into(), g.clone());
    }

    let desc_clothing = clothing_of(description);
    let emb_clothing = clothing_of(embodiment);
    let combined_clothing = format!(
        "{} {}",
        desc_clothing.clone().unwrap_or_default(),
        emb_clothing.clone().unwrap_or_default()
    )
    .to_lowercase();
    let clothing_data_available = desc_clothing.is_some() || emb_clothing.is_some();
    let found_clothing_patterns: Vec<&str> = STEREOTYPICAL_CLOTHING
        .iter()
        .copied()
        .filter(|p| combined_clothing.contains(p))
        .collect();
    if !found_clothing_patterns.is_empty() {
        result.indicators.push("Stereotypical gender-based clothing detected".to_string());
        result
            .recommendations
            .push("Consider more diverse clothing representations".to_string());
        result
            .findings
            .insert("clothing_patterns_found".into(), found_clothing_patterns.join(", "));
    }

    let text = all_text(&[description, embodiment]);
    let found_sexualization: Vec<&str> = SEXUALIZATION_VOCABULARY
        .iter()
        .copied()
        .filter(|p| text.contains(p))
        .collect();
    if !found_sexualization.is_empty() {
        result.indicators.push("Potential sexualization indicators detected".to_string());
        result
            .recommendations
            .push("Review for inappropriate sexualization".to_string());
    }

    let desc_role = role_of(description);
    let emb_role = role_of(embodiment);
    let role_data_available = desc_role.is_some() || emb_role.is_some();
    let combined_roles = format!(
        "{} {}",
        desc_role.clone().unwrap_or_default(),
        emb_role.clone().unwrap_or_default()
    )
    .to_lowercase();
    let stereotypical_role = match desc_gender.as_deref() {
        Some("female") => FEMALE_STEREOTYPE_ROLES.iter().any(|r| combined_roles.contains(r)),
        Some("male") => MALE_STEREOTYPE_ROLES.iter().any(|r| combined_roles.contains(r)),
        _ => false,
    };
    if stereotypical_role {
        result
            .indicators
            .push("Traditional gender role stereotypes detected".to_string());
        result
            .recommendations
            .push("Consider counter-stereotypical role representations".to_string());
    }

    let data_completeness = [
        desc_gender.is_some(),
        emb_gender.is_some(),
        clothing_data_available,
        role_data_available,
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64
        / 4.0;

    result.confidence = if result.indicators.is_empty() {
        data_completeness * 0.5
    } else {
        data_completeness * 0.8
    };

    result
}

pub fn analyze_ethnicity_consistency(description: &LightRecord, embodiment: &LightRecord) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::EthnicityConsistency);
    result.findings.insert(
        "analysis_note".into(),
        "Technical consistency check only - no ethnic profiling performed".to_string(),
    );

    let desc_markers = description
        .get("detailed_level", "other_features")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let emb_markers = embodiment
        .get("detailed_level", "other_features")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    match (&desc_markers, &emb_markers) {
        (Some(d), Some(e)) => {
            if !d.trim().eq_ignore_ascii_case(e.trim()) {
                result
                    .indicators
                    .push(format!("Appearance inconsistency: {d:?} vs {e:?}"));
                result
                    .recommendations
                    .push("Review appearance consistency between description and embodiment".to_string());
                result.confidence = 0.7;
            } else {
                result.findings.insert("consistent".into(), "true".to_string());
                result.confidence = 0.8;
            }
        }
        _ => {
            result.findings.insert("insufficient_data".into(), "true".to_string());
            result.confidence = 0.2;
        }
    }

    result
}

/// Stereotype/gender-role/age-role sub-checks are intentionally minimal
/// placeholders in the source this is ported from and are kept as no-ops here
/// rather than invented logic (see `DESIGN.md`'s Open Question decisions):
/// this analysis only reports how much role/competence data was available to
/// compare, never a stereotype verdict.
pub fn analyze_occupational_stereotypes(description: &LightRecord, embodiment: &LightRecord) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::OccupationalStereotypes);

    let desc_role = role_of(description);
    let emb_role = role_of(embodiment);
    let desc_competence = description.get("middle_design_level", "competence").and_then(|v| v.as_f64());
    let emb_competence = embodiment.get("middle_design_level", "competence").and_then(|v| v.as_f64());

    let data_completeness = [
        desc_role.is_some(),
        emb_role.is_some(),
        desc_competence.is_some(),
        emb_competence.is_some(),
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64
        / 4.0;

    result
        .findings
        .insert("role_data_completeness".into(), data_completeness.to_string());
    result.confidence = data_completeness * 0.5;

    result
}

/// Contradiction/infantilisation/mismatch checks are intentionally minimal
/// placeholders (always `found = false`) per the same Open Question as
/// [`analyze_occupational_stereotypes`] — this tallies how many competence and
/// presentation markers were available on each side without asserting a
/// verdict from them.
pub fn analyze_ambivalent_stereotypes(description: &LightRecord, embodiment: &LightRecord) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::AmbivalentStereotypes);

    let competence_markers = [description, embodiment]
        .iter()
        .copied()
        .filter(|r| role_of(r).is_some() && r.get("middle_design_level", "competence").is_some())
        .count();
    let presentation_markers = [description, embodiment]
        .iter()
        .copied()
        .filter(|r| clothing_of(r).is_some() && r.get("middle_design_level", "lifelikeness").is_some())
        .count();

    result
        .findings
        .insert("competence_markers".into(), competence_markers.to_string());
    result
        .findings
        .insert("presentation_markers".into(), presentation_markers.to_string());

    let total_markers = (competence_markers + presentation_markers) as f64;
    result.confidence = (total_markers / 10.0).min(1.0) * 0.5;

    result
}

pub fn analyze_multiple_stereotyping(results: &[BiasResult]) -> BiasResult {
    let mut result = BiasResult::new(AnalysisType::MultipleStereotyping);

    let active: Vec<&str> = results
        .iter()
        .filter(|r| !r.indicators.is_empty())
        .map(|r| r.analysis_type.as_str())
        .collect();

    let total_indicators: usize = results.iter().map(|r| r.indicators.len()).sum();
    result
        .findings
        .insert("total_analyses".into(), results.len().to_string());
    result
        .findings
        .insert("cumulative_indicator_count".into(), total_indicators.to_string());

    if active.len() >= 3 {
        result
            .indicators
            .push(format!("intersectional pattern across {} analyses", active.len()));
        result.findings.insert("active_analyses".into(), active.join(", "));
        result
            .recommendations
            .push("Address multiple intersecting bias patterns".to_string());
    }
    if total_indicators > 5 {
        result.indicators.push("High cumulative bias impact detected".to_string());
        result
            .recommendations
            .push("Prioritize bias mitigation across multiple dimensions".to_string());
    }

    let mean_confidence = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64
    };
    result.confidence = if active.len() >= 2 {
        mean_confidence * 0.9
    } else {
        mean_confidence * 0.5
    };

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pald_utils::Value;

    fn record_with(pairs: &[(&str, &str, Value)]) -> LightRecord {
        let mut r = LightRecord::default();
        for (s, f, v) in pairs {
            r.set(s, f, v.clone());
        }
        r
    }

    #[test]
    fn age_shift_detects_significant_gap() {
        let desc = record_with(&[("detailed_level", "age", Value::Int(25))]);
        let emb = record_with(&[("detailed_level", "age", Value::Int(70))]);
        let result = analyze_age_shift(&desc, &emb);
        assert!(result.indicators.iter().any(|i| i.contains("Significant")));
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn age_shift_insufficient_data_yields_low_confidence() {
        let desc = LightRecord::default();
        let emb = LightRecord::default();
        let result = analyze_age_shift(&desc, &emb);
        assert!(result.confidence <= 0.2);
    }

    #[test]
    fn ethnicity_consistency_never_profiles() {
        let desc = record_with(&[("detailed_level", "other_features", Value::from("brown hair"))]);
        let emb = record_with(&[("detailed_level", "other_features", Value::from("blonde hair"))]);
        let result = analyze_ethnicity_consistency(&desc, &emb);
        assert_eq!(
            result.findings.get("analysis_note").unwrap(),
            "Technical consistency check only - no ethnic profiling performed"
        );
        assert!(!result.indicators.is_empty());
    }

    #[test]
    fn multiple_stereotyping_requires_three_active_for_summary_indicator() {
        let mut results = Vec::new();
        for t in [
            AnalysisType::AgeShift,
            AnalysisType::GenderConformity,
            AnalysisType::EthnicityConsistency,
        ] {
            let mut r = BiasResult::new(t);
            r.indicators.push("x".to_string());
            r.confidence = 0.5;
            results.push(r);
        }
        let summary = analyze_multiple_stereotyping(&results);
        assert!(summary.indicators.iter().any(|i| i.contains("intersectional pattern across 3 analyses")));
    }
}
