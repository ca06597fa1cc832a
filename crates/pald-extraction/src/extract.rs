//! Extraction heuristics, ported from `PALDLightExtractor` in
//! `original_source/src/logic/pald_light_extraction.py`.

use crate::patterns::*;
use crate::record::{Issue, LightRecord};
use pald_utils::Value;
use std::collections::BTreeMap;

/// Concatenate description then embodiment (if present), per the C2 contract.
pub fn combined_text(description: &str, embodiment: Option<&str>) -> String {
    match embodiment {
        Some(e) if !e.is_empty() => format!("{description} {e}"),
        _ => description.to_string(),
    }
}

pub fn extract_global_design_level(text: &str, record: &mut LightRecord) {
    let chosen_type = if TYPE_KEYWORDS.cartoon.is_match(text) {
        Some("cartoon")
    } else if TYPE_KEYWORDS.object.is_match(text) {
        Some("object")
    } else if TYPE_KEYWORDS.animal.is_match(text) {
        Some("animal")
    } else if TYPE_KEYWORDS.fantasy_figure.is_match(text) {
        Some("fantasy_figure")
    } else if TYPE_KEYWORDS.human.is_match(text) {
        Some("human")
    } else {
        None
    };

    let Some(kind) = chosen_type else { return };
    record.set("global_design_level", "type", Value::from(kind));

    match kind {
        "cartoon" => extract_cartoon(text, record),
        "object" => extract_vocab_single(text, "object_type", &object_type_patterns(), record),
        "animal" => extract_vocab_single(text, "animal_type", &animal_type_patterns(), record),
        "fantasy_figure" => {
            extract_vocab_single(text, "fantasy_figure_type", &fantasy_type_patterns(), record)
        }
        _ => {}
    }

    let mut matched = Vec::new();
    for (pattern, word) in OTHER_CHARACTERISTICS.iter() {
        if pattern.is_match(text) {
            matched.push(*word);
        }
    }
    if !matched.is_empty() {
        record.set(
            "global_design_level",
            "other_characteristics",
            Value::from(matched.join(", ")),
        );
    }
}

fn object_type_patterns() -> Vec<(regex::Regex, &'static str)> {
    vec![
        (regex::Regex::new(r"(?i)\bportrait\b").unwrap(), "portrait"),
        (regex::Regex::new(r"(?i)\bstill life\b").unwrap(), "still_life"),
        (regex::Regex::new(r"(?i)\b3d model\b").unwrap(), "3d_model"),
    ]
}
fn animal_type_patterns() -> Vec<(regex::Regex, &'static str)> {
    vec![
        (regex::Regex::new(r"(?i)\bdog\b").unwrap(), "dog"),
        (regex::Regex::new(r"(?i)\bcat\b").unwrap(), "cat"),
        (regex::Regex::new(r"(?i)\bhorse\b").unwrap(), "horse"),
        (regex::Regex::new(r"(?i)\bbird\b").unwrap(), "bird"),
        (regex::Regex::new(r"(?i)\bdragon\b").unwrap(), "dragon"),
    ]
}
fn fantasy_type_patterns() -> Vec<(regex::Regex, &'static str)> {
    vec![
        (regex::Regex::new(r"(?i)\bunicorn\b").unwrap(), "unicorn"),
        (regex::Regex::new(r"(?i)\belf\b").unwrap(), "elf"),
        (regex::Regex::new(r"(?i)\borc\b").unwrap(), "orc"),
        (regex::Regex::new(r"(?i)\balien\b").unwrap(), "alien"),
        (regex::Regex::new(r"(?i)\bfairy\b").unwrap(), "fairy"),
    ]
}

fn extract_vocab_single(
    text: &str,
    field: &str,
    patterns: &[(regex::Regex, &'static str)],
    record: &mut LightRecord,
) {
    for (pattern, word) in patterns {
        if pattern.is_match(text) {
            record.set("global_design_level", field, Value::from(*word));
            return;
        }
    }
}

fn extract_cartoon(text: &str, record: &mut LightRecord) {
    let mut cartoon = BTreeMap::new();

    if let Some(m) = CHARACTER_NAMES.find(text) {
        let normalized = m.as_str().to_lowercase();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        cartoon.insert("representation".to_string(), Value::from(normalized));
    }

    if CARTOON_ANIMATED.is_match(text) {
        cartoon.insert("animation".to_string(), Value::from("animated"));
    } else if CARTOON_STATIC.is_match(text) {
        cartoon.insert("animation".to_string(), Value::from("static"));
    }

    if !cartoon.is_empty() {
        record.set("global_design_level", "cartoon", Value::Object(cartoon));
    }
}

fn pick_ranked<'a>(text: &str, scale: &'a [(regex::Regex, i64)]) -> Option<i64> {
    let mut best: Option<i64> = None;
    for (pattern, score) in scale {
        if pattern.is_match(text) && best.map(|b| *score > b).unwrap_or(true) {
            best = Some(*score);
        }
    }
    best
}

pub fn extract_middle_design_level(text: &str, record: &mut LightRecord) {
    for (field, scale) in [
        ("lifelikeness", &*LIFELIKENESS_SCALE),
        ("realism", &*REALISM_SCALE),
        ("animation_level", &*ANIMATION_LEVEL_SCALE),
        ("likeability", &*LIKEABILITY_SCALE),
        ("competence", &*COMPETENCE_SCALE),
    ] {
        if let Some(score) = pick_ranked(text, scale) {
            record.set("middle_design_level", field, Value::Int(score));
        }
    }

    for (pattern, role) in ROLE_PATTERNS.iter() {
        if pattern.is_match(text) {
            record.set("middle_design_level", "role", Value::from(*role));
            break;
        }
    }

    for pattern in ROLE_MODEL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let captured = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if captured.len() > 2 && captured.len() < 49 {
                record.set(
                    "middle_design_level",
                    "role_model",
                    Value::from(captured.to_string()),
                );
                break;
            }
        }
    }
}

pub fn extract_detailed_level(text: &str, record: &mut LightRecord) {
    if let Some(caps) = AGE_NUMERIC.captures(text) {
        if let Ok(age) = caps[1].parse::<i64>() {
            record.set("detailed_level", "age", Value::Int(age));
        }
    } else {
        for (pattern, category) in AGE_CATEGORIES.iter() {
            if pattern.is_match(text) {
                record.set("detailed_level", "age", Value::from(*category));
                break;
            }
        }
    }

    for (pattern, gender) in GENDER_PATTERNS.iter() {
        if pattern.is_match(text) {
            record.set("detailed_level", "gender", Value::from(*gender));
            break;
        }
    }

    let mut clothing_found = false;
    for pattern in CLOTHING_CAPTURES.iter() {
        if let Some(caps) = pattern.captures(text) {
            let captured = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if captured.len() > 2 && captured.len() < 99 {
                record.set(
                    "detailed_level",
                    "clothing",
                    Value::from(captured.to_string()),
                );
                clothing_found = true;
                break;
            }
        }
    }
    if !clothing_found {
        let mut matched = Vec::new();
        for (pattern, word) in CLOTHING_VOCAB.iter() {
            if pattern.is_match(text) {
                matched.push(*word);
            }
        }
        if !matched.is_empty() {
            record.set("detailed_level", "clothing", Value::from(matched.join(", ")));
        }
    }

    for (pattern, weight) in WEIGHT_VOCAB.iter() {
        if pattern.is_match(text) {
            record.set("detailed_level", "weight", Value::from(*weight));
            break;
        }
    }

    let mut other_features = Vec::new();
    for (pattern, label) in OTHER_FEATURES_CAPTURES.iter() {
        if let Some(caps) = pattern.captures(text) {
            let captured = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if captured.len() > 2 && captured.len() < 49 {
                other_features.push(format!("{label}: {captured}"));
            }
        }
    }
    if !other_features.is_empty() {
        record.set(
            "detailed_level",
            "other_features",
            Value::from(other_features.join("; ")),
        );
    }
}

/// The minimal fallback record used when normal extraction fails.
pub fn fallback_record(description: &str, failure_reason: &str) -> LightRecord {
    let mut record = LightRecord::default();
    record.set("global_design_level", "type", Value::from("human"));
    record.set("middle_design_level", "role", Value::from("assistant"));

    for (pattern, gender) in FALLBACK_GENDER.iter() {
        if pattern.is_match(description) {
            record.set("detailed_level", "gender", Value::from(*gender));
            break;
        }
    }
    for (pattern, age) in FALLBACK_AGE.iter() {
        if pattern.is_match(description) {
            record.set("detailed_level", "age", Value::from(*age));
            break;
        }
    }

    record.confidence = 0.1;
    record.validation_issues.push(Issue::error(
        "",
        format!("Extraction failed: {failure_reason}"),
    ));
    record
}
