//! Compressed-prompt assembly, ported from `compress_for_prompt`
//! (`original_source/src/logic/pald_light_extraction.py`).

use crate::record::{CompressedPrompt, LightRecord};
use regex::Regex;
use std::sync::LazyLock;

static ARTICLES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(the|a|an)\b").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

fn lifelikeness_descriptor(score: i64) -> Option<&'static str> {
    Some(match score {
        7 => "photorealistic",
        6 => "realistic",
        5 => "semi-realistic",
        4 => "stylized",
        3 => "cartoon-like",
        2 => "abstract",
        1 => "minimal",
        _ => return None,
    })
}

pub fn compress_for_prompt(record: &LightRecord) -> CompressedPrompt {
    let mut parts: Vec<String> = Vec::new();

    if let Some(v) = record.get("global_design_level", "type").and_then(|v| v.as_str()) {
        parts.push(v.to_string());
    }
    if let Some(pald_utils::Value::Object(cartoon)) = record.get("global_design_level", "cartoon") {
        if let Some(repr) = cartoon.get("representation").and_then(|v| v.as_str()) {
            parts.push(repr.to_string());
        }
        if let Some(anim) = cartoon.get("animation").and_then(|v| v.as_str()) {
            parts.push(anim.to_string());
        }
    }
    for field in ["object_type", "animal_type", "fantasy_figure_type"] {
        if let Some(v) = record.get("global_design_level", field).and_then(|v| v.as_str()) {
            parts.push(v.to_string());
        }
    }

    if let Some(score) = record
        .get("middle_design_level", "lifelikeness")
        .and_then(|v| v.as_f64())
    {
        if let Some(desc) = lifelikeness_descriptor(score as i64) {
            parts.push(desc.to_string());
        }
    }
    if let Some(v) = record.get("middle_design_level", "role").and_then(|v| v.as_str()) {
        parts.push(v.to_string());
    }
    if let Some(v) = record
        .get("middle_design_level", "partial_representation")
        .and_then(|v| v.as_str())
    {
        parts.push(v.to_string());
    }

    if let Some(v) = record.get("detailed_level", "age") {
        parts.push(v.to_string());
    }
    if let Some(v) = record.get("detailed_level", "gender").and_then(|v| v.as_str()) {
        parts.push(v.to_string());
    }
    if let Some(v) = record.get("detailed_level", "clothing").and_then(|v| v.as_str()) {
        let truncated = if v.chars().count() > 50 {
            let head: String = v.chars().take(50).collect();
            format!("{head}...")
        } else {
            v.to_string()
        };
        parts.push(format!("wearing {truncated}"));
    }
    if let Some(v) = record.get("detailed_level", "weight").and_then(|v| v.as_str()) {
        parts.push(v.to_string());
    }

    let joined = parts.join(", ");
    let no_articles = ARTICLES.replace_all(&joined, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&no_articles, " ");
    let trimmed = collapsed.trim().trim_end_matches(", ").trim().to_string();

    let result = if trimmed.chars().count() > 200 {
        let truncated: String = trimmed.chars().take(197).collect();
        format!("{truncated}...")
    } else {
        trimmed
    };

    CompressedPrompt(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LightRecord;
    use pald_utils::Value;

    #[test]
    fn length_never_exceeds_200_and_has_no_articles() {
        let mut record = LightRecord::default();
        record.set("global_design_level", "type", Value::from("human"));
        record.set("middle_design_level", "role", Value::from("teacher"));
        record.set(
            "detailed_level",
            "clothing",
            Value::from("a very long outfit description ".repeat(10)),
        );
        let prompt = compress_for_prompt(&record);
        assert!(prompt.0.chars().count() <= 200);
        for article in ["the", "a", "an"] {
            assert!(!prompt
                .0
                .split_whitespace()
                .any(|w| w.eq_ignore_ascii_case(article)));
        }
    }
}
