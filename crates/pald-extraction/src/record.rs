//! The extracted record type, an `Issue` list, and the compressed-prompt
//! newtype. Ownership per the spec: created by C2, immutable thereafter.

use pald_utils::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// A sparse mapping section -> field -> value conforming to the schema. Empty
/// sections are dropped (see [`LightRecord::drop_empty_sections`]).
#[derive(Clone, Debug, Default)]
pub struct LightRecord {
    pub sections: BTreeMap<String, BTreeMap<String, Value>>,
    pub confidence: f64,
    pub filled_fields: Vec<String>,
    pub missing_fields: Vec<String>,
    pub validation_issues: Vec<Issue>,
}

impl LightRecord {
    pub fn get(&self, section: &str, field: &str) -> Option<&Value> {
        self.sections.get(section)?.get(field)
    }

    pub fn set(&mut self, section: &str, field: &str, value: Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    pub fn drop_empty_sections(&mut self) {
        self.sections.retain(|_, fields| !fields.is_empty());
    }

    /// Look up a value by its full dotted path (`section.field[.nested...]`),
    /// walking into nested `Value::Object` fields as needed.
    pub fn value_at_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let section = parts.next()?;
        let field = parts.next()?;
        let mut current = self.get(section, field)?;
        for part in parts {
            current = match current {
                Value::Object(fields) => fields.get(part)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// All dotted field paths present in this record, including intermediate
    /// object nodes (matching `_get_field_paths`'s recursive behaviour).
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for (section, fields) in &self.sections {
            for (field, value) in fields {
                let path = format!("{section}.{field}");
                collect_paths(&path, value, &mut paths);
            }
        }
        paths.sort();
        paths
    }
}

fn collect_paths(prefix: &str, value: &Value, out: &mut Vec<String>) {
    out.push(prefix.to_string());
    if let Value::Object(fields) = value {
        for (k, v) in fields {
            collect_paths(&format!("{prefix}.{k}"), v, out);
        }
    }
}

/// A short, deterministic, ≤200-char textual projection of a [`LightRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedPrompt(pub String);

impl fmt::Display for CompressedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CompressedPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
