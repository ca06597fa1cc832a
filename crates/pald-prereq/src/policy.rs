//! Operation policy registry, ported from
//! `PrerequisiteValidationService._operation_configs` in
//! `original_source/src/logic/prerequisite_validation.py`.
//!
//! Per `DESIGN.md`'s Open Question decision #3, checker names here are the
//! canonical short identifiers (`database`, `llm_service`, `consent_status`,
//! `system_health`) rather than the original's free-text display names.

use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct OperationPolicy {
    pub required: BTreeSet<String>,
    pub recommended: BTreeSet<String>,
    pub optional: BTreeSet<String>,
    pub timeout: Duration,
    pub allow_partial_failure: bool,
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// The four named operations carried verbatim from `spec.md` §4.6.
pub fn default_policy(operation: &str) -> Option<OperationPolicy> {
    match operation {
        "registration" => Some(OperationPolicy {
            required: set(&["database"]),
            recommended: set(&["system_health"]),
            optional: BTreeSet::new(),
            timeout: Duration::from_secs(15),
            allow_partial_failure: true,
        }),
        "chat" => Some(OperationPolicy {
            required: set(&["llm_service", "database", "consent_status"]),
            recommended: set(&["system_health"]),
            optional: BTreeSet::new(),
            timeout: Duration::from_secs(30),
            allow_partial_failure: false,
        }),
        "image_generation" => Some(OperationPolicy {
            required: set(&["database", "consent_status"]),
            recommended: set(&["system_health"]),
            optional: BTreeSet::new(),
            timeout: Duration::from_secs(25),
            allow_partial_failure: false,
        }),
        "system_startup" => Some(OperationPolicy {
            required: set(&["database"]),
            recommended: set(&["llm_service", "system_health"]),
            optional: BTreeSet::new(),
            timeout: Duration::from_secs(45),
            allow_partial_failure: true,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_requires_consent_status() {
        let policy = default_policy("chat").unwrap();
        assert!(policy.required.contains("consent_status"));
        assert!(!policy.allow_partial_failure);
    }

    #[test]
    fn unknown_operation_has_no_policy() {
        assert!(default_policy("nonexistent_operation").is_none());
    }
}
