//! Recommendation synthesis from a [`CheckSuite`], ported from
//! `PrerequisiteValidationService.get_prerequisite_recommendations` in
//! `original_source/src/logic/prerequisite_validation.py`.

use crate::types::{CheckStatus, CheckSuite, CheckerKind, Priority, Recommendation};

fn estimated_time(checker_name: &str) -> &'static str {
    match checker_name {
        "database" => "5-10 minutes",
        "llm_service" => "2-5 minutes",
        "consent_status" => "1-2 minutes",
        "system_health" => "Variable",
        _ => "Unknown",
    }
}

fn priority_for(kind: CheckerKind, status: CheckStatus) -> Option<Priority> {
    match (kind, status) {
        (_, CheckStatus::Passed) => None,
        (CheckerKind::Required, CheckStatus::Failed) => Some(Priority::Critical),
        (CheckerKind::Required, _) => Some(Priority::High),
        (CheckerKind::Recommended, _) => Some(Priority::Medium),
        (CheckerKind::Optional, _) => Some(Priority::Low),
    }
}

/// Builds one [`Recommendation`] per non-passed result, sorted
/// critical → high → medium → low with ties broken by input order (a stable
/// sort preserves it).
pub fn synthesize_recommendations(suite: &CheckSuite) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = suite
        .results
        .iter()
        .filter_map(|result| {
            let priority = priority_for(result.kind, result.status)?;
            Some(Recommendation {
                checker_name: result.name.clone(),
                issue: result.message.clone(),
                priority,
                resolution_steps: result.resolution_steps.clone(),
                estimated_time: estimated_time(&result.name).to_string(),
                automation_available: result.name == "consent_status",
            })
        })
        .collect();

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrerequisiteResult;

    fn result(name: &str, kind: CheckerKind, status: CheckStatus) -> PrerequisiteResult {
        PrerequisiteResult {
            name: name.to_string(),
            status,
            message: format!("{name} issue"),
            details: None,
            resolution_steps: vec!["fix it".to_string()],
            check_time_seconds: 0.01,
            kind,
        }
    }

    #[test]
    fn sorted_critical_before_medium() {
        let suite = CheckSuite::from_results(
            vec![
                result("system_health", CheckerKind::Recommended, CheckStatus::Warning),
                result("database", CheckerKind::Required, CheckStatus::Failed),
            ],
            false,
        );
        let recs = synthesize_recommendations(&suite);
        assert_eq!(recs[0].checker_name, "database");
        assert_eq!(recs[0].priority, Priority::Critical);
        assert_eq!(recs[1].checker_name, "system_health");
    }

    #[test]
    fn passed_checks_produce_no_recommendation() {
        let suite = CheckSuite::from_results(vec![result("database", CheckerKind::Required, CheckStatus::Passed)], false);
        assert!(synthesize_recommendations(&suite).is_empty());
    }

    #[test]
    fn consent_status_is_the_only_automatable_recommendation() {
        let suite = CheckSuite::from_results(
            vec![
                result("consent_status", CheckerKind::Required, CheckStatus::Failed),
                result("database", CheckerKind::Required, CheckStatus::Failed),
            ],
            false,
        );
        let recs = synthesize_recommendations(&suite);
        let consent = recs.iter().find(|r| r.checker_name == "consent_status").unwrap();
        let database = recs.iter().find(|r| r.checker_name == "database").unwrap();
        assert!(consent.automation_available);
        assert!(!database.automation_available);
        assert_eq!(consent.estimated_time, "1-2 minutes");
    }
}
