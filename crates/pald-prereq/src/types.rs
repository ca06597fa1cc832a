//! Shared result/suite shapes, ported from `PrerequisiteResult`/
//! `PrerequisiteCheckSuite` in `original_source/src/services/prerequisite_checker.py`.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckerKind {
    Required,
    Recommended,
    Optional,
}

impl CheckerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerKind::Required => "required",
            CheckerKind::Recommended => "recommended",
            CheckerKind::Optional => "optional",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Warning,
    Unknown,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::Warning => "warning",
            CheckStatus::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PrerequisiteResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub details: Option<String>,
    pub resolution_steps: Vec<String>,
    pub check_time_seconds: f64,
    pub kind: CheckerKind,
}

impl PrerequisiteResult {
    pub fn timed_out(name: impl Into<String>, kind: CheckerKind, timeout_seconds: f64) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed,
            message: format!("Check timed out after {timeout_seconds}s"),
            details: None,
            resolution_steps: vec![
                "Retry the check once the underlying service responds faster".to_string(),
                "Increase the configured timeout if this is expected under normal load".to_string(),
                "Investigate the dependency for degraded performance".to_string(),
            ],
            check_time_seconds: timeout_seconds,
            kind,
        }
    }

    pub fn from_panic(name: impl Into<String>, kind: CheckerKind, panic_message: &str) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed,
            message: format!("Check raised an unexpected error: {panic_message}"),
            details: None,
            resolution_steps: Vec::new(),
            check_time_seconds: 0.0,
            kind,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CheckSuite {
    pub overall_status: CheckStatus,
    pub required_passed: bool,
    pub recommended_passed: bool,
    pub results: Vec<PrerequisiteResult>,
    pub total_check_time_seconds: f64,
    pub cached: bool,
}

impl CheckSuite {
    /// §3's aggregation rule: any required failure ⇒ FAILED; else any
    /// recommended check not passed ⇒ WARNING; else PASSED.
    pub fn from_results(results: Vec<PrerequisiteResult>, cached: bool) -> Self {
        let required_passed = results
            .iter()
            .filter(|r| r.kind == CheckerKind::Required)
            .all(|r| r.status == CheckStatus::Passed);
        let recommended_passed = results
            .iter()
            .filter(|r| r.kind == CheckerKind::Recommended)
            .all(|r| r.status == CheckStatus::Passed);

        let overall_status = if !required_passed {
            CheckStatus::Failed
        } else if !recommended_passed {
            CheckStatus::Warning
        } else {
            CheckStatus::Passed
        };

        let total_check_time_seconds = results.iter().map(|r| r.check_time_seconds).sum();

        Self {
            overall_status,
            required_passed,
            recommended_passed,
            results,
            total_check_time_seconds,
            cached,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Recommendation {
    pub checker_name: String,
    pub issue: String,
    pub priority: Priority,
    pub resolution_steps: Vec<String>,
    pub estimated_time: String,
    pub automation_available: bool,
}

#[derive(Clone, Debug)]
pub struct OperationReadiness {
    pub ready: bool,
    pub can_proceed_with_warnings: bool,
    pub required_failures: Vec<String>,
    pub recommended_failures: Vec<String>,
    pub cached: bool,
}

#[derive(Clone, Debug)]
pub struct CacheEntryStatus {
    pub age_seconds: f64,
    pub valid: bool,
    pub expires_in_seconds: f64,
}

#[derive(Clone, Debug)]
pub struct CacheStatus {
    pub ttl_seconds: f64,
    pub entries: BTreeMap<String, CacheEntryStatus>,
}
