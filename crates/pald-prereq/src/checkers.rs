//! Concrete checker implementations, ported from
//! `OllamaConnectivityChecker`, `DatabaseConnectivityChecker`,
//! `ConsentStatusChecker`, `SystemHealthChecker`, and
//! `ImageIsolationPrereqChecker` in
//! `original_source/src/services/prerequisite_checker.py`.
//!
//! Reachability of real external services is out of scope of this crate
//! (per `spec.md` §4.6): the database and consent checkers are parameterised
//! over small probe traits so a caller supplies the actual storage adapter;
//! only the contract (pass/warn/fail shape, messages, resolution steps) lives
//! here.

use crate::checker::Checker;
use crate::types::{CheckStatus, CheckerKind, PrerequisiteResult};
use async_trait::async_trait;
use std::time::Instant;
use sysinfo::{Disks, System};

fn elapsed_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

/// HTTP GET connectivity checker, grounded on `OllamaConnectivityChecker`.
/// Generalised beyond the LLM use case to any dependent HTTP service: a 200
/// response counts as reachable, everything else is classified by failure mode.
pub struct ExternalServiceChecker {
    name: String,
    description: String,
    url: String,
    timeout_seconds: u64,
    client: reqwest::Client,
}

impl ExternalServiceChecker {
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            timeout_seconds,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Checker for ExternalServiceChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CheckerKind {
        CheckerKind::Required
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn check(&self) -> PrerequisiteResult {
        let start = Instant::now();
        let request = self
            .client
            .get(&self.url)
            .timeout(std::time::Duration::from_secs(self.timeout_seconds))
            .send();

        match request.await {
            Ok(response) if response.status().is_success() => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Passed,
                message: format!("{} connected successfully", self.description),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Ok(response) => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("HTTP {}: unexpected response from {}", response.status(), self.url),
                details: None,
                resolution_steps: vec![format!("Verify the {} service is configured correctly", self.description)],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(err) if err.is_timeout() => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("Connection timed out after {}s: {}", self.timeout_seconds, self.url),
                details: None,
                resolution_steps: vec![
                    format!("Verify the {} service is running and reachable", self.description),
                    "Increase the connection timeout if this is expected under load".to_string(),
                ],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(err) => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("Connection failed to {}: {err}", self.url),
                details: None,
                resolution_steps: vec![
                    format!("Verify the {} service is running", self.description),
                    "Check network connectivity and firewall rules".to_string(),
                ],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
        }
    }
}

/// Outcome of a [`DatabaseProbe`] attempt, mirroring
/// `DatabaseConnectivityChecker.check`'s table-presence logic.
pub struct TablePresence {
    pub found: usize,
    pub expected: usize,
}

#[derive(Debug)]
pub enum DatabaseProbeError {
    Timeout(String),
    Authentication(String),
    Connection(String),
    Other(String),
}

/// Storage-adapter boundary: a real Postgres/SQLite probe is out of scope,
/// only this contract is.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn probe(&self) -> Result<TablePresence, DatabaseProbeError>;
}

pub struct DatabaseChecker {
    probe: Box<dyn DatabaseProbe>,
}

impl DatabaseChecker {
    pub fn new(probe: Box<dyn DatabaseProbe>) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl Checker for DatabaseChecker {
    fn name(&self) -> &str {
        "database"
    }

    fn kind(&self) -> CheckerKind {
        CheckerKind::Required
    }

    fn description(&self) -> &str {
        "PostgreSQL Database"
    }

    async fn check(&self) -> PrerequisiteResult {
        let start = Instant::now();
        match self.probe.probe().await {
            Ok(presence) if presence.found >= presence.expected => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Passed,
                message: "Database connected successfully with required schema".to_string(),
                details: Some(format!("Tables: {}/{} found", presence.found, presence.expected)),
                resolution_steps: Vec::new(),
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Ok(presence) => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Warning,
                message: "Database connected but schema may be incomplete".to_string(),
                details: Some(format!("Found {}/{} expected tables", presence.found, presence.expected)),
                resolution_steps: vec![
                    "Run database migrations".to_string(),
                    "Check migration status".to_string(),
                    "Verify database schema is up to date".to_string(),
                ],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(DatabaseProbeError::Timeout(detail)) => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: format!("connection timed out: {detail}"),
                details: None,
                resolution_steps: vec!["Verify the database is reachable within the configured timeout".to_string()],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(DatabaseProbeError::Authentication(detail)) => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: format!("authentication failed: {detail}"),
                details: None,
                resolution_steps: vec!["Verify database credentials".to_string()],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(DatabaseProbeError::Connection(detail)) => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: format!("connection failed: {detail}"),
                details: None,
                resolution_steps: vec!["Verify the database host and port are correct and reachable".to_string()],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            Err(DatabaseProbeError::Other(detail)) => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: format!("Database check failed: {detail}"),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
        }
    }
}

/// Storage-adapter boundary for consent lookups, grounded on `ConsentService`.
#[async_trait]
pub trait ConsentStore: Send + Sync {
    async fn has_consent(&self, user_id: &str, slug: &str) -> bool;
}

/// Required consent slugs, ported verbatim from `ConsentStatusChecker.check`.
pub const REQUIRED_CONSENT_SLUGS: [&str; 3] = ["data_processing", "ai_interaction", "image_generation"];

pub struct ConsentChecker {
    user_id: String,
    store: Box<dyn ConsentStore>,
}

impl ConsentChecker {
    pub fn new(user_id: impl Into<String>, store: Box<dyn ConsentStore>) -> Self {
        Self {
            user_id: user_id.into(),
            store,
        }
    }
}

#[async_trait]
impl Checker for ConsentChecker {
    fn name(&self) -> &str {
        "consent_status"
    }

    fn kind(&self) -> CheckerKind {
        CheckerKind::Required
    }

    fn description(&self) -> &str {
        "User Consent Status"
    }

    async fn check(&self) -> PrerequisiteResult {
        let mut missing = Vec::new();
        for slug in REQUIRED_CONSENT_SLUGS {
            if !self.store.has_consent(&self.user_id, slug).await {
                missing.push(slug.to_string());
            }
        }

        if missing.is_empty() {
            PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Passed,
                message: "All required consents are granted.".to_string(),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: 0.0,
                kind: self.kind(),
            }
        } else {
            PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: format!("Missing required consents: {}", missing.join(", ")),
                details: None,
                resolution_steps: vec![
                    "Open the consent settings page.".to_string(),
                    "Grant the required consents.".to_string(),
                    "Retry the operation.".to_string(),
                ],
                check_time_seconds: 0.0,
                kind: self.kind(),
            }
        }
    }
}

/// Samples memory/disk/cpu percentages via `sysinfo`, grounded on
/// `SystemHealthChecker.check`. Per `DESIGN.md`'s Open Question decision, the
/// three-band reading from `spec.md` governs over the original's asymmetric
/// per-metric rule: 0 elevated metrics → passed, 1 → warning, >=2 → failed.
pub struct SystemHealthChecker;

impl SystemHealthChecker {
    pub fn new() -> Self {
        Self
    }

    fn sample() -> Option<(f64, f64, f64)> {
        let mut system = System::new_all();
        system.refresh_memory();
        system.refresh_cpu_usage();

        let total_memory = system.total_memory();
        if total_memory == 0 {
            return None;
        }
        let memory_percent = (system.used_memory() as f64 / total_memory as f64) * 100.0;

        let disks = Disks::new_with_refreshed_list();
        let (used, total) = disks
            .iter()
            .map(|disk| (disk.total_space() - disk.available_space(), disk.total_space()))
            .fold((0u64, 0u64), |(used_acc, total_acc), (used, total)| (used_acc + used, total_acc + total));
        let disk_percent = if total > 0 { (used as f64 / total as f64) * 100.0 } else { 0.0 };

        let cpu_percent = system.global_cpu_usage() as f64;

        Some((memory_percent, disk_percent, cpu_percent))
    }
}

impl Default for SystemHealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Checker for SystemHealthChecker {
    fn name(&self) -> &str {
        "system_health"
    }

    fn kind(&self) -> CheckerKind {
        CheckerKind::Recommended
    }

    fn description(&self) -> &str {
        "System Health"
    }

    async fn check(&self) -> PrerequisiteResult {
        let start = Instant::now();
        let Some((memory_percent, disk_percent, cpu_percent)) = Self::sample() else {
            return PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Warning,
                message: "System monitoring unavailable".to_string(),
                details: Some("Cannot check system resource usage".to_string()),
                resolution_steps: vec!["Monitor system resources manually".to_string()],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            };
        };

        let mut issues = Vec::new();
        if memory_percent > 90.0 {
            issues.push(format!("High memory usage: {memory_percent:.1}%"));
        }
        if disk_percent > 90.0 {
            issues.push(format!("Low disk space: {disk_percent:.1}% used"));
        }
        if cpu_percent > 95.0 {
            issues.push(format!("High CPU usage: {cpu_percent:.1}%"));
        }

        let details = format!("Memory: {memory_percent:.1}%, Disk: {disk_percent:.1}%, CPU: {cpu_percent:.1}%");

        match issues.len() {
            0 => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Passed,
                message: "System resources are healthy".to_string(),
                details: Some(details),
                resolution_steps: Vec::new(),
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            1 => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Warning,
                message: "System resources are under pressure".to_string(),
                details: Some(issues.join("; ")),
                resolution_steps: vec![
                    "Close unnecessary applications".to_string(),
                    "Monitor system performance".to_string(),
                    "Consider restarting services if issues persist".to_string(),
                ],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
            _ => PrerequisiteResult {
                name: self.name().to_string(),
                status: CheckStatus::Failed,
                message: "System resources are critically low".to_string(),
                details: Some(issues.join("; ")),
                resolution_steps: vec![
                    "Free up disk space immediately".to_string(),
                    "Close resource-intensive applications".to_string(),
                    "Restart system if necessary".to_string(),
                    "Contact system administrator".to_string(),
                ],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind(),
            },
        }
    }
}

/// Dependent-service HEAD checker: 200 or 405 counts as reachable, grounded on
/// `ImageIsolationPrereqChecker.check`.
pub struct DependentServiceChecker {
    name: String,
    description: String,
    url: String,
    timeout_seconds: u64,
    kind: CheckerKind,
    client: reqwest::Client,
}

impl DependentServiceChecker {
    pub fn new(name: impl Into<String>, description: impl Into<String>, url: impl Into<String>, timeout_seconds: u64, kind: CheckerKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            timeout_seconds,
            kind,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Checker for DependentServiceChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CheckerKind {
        self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn check(&self) -> PrerequisiteResult {
        let start = Instant::now();
        let request = self
            .client
            .head(&self.url)
            .timeout(std::time::Duration::from_secs(self.timeout_seconds))
            .send();

        match request.await {
            Ok(response) if response.status().as_u16() == 200 || response.status().as_u16() == 405 => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Passed,
                message: format!("{} is available", self.description),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind,
            },
            Ok(response) => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("{} returned status {}", self.description, response.status()),
                details: None,
                resolution_steps: vec![format!("Check {} service logs for errors", self.description)],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind,
            },
            Err(err) if err.is_timeout() => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("{} timeout", self.description),
                details: None,
                resolution_steps: vec!["Increase timeout settings".to_string()],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind,
            },
            Err(_) => PrerequisiteResult {
                name: self.name.clone(),
                status: CheckStatus::Failed,
                message: format!("Cannot connect to {}", self.description),
                details: None,
                resolution_steps: vec![format!("Verify the {} is running and reachable", self.description)],
                check_time_seconds: elapsed_seconds(start),
                kind: self.kind,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysConsents;
    #[async_trait]
    impl ConsentStore for AlwaysConsents {
        async fn has_consent(&self, _user_id: &str, _slug: &str) -> bool {
            true
        }
    }

    struct MissingAiInteraction;
    #[async_trait]
    impl ConsentStore for MissingAiInteraction {
        async fn has_consent(&self, _user_id: &str, slug: &str) -> bool {
            slug != "ai_interaction"
        }
    }

    #[tokio::test]
    async fn consent_checker_passes_when_all_granted() {
        let checker = ConsentChecker::new("user-1", Box::new(AlwaysConsents));
        let result = checker.check().await;
        assert_eq!(result.status, CheckStatus::Passed);
    }

    #[tokio::test]
    async fn scenario_f_consent_checker_fails_naming_missing_slug() {
        let checker = ConsentChecker::new("user-1", Box::new(MissingAiInteraction));
        let result = checker.check().await;
        assert_eq!(result.status, CheckStatus::Failed);
        assert!(result.message.contains("ai_interaction"));
    }

    struct FullSchemaProbe;
    #[async_trait]
    impl DatabaseProbe for FullSchemaProbe {
        async fn probe(&self) -> Result<TablePresence, DatabaseProbeError> {
            Ok(TablePresence { found: 2, expected: 2 })
        }
    }

    struct PartialSchemaProbe;
    #[async_trait]
    impl DatabaseProbe for PartialSchemaProbe {
        async fn probe(&self) -> Result<TablePresence, DatabaseProbeError> {
            Ok(TablePresence { found: 1, expected: 2 })
        }
    }

    struct FailingProbe;
    #[async_trait]
    impl DatabaseProbe for FailingProbe {
        async fn probe(&self) -> Result<TablePresence, DatabaseProbeError> {
            Err(DatabaseProbeError::Connection("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn database_checker_passed_on_full_schema() {
        let checker = DatabaseChecker::new(Box::new(FullSchemaProbe));
        assert_eq!(checker.check().await.status, CheckStatus::Passed);
    }

    #[tokio::test]
    async fn database_checker_warns_on_partial_schema() {
        let checker = DatabaseChecker::new(Box::new(PartialSchemaProbe));
        let result = checker.check().await;
        assert_eq!(result.status, CheckStatus::Warning);
        assert!(!result.resolution_steps.is_empty());
    }

    #[tokio::test]
    async fn database_checker_fails_on_connection_error() {
        let checker = DatabaseChecker::new(Box::new(FailingProbe));
        let result = checker.check().await;
        assert_eq!(result.status, CheckStatus::Failed);
        assert!(result.message.contains("connection failed"));
    }
}
