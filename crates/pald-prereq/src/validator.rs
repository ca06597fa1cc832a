//! The Prerequisite Validator (C6) facade, ported from
//! `PrerequisiteValidationService` in
//! `original_source/src/logic/prerequisite_validation.py`, generalising
//! `xchecker-doctor`'s named-check pass/warn/fail shape to the PALD domain.

use crate::cache::ResultCache;
use crate::checker::Checker;
use crate::policy::default_policy;
use crate::types::{CheckStatus, CheckSuite, CheckerKind, OperationReadiness, PrerequisiteResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct PrerequisiteValidator {
    checkers: Vec<Arc<dyn Checker>>,
    cache: ResultCache,
    default_timeout: Duration,
}

impl PrerequisiteValidator {
    pub fn new(checkers: Vec<Arc<dyn Checker>>, cache_ttl_seconds: u64, default_timeout_seconds: u64) -> Self {
        Self {
            checkers,
            cache: ResultCache::new(cache_ttl_seconds),
            default_timeout: Duration::from_secs(default_timeout_seconds),
        }
    }

    pub async fn run_all(&self, use_cache: bool) -> CheckSuite {
        self.run(self.checkers.clone(), use_cache, true, self.default_timeout).await
    }

    pub async fn run_specific(&self, names: &[&str], use_cache: bool) -> CheckSuite {
        let selected = self.select(names);
        self.run(selected, use_cache, true, self.default_timeout).await
    }

    /// Unknown operations fall back to [`Self::run_all`], per §4.6.
    pub async fn validate_for_operation(&self, operation: &str, use_cache: bool, parallel: bool) -> CheckSuite {
        let Some(policy) = default_policy(operation) else {
            return self.run_all(use_cache).await;
        };

        let names: Vec<&str> = policy
            .required
            .iter()
            .chain(policy.recommended.iter())
            .chain(policy.optional.iter())
            .map(String::as_str)
            .collect();
        let selected = self.select(&names);
        self.run(selected, use_cache, parallel, policy.timeout).await
    }

    pub async fn check_operation_readiness(&self, operation: &str) -> OperationReadiness {
        let suite = self.validate_for_operation(operation, true, true).await;
        let required_failures: Vec<String> = suite
            .results
            .iter()
            .filter(|r| r.kind == CheckerKind::Required && r.status != CheckStatus::Passed)
            .map(|r| r.name.clone())
            .collect();
        let recommended_failures: Vec<String> = suite
            .results
            .iter()
            .filter(|r| r.kind == CheckerKind::Recommended && r.status != CheckStatus::Passed)
            .map(|r| r.name.clone())
            .collect();
        let ready = required_failures.is_empty();

        OperationReadiness {
            ready,
            can_proceed_with_warnings: ready,
            required_failures,
            recommended_failures,
            cached: suite.cached,
        }
    }

    pub fn clear_cache(&self, name: Option<&str>) {
        self.cache.clear(name);
    }

    pub fn get_cache_status(&self) -> crate::types::CacheStatus {
        self.cache.status()
    }

    fn select(&self, names: &[&str]) -> Vec<Arc<dyn Checker>> {
        self.checkers.iter().filter(|c| names.contains(&c.name())).cloned().collect()
    }

    async fn run(&self, checkers: Vec<Arc<dyn Checker>>, use_cache: bool, parallel: bool, timeout: Duration) -> CheckSuite {
        let mut results: Vec<(usize, PrerequisiteResult)> = Vec::with_capacity(checkers.len());
        let mut to_run: Vec<(usize, Arc<dyn Checker>)> = Vec::new();
        let mut any_live = false;

        for (idx, checker) in checkers.iter().cloned().enumerate() {
            if use_cache {
                if let Some(cached) = self.cache.get(checker.name()) {
                    results.push((idx, cached));
                    continue;
                }
            }
            any_live = true;
            to_run.push((idx, checker));
        }

        if !to_run.is_empty() {
            let run_results = if parallel {
                match run_parallel(&to_run, timeout).await {
                    Some(rs) => rs,
                    None => run_sequential(&to_run, timeout).await,
                }
            } else {
                run_sequential(&to_run, timeout).await
            };

            for ((idx, _), result) in to_run.iter().zip(run_results) {
                self.cache.put(result.clone());
                results.push((*idx, result));
            }
        }

        results.sort_by_key(|(idx, _)| *idx);
        let cached = !any_live && !checkers.is_empty();
        CheckSuite::from_results(results.into_iter().map(|(_, r)| r).collect(), cached)
    }
}

async fn run_sequential(checkers: &[(usize, Arc<dyn Checker>)], timeout: Duration) -> Vec<PrerequisiteResult> {
    let mut results = Vec::with_capacity(checkers.len());
    for (_, checker) in checkers {
        let result = match tokio::time::timeout(timeout, checker.check()).await {
            Ok(result) => result,
            Err(_) => PrerequisiteResult::timed_out(checker.name(), checker.kind(), timeout.as_secs_f64()),
        };
        results.push(result);
    }
    results
}

/// Bounded by a semaphore of size `min(checkers.len(), 5)`, per §5. Returns
/// `None` only if the runner's own scheduling infrastructure fails (as
/// opposed to an individual checker failing or timing out, both of which are
/// synthesised into a per-checker `failed` result); callers fall back to
/// [`run_sequential`] in that case.
async fn run_parallel(checkers: &[(usize, Arc<dyn Checker>)], timeout: Duration) -> Option<Vec<PrerequisiteResult>> {
    let limit = checkers.len().min(5).max(1);
    let semaphore = Arc::new(tokio::sync::Semaphore::new(limit));
    if semaphore.is_closed() {
        return None;
    }

    let mut set = tokio::task::JoinSet::new();
    let mut id_to_slot = HashMap::new();

    for (slot, (_, checker)) in checkers.iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let checker_handle = Arc::clone(checker);
        let handle = set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("prereq semaphore closed");
            match tokio::time::timeout(timeout, checker_handle.check()).await {
                Ok(result) => result,
                Err(_) => PrerequisiteResult::timed_out(checker_handle.name(), checker_handle.kind(), timeout.as_secs_f64()),
            }
        });
        id_to_slot.insert(handle.id(), (slot, Arc::clone(checker)));
    }

    let mut ordered: Vec<Option<PrerequisiteResult>> = (0..checkers.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next_with_id().await {
        match joined {
            Ok((id, result)) => {
                if let Some((slot, _)) = id_to_slot.get(&id) {
                    ordered[*slot] = Some(result);
                }
            }
            Err(join_err) => {
                let id = join_err.id();
                if let Some((slot, checker)) = id_to_slot.get(&id) {
                    ordered[*slot] = Some(PrerequisiteResult::from_panic(checker.name(), checker.kind(), &join_err.to_string()));
                }
            }
        }
    }

    ordered.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Checker;
    use async_trait::async_trait;
    use std::time::Duration as StdDuration;

    struct FastChecker;
    #[async_trait]
    impl Checker for FastChecker {
        fn name(&self) -> &str {
            "fast"
        }
        fn kind(&self) -> CheckerKind {
            CheckerKind::Required
        }
        async fn check(&self) -> PrerequisiteResult {
            tokio::time::sleep(StdDuration::from_millis(50)).await;
            PrerequisiteResult {
                name: "fast".to_string(),
                status: CheckStatus::Passed,
                message: "ok".to_string(),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: 0.05,
                kind: CheckerKind::Required,
            }
        }
    }

    struct SlowChecker(CheckerKind);
    #[async_trait]
    impl Checker for SlowChecker {
        fn name(&self) -> &str {
            "slow"
        }
        fn kind(&self) -> CheckerKind {
            self.0
        }
        async fn check(&self) -> PrerequisiteResult {
            tokio::time::sleep(StdDuration::from_secs(2)).await;
            PrerequisiteResult {
                name: "slow".to_string(),
                status: CheckStatus::Passed,
                message: "ok".to_string(),
                details: None,
                resolution_steps: Vec::new(),
                check_time_seconds: 2.0,
                kind: self.0,
            }
        }
    }

    #[tokio::test]
    async fn scenario_e_timeout_yields_failed_with_message() {
        let validator = PrerequisiteValidator::new(
            vec![Arc::new(FastChecker), Arc::new(SlowChecker(CheckerKind::Required))],
            300,
            1,
        );
        let suite = validator.run_all(false).await;
        let fast = suite.results.iter().find(|r| r.name == "fast").unwrap();
        let slow = suite.results.iter().find(|r| r.name == "slow").unwrap();
        assert_eq!(fast.status, CheckStatus::Passed);
        assert_eq!(slow.status, CheckStatus::Failed);
        assert!(slow.message.contains("timed out after 1s"));
        assert_eq!(suite.overall_status, CheckStatus::Failed);
    }

    #[tokio::test]
    async fn timeout_as_recommended_yields_warning_overall() {
        let validator = PrerequisiteValidator::new(vec![Arc::new(SlowChecker(CheckerKind::Recommended))], 300, 1);
        let suite = validator.run_all(false).await;
        assert_eq!(suite.overall_status, CheckStatus::Warning);
    }

    #[tokio::test]
    async fn cached_results_are_reported_as_cached() {
        let validator = PrerequisiteValidator::new(vec![Arc::new(FastChecker)], 300, 5);
        let _ = validator.run_all(false).await;
        let suite = validator.run_all(true).await;
        assert!(suite.cached);
    }

    #[tokio::test]
    async fn unknown_operation_falls_back_to_run_all() {
        let validator = PrerequisiteValidator::new(vec![Arc::new(FastChecker)], 300, 5);
        let suite = validator.validate_for_operation("not_a_real_operation", false, true).await;
        assert_eq!(suite.results.len(), 1);
    }
}
