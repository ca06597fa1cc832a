//! TTL-bounded result cache, grounded on `xchecker-utils::cache::InsightCache`'s
//! shared-state shape and on `PrerequisiteValidationService`'s
//! `_cache`/`_cache_ttl` fields in `original_source/src/logic/prerequisite_validation.py`.

use crate::types::{CacheEntryStatus, CacheStatus, PrerequisiteResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    result: PrerequisiteResult,
    inserted_at: Instant,
}

pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_seconds),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<PrerequisiteResult> {
        let entries = self.entries.lock().expect("prereq cache poisoned");
        entries.get(name).and_then(|entry| {
            if entry.inserted_at.elapsed() < self.ttl {
                Some(entry.result.clone())
            } else {
                None
            }
        })
    }

    pub fn put(&self, result: PrerequisiteResult) {
        let mut entries = self.entries.lock().expect("prereq cache poisoned");
        entries.insert(
            result.name.clone(),
            CacheEntry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self, name: Option<&str>) {
        let mut entries = self.entries.lock().expect("prereq cache poisoned");
        match name {
            Some(name) => {
                entries.remove(name);
            }
            None => entries.clear(),
        }
    }

    pub fn status(&self) -> CacheStatus {
        let entries = self.entries.lock().expect("prereq cache poisoned");
        let ttl_seconds = self.ttl.as_secs_f64();
        let status_entries = entries
            .iter()
            .map(|(name, entry)| {
                let age_seconds = entry.inserted_at.elapsed().as_secs_f64();
                let valid = age_seconds < ttl_seconds;
                let expires_in_seconds = (ttl_seconds - age_seconds).max(0.0);
                (
                    name.clone(),
                    CacheEntryStatus {
                        age_seconds,
                        valid,
                        expires_in_seconds,
                    },
                )
            })
            .collect();

        CacheStatus {
            ttl_seconds,
            entries: status_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckStatus, CheckerKind};

    fn result(name: &str) -> PrerequisiteResult {
        PrerequisiteResult {
            name: name.to_string(),
            status: CheckStatus::Passed,
            message: "ok".to_string(),
            details: None,
            resolution_steps: Vec::new(),
            check_time_seconds: 0.01,
            kind: CheckerKind::Required,
        }
    }

    #[test]
    fn put_then_get_round_trips_within_ttl() {
        let cache = ResultCache::new(60);
        cache.put(result("database"));
        assert!(cache.get("database").is_some());
    }

    #[test]
    fn expired_entries_are_not_returned() {
        let cache = ResultCache::new(0);
        cache.put(result("database"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("database").is_none());
    }

    #[test]
    fn clear_by_name_removes_only_that_entry() {
        let cache = ResultCache::new(60);
        cache.put(result("database"));
        cache.put(result("llm_service"));
        cache.clear(Some("database"));
        assert!(cache.get("database").is_none());
        assert!(cache.get("llm_service").is_some());
    }

    #[test]
    fn status_reports_age_and_validity() {
        let cache = ResultCache::new(60);
        cache.put(result("database"));
        let status = cache.status();
        let entry = status.entries.get("database").unwrap();
        assert!(entry.valid);
        assert!(entry.expires_in_seconds <= 60.0);
    }
}
