//! Artifact persistence shape and the storage trait boundary, ported from
//! `PALDPersistenceManager` in `original_source/src/logic/pald_diff_calculation.py`.
//!
//! Storage adapters themselves (a real database-backed `ArtifactStore`) are out
//! of scope — only the interface shape and an in-memory reference
//! implementation (used by the orchestrator's own tests) live here.

use chrono::{DateTime, Utc};
use pald_diff::DiffResult;
use pald_extraction::record::LightRecord;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Debug)]
pub struct InputHashes {
    pub description_hash: String,
    pub embodiment_hash: Option<String>,
    pub session_hash: String,
}

#[derive(Clone, Debug)]
pub struct Artifact {
    pub artifact_id: String,
    pub session_id: String,
    pub user_pseudonym: String,
    pub input_hashes: InputHashes,
    pub light_record: LightRecord,
    pub diff_result: Option<DiffResult>,
    pub created_at: DateTime<Utc>,
}

/// The exported projection of an [`Artifact`]. Deliberately excludes the raw
/// `description_text`/`embodiment_caption` the source text was derived from —
/// only the already-extracted structured record and hashes ever leave the
/// system, matching the original's explicit privacy note ("excluded for
/// privacy") on its export path.
#[derive(Clone, Debug)]
pub struct ExportedArtifact {
    pub artifact_id: String,
    pub session_id: String,
    pub user_pseudonym: String,
    pub input_hashes: InputHashes,
    pub light_record: LightRecord,
    pub diff_result: Option<DiffResult>,
    pub created_at: DateTime<Utc>,
}

impl From<&Artifact> for ExportedArtifact {
    fn from(artifact: &Artifact) -> Self {
        Self {
            artifact_id: artifact.artifact_id.clone(),
            session_id: artifact.session_id.clone(),
            user_pseudonym: artifact.user_pseudonym.clone(),
            input_hashes: artifact.input_hashes.clone(),
            light_record: artifact.light_record.clone(),
            diff_result: artifact.diff_result.clone(),
            created_at: artifact.created_at,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExportFilter {
    pub session_ids: Option<Vec<String>>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl ExportFilter {
    fn matches(&self, artifact: &Artifact) -> bool {
        if let Some(sessions) = &self.session_ids {
            if !sessions.contains(&artifact.session_id) {
                return false;
            }
        }
        if let Some(since) = self.since {
            if artifact.created_at < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if artifact.created_at > until {
                return false;
            }
        }
        true
    }
}

#[derive(Clone, Debug, Default)]
pub struct ArtifactStatistics {
    pub total: usize,
    pub unique_sessions: usize,
    pub unique_pseudonyms: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
    pub with_diff_count: usize,
}

/// Interface-only trait: a real implementation (Postgres, SQLite, ...) is a
/// storage-adapter concern and explicitly out of scope, but the shape callers
/// depend on is part of this crate's contract.
pub trait ArtifactStore: Send + Sync {
    fn create(&self, artifact: Artifact);
    fn get(&self, artifact_id: &str) -> Option<Artifact>;
    fn by_session(&self, session_id: &str) -> Vec<Artifact>;
    fn by_pseudonym(&self, pseudonym: &str) -> Vec<Artifact>;
    fn update_diff(&self, artifact_id: &str, diff: DiffResult) -> bool;
    fn export(&self, filter: ExportFilter) -> Vec<ExportedArtifact>;
    fn cleanup_older_than(&self, days: i64) -> usize;
    fn statistics(&self) -> ArtifactStatistics;
}

/// Reference in-memory store, grounded on `pald-bias`'s `RwLock`-free
/// process-wide map pattern (here a single `Mutex` suffices: artifact writes
/// are infrequent relative to bias job churn).
#[derive(Default)]
pub struct InMemoryArtifactStore {
    artifacts: Mutex<HashMap<String, Artifact>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn create(&self, artifact: Artifact) {
        self.artifacts
            .lock()
            .expect("artifact store poisoned")
            .insert(artifact.artifact_id.clone(), artifact);
    }

    fn get(&self, artifact_id: &str) -> Option<Artifact> {
        self.artifacts.lock().expect("artifact store poisoned").get(artifact_id).cloned()
    }

    fn by_session(&self, session_id: &str) -> Vec<Artifact> {
        self.artifacts
            .lock()
            .expect("artifact store poisoned")
            .values()
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect()
    }

    fn by_pseudonym(&self, pseudonym: &str) -> Vec<Artifact> {
        self.artifacts
            .lock()
            .expect("artifact store poisoned")
            .values()
            .filter(|a| a.user_pseudonym == pseudonym)
            .cloned()
            .collect()
    }

    fn update_diff(&self, artifact_id: &str, diff: DiffResult) -> bool {
        let mut artifacts = self.artifacts.lock().expect("artifact store poisoned");
        match artifacts.get_mut(artifact_id) {
            Some(artifact) => {
                artifact.diff_result = Some(diff);
                true
            }
            None => false,
        }
    }

    fn export(&self, filter: ExportFilter) -> Vec<ExportedArtifact> {
        self.artifacts
            .lock()
            .expect("artifact store poisoned")
            .values()
            .filter(|a| filter.matches(a))
            .map(ExportedArtifact::from)
            .collect()
    }

    fn cleanup_older_than(&self, days: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::days(days);
        let mut artifacts = self.artifacts.lock().expect("artifact store poisoned");
        let before = artifacts.len();
        artifacts.retain(|_, a| a.created_at >= cutoff);
        before - artifacts.len()
    }

    fn statistics(&self) -> ArtifactStatistics {
        let artifacts = self.artifacts.lock().expect("artifact store poisoned");
        let mut sessions = std::collections::HashSet::new();
        let mut pseudonyms = std::collections::HashSet::new();
        let mut oldest = None;
        let mut newest = None;
        let mut with_diff_count = 0;

        for artifact in artifacts.values() {
            sessions.insert(artifact.session_id.clone());
            pseudonyms.insert(artifact.user_pseudonym.clone());
            if artifact.diff_result.is_some() {
                with_diff_count += 1;
            }
            oldest = Some(oldest.map_or(artifact.created_at, |o: DateTime<Utc>| o.min(artifact.created_at)));
            newest = Some(newest.map_or(artifact.created_at, |n: DateTime<Utc>| n.max(artifact.created_at)));
        }

        ArtifactStatistics {
            total: artifacts.len(),
            unique_sessions: sessions.len(),
            unique_pseudonyms: pseudonyms.len(),
            oldest,
            newest,
            with_diff_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(id: &str, session: &str) -> Artifact {
        Artifact {
            artifact_id: id.to_string(),
            session_id: session.to_string(),
            user_pseudonym: "user_abc".to_string(),
            input_hashes: InputHashes {
                description_hash: "h1".to_string(),
                embodiment_hash: None,
                session_hash: "h2".to_string(),
            },
            light_record: LightRecord::default(),
            diff_result: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn export_never_carries_raw_text_fields() {
        let store = InMemoryArtifactStore::new();
        store.create(artifact("a1", "s1"));
        let exported = store.export(ExportFilter::default());
        assert_eq!(exported.len(), 1);
        // ExportedArtifact's type alone enforces this; this assertion documents
        // the invariant for readers.
        let _: &LightRecord = &exported[0].light_record;
    }

    #[test]
    fn statistics_count_unique_sessions_and_pseudonyms() {
        let store = InMemoryArtifactStore::new();
        store.create(artifact("a1", "s1"));
        store.create(artifact("a2", "s1"));
        store.create(artifact("a3", "s2"));
        let stats = store.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unique_sessions, 2);
        assert_eq!(stats.unique_pseudonyms, 1);
    }

    #[test]
    fn by_session_filters_correctly() {
        let store = InMemoryArtifactStore::new();
        store.create(artifact("a1", "s1"));
        store.create(artifact("a2", "s2"));
        assert_eq!(store.by_session("s1").len(), 1);
    }
}
