//! Bias Job Manager (C4), ported from `BiasJobManager` in
//! `original_source/src/logic/bias_analysis.py`. Jobs are kept in a
//! `RwLock`-guarded map of per-job `Mutex`es so enumeration (listing pending
//! jobs for a batch) doesn't block concurrent readers while a single job's
//! status transition is exclusive.

use crate::engine;
use crate::types::{AnalysisType, BiasJob, BiasResult, JobResult, JobStatus};
use chrono::{DateTime, Duration, Utc};
use pald_extraction::record::LightRecord;
use pald_utils::{PaldError, PaldResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

const MIN_PROCESSING_SECONDS: f64 = 0.001;

pub struct BiasJobManager {
    jobs: RwLock<HashMap<String, Arc<Mutex<BiasJob>>>>,
    sequence: AtomicU64,
    batch_size: usize,
}

impl BiasJobManager {
    pub fn new(batch_size: usize) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            batch_size: batch_size.max(1),
        }
    }

    /// Creates and enqueues a pending job, returning its id.
    pub fn create_job(
        &self,
        session_id: impl Into<String>,
        description_record: LightRecord,
        embodiment_record: LightRecord,
        analysis_types: Vec<AnalysisType>,
        priority: i64,
    ) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let job_id = pald_utils::hashing::derive_id("bias_job", &sequence.to_string());
        let analysis_types = if analysis_types.is_empty() {
            AnalysisType::ALL.to_vec()
        } else {
            analysis_types
        };

        let job = BiasJob {
            job_id: job_id.clone(),
            session_id: session_id.into(),
            created_at: Utc::now(),
            description_record,
            embodiment_record,
            analysis_types,
            priority,
            status: JobStatus::Pending,
            results: Vec::new(),
            error: None,
            processed_at: None,
            sequence,
        };

        self.jobs
            .write()
            .expect("bias job map poisoned")
            .insert(job_id.clone(), Arc::new(Mutex::new(job)));
        info!(job_id = %job_id, "bias job enqueued");
        job_id
    }

    pub fn pending_job_count(&self) -> usize {
        self.jobs
            .read()
            .expect("bias job map poisoned")
            .values()
            .filter(|j| matches!(j.lock().expect("job poisoned").status, JobStatus::Pending))
            .count()
    }

    /// Runs every analysis type assigned to a single job and transitions it to
    /// `Completed`/`Failed`. Returns `None` if the job was not `Pending`
    /// (already claimed by a racing caller, or not found).
    pub fn process_job(&self, job_id: &str) -> Option<JobResult> {
        let handle = {
            let jobs = self.jobs.read().expect("bias job map poisoned");
            jobs.get(job_id)?.clone()
        };

        {
            let mut job = handle.lock().expect("job poisoned");
            if !matches!(job.status, JobStatus::Pending) {
                return None;
            }
            job.status = JobStatus::Processing;
        }

        let started = Utc::now();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let job = handle.lock().expect("job poisoned");
            run_analyses(&job.description_record, &job.embodiment_record, &job.analysis_types)
        }));

        let mut job = handle.lock().expect("job poisoned");
        let elapsed = (Utc::now() - started).num_milliseconds() as f64 / 1000.0;
        let processing_time_seconds = elapsed.max(MIN_PROCESSING_SECONDS);
        job.processed_at = Some(Utc::now());

        match outcome {
            Ok(results) => {
                job.status = JobStatus::Completed;
                job.results = results.clone();
                Some(JobResult {
                    job_id: job.job_id.clone(),
                    status: job.status,
                    results,
                    processing_time_seconds,
                    error: None,
                })
            }
            Err(_) => {
                warn!(job_id = %job.job_id, "bias analysis panicked");
                job.status = JobStatus::Failed;
                job.error = Some("bias analysis failed".to_string());
                Some(JobResult {
                    job_id: job.job_id.clone(),
                    status: job.status,
                    results: Vec::new(),
                    processing_time_seconds,
                    error: job.error.clone(),
                })
            }
        }
    }

    /// Picks up to `limit` pending jobs, strictly ordered by
    /// `(priority desc, created_at asc)`, and processes each to completion.
    /// A job claimed by a racing caller between the snapshot and the process
    /// attempt is silently skipped, never double-processed.
    pub fn process_batch(&self, limit: usize) -> Vec<JobResult> {
        let mut candidates: Vec<(String, i64, DateTime<Utc>, u64)> = {
            let jobs = self.jobs.read().expect("bias job map poisoned");
            jobs.values()
                .filter_map(|handle| {
                    let job = handle.lock().expect("job poisoned");
                    matches!(job.status, JobStatus::Pending)
                        .then(|| (job.job_id.clone(), job.priority, job.created_at, job.sequence))
                })
                .collect()
        };

        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.3.cmp(&b.3)));
        candidates.truncate(limit);

        candidates
            .into_iter()
            .filter_map(|(job_id, ..)| self.process_job(&job_id))
            .collect()
    }

    /// Drains the configured default batch size (`pald_config::PaldConfig::bias_job_batch_size`),
    /// for periodic queue workers that don't need an explicit per-call limit.
    pub fn process_default_batch(&self) -> Vec<JobResult> {
        self.process_batch(self.batch_size)
    }

    pub fn job_status(&self, job_id: &str) -> PaldResult<JobStatus> {
        let jobs = self.jobs.read().expect("bias job map poisoned");
        let handle = jobs.get(job_id).ok_or_else(|| PaldError::JobNotFound {
            job_id: job_id.to_string(),
        })?;
        Ok(handle.lock().expect("job poisoned").status)
    }

    pub fn job_results(&self, job_id: &str) -> PaldResult<Vec<BiasResult>> {
        let jobs = self.jobs.read().expect("bias job map poisoned");
        let handle = jobs.get(job_id).ok_or_else(|| PaldError::JobNotFound {
            job_id: job_id.to_string(),
        })?;
        let job = handle.lock().expect("job poisoned");
        match job.status {
            JobStatus::Completed => Ok(job.results.clone()),
            _ => Err(PaldError::JobNotCompleted {
                job_id: job_id.to_string(),
            }),
        }
    }

    /// Removes completed or failed jobs whose `processed_at` is older than
    /// `older_than_hours`. Returns the number of jobs removed.
    pub fn clear_completed_jobs(&self, older_than_hours: i64) -> usize {
        let cutoff = Utc::now() - Duration::hours(older_than_hours);
        let mut jobs = self.jobs.write().expect("bias job map poisoned");
        let before = jobs.len();
        jobs.retain(|_, handle| {
            let job = handle.lock().expect("job poisoned");
            match (job.status, job.processed_at) {
                (JobStatus::Completed | JobStatus::Failed, Some(processed_at)) => processed_at >= cutoff,
                _ => true,
            }
        });
        before - jobs.len()
    }
}

fn run_analyses(
    description: &LightRecord,
    embodiment: &LightRecord,
    analysis_types: &[AnalysisType],
) -> Vec<BiasResult> {
    let mut results = Vec::new();
    let wants = |t: AnalysisType| analysis_types.contains(&t);

    if wants(AnalysisType::AgeShift) {
        results.push(engine::analyze_age_shift(description, embodiment));
    }
    if wants(AnalysisType::GenderConformity) {
        results.push(engine::analyze_gender_conformity(description, embodiment));
    }
    if wants(AnalysisType::EthnicityConsistency) {
        results.push(engine::analyze_ethnicity_consistency(description, embodiment));
    }
    if wants(AnalysisType::OccupationalStereotypes) {
        results.push(engine::analyze_occupational_stereotypes(description, embodiment));
    }
    if wants(AnalysisType::AmbivalentStereotypes) {
        results.push(engine::analyze_ambivalent_stereotypes(description, embodiment));
    }
    if wants(AnalysisType::MultipleStereotyping) {
        let summary = engine::analyze_multiple_stereotyping(&results);
        results.push(summary);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pald_utils::Value;

    fn record() -> LightRecord {
        let mut r = LightRecord::default();
        r.set("detailed_level", "age", Value::Int(25));
        r
    }

    #[test]
    fn batch_processes_in_priority_then_age_order() {
        let manager = BiasJobManager::new(10);
        let low = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 1);
        let high = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 10);
        let mid = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 5);

        let results = manager.process_batch(10);
        let order: Vec<&str> = results.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(order, vec![high.as_str(), mid.as_str(), low.as_str()]);
    }

    /// Scenario D: priorities 1, 3, 2 — `process_batch(2)` must pick the
    /// priority-3 and priority-2 jobs, leaving the priority-1 job pending.
    #[test]
    fn scenario_d_priority_ordered_batch_processing() {
        let manager = BiasJobManager::new(10);
        let p1 = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 1);
        let p3 = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 3);
        let p2 = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 2);

        let results = manager.process_batch(2);
        let order: Vec<&str> = results.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(order, vec![p3.as_str(), p2.as_str()]);
        assert_eq!(manager.pending_job_count(), 1);
        assert!(matches!(manager.job_status(&p1).unwrap(), JobStatus::Pending));
    }

    #[test]
    fn a_pending_job_is_never_processed_twice_concurrently() {
        let manager = BiasJobManager::new(10);
        let job_id = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 0);

        let first = manager.process_job(&job_id);
        let second = manager.process_job(&job_id);
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn status_and_results_round_trip() {
        let manager = BiasJobManager::new(10);
        let job_id = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 0);
        assert!(matches!(manager.job_status(&job_id).unwrap(), JobStatus::Pending));

        manager.process_job(&job_id).unwrap();
        assert!(matches!(manager.job_status(&job_id).unwrap(), JobStatus::Completed));
        assert_eq!(manager.job_results(&job_id).unwrap().len(), 1);
    }

    #[test]
    fn results_before_completion_is_an_error() {
        let manager = BiasJobManager::new(10);
        let job_id = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 0);
        assert!(manager.job_results(&job_id).is_err());
    }

    #[test]
    fn unknown_job_is_an_error() {
        let manager = BiasJobManager::new(10);
        assert!(manager.job_status("missing").is_err());
    }

    #[test]
    fn clear_completed_jobs_respects_age_cutoff() {
        let manager = BiasJobManager::new(10);
        let job_id = manager.create_job("s1", record(), record(), vec![AnalysisType::AgeShift], 0);
        manager.process_job(&job_id).unwrap();

        assert_eq!(manager.clear_completed_jobs(24), 0);
        assert_eq!(manager.clear_completed_jobs(0), 1);
        assert!(manager.job_status(&job_id).is_err());
    }
}
