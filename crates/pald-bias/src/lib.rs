//! Bias Job Manager (C4), ported from `BiasAnalysisEngine`/`BiasJobManager`
//! in `original_source/src/logic/bias_analysis.py`.
//!
//! Bias analysis is deliberately decoupled from the synchronous extraction/
//! diff path: callers enqueue a [`types::BiasJob`] via [`manager::BiasJobManager`]
//! and a worker later drains the queue with [`manager::BiasJobManager::process_batch`],
//! strictly ordered by `(priority desc, created_at asc)`.

pub mod engine;
pub mod manager;
pub mod types;

pub use manager::BiasJobManager;
pub use types::{AnalysisType, BiasJob, BiasResult, Findings, JobResult, JobStatus};
