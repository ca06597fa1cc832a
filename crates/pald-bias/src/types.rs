//! Bias job/result types, ported from the dataclasses in
//! `original_source/src/logic/bias_analysis.py` (`BiasType`, `JobStatus`,
//! `BiasResult`, `BiasAnalysisJob`, `BiasJobResult`).

use chrono::{DateTime, Utc};
use pald_extraction::record::LightRecord;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnalysisType {
    AgeShift,
    GenderConformity,
    EthnicityConsistency,
    OccupationalStereotypes,
    AmbivalentStereotypes,
    MultipleStereotyping,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 6] = [
        AnalysisType::AgeShift,
        AnalysisType::GenderConformity,
        AnalysisType::EthnicityConsistency,
        AnalysisType::OccupationalStereotypes,
        AnalysisType::AmbivalentStereotypes,
        AnalysisType::MultipleStereotyping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::AgeShift => "age_shift",
            AnalysisType::GenderConformity => "gender_conformity",
            AnalysisType::EthnicityConsistency => "ethnicity_consistency",
            AnalysisType::OccupationalStereotypes => "occupational_stereotypes",
            AnalysisType::AmbivalentStereotypes => "ambivalent_stereotypes",
            AnalysisType::MultipleStereotyping => "multiple_stereotyping",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// Findings are kept as a loosely-typed string map: the spec only commits to
/// "must include at minimum the fields named" per analysis, not a closed
/// schema, so a `BTreeMap<String, String>` (rather than a bespoke struct per
/// analysis) is the simplest faithful representation.
pub type Findings = BTreeMap<String, String>;

#[derive(Clone, Debug)]
pub struct BiasResult {
    pub analysis_type: AnalysisType,
    pub findings: Findings,
    pub confidence: f64,
    pub indicators: Vec<String>,
    pub recommendations: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl BiasResult {
    pub fn new(analysis_type: AnalysisType) -> Self {
        Self {
            analysis_type,
            findings: Findings::new(),
            confidence: 0.0,
            indicators: Vec::new(),
            recommendations: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BiasJob {
    pub job_id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub description_record: LightRecord,
    pub embodiment_record: LightRecord,
    pub analysis_types: Vec<AnalysisType>,
    pub priority: i64,
    pub status: JobStatus,
    pub results: Vec<BiasResult>,
    pub error: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    /// Monotonic creation sequence, used only to break ties when two jobs
    /// share a `created_at` timestamp (sub-millisecond creation in tests and
    /// under load). Not part of the spec's ordering contract, which is
    /// defined purely in terms of `(priority, created_at)`.
    pub(crate) sequence: u64,
}

#[derive(Clone, Debug)]
pub struct JobResult {
    pub job_id: String,
    pub status: JobStatus,
    pub results: Vec<BiasResult>,
    pub processing_time_seconds: f64,
    pub error: Option<String>,
}
