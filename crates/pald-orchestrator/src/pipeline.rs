//! The Processing Orchestrator (C5), ported from
//! `PALDManager.process_enhanced_pald` in `original_source/src/logic/pald.py`.
//!
//! Five isolated stages — Extract, Diff, Bias, Persist, Respond — each of
//! which degrades independently on failure rather than unwinding the whole
//! pipeline, mirroring the original's per-step `try`/`except` blocks.

use crate::artifact::{Artifact, ArtifactStore, InputHashes};
use crate::types::{ProcessingMetadata, ProcessingRequest, ProcessingResponse};
use chrono::Utc;
use pald_bias::{AnalysisType, BiasJobManager};
use pald_config::PaldConfig;
use pald_schema::SchemaRegistry;
use pald_utils::hashing::{content_hash, derive_id, pseudonymize_user};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Orchestrator {
    schema_registry: Arc<SchemaRegistry>,
    config: PaldConfig,
    bias_manager: Arc<BiasJobManager>,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl Orchestrator {
    pub fn new(
        schema_registry: Arc<SchemaRegistry>,
        config: PaldConfig,
        bias_manager: Arc<BiasJobManager>,
        artifact_store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            schema_registry,
            config,
            bias_manager,
            artifact_store,
        }
    }

    /// Runs the full pipeline; any exception escaping all five isolated
    /// stages is caught here and converted into a minimal fallback response
    /// (fallback record, `person` compressed prompt, one validation error,
    /// `metadata.error = true`), per §7's "a request always returns a
    /// response" guarantee.
    pub fn process(&self, request: ProcessingRequest) -> ProcessingResponse {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.process_inner(&request))) {
            Ok(response) => response,
            Err(_) => {
                warn!(session_id = %request.session_id, "processing pipeline panicked, returning fallback response");
                let record = pald_extraction::extract::fallback_record(&request.description_text, "internal processing error");
                ProcessingResponse {
                    validation_errors: record
                        .validation_issues
                        .iter()
                        .map(|issue| issue.message.clone())
                        .collect(),
                    light_record: record,
                    compressed_prompt: "person".to_string(),
                    diff_result: None,
                    bias_notice: None,
                    processing_metadata: ProcessingMetadata {
                        artifact_id: None,
                        extraction_confidence: 0.1,
                        processing_timestamp: Utc::now(),
                        error: true,
                    },
                }
            }
        }
    }

    fn process_inner(&self, request: &ProcessingRequest) -> ProcessingResponse {
        debug!(session_id = %request.session_id, "processing PALD request");
        let schema = self.schema_registry.load();

        // Stage 1: extract. `pald_extraction::extract` already degrades
        // internally on panic, so this stage cannot fail the pipeline.
        let outcome = pald_extraction::extract(
            &request.description_text,
            request.embodiment_caption.as_deref(),
            &schema,
        );
        let record = outcome.record;
        let compressed_prompt = outcome.compressed_prompt.0.clone();
        let extraction_confidence = record.confidence;

        // Stage 2: diff, only when an embodiment was supplied. The
        // embodiment-only record is extracted independently (not the
        // combined stage-1 record) per the original's two-call contract.
        let diff_result = request.embodiment_caption.as_deref().map(|embodiment_text| {
            let embodiment_outcome = pald_extraction::extract("", Some(embodiment_text), &schema);
            pald_diff::diff(&record, &embodiment_outcome.record)
        });

        // Stage 3: bias handling, isolated from stages 1-2's outputs.
        let bias_notice = self.handle_bias_analysis(request, &record);

        // Stage 4: persist, isolated so a storage failure never reverts the
        // extraction/diff/bias results already computed.
        let artifact_id = self.persist_artifact(request, &record, diff_result.clone());

        let validation_errors = record.validation_issues.iter().map(|issue| issue.message.clone()).collect();

        ProcessingResponse {
            validation_errors,
            light_record: record,
            compressed_prompt,
            diff_result,
            bias_notice,
            processing_metadata: ProcessingMetadata {
                artifact_id,
                extraction_confidence,
                processing_timestamp: Utc::now(),
                error: false,
            },
        }
    }

    /// Per `DESIGN.md`'s Open Question decision: when bias analysis is
    /// deferred, a job is enqueued and a notice string returned; when it is
    /// not deferred, the original only logs and continues — no immediate
    /// analysis is performed synchronously. Never gated on the presence of an
    /// embodiment caption (§4.5 stage 3): when none was supplied, the job is
    /// enqueued with an empty embodiment record, matching the original's
    /// `embodiment_pald = {}` fallback.
    fn handle_bias_analysis(
        &self,
        request: &ProcessingRequest,
        record: &pald_extraction::record::LightRecord,
    ) -> Option<String> {
        if !self.config.enable_bias_analysis {
            return None;
        }

        if request.defer_bias_scan || self.config.pald_analysis_deferred {
            let embodiment_record = match request.embodiment_caption.as_deref() {
                Some(embodiment_text) => {
                    let schema = self.schema_registry.load();
                    pald_extraction::extract("", Some(embodiment_text), &schema).record
                }
                None => pald_extraction::record::LightRecord::default(),
            };
            let job_id = self.bias_manager.create_job(
                request.session_id.clone(),
                record.clone(),
                embodiment_record,
                self.enabled_analysis_types(),
                0,
            );
            Some(format!("Bias analysis queued for post-session processing (Job ID: {job_id})"))
        } else {
            debug!(session_id = %request.session_id, "immediate bias analysis requested but not performed synchronously");
            None
        }
    }

    fn enabled_analysis_types(&self) -> Vec<AnalysisType> {
        let mut types = Vec::new();
        if self.config.enable_age_shift_analysis {
            types.push(AnalysisType::AgeShift);
        }
        if self.config.enable_gender_conformity_analysis {
            types.push(AnalysisType::GenderConformity);
        }
        if self.config.enable_ethnicity_analysis {
            types.push(AnalysisType::EthnicityConsistency);
        }
        if self.config.enable_occupational_stereotype_analysis {
            types.push(AnalysisType::OccupationalStereotypes);
        }
        if self.config.enable_ambivalent_stereotype_analysis {
            types.push(AnalysisType::AmbivalentStereotypes);
        }
        if self.config.enable_multiple_stereotyping_analysis {
            types.push(AnalysisType::MultipleStereotyping);
        }
        types
    }

    fn persist_artifact(
        &self,
        request: &ProcessingRequest,
        record: &pald_extraction::record::LightRecord,
        diff_result: Option<pald_diff::DiffResult>,
    ) -> Option<String> {
        let artifact_id = derive_id("artifact", &format!("{}:{}", request.session_id, Utc::now().timestamp_nanos_opt().unwrap_or_default()));
        let user_pseudonym = if self.config.enable_pseudonymization {
            pseudonymize_user(&request.user_id)
        } else {
            request.user_id.clone()
        };

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let artifact = Artifact {
                artifact_id: artifact_id.clone(),
                session_id: request.session_id.clone(),
                user_pseudonym,
                input_hashes: InputHashes {
                    description_hash: content_hash(&request.description_text),
                    embodiment_hash: request.embodiment_caption.as_deref().map(content_hash),
                    session_hash: content_hash(&request.session_id),
                },
                light_record: record.clone(),
                diff_result,
                created_at: Utc::now(),
            };
            self.artifact_store.create(artifact);
        }));

        match outcome {
            Ok(()) => Some(artifact_id),
            Err(_) => {
                warn!(session_id = %request.session_id, "artifact persistence failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::InMemoryArtifactStore;

    fn orchestrator(config: PaldConfig) -> Orchestrator {
        let registry = Arc::new(SchemaRegistry::new("does-not-exist.json", 300));
        let bias_manager = Arc::new(BiasJobManager::new(config.bias_job_batch_size));
        let store = Arc::new(InMemoryArtifactStore::new());
        Orchestrator::new(registry, config, bias_manager, store)
    }

    #[test]
    fn scenario_a_extraction_only_when_no_embodiment() {
        let orch = orchestrator(PaldConfig::default());
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: "A friendly female teacher wearing a blue dress, she looks realistic and competent".to_string(),
            embodiment_caption: None,
            ..Default::default()
        });
        assert_eq!(
            response.light_record.get("middle_design_level", "role").unwrap().as_str(),
            Some("teacher")
        );
        assert!(response.diff_result.is_none());
        assert!(response.bias_notice.is_none());
        assert!(response.processing_metadata.artifact_id.is_some());
    }

    #[test]
    fn diff_runs_only_when_embodiment_present() {
        let orch = orchestrator(PaldConfig::default());
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: "A friendly female teacher wearing a blue dress".to_string(),
            embodiment_caption: Some("A friendly female teacher wearing a blue dress".to_string()),
            ..Default::default()
        });
        assert!(response.diff_result.is_some());
    }

    #[test]
    fn empty_description_yields_degraded_response_with_a_validation_error() {
        let orch = orchestrator(PaldConfig::default());
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: String::new(),
            embodiment_caption: None,
            ..Default::default()
        });
        assert_eq!(response.compressed_prompt, "person");
        assert_eq!(response.processing_metadata.extraction_confidence, 0.0);
        assert!(!response.validation_errors.is_empty());
        assert!(!response.processing_metadata.error);
    }

    #[test]
    fn deferred_bias_analysis_enqueues_a_job_and_returns_a_notice() {
        let mut config = PaldConfig::default();
        config.pald_analysis_deferred = true;
        let orch = orchestrator(config);
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: "A teacher".to_string(),
            embodiment_caption: Some("A teacher".to_string()),
            ..Default::default()
        });
        assert!(response.bias_notice.unwrap().contains("Job ID"));
        assert_eq!(orch.bias_manager.pending_job_count(), 1);
    }

    #[test]
    fn non_deferred_bias_analysis_logs_and_returns_no_notice() {
        let mut config = PaldConfig::default();
        config.pald_analysis_deferred = false;
        let orch = orchestrator(config);
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: "A teacher".to_string(),
            embodiment_caption: Some("A teacher".to_string()),
            ..Default::default()
        });
        assert!(response.bias_notice.is_none());
        assert_eq!(orch.bias_manager.pending_job_count(), 0);
    }

    #[test]
    fn disabled_bias_analysis_never_enqueues() {
        let mut config = PaldConfig::default();
        config.enable_bias_analysis = false;
        let orch = orchestrator(config);
        let response = orch.process(ProcessingRequest {
            session_id: "s1".to_string(),
            description_text: "A teacher".to_string(),
            embodiment_caption: Some("A teacher".to_string()),
            ..Default::default()
        });
        assert!(response.bias_notice.is_none());
        assert_eq!(orch.bias_manager.pending_job_count(), 0);
    }
}
