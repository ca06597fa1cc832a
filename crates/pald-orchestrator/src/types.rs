//! Request/response shapes for the processing pipeline, ported from
//! `PALDProcessingRequest`/`PALDProcessingResponse` in
//! `original_source/src/logic/pald.py`.

use chrono::{DateTime, Utc};
use pald_diff::DiffResult;
use pald_extraction::record::LightRecord;
use serde_json::Map as JsonMap;
use serde_json::Value as Json;

#[derive(Clone, Debug, Default)]
pub struct ProcessingRequest {
    /// Raw user identifier (§6 `user_id: uuid`); pseudonymised before
    /// persistence, never stored or exported verbatim.
    pub user_id: String,
    pub session_id: String,
    pub description_text: String,
    pub embodiment_caption: Option<String>,
    /// Per-request deferral request (§6 `defer_bias_scan?: bool`); bias
    /// analysis is deferred if this is set *or* `pald_analysis_deferred` is
    /// configured (§4.5 stage 3).
    pub defer_bias_scan: bool,
    /// Free-form passthrough the core never interprets beyond the named
    /// configuration keys (§6 "External interfaces").
    pub processing_options: JsonMap<String, Json>,
}

#[derive(Clone, Debug)]
pub struct ProcessingMetadata {
    pub artifact_id: Option<String>,
    pub extraction_confidence: f64,
    pub processing_timestamp: DateTime<Utc>,
    /// Set when the response is a degraded fallback produced by an outer
    /// pipeline exception, per §7's `error: bool` metadata flag.
    pub error: bool,
}

#[derive(Clone, Debug)]
pub struct ProcessingResponse {
    pub light_record: LightRecord,
    pub compressed_prompt: String,
    pub diff_result: Option<DiffResult>,
    /// Present only when bias analysis was deferred to the job queue: the
    /// human-readable notice `"Bias analysis queued for post-session
    /// processing (Job ID: {id})"`.
    pub bias_notice: Option<String>,
    /// Surfaces `light_record`'s extraction validation issues as strings,
    /// per §6's `validation_errors: string[]` response field; carries the
    /// outer-exception fallback's single error entry when degraded.
    pub validation_errors: Vec<String>,
    pub processing_metadata: ProcessingMetadata,
}
