//! Command executors, one function per subcommand in [`super::args::Commands`].
//!
//! Each executor owns its own human-readable output and error mapping; `run`
//! only dispatches. Exit codes follow the teacher's convention: `0` success,
//! `1` a degraded/failed result reported by a library (not a crash), `2` a
//! configuration or argument problem.

use async_trait::async_trait;
use pald_bias::{AnalysisType, BiasJobManager};
use pald_config::PaldConfig;
use pald_prereq::{
    default_policy, ConsentChecker, ConsentStore, DatabaseChecker, DatabaseProbe, DatabaseProbeError, PrerequisiteValidator, SystemHealthChecker,
    TablePresence,
};
use pald_schema::SchemaRegistry;
use std::sync::Arc;

pub fn execute_extract(registry: &SchemaRegistry, description: &str, embodiment: Option<&str>) -> Result<(), i32> {
    let schema = registry.load();
    let outcome = pald_extraction::extract(description, embodiment, &schema);

    println!("compressed prompt: {}", outcome.compressed_prompt.0);
    println!("confidence: {:.2}", outcome.record.confidence);
    println!("{:#?}", outcome.record);
    Ok(())
}

pub fn execute_diff(registry: &SchemaRegistry, description: &str, embodiment: &str) -> Result<(), i32> {
    let schema = registry.load();
    let description_record = pald_extraction::extract(description, None, &schema).record;
    let embodiment_record = pald_extraction::extract("", Some(embodiment), &schema).record;
    let result = pald_diff::diff(&description_record, &embodiment_record);

    println!("similarity: {:.2}", result.similarity);
    println!("summary: {}", result.summary);
    if result.metadata.error {
        println!("degraded: {}", result.metadata.error_message.as_deref().unwrap_or("unknown error"));
    }
    println!("matches: {}", result.matches.len());
    println!("hallucinations: {}", result.hallucinations.len());
    println!("missing: {}", result.missing.len());
    for (field, entry) in &result.hallucinations {
        println!("  hallucination {field}: {}", entry.reason);
    }
    for (field, entry) in &result.missing {
        println!("  missing {field}: {}", entry.reason);
    }
    Ok(())
}

pub fn execute_process(
    registry: &Arc<SchemaRegistry>,
    config: PaldConfig,
    user_id: String,
    session_id: String,
    description: String,
    embodiment: Option<String>,
    defer_bias: bool,
) -> Result<(), i32> {
    use pald_orchestrator::{InMemoryArtifactStore, Orchestrator, ProcessingRequest};

    let bias_manager = Arc::new(BiasJobManager::new(config.bias_job_batch_size));
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let orchestrator = Orchestrator::new(Arc::clone(registry), config, bias_manager, artifact_store);

    let response = orchestrator.process(ProcessingRequest {
        user_id,
        session_id,
        description_text: description,
        embodiment_caption: embodiment,
        defer_bias_scan: defer_bias,
        processing_options: Default::default(),
    });

    println!("artifact id: {}", response.processing_metadata.artifact_id.as_deref().unwrap_or("<none, persistence degraded>"));
    println!("extraction confidence: {:.2}", response.processing_metadata.extraction_confidence);
    println!("compressed prompt: {}", response.compressed_prompt);
    if let Some(notice) = &response.bias_notice {
        println!("bias: {notice}");
    }
    if let Some(diff) = &response.diff_result {
        println!("diff similarity: {:.2} ({})", diff.similarity, diff.summary);
    }
    if response.processing_metadata.error {
        println!("degraded: processing pipeline fell back to a minimal response");
    }
    for error in &response.validation_errors {
        println!("validation error: {error}");
    }
    Ok(())
}

pub async fn execute_prereq_run_all() -> Result<(), i32> {
    let validator = demo_validator();
    let suite = validator.run_all(false).await;
    print_suite(&suite);
    if suite.overall_status == pald_prereq::CheckStatus::Failed {
        return Err(1);
    }
    Ok(())
}

pub async fn execute_prereq_operation(name: &str) -> Result<(), i32> {
    let Some(_policy) = default_policy(name) else {
        eprintln!("note: '{name}' has no registered policy, falling back to run-all");
        return execute_prereq_run_all().await;
    };

    let validator = demo_validator();
    let readiness = validator.check_operation_readiness(name).await;
    println!("operation: {name}");
    println!("ready: {}", readiness.ready);
    println!("can proceed with warnings: {}", readiness.can_proceed_with_warnings);
    if !readiness.required_failures.is_empty() {
        println!("required failures: {}", readiness.required_failures.join(", "));
    }
    if !readiness.recommended_failures.is_empty() {
        println!("recommended failures: {}", readiness.recommended_failures.join(", "));
    }

    let suite = validator.validate_for_operation(name, false, true).await;
    for recommendation in pald_prereq::synthesize_recommendations(&suite) {
        println!(
            "recommendation [{}] {}: {}",
            recommendation.priority.as_str(),
            recommendation.checker_name,
            recommendation.issue
        );
    }

    if !readiness.ready {
        return Err(1);
    }
    Ok(())
}

pub fn execute_bias_demo(registry: &Arc<SchemaRegistry>, jobs: usize, limit: usize) -> Result<(), i32> {
    let manager = BiasJobManager::new(limit.max(1));
    let schema = registry.load();
    let description = pald_extraction::extract("A friendly female teacher wearing a blue dress", None, &schema).record;
    let embodiment = pald_extraction::extract("", Some("A teacher"), &schema).record;

    for i in 0..jobs {
        let priority = (i % 3) as i64;
        let job_id = manager.create_job(format!("demo-session-{i}"), description.clone(), embodiment.clone(), AnalysisType::ALL.to_vec(), priority);
        println!("enqueued job {job_id} at priority {priority}");
    }

    println!("pending jobs: {}", manager.pending_job_count());
    let results = manager.process_batch(limit);
    println!("processed {} job(s) in priority-desc, created-at-asc order:", results.len());
    for result in &results {
        println!("  {} -> {} ({:.4}s)", result.job_id, result.status.as_str(), result.processing_time_seconds);
    }
    Ok(())
}

/// Builds a [`PrerequisiteValidator`] wired for CLI demonstration: `database`
/// and `consent_status` use always-pass stub adapters (the spec puts real
/// service reachability out of scope), `system_health` samples the host via
/// `sysinfo`.
fn demo_validator() -> PrerequisiteValidator {
    let database = DatabaseChecker::new(Box::new(AlwaysHealthyDatabase));
    let consent = ConsentChecker::new("demo-user", Box::new(AlwaysConsentingStore));
    let system_health = SystemHealthChecker::new();

    PrerequisiteValidator::new(
        vec![Arc::new(database), Arc::new(consent), Arc::new(system_health)],
        60,
        30,
    )
}

struct AlwaysHealthyDatabase;

#[async_trait]
impl DatabaseProbe for AlwaysHealthyDatabase {
    async fn probe(&self) -> Result<TablePresence, DatabaseProbeError> {
        Ok(TablePresence { found: 1, expected: 1 })
    }
}

struct AlwaysConsentingStore;

#[async_trait]
impl ConsentStore for AlwaysConsentingStore {
    async fn has_consent(&self, _user_id: &str, _slug: &str) -> bool {
        true
    }
}

fn print_suite(suite: &pald_prereq::CheckSuite) {
    println!("overall: {}", suite.overall_status.as_str());
    println!("required passed: {}", suite.required_passed);
    println!("recommended passed: {}", suite.recommended_passed);
    for result in &suite.results {
        println!(
            "  [{}] {} ({}): {}",
            result.kind.as_str(),
            result.name,
            result.status.as_str(),
            result.message
        );
    }
}
