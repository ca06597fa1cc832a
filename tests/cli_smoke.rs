//! End-to-end smoke tests for the `pald` binary, exercising each subcommand
//! against a nonexistent schema path (the registry falls back to the
//! built-in default schema, so these don't depend on any fixture file).

use assert_cmd::Command;
use predicates::prelude::*;

fn pald() -> Command {
    let mut cmd = Command::cargo_bin("pald").unwrap();
    cmd.arg("--schema-file").arg("/nonexistent/schema.json");
    cmd
}

#[test]
fn extract_prints_compressed_prompt_and_confidence() {
    pald()
        .arg("extract")
        .arg("A friendly female teacher wearing a blue dress")
        .assert()
        .success()
        .stdout(predicate::str::contains("compressed prompt:"))
        .stdout(predicate::str::contains("confidence:"));
}

#[test]
fn diff_prints_similarity_and_summary() {
    pald()
        .arg("diff")
        .arg("A friendly teacher")
        .arg("--embodiment")
        .arg("A friendly teacher wearing a blue dress")
        .assert()
        .success()
        .stdout(predicate::str::contains("similarity:"))
        .stdout(predicate::str::contains("summary:"));
}

#[test]
fn process_runs_the_full_pipeline_and_prints_an_artifact_id() {
    pald()
        .arg("process")
        .arg("--session-id")
        .arg("smoke-test-session")
        .arg("A friendly teacher")
        .arg("--embodiment")
        .arg("A teacher")
        .assert()
        .success()
        .stdout(predicate::str::contains("artifact id:"))
        .stdout(predicate::str::contains("extraction confidence:"));
}

#[test]
fn process_defer_bias_flag_queues_a_job_notice() {
    pald()
        .arg("process")
        .arg("--session-id")
        .arg("smoke-test-session")
        .arg("--defer-bias")
        .arg("A friendly teacher")
        .assert()
        .success()
        .stdout(predicate::str::contains("bias: Bias analysis queued"));
}

#[test]
fn prereq_run_all_reports_each_named_checker() {
    pald()
        .arg("prereq")
        .arg("run-all")
        .assert()
        .stdout(predicate::str::contains("database"))
        .stdout(predicate::str::contains("consent_status"))
        .stdout(predicate::str::contains("system_health"));
}

#[test]
fn prereq_operation_falls_back_to_run_all_for_unknown_names() {
    pald()
        .arg("prereq")
        .arg("operation")
        .arg("not-a-real-operation")
        .assert()
        .stderr(predicate::str::contains("falling back to run-all"));
}

#[test]
fn bias_demo_processes_jobs_in_priority_order() {
    pald()
        .arg("bias")
        .arg("demo")
        .arg("--jobs")
        .arg("4")
        .arg("--limit")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("pending jobs: 4"))
        .stdout(predicate::str::contains("processed 2 job(s)"));
}
