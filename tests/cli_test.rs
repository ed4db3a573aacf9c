//! CLI contract tests
//!
//! Drives the mindscope binary inside temporary survey workspaces:
//! stateless scoring, submission with the one-response-per-email rule,
//! listing, stats, deletion and config handling.

use std::path::{Path, PathBuf};
use std::process::Command;

fn mindscope_bin() -> String {
    env!("CARGO_BIN_EXE_mindscope").to_string()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run mindscope with --root set to `dir`; returns (exit code, stdout, stderr)
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(mindscope_bin())
        .arg("--root")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run mindscope");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run(dir, args);
    assert_eq!(code, 0, "mindscope {:?} failed: {}", args, stderr);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON ({e}): {stdout}"))
}

fn submit(dir: &Path) -> serde_json::Value {
    let file = fixture("submission.json");
    run_json(dir, &["submit", file.to_str().unwrap(), "--format", "json"])
}

// ============================================================================
// score
// ============================================================================

#[test]
fn test_score_json_result() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture("answers.json");
    let result = run_json(dir.path(), &["score", file.to_str().unwrap(), "--format", "json"]);

    assert_eq!(result["invalidationScore"], 20.0);
    assert_eq!(result["invalidationLevel"], "Low");
    assert_eq!(result["attachmentStyle"], "Secure");
    assert_eq!(result["attachmentScore"], 5.0);
    assert_eq!(result["reappraisalScore"], 6.0);
    assert_eq!(result["suppressionScore"], 2.0);
    assert_eq!(result["emotionRegulationTendency"], "Cognitive Reappraisal");
    assert!(result["personalitySummary"]
        .as_str()
        .unwrap()
        .starts_with("Your childhood emotional environment shows a low level of invalidation."));

    // Nothing stored
    assert!(!dir.path().join(".mindscope").join("responses.json").exists());
}

#[test]
fn test_score_explain_keeps_json_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture("answers.json");
    let (code, stdout, stderr) = run(
        dir.path(),
        &["score", file.to_str().unwrap(), "--format", "json", "--explain"],
    );
    assert_eq!(code, 0, "{stderr}");
    let _: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert!(stderr.contains("Score Breakdown"));
}

#[test]
fn test_score_rejects_out_of_range_answer() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture("out_of_range.json");
    let (code, _, stderr) = run(dir.path(), &["score", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("outside the scale"), "{stderr}");
}

#[test]
fn test_score_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["score", "nope.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to read"), "{stderr}");
}

// ============================================================================
// submit / responses
// ============================================================================

#[test]
fn test_submit_stores_respondent() {
    let dir = tempfile::tempdir().unwrap();
    let respondent = submit(dir.path());

    assert_eq!(respondent["demographics"]["email"], "priya.sharma@example.com");
    assert_eq!(respondent["result"]["invalidationScore"], 83.3);
    assert_eq!(respondent["result"]["invalidationLevel"], "High");
    assert_eq!(respondent["result"]["attachmentStyle"], "Anxious");
    assert_eq!(respondent["result"]["attachmentScore"], 4.3);
    assert_eq!(
        respondent["result"]["emotionRegulationTendency"],
        "Expressive Suppression"
    );
    assert_eq!(respondent["answers"].as_array().unwrap().len(), 32);
    assert_eq!(respondent["answers"][0]["answerLabel"], "Rarely");

    assert!(dir.path().join(".mindscope").join("responses.json").exists());
}

#[test]
fn test_duplicate_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    submit(dir.path());

    let file = fixture("submission.json");
    let (code, _, stderr) = run(dir.path(), &["submit", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already been submitted"), "{stderr}");

    let list = run_json(dir.path(), &["responses", "--format", "json"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn test_check_email() {
    let dir = tempfile::tempdir().unwrap();
    let before = run_json(dir.path(), &["check-email", "priya.sharma@example.com", "--json"]);
    assert_eq!(before["exists"], false);

    submit(dir.path());
    let after = run_json(dir.path(), &["check-email", "PRIYA.SHARMA@example.com", "--json"]);
    assert_eq!(after["exists"], true);
}

#[test]
fn test_show_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let respondent = submit(dir.path());
    let id = respondent["id"].as_str().unwrap().to_string();

    let shown = run_json(dir.path(), &["show", &id, "--format", "json"]);
    assert_eq!(shown["id"], id.as_str());
    assert_eq!(shown["demographics"]["fullName"], "Priya Sharma");

    let (code, stdout, _) = run(dir.path(), &["delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Deleted respondent"));

    let (code, _, stderr) = run(dir.path(), &["show", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No respondent"), "{stderr}");

    // The email can submit again
    submit(dir.path());
}

#[test]
fn test_stats() {
    let dir = tempfile::tempdir().unwrap();
    submit(dir.path());
    let stats = run_json(dir.path(), &["stats", "--format", "json"]);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["ageDistribution"][0]["label"], "21-23");
    assert_eq!(stats["attachmentDistribution"][0]["label"], "Anxious");
    assert_eq!(stats["locationDistribution"][0]["label"], "Maharashtra");
}

#[test]
fn test_audit_clean_store() {
    let dir = tempfile::tempdir().unwrap();
    submit(dir.path());
    let (code, stdout, stderr) = run(dir.path(), &["audit", "--fail-on-drift"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("match a fresh score"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["init"]);
    assert_eq!(code, 0, "{stderr}");
    let config = std::fs::read_to_string(dir.path().join("mindscope.toml")).unwrap();
    assert!(config.contains("compare_rounded = false"));
    assert!(dir.path().join(".mindscope").is_dir());
}

#[test]
fn test_config_age_bounds_and_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mindscope.toml"),
        "[submission]\nmax_age = 22\n\n[storage]\ndata_dir = \"survey-data\"\n",
    )
    .unwrap();

    let file = fixture("submission.json");
    let (code, _, stderr) = run(dir.path(), &["submit", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("outside the accepted range 18-22"), "{stderr}");

    std::fs::write(dir.path().join("mindscope.toml"), "[storage]\ndata_dir = \"survey-data\"\n")
        .unwrap();
    submit(dir.path());
    assert!(dir.path().join("survey-data").join("responses.json").exists());
}

#[test]
fn test_config_default_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mindscope.toml"), "[defaults]\nformat = \"json\"\n").unwrap();
    let list = run_json(dir.path(), &["responses"]);
    assert!(list.as_array().unwrap().is_empty());
}
