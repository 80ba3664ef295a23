//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config path and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_intervalo"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn temp_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_adjust_work_from_one() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(&config, &["adjust", "--field", "work", "--delta", "5", "--from", "1"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");

    let (stdout, _, _) = run_cli(&config, &["adjust", "--field", "work", "--delta", "5", "--from", "5"]);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_adjust_sets_clamps() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(&config, &["adjust", "--field", "sets", "--delta", "-5", "--from", "2"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_plan_json() {
    let (_dir, config) = temp_config();
    let (stdout, _, code) = run_cli(
        &config,
        &["plan", "--sets", "2", "--work", "20", "--rest", "40", "--get-ready", "10", "--json"],
    );
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let phases: Vec<&str> = plan["phases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["phase"].as_str().unwrap())
        .collect();
    assert_eq!(phases, vec!["get_ready", "work", "rest", "work"]);
    assert_eq!(plan["total_secs"], 90);
}

#[test]
fn test_run_zero_sets_fails() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(&config, &["run", "--sets", "0", "--json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("set count"), "stderr: {stderr}");
}

#[test]
fn test_run_short_workout_json() {
    let (_dir, config) = temp_config();
    let (stdout, stderr, code) = run_cli(
        &config,
        &[
            "run", "--get-ready", "0", "--work", "1", "--rest", "0", "--sets", "1",
            "--tick-ms", "20", "--long-cue", "1", "--json",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let last = records.last().unwrap();
    assert_eq!(last["phase"], "done");
    assert_eq!(last["sets_remaining"], 0);
    assert_eq!(last["events"][1]["type"], "workout_done");
    assert_eq!(last["cues"][0], "gong");
}

#[test]
fn test_plan_zero_sets_fails() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(&config, &["plan", "--sets", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("set count"), "stderr: {stderr}");
}

#[test]
fn test_huge_phase_flags_are_rejected() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(
        &config,
        &["plan", "--work", "18446744073709551615", "--rest", "18446744073709551615", "--sets", "3"],
    );
    // Usage error from clap, not a panic.
    assert_eq!(code, 2, "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");

    let (_, _, code) = run_cli(&config, &["run", "--get-ready", "3600", "--json"]);
    assert_eq!(code, 2);
}

#[test]
fn test_run_unknown_cue_fails() {
    let (_dir, config) = temp_config();
    let (_, stderr, code) = run_cli(&config, &["run", "--short-cue", "42", "--json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown short cue"), "stderr: {stderr}");
}

#[test]
fn test_config_init_then_get() {
    let (_dir, config) = temp_config();
    let (_, _, code) = run_cli(&config, &["config", "init"]);
    assert_eq!(code, 0);
    assert!(config.exists());

    let (stdout, _, code) = run_cli(&config, &["config", "get", "workout.work_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "20");

    let (_, _, code) = run_cli(&config, &["config", "init"]);
    assert_eq!(code, 1, "init must not overwrite without --force");
}

#[test]
fn test_config_get_unknown_key() {
    let (_dir, config) = temp_config();
    let (stdout, stderr, code) = run_cli(&config, &["config", "get", "workout.nope"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown configuration key: workout.nope"), "stderr: {stderr}");
}

#[test]
fn test_config_reads_workout_defaults() {
    let (_dir, config) = temp_config();
    std::fs::write(&config, "[workout]\nsets = 3\nrest_secs = 0\nwork_secs = 5\nget_ready_secs = 0\n").unwrap();
    let (stdout, _, code) = run_cli(&config, &["plan", "--json"]);
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["phases"].as_array().unwrap().len(), 4);
    assert_eq!(plan["total_secs"], 15);
}
