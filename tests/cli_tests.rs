//! Integration tests for the shrinkage CLI
//!
//! These tests run the shrinkage binary over fixture trees and verify
//! the reported sizes, sampling behavior, and exit codes.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Get a Command for shrinkage
fn shrinkage() -> Command {
    cargo_bin_cmd!("shrinkage")
}

/// Run with a zero budget (exactly one round) and parse the JSON report
fn estimate_json(root: &Path) -> serde_json::Value {
    let output = shrinkage()
        .arg(root)
        .args(["--budget-ms", "0", "--format", "json"])
        .output()
        .expect("failed to run shrinkage");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("invalid JSON report")
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    shrinkage()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: shrinkage"))
        .stdout(predicate::str::contains("--budget-ms"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_version_flag() {
    shrinkage()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shrinkage"));
}

#[test]
fn test_unknown_flag_exit_code_2() {
    shrinkage().arg("--no-such-flag").assert().code(2);
}

// ============================================================================
// Size accounting
// ============================================================================

#[test]
fn test_two_small_files_report_eleven_bytes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "world!").unwrap();

    shrinkage()
        .arg(dir.path())
        .args(["--budget-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uncompressed: 11 B (11 bytes)"))
        .stdout(predicate::str::contains("1 samples"));
}

#[test]
fn test_json_report_shape() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "world!").unwrap();

    let report = estimate_json(dir.path());
    assert_eq!(report["uncompressed_size"], 11);
    assert_eq!(report["samples"].as_array().unwrap().len(), 1);
    assert_eq!(report["stddev"], 0.0);
    assert!(report["mean"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_ignore_rule_and_binary_content_exclusions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "*.bin\n").unwrap();
    fs::write(dir.path().join("data.bin"), [0xffu8, 0xfe, 0x00]).unwrap();
    fs::write(dir.path().join("note.txt"), "utf-8 content").unwrap();

    // eligible: .gitignore (6 bytes) + note.txt (13 bytes)
    let report = estimate_json(dir.path());
    assert_eq!(report["uncompressed_size"], 19);
}

#[test]
fn test_nested_reinclude_overrides_ancestor_ignore() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/.gitignore"), "!keep.log\n").unwrap();
    fs::write(dir.path().join("sub/keep.log"), "kept").unwrap();
    fs::write(dir.path().join("sub/drop.log"), "dropped").unwrap();

    // eligible: .gitignore (6) + sub/.gitignore (10) + sub/keep.log (4)
    let report = estimate_json(dir.path());
    assert_eq!(report["uncompressed_size"], 20);
}

#[test]
fn test_binary_exclusion_is_silent_but_ignore_exclusion_is_logged() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "*.bin\n").unwrap();
    fs::write(dir.path().join("data.bin"), "plain text, but ignored").unwrap();
    fs::write(dir.path().join("note.txt"), "included").unwrap();

    shrinkage()
        .arg(dir.path())
        .args(["--budget-ms", "0", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("excluded by ignore rules"))
        .stderr(predicate::str::contains("included"));
}

// ============================================================================
// Sampling behavior
// ============================================================================

#[test]
fn test_zero_budget_runs_exactly_one_round_over_many_files() {
    let dir = tempdir().unwrap();
    for i in 0..100 {
        fs::write(
            dir.path().join(format!("file_{i:03}.txt")),
            format!("content of file number {i}\n"),
        )
        .unwrap();
    }

    let report = estimate_json(dir.path());
    assert_eq!(report["samples"].as_array().unwrap().len(), 1);
}

#[test]
fn test_empty_directory_produces_header_only_sample() {
    let dir = tempdir().unwrap();

    let report = estimate_json(dir.path());
    assert_eq!(report["uncompressed_size"], 0);
    let samples = report["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 1);
    let size = samples[0].as_u64().unwrap();
    assert!(size > 0 && size < 64, "header-only frame, got {size}");
}

#[test]
fn test_same_seed_reproduces_the_first_sample() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        fs::write(
            dir.path().join(format!("f{i}.txt")),
            format!("file body {i} with enough text to matter\n"),
        )
        .unwrap();
    }

    let first = estimate_json(dir.path());
    let second = estimate_json(dir.path());
    assert_eq!(first["samples"][0], second["samples"][0]);
}

#[test]
fn test_separator_flag_is_accepted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "world!").unwrap();

    shrinkage()
        .arg(dir.path())
        .args(["--budget-ms", "0", "--separator", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uncompressed: 11 B (11 bytes)"));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_missing_root_fails_with_exit_code_1() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    shrinkage()
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("root directory not found"));
}

#[test]
fn test_quiet_suppresses_error_line() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    shrinkage()
        .arg(&missing)
        .arg("--quiet")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:").not());
}
