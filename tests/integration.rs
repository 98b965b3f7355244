// Integration tests for the funalytics CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// argument handling, exit codes and help output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the funalytics binary.
fn funalytics() -> Command {
    Command::cargo_bin("funalytics").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    funalytics()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("funalytics"));
}

#[test]
fn cli_help_flag() {
    funalytics()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Funalytics event scoring"));
}

#[test]
fn score_requires_path() {
    funalytics()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn rank_requires_audience() {
    funalytics()
        .args(["rank", "/tmp/events.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--audience"));
}

#[test]
fn quiet_and_verbose_conflict() {
    // -q and -v are mutually exclusive
    funalytics()
        .args(["-q", "-v", "policy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
