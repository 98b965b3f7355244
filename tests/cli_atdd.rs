#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn funalytics(policy_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("funalytics").expect("binary should compile");
    cmd.env_remove("RUST_LOG")
        .env("HOME", policy_root)
        .arg("--policy-root")
        .arg(policy_root);
    cmd
}

fn write_events(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("events.json");
    fs::write(
        &path,
        r#"[
  {"title": "Petting Zoo Morning", "description": "Petting zoo and storytime for kids",
   "category": "family", "start_time": "10:00", "frequency": "monthly",
   "community_vibe": 7, "family_fun": 9},
  {"title": "Late Jazz", "description": "Live music, jazz and cocktail specials",
   "category": "music", "start_time": "23:30", "frequency": "weekly",
   "community_vibe": 8, "family_fun": 2},
  {"title": "Brewery Crawl", "description": "Beer tasting downtown",
   "category": "alcohol", "start_time": "18:00", "frequency": "once",
   "community_vibe": 6, "family_fun": 1}
]"#,
    )
    .expect("events should write");
    path
}

#[test]
fn score_outputs_markdown_tables_by_default() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("score")
        .arg(&events)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Funalytics Scores"))
        .stdout(predicate::str::contains("## Petting Zoo Morning"))
        .stdout(predicate::str::contains("| Kids | yes |"))
        .stdout(predicate::str::contains("| Kids | no |"));
}

#[test]
fn score_json_carries_policy_version_and_fingerprint() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("score")
        .arg(&events)
        .arg("--format")
        .arg("json")
        .arg("--audience")
        .arg("Date Night")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"policy_version\": \"funalytics-2024.1\""))
        .stdout(predicate::str::contains("\"policy_fingerprint\""))
        .stdout(predicate::str::contains("\"audience\": \"Date Night\""))
        .stdout(predicate::str::contains("\"audience\": \"Kids\"").not());
}

#[test]
fn score_warns_when_listing_rules_exclude_events() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());
    fs::write(
        dir.path().join("funalytics.toml"),
        r#"
[[exclusions]]
id = "alcohol"
reason = "Alcohol-centred events are not listed"
kind = "category"
values = ["alcohol"]
"#,
    )
    .expect("policy should write");

    funalytics(dir.path())
        .arg("score")
        .arg(&events)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Excluded by `alcohol`"))
        .stderr(predicate::str::contains("1 event(s) excluded"));
}

#[test]
fn score_rejects_unknown_audience() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("score")
        .arg(&events)
        .arg("--audience")
        .arg("Martians")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown audience: Martians"));
}

#[test]
fn score_reports_missing_event_path() {
    let dir = TempDir::new().expect("temp dir should be created");

    funalytics(dir.path())
        .arg("score")
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn rank_lists_eligible_events_for_audience() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("rank")
        .arg(&events)
        .arg("--audience")
        .arg("Kids")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Funalytics Ranking: Kids"))
        .stdout(predicate::str::contains("1. Petting Zoo Morning"))
        .stdout(predicate::str::contains("Late Jazz").not());
}

#[test]
fn rank_honours_limit() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("rank")
        .arg(&events)
        .arg("--audience")
        .arg("Adults")
        .arg("--limit")
        .arg("1")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("2. ").not());
}

#[test]
fn audiences_prints_recommendations_per_event() {
    let dir = TempDir::new().expect("temp dir should be created");
    let events = write_events(dir.path());

    funalytics(dir.path())
        .arg("audiences")
        .arg(&events)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "Late Jazz: Students, Adults, Singles, Date Night, Professionals, Fitness & Active, Arts & Culture, 21+",
        ));
}

#[test]
fn policy_prints_effective_table_with_layers() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("funalytics.toml"),
        r#"
[policy]
version = "events-2025.3"
"#,
    )
    .expect("policy should write");

    funalytics(dir.path())
        .arg("policy")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"version\": \"events-2025.3\""))
        .stdout(predicate::str::contains("funalytics.toml"))
        .stdout(predicate::str::contains("\"audiences\""));
}

#[test]
fn policy_validate_only_omits_table() {
    let dir = TempDir::new().expect("temp dir should be created");

    funalytics(dir.path())
        .arg("policy")
        .arg("--validate-only")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"fingerprint\""))
        .stdout(predicate::str::contains("\"audiences\"").not());
}

#[test]
fn invalid_policy_is_a_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("funalytics.toml"),
        r#"
[policy]
ai_weight = 0.9
"#,
    )
    .expect("policy should write");

    funalytics(dir.path())
        .arg("policy")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must sum to 1.0"));
}
