//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn peakmatch(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("peakmatch").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("PEAKMATCH_HISTORY_DIR", home.join("history"))
        .env_remove("RUST_LOG");
    cmd
}

const RIVERS: &str = r#"
[dataset]
id = "rivers"
name = "Great Rivers"
left_title = "Rivers"
right_title = "Continents"

[[items]]
id = 1
left = "Nile"
right = "Africa"

[[items]]
id = 2
left = "Amazon"
right = "South America"
"#;

#[test]
fn validate_valid_dataset() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("rivers.toml"), RIVERS).unwrap();

    peakmatch(dir.path())
        .arg("validate")
        .arg("--dataset")
        .arg("rivers.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Great Rivers (2 items)"))
        .stdout(predicate::str::contains("All datasets valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let single = r#"
[dataset]
id = "one"
name = "Lonely"

[[items]]
id = 1
left = "a"
right = "b"
"#;
    std::fs::write(dir.path().join("one.toml"), single).unwrap();

    peakmatch(dir.path())
        .arg("validate")
        .arg("--dataset")
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lonely (1 items)"))
        .stdout(predicate::str::contains("WARNING"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    peakmatch(dir.path())
        .arg("validate")
        .arg("--dataset")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    peakmatch(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created peakmatch.toml"))
        .stdout(predicate::str::contains("Created datasets/example.toml"));

    assert!(dir.path().join("peakmatch.toml").exists());
    assert!(dir.path().join("datasets/example.toml").exists());

    peakmatch(dir.path())
        .arg("validate")
        .arg("--dataset")
        .arg("datasets/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All datasets valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    peakmatch(dir.path()).arg("init").assert().success();

    peakmatch(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn play_requires_a_name() {
    let dir = TempDir::new().unwrap();
    peakmatch(dir.path())
        .args(["play", "--name", "   "])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter your name to start!"));
}

#[test]
fn history_empty() {
    let dir = TempDir::new().unwrap();
    peakmatch(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));
}

#[test]
fn history_shows_improvement() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("history")).unwrap();
    std::fs::write(
        dir.path().join("history/peakKnowledgeHistory.json"),
        r#"[
            {"date":"2025-01-01T10:00:00.000Z","name":"Ana","score":60,"moves":18},
            {"date":"2025-01-02T10:00:00.000Z","name":"Ben","score":100,"moves":10},
            {"date":"2025-01-03T10:00:00.000Z","name":"Ana","score":90,"moves":12}
        ]"#,
    )
    .unwrap();

    peakmatch(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("▲ +30"))
        .stdout(predicate::str::contains("Ben"));

    peakmatch(dir.path())
        .args(["history", "--user", "Ana", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"improvement\": 30"))
        .stdout(predicate::str::contains("Ben").not());
}

#[test]
fn history_tolerates_corrupt_file() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("history")).unwrap();
    std::fs::write(
        dir.path().join("history/peakKnowledgeHistory.json"),
        "{ definitely not json",
    )
    .unwrap();

    peakmatch(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));
}

#[test]
fn clear_history_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    let slot = dir.path().join("history/peakKnowledgeHistory.json");
    std::fs::create_dir_all(dir.path().join("history")).unwrap();
    std::fs::write(
        &slot,
        r#"[{"date":"2025-01-01T10:00:00Z","name":"Ana","score":60,"moves":18}]"#,
    )
    .unwrap();

    peakmatch(dir.path())
        .arg("clear-history")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    assert!(slot.exists());

    peakmatch(dir.path())
        .args(["clear-history", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 session(s) removed"));
    assert!(!slot.exists());
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    peakmatch(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Match-the-pairs quiz"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    peakmatch(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("peakmatch"));
}
