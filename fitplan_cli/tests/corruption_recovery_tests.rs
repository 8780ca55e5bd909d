//! Corruption handling tests for the saved workout store.
//!
//! A damaged store must never be silently overwritten: listing degrades to
//! an empty result while saves and deletes fail with a generic error.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[generation]\nresponse_delay_ms = 0\n",
    )
    .expect("Failed to write config");
    fs::create_dir_all(temp_dir.path().join("data")).expect("Failed to create data dir");
    temp_dir
}

fn cli_in(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitplan"));
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

const CORRUPTED: &str = "{\"workouts\": [ {\"id\": \"truncated";

#[test]
fn test_list_survives_corrupted_store() {
    let temp_dir = setup_test_dir();
    let store = temp_dir.path().join("data/saved_workouts.json");
    fs::write(&store, CORRUPTED).unwrap();

    cli_in(temp_dir.path())
        .args(["saved", "list", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 / 10 workouts saved"));
}

#[test]
fn test_save_refuses_to_overwrite_corrupted_store() {
    let temp_dir = setup_test_dir();
    let store = temp_dir.path().join("data/saved_workouts.json");
    fs::write(&store, CORRUPTED).unwrap();

    cli_in(temp_dir.path())
        .args([
            "generate", "--goal", "mobility", "--experience", "beginner", "--days", "3",
            "--minutes", "20", "--cardio", "none", "--focus", "posture", "--save", "--user",
            "alice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to save workout"));

    assert_eq!(fs::read_to_string(&store).unwrap(), CORRUPTED);
}

#[test]
fn test_delete_refuses_to_overwrite_corrupted_store() {
    let temp_dir = setup_test_dir();
    let store = temp_dir.path().join("data/saved_workouts.json");
    fs::write(&store, CORRUPTED).unwrap();

    cli_in(temp_dir.path())
        .args([
            "saved",
            "delete",
            "--user",
            "alice",
            "--id",
            "7f0c9a52-3a43-4f5e-9a3b-2c1d0e9f8a76",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to delete workout"));

    assert_eq!(fs::read_to_string(&store).unwrap(), CORRUPTED);
}

#[test]
fn test_malformed_config_fails_cleanly() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("config.toml"), "[generation\nbroken").unwrap();

    cli_in(temp_dir.path())
        .args(["saved", "list", "--user", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_missing_data_dir_is_created_on_save() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[generation]\nresponse_delay_ms = 0\n",
    )
    .unwrap();
    let data_dir = temp_dir.path().join("nested/data");

    Command::new(assert_cmd::cargo::cargo_bin!("fitplan"))
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(&data_dir)
        .args([
            "generate", "--goal", "endurance", "--experience", "advanced", "--days", "5",
            "--minutes", "40", "--cardio", "hiit_ok", "--focus", "lower", "--save", "--user",
            "alice",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved workout"));

    assert!(data_dir.join("saved_workouts.json").exists());
}
