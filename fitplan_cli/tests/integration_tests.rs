//! Integration tests for the fitplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan generation from flags and from JSON input
//! - Validation errors and exit codes
//! - Saving, listing, showing and deleting workouts

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test directory holding data and a no-delay config
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[generation]\nresponse_delay_ms = 0\n",
    )
    .expect("Failed to write config");
    temp_dir
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitplan"))
}

/// CLI with the test config and data directory already applied
fn cli_in(dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn generate_args() -> Vec<&'static str> {
    vec![
        "generate",
        "--goal",
        "fat_loss",
        "--experience",
        "beginner",
        "--days",
        "3",
        "--minutes",
        "30",
        "--cardio",
        "low_impact",
        "--focus",
        "full_body",
    ]
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn stderr_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stderr).expect("stderr should be a JSON error body")
}

fn save_plan(dir: &Path, user: &str) -> std::process::Output {
    cli_in(dir)
        .args(generate_args())
        .args(["--json", "--save", "--user", user])
        .output()
        .expect("Failed to run fitplan")
}

fn saved_ids(dir: &Path, user: &str) -> Vec<String> {
    let output = cli_in(dir)
        .args(["saved", "list", "--user", user, "--json"])
        .output()
        .expect("Failed to run fitplan");
    assert!(output.status.success());

    stdout_json(&output)
        .as_array()
        .expect("list should be an array")
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personalized home workout plan generator",
        ));
}

#[test]
fn test_generate_text_output() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(generate_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom Fat Loss Plan"))
        .stdout(predicate::str::contains("Day 1 · Full Body"))
        .stdout(predicate::str::contains("Main Circuit"))
        .stdout(predicate::str::contains("Dynamic Stretching"))
        .stdout(predicate::str::contains("Next week:"));
}

#[test]
fn test_generate_json_plan_shape() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(generate_args())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan = stdout_json(&output);
    assert_eq!(plan["plan_name"], "Custom Fat Loss Plan");
    assert_eq!(plan["overview"]["goal"], "Fat Loss");
    assert_eq!(plan["overview"]["weekly_structure"], "3 days/week - full_body focus");

    let days = plan["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day["day"], format!("Day {}", i + 1));
        assert_eq!(day["focus"], "Full Body");
        assert_eq!(day["duration_minutes"], 30);
        assert_eq!(day["is_rest_day"], false);
        // Fat loss with low impact cardio: squat, push, hinge, pull, core, cardio
        let exercises = day["workout"][0]["exercises"].as_array().unwrap();
        assert_eq!(exercises.len(), 6);
        for rx in exercises {
            assert_eq!(rx["sets"], 3);
            assert_eq!(rx["reps"], "15-20");
            assert_eq!(rx["rest_seconds"], 30);
            assert_eq!(rx["tempo"], "2-0-2");
            assert_eq!(rx["rpe"], 7.5);
        }
    }
    assert_eq!(plan["next_week_progression"].as_array().unwrap().len(), 3);
}

#[test]
fn test_generate_upper_focus_rotation() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args([
            "generate", "--goal", "strength", "--experience", "advanced", "--days", "4",
            "--minutes", "45", "--cardio", "none", "--focus", "upper", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan = stdout_json(&output);
    let focus: Vec<_> = plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["focus"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(focus, ["Upper Body", "Lower Body", "Upper Body", "Lower Body"]);
}

#[test]
fn test_generate_from_input_file() {
    let temp_dir = setup_test_dir();
    let input = temp_dir.path().join("prefs.json");
    fs::write(
        &input,
        r#"{
            "goal": "endurance",
            "experience": "intermediate",
            "days_per_week": 7,
            "minutes_per_session": 60,
            "cardio_preference": "running_ok",
            "focus": "core",
            "household_items_allowed": true,
            "baselines": { "pushups_max": 20 }
        }"#,
    )
    .unwrap();

    let output = cli_in(temp_dir.path())
        .args(["generate", "--json", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan = stdout_json(&output);
    assert_eq!(plan["plan_name"], "Custom Endurance Plan");
    assert_eq!(plan["days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_generate_from_stdin() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(["generate", "--input", "-"])
        .write_stdin(
            r#"{"goal":"mobility","experience":"beginner","days_per_week":3,
                "minutes_per_session":15,"cardio_preference":"none",
                "focus":"posture","household_items_allowed":false}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom Mobility Plan"));
}

#[test]
fn test_validation_error_reports_field() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args([
            "generate", "--goal", "fat_loss", "--experience", "beginner", "--days", "9",
            "--minutes", "30", "--cardio", "none", "--focus", "full_body",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let body = stderr_json(&output);
    assert_eq!(body["field"], "days_per_week");
    assert_eq!(body["message"], "Number must be less than or equal to 7");
}

#[test]
fn test_missing_answer_is_required() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(["generate", "--experience", "beginner", "--days", "3"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let body = stderr_json(&output);
    assert_eq!(body["field"], "goal");
    assert_eq!(body["message"], "Required");
}

#[test]
fn test_unknown_enum_value_rejected() {
    let temp_dir = setup_test_dir();

    let mut args = generate_args();
    args[2] = "bulking";

    cli_in(temp_dir.path())
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\":\"goal\""))
        .stderr(predicate::str::contains("bulking"));
}

#[test]
fn test_malformed_input_file() {
    let temp_dir = setup_test_dir();
    let input = temp_dir.path().join("prefs.json");
    fs::write(&input, "{ not json").unwrap();

    cli_in(temp_dir.path())
        .args(["generate", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed JSON body"));
}

#[test]
fn test_seed_reproduces_plan() {
    let temp_dir = setup_test_dir();

    let run = || {
        cli_in(temp_dir.path())
            .args(generate_args())
            .args(["--seed", "42", "--json"])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_save_then_list() {
    let temp_dir = setup_test_dir();

    let output = save_plan(temp_dir.path(), "alice");
    assert!(output.status.success());
    // JSON mode keeps stdout to the plan alone
    stdout_json(&output);

    cli_in(temp_dir.path())
        .args(["saved", "list", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom Fat Loss Plan"))
        .stdout(predicate::str::contains("1 / 10 workouts saved"));

    cli_in(temp_dir.path())
        .args(["saved", "list", "--user", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts yet."))
        .stdout(predicate::str::contains("0 / 10 workouts saved"));
}

#[test]
fn test_eleventh_save_rejected() {
    let temp_dir = setup_test_dir();

    for _ in 0..10 {
        assert!(save_plan(temp_dir.path(), "alice").status.success());
    }

    let output = save_plan(temp_dir.path(), "alice");
    assert_eq!(output.status.code(), Some(1));
    let body = stderr_json(&output);
    assert!(body["message"].as_str().unwrap().contains("up to 10 workouts"));

    assert_eq!(saved_ids(temp_dir.path(), "alice").len(), 10);

    // Another user is unaffected
    assert!(save_plan(temp_dir.path(), "bob").status.success());
}

#[test]
fn test_show_saved_workout() {
    let temp_dir = setup_test_dir();
    assert!(save_plan(temp_dir.path(), "alice").status.success());
    let id = saved_ids(temp_dir.path(), "alice").remove(0);

    let output = cli_in(temp_dir.path())
        .args(["saved", "show", "--user", "alice", "--json", "--id", &id])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["plan_name"], "Custom Fat Loss Plan");

    cli_in(temp_dir.path())
        .args(["saved", "show", "--user", "bob", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workout not found"));
}

#[test]
fn test_delete_only_own_workouts() {
    let temp_dir = setup_test_dir();
    assert!(save_plan(temp_dir.path(), "alice").status.success());
    let id = saved_ids(temp_dir.path(), "alice").remove(0);

    cli_in(temp_dir.path())
        .args(["saved", "delete", "--user", "bob", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workout not found"));
    assert_eq!(saved_ids(temp_dir.path(), "alice"), vec![id.clone()]);

    cli_in(temp_dir.path())
        .args(["saved", "delete", "--user", "alice", "--id", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout deleted"));
    assert!(saved_ids(temp_dir.path(), "alice").is_empty());
}

#[test]
fn test_delete_unknown_id() {
    let temp_dir = setup_test_dir();

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
        .stderr(predicate::str::contains("Workout not found"));
}

#[test]
fn test_add_plan_from_file() {
    let temp_dir = setup_test_dir();

    let output = cli_in(temp_dir.path())
        .args(generate_args())
        .arg("--json")
        .output()
        .unwrap();
    let plan_path: PathBuf = temp_dir.path().join("plan.json");
    fs::write(&plan_path, &output.stdout).unwrap();

    cli_in(temp_dir.path())
        .args(["saved", "add", "--user", "alice", "--file"])
        .arg(&plan_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved workout"));
    assert_eq!(saved_ids(temp_dir.path(), "alice").len(), 1);

    fs::write(&plan_path, r#"{"plan_name": 3}"#).unwrap();
    cli_in(temp_dir.path())
        .args(["saved", "add", "--user", "alice", "--file"])
        .arg(&plan_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\":\"planData\""));
}

#[test]
fn test_save_requires_user() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .args(generate_args())
        .arg("--save")
        .assert()
        .failure();
}
