//! CLI integration tests.
//!
//! These tests invoke the flagquiz binary and verify command output and behaviour.

#![allow(deprecated)] // cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a Command for the flagquiz binary.
fn flagquiz() -> Command {
    Command::cargo_bin("flagquiz").unwrap()
}

/// Helper to create a temp directory with a config that skips feedback delays.
fn setup_config() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");

    let config = r#"{
        "game": { "max_rounds": 1, "seed": 1 },
        "feedback": { "animation_ms": 0, "settle_ms": 0 },
        "display": { "mode": "plain" }
    }"#;
    fs::write(&path, config).unwrap();

    (temp, path)
}

// ============================================================================
// Basic commands
// ============================================================================

#[test]
fn test_help() {
    flagquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guess the flag"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("countries"));
}

#[test]
fn test_version() {
    flagquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flagquiz"));
}

#[test]
fn test_no_subcommand_shows_quick_start() {
    flagquiz()
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick start:"))
        .stdout(predicate::str::contains("flagquiz play"));
}

#[test]
fn test_countries_lists_default_pool() {
    let temp = TempDir::new().unwrap();
    flagquiz()
        .current_dir(temp.path())
        .arg("countries")
        .assert()
        .success()
        .stdout(predicate::str::contains("Estonia"))
        .stdout(predicate::str::contains("Pakistan"))
        .stdout(predicate::str::contains("no artwork").not());
}

#[test]
fn test_completions_bash() {
    flagquiz()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flagquiz"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_set_then_get() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.json");
    let path_str = path.to_str().unwrap();

    flagquiz()
        .args(["config", "set", "game.max_rounds", "5", "--config", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("game.max_rounds"));

    flagquiz()
        .args(["config", "get", "game.max_rounds", "--config", path_str])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_config_set_rejects_bad_value() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");

    flagquiz()
        .args(["config", "set", "game.max_rounds", "zero"])
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(!path.exists());
}

#[test]
fn test_config_get_unknown_key() {
    let temp = TempDir::new().unwrap();
    flagquiz()
        .current_dir(temp.path())
        .args(["config", "get", "game.lives"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game.lives"));
}

#[test]
fn test_config_keys() {
    flagquiz()
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feedback.settle_ms"))
        .stdout(predicate::str::contains("display.mode"));
}

// ============================================================================
// Play
// ============================================================================

#[test]
fn test_play_plain_to_final_score() {
    let (_temp, path) = setup_config();

    // The answer may be right or wrong: a blank line dismisses the "Wrong"
    // notice (or declines another game) and "n" always declines.
    flagquiz()
        .args(["play", "--plain", "--config", path.to_str().unwrap()])
        .write_stdin("1\n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Round 1/1"))
        .stdout(predicate::str::contains("Which one is the flag of"))
        .stdout(predicate::str::contains("Final score"))
        .stdout(predicate::str::contains("Game finished"));
}

#[test]
fn test_play_quit_before_answering() {
    let (_temp, path) = setup_config();

    flagquiz()
        .args(["play", "--plain", "--config", path.to_str().unwrap()])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Player quit"));
}

#[test]
fn test_play_reprompts_on_bad_answer() {
    let (_temp, path) = setup_config();

    flagquiz()
        .args(["play", "--plain", "--config", path.to_str().unwrap()])
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter 1, 2 or 3."))
        .stdout(predicate::str::contains("Input closed"));
}

#[test]
fn test_play_rejects_zero_rounds() {
    let (_temp, path) = setup_config();

    flagquiz()
        .args(["play", "--plain", "--rounds", "0", "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_play_rejects_invalid_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{"game": {"countries": ["France", "France"]}}"#).unwrap();

    flagquiz()
        .args(["play", "--plain", "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game.countries"));
}

#[test]
fn test_log_file_records_game() {
    let (temp, path) = setup_config();
    let log = temp.path().join("quiz.log");

    flagquiz()
        .args(["play", "--plain", "--config", path.to_str().unwrap()])
        .args(["--log-file", log.to_str().unwrap()])
        .env("FLAGQUIZ_LOG", "debug")
        .write_stdin("q\n")
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("starting game"));
}
