//! CLI E2E tests for the stalemate binary
//!
//! Validates exit codes (0 clean, 1 error, 2 deadlock) and the shape of each
//! command's output.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const CYCLE: &str = "process,action,resource
P1,hold,R1
P2,hold,R2
P1,request,R2
P2,request,R1
";

const CHAIN: &str = "process,action,resource
P1,hold,R1
P2,request,R1
P1,release,R1
P2,request,R1
";

// ============================================================================
// Helpers
// ============================================================================

/// Binary with a hermetic environment: no color, no inherited settings
fn stalemate(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("stalemate");
    cmd.current_dir(dir)
        .env_remove("STALEMATE_INPUT_DIR")
        .env_remove("STALEMATE_LOG_LEVEL")
        .env_remove("STALEMATE_LOG_FORMAT")
        .env_remove("STALEMATE_LOG_OUTPUT")
        .env_remove("STALEMATE_COLOR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Temp dir with `input/cycle.csv` and `input/chain.csv`
fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("cycle.csv"), CYCLE).unwrap();
    fs::write(input.join("chain.csv"), CHAIN).unwrap();
    dir
}

// ============================================================================
// run / check
// ============================================================================

#[test]
fn test_run_deadlock_exits_2() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["run", "cycle.csv"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("DEADLOCK DETECTED"))
        .stdout(predicate::str::contains("[4/4] P2 request R1"));
}

#[test]
fn test_run_clean_exits_0() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["run", "chain.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No deadlock detected"))
        .stdout(predicate::str::contains("Processes"))
        .stdout(predicate::str::contains("Resources"));
}

#[test]
fn test_check_prints_verdict_only() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["check", "cycle.csv"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("DEADLOCK DETECTED"))
        .stdout(predicate::str::contains("[1/4]").not());

    stalemate(dir.path())
        .args(["check", "chain.csv"])
        .assert()
        .success();
}

#[test]
fn test_input_dir_flag_and_env() {
    let dir = workspace();
    let cases = dir.path().join("cases");
    fs::create_dir(&cases).unwrap();
    fs::write(cases.join("elsewhere.csv"), CYCLE).unwrap();

    stalemate(dir.path())
        .args(["--input-dir", "cases", "check", "elsewhere.csv"])
        .assert()
        .code(2);

    stalemate(dir.path())
        .env("STALEMATE_INPUT_DIR", "cases")
        .args(["check", "elsewhere.csv"])
        .assert()
        .code(2);
}

#[test]
fn test_run_exports_json() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["run", "cycle.csv", "--export", "steps.json"])
        .assert()
        .code(2);

    let text = fs::read_to_string(dir.path().join("steps.json")).unwrap();
    assert!(text.trim_start().starts_with('['));
    assert!(text.contains("\"kind\": \"waiting\""));
}

// ============================================================================
// state / graph / cases / version
// ============================================================================

#[test]
fn test_state_exits_0_even_when_deadlocked() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["state", "cycle.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Waiting for"))
        .stdout(predicate::str::contains("Allocated to"));
}

#[test]
fn test_graph_prints_dot() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["graph", "cycle.csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph allocation {"))
        .stdout(predicate::str::contains("DEADLOCK: "));
}

#[test]
fn test_cases_lists_feeds() {
    let dir = workspace();
    stalemate(dir.path())
        .arg("cases")
        .assert()
        .success()
        .stdout(predicate::str::contains("chain.csv"))
        .stdout(predicate::str::contains("cycle.csv"));
}

#[test]
fn test_cases_pick_needs_a_terminal() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["cases", "--pick"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_version_command() {
    let dir = workspace();
    stalemate(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("stalemate "));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = workspace();
    stalemate(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("stalemate --help"));
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_missing_feed_exits_1() {
    let dir = workspace();
    stalemate(dir.path())
        .args(["run", "missing.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn test_invalid_action_exits_1() {
    let dir = workspace();
    fs::write(
        dir.path().join("input").join("bad.csv"),
        "process,action,resource\nP1,grab,R1\n",
    )
    .unwrap();

    stalemate(dir.path())
        .args(["run", "bad.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("grab"));
}

#[test]
fn test_usage_error_exits_1_not_2() {
    let dir = workspace();
    stalemate(dir.path())
        .arg("explode")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("explode"));
}

#[test]
fn test_help_exits_0() {
    let dir = workspace();
    stalemate(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: stalemate"));
}
