//! CLI integration tests for the `provex` binary.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to the conformance programs resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLOSURE: &str = "conformance/explain/transitive_closure.program.json";
const NEGATION: &str = "conformance/explain/negation_and_numbers.program.json";

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn provex() -> Command {
    let mut cmd = cargo_bin_cmd!("provex");
    cmd.current_dir(workspace_root());
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    provex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Proof trees"));
}

#[test]
fn version_exits_0() {
    provex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("provex"));
}

// ──────────────────────────────────────────────
// 2. Explain subcommand
// ──────────────────────────────────────────────

#[test]
fn explain_prints_indented_tree() {
    provex()
        .args(["explain", CLOSURE, "path", "a", "c"])
        .assert()
        .success()
        .stdout("path(a, c)\n  edge(a, b)\n  path(b, c)\n    edge(b, c)\n");
}

#[test]
fn explain_base_fact_is_single_line() {
    provex()
        .args(["explain", CLOSURE, "edge", "a", "b"])
        .assert()
        .success()
        .stdout("edge(a, b)\n");
}

#[test]
fn explain_depth_flag_truncates() {
    provex()
        .args(["explain", CLOSURE, "path", "a", "c", "--depth", "1"])
        .assert()
        .success()
        .stdout("subproof path(0)\n");
}

#[test]
fn explain_expand_reuses_session() {
    provex()
        .args([
            "explain", CLOSURE, "path", "a", "c", "--depth", "2", "--expand", "path(0)",
        ])
        .assert()
        .success()
        .stdout(
            "path(a, c)\n  edge(a, b)\n  subproof path(0)\n\npath(0):\npath(b, c)\n  edge(b, c)\n",
        );
}

#[test]
fn explain_expansion_ignores_the_cutting_depth() {
    provex()
        .args([
            "explain", CLOSURE, "path", "a", "c", "--depth", "1", "--expand", "path(0)",
        ])
        .assert()
        .success()
        .stdout(
            "subproof path(0)\n\npath(0):\npath(a, c)\n  edge(a, b)\n  path(b, c)\n    edge(b, c)\n",
        );
}

#[test]
fn explain_expand_depth_flag() {
    provex()
        .args([
            "explain",
            CLOSURE,
            "path",
            "a",
            "c",
            "--depth",
            "1",
            "--expand",
            "path(0)",
            "--expand-depth",
            "1",
        ])
        .assert()
        .success()
        .stdout("subproof path(0)\n\npath(0):\nsubproof path(0)\n");
}

#[test]
fn explain_unknown_subproof_reference() {
    provex()
        .args(["explain", CLOSURE, "edge", "a", "b", "--expand", "path(5)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subproof not found"));
}

#[test]
fn explain_malformed_reference_exits_1() {
    provex()
        .args(["explain", CLOSURE, "path", "a", "b", "--expand", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid subproof reference"));
}

#[test]
fn explain_not_found_leaves_exit_0() {
    provex()
        .args(["explain", CLOSURE, "nosuch", "x"])
        .assert()
        .success()
        .stdout("Relation not found\n");

    provex()
        .args(["explain", CLOSURE, "path", "z", "q"])
        .assert()
        .success()
        .stdout("Tuple not found\n");
}

#[test]
fn explain_negated_goal() {
    provex()
        .args(["explain", NEGATION, "lonely", "d", "--depth", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("!edge(d, _)"));
}

#[test]
fn explain_json_output() {
    let output = provex()
        .args(["--output", "json", "explain", CLOSURE, "path", "a", "b"])
        .output()
        .expect("run provex");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["kind"], "inner");
    assert_eq!(json["label"], "path(a, b)");
    assert_eq!(json["children"][0]["label"], "edge(a, b)");
}

#[test]
fn explain_json_with_expansions() {
    let output = provex()
        .args([
            "--output", "json", "explain", CLOSURE, "path", "a", "c", "--depth", "1",
            "--expand", "path(0)",
        ])
        .output()
        .expect("run provex");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["tree"]["label"], "subproof path(0)");
    assert_eq!(json["subproofs"][0]["reference"], "path(0)");
    assert_eq!(json["subproofs"][0]["tree"]["label"], "path(a, c)");
}

#[test]
fn explain_verbose_reports_cache_size() {
    provex()
        .args(["--verbose", "explain", CLOSURE, "path", "a", "c", "--depth", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("subproof cache: 1 entries"));
}

#[test]
fn explain_missing_program_exits_1() {
    provex()
        .args(["explain", "nonexistent.json", "path", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("program file not found"));
}

#[test]
fn explain_invalid_program_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    provex()
        .args(["explain", path.to_str().unwrap(), "path", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid program"));
}

#[test]
fn explain_json_errors_go_to_stderr_as_json() {
    let output = provex()
        .args(["--output", "json", "explain", "nonexistent.json", "path"])
        .output()
        .expect("run provex");
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).expect("valid JSON");
    assert!(json["error"].as_str().unwrap().contains("nonexistent.json"));
}

#[test]
fn quiet_suppresses_errors() {
    provex()
        .args(["--quiet", "explain", "nonexistent.json", "path"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 3. Configuration
// ──────────────────────────────────────────────

#[test]
fn config_file_sets_depth() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("provex.toml");
    fs::write(&config, "[explain]\ndepth_limit = 1\n").unwrap();

    provex()
        .args(["--config", config.to_str().unwrap(), "explain", CLOSURE, "path", "a", "c"])
        .assert()
        .success()
        .stdout("subproof path(0)\n");
}

#[test]
fn depth_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("provex.toml");
    fs::write(&config, "[explain]\ndepth_limit = 1\n").unwrap();

    provex()
        .args([
            "--config",
            config.to_str().unwrap(),
            "explain",
            CLOSURE,
            "path",
            "a",
            "b",
            "--depth",
            "3",
        ])
        .assert()
        .success()
        .stdout("path(a, b)\n  edge(a, b)\n");
}

#[test]
fn bad_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("provex.toml");
    fs::write(&config, "[explain]\ndepth_limit = \"deep\"\n").unwrap();

    provex()
        .args(["--config", config.to_str().unwrap(), "explain", CLOSURE, "path", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse"));
}

// ──────────────────────────────────────────────
// 4. Rule subcommand
// ──────────────────────────────────────────────

#[test]
fn rule_prints_single_rule_text() {
    provex()
        .args(["rule", CLOSURE, "path", "2"])
        .assert()
        .success()
        .stdout("path(X, Z) :- edge(X, Y), path(Y, Z).\n");
}

#[test]
fn rule_lists_all_rules() {
    provex()
        .args(["rule", CLOSURE, "path"])
        .assert()
        .success()
        .stdout("1: path(X, Y) :- edge(X, Y).\n2: path(X, Z) :- edge(X, Y), path(Y, Z).\n");
}

#[test]
fn rule_json_lists_body_goals() {
    let output = provex()
        .args(["--output", "json", "rule", NEGATION, "lonely"])
        .output()
        .expect("run provex");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["relation"], "lonely");
    assert_eq!(json["rules"][0]["id"], 1);
    assert_eq!(json["rules"][0]["body"][1], "!edge");
}

#[test]
fn rule_missing_exits_1() {
    provex()
        .args(["rule", CLOSURE, "path", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no rule 9"));

    provex()
        .args(["rule", CLOSURE, "edge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no rules"));
}
