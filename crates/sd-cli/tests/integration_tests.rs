//! Binary-level tests for the scriptdeploy CLI
//!
//! Scripts are plain shell files run with `--command sh` against a DuckDB
//! file in a temporary directory.
#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the compiled binary (resolved at compile time)
fn scriptdeploy_bin() -> String {
    env!("CARGO_BIN_EXE_scriptdeploy").to_string()
}

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(scripts: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let script_dir = dir.path().join("scripts");
        std::fs::create_dir(&script_dir).unwrap();
        for (name, body) in scripts {
            std::fs::write(script_dir.join(name), body).unwrap();
        }
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn url(&self) -> String {
        format!("duckdb:{}", self.path().join("deploy.duckdb").display())
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(scriptdeploy_bin())
            .arg("--project-dir")
            .arg(self.path())
            .arg("--url")
            .arg(self.url())
            .args(args)
            .env_remove("SCRIPTDEPLOY_URL")
            .env_remove("SCRIPTDEPLOY_USER")
            .env_remove("SCRIPTDEPLOY_PASSWORD")
            .output()
            .expect("Failed to run scriptdeploy")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn status_json(project: &Project) -> serde_json::Value {
    let output = project.run(&["status", "--output", "json"]);
    assert!(output.status.success(), "status failed: {}", combined(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn numbers(value: &serde_json::Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

#[test]
fn test_init_is_idempotent() {
    let project = Project::new(&[]);

    let first = project.run(&["init"]);
    assert!(first.status.success(), "{}", combined(&first));
    assert!(stdout(&first).contains("Created script_changelog"));

    let second = project.run(&["init"]);
    assert!(second.status.success(), "{}", combined(&second));
    assert!(stdout(&second).contains("already exists"));
}

#[test]
fn test_deploy_without_init_fails() {
    let project = Project::new(&[("001_init.sh", "exit 0\n")]);
    let output = project.run(&["deploy", "--command", "sh"]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("script_changelog"));
}

#[test]
fn test_deploy_applies_in_order() {
    let project = Project::new(&[
        ("002_second.sh", "echo second >> \"$(dirname \"$0\")/../order.log\"\n"),
        ("001_first.sh", "echo first >> \"$(dirname \"$0\")/../order.log\"\n"),
        ("notes.txt", "not a change\n"),
    ]);
    assert!(project.run(&["init"]).status.success());

    let output = project.run(&["deploy", "--command", "sh"]);
    assert!(output.status.success(), "{}", combined(&output));

    let out = stdout(&output);
    assert!(out.contains("Current script revision: 0"), "{}", out);
    assert!(out.contains("To be applied: 1, 2"), "{}", out);

    let order = std::fs::read_to_string(project.path().join("order.log")).unwrap();
    assert_eq!(order, "first\nsecond\n");

    let status = status_json(&project);
    assert_eq!(status["last_applied"], 2);
    assert_eq!(numbers(&status["applied"]), vec![1, 2]);
    assert!(status["pending"].as_array().unwrap().is_empty());
}

#[test]
fn test_failed_script_continues_and_exits_nonzero() {
    let project = Project::new(&[
        ("001_ok.sh", "exit 0\n"),
        ("002_broken.sh", "exit 3\n"),
        ("003_ok.sh", "exit 0\n"),
    ]);
    assert!(project.run(&["init"]).status.success());

    let output = project.run(&["deploy", "--command", "sh"]);
    assert!(!output.status.success());
    assert!(
        combined(&output)
            .contains("Script #2 (002_broken.sh) was not applied because it failed with code: 3"),
        "{}",
        combined(&output)
    );

    let status = status_json(&project);
    assert_eq!(numbers(&status["applied"]), vec![1, 3]);
    assert_eq!(status["incomplete"][0]["change_number"], 2);
}

#[test]
fn test_checkall_retries_gap() {
    let project = Project::new(&[
        ("001_ok.sh", "exit 0\n"),
        ("002_flaky.sh", "test -f \"$(dirname \"$0\")/../fixed\"\n"),
        ("003_ok.sh", "exit 0\n"),
    ]);
    assert!(project.run(&["init"]).status.success());
    assert!(!project.run(&["deploy", "--command", "sh"]).status.success());

    std::fs::write(project.path().join("fixed"), "").unwrap();

    // Sequential mode is already past change 2
    let sequential = project.run(&["deploy", "--command", "sh"]);
    assert!(sequential.status.success(), "{}", combined(&sequential));
    assert!(stdout(&sequential).contains("To be applied: (None)"));

    let retry = project.run(&["deploy", "--command", "sh", "--checkall"]);
    assert!(retry.status.success(), "{}", combined(&retry));
    let out = stdout(&retry);
    assert!(out.contains("Applying all scripts regardless of delta number order."));
    assert!(out.contains("To be applied: 2"));
    assert!(out.contains("Resumed unfinished change(s): [2]"), "{}", out);

    let status = status_json(&project);
    assert_eq!(numbers(&status["applied"]), vec![1, 2, 3]);
    assert!(status["incomplete"].as_array().unwrap().is_empty());
}

#[test]
fn test_delta_sets_are_independent() {
    let project = Project::new(&[("001_ok.sh", "exit 0\n")]);
    assert!(project.run(&["init"]).status.success());
    assert!(project.run(&["deploy", "--command", "sh"]).status.success());

    let output = project.run(&["status", "--delta-set", "Hotfix", "--output", "json"]);
    assert!(output.status.success(), "{}", combined(&output));
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["delta_set"], "Hotfix");
    assert_eq!(status["last_applied"], 0);
    assert_eq!(status["pending"][0]["file_name"], "001_ok.sh");
}

#[test]
fn test_config_file_is_read() {
    let project = Project::new(&[]);
    let script_dir = project.path().join("db");
    std::fs::create_dir(&script_dir).unwrap();
    std::fs::write(script_dir.join("010_a.sh"), "exit 0\n").unwrap();
    std::fs::write(
        project.path().join("scriptdeploy.yml"),
        "dir: db\ncustom_command: sh\n",
    )
    .unwrap();

    assert!(project.run(&["init"]).status.success());
    let output = project.run(&["deploy"]);
    assert!(output.status.success(), "{}", combined(&output));
    assert!(stdout(&output).contains("✓ #10 010_a.sh"));
}

#[test]
fn test_unknown_dialect_is_rejected() {
    let project = Project::new(&[]);
    let output = Command::new(scriptdeploy_bin())
        .arg("--project-dir")
        .arg(project.path())
        .args(["--url", "informix:host=db", "status"])
        .env_remove("SCRIPTDEPLOY_URL")
        .output()
        .expect("Failed to run scriptdeploy");

    assert!(!output.status.success());
    assert!(combined(&output).contains("informix"), "{}", combined(&output));
}

#[test]
fn test_invalid_config_key_is_rejected() {
    let project = Project::new(&[]);
    std::fs::write(project.path().join("scriptdeploy.yml"), "directory: db\n").unwrap();

    let output = project.run(&["status"]);
    assert!(!output.status.success());
}
