//! Tests of the `setup-mcp` binary.

use crate::common::TestProject;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_setup_non_interactive() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "cursor", "--server", "playwright", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully configured: 1/1 IDEs"));

    assert_eq!(
        project.read_json(".cursor/mcp.json"),
        json!({"mcpServers": {"playwright": {
            "command": "npx",
            "args": ["@playwright/mcp@latest"],
            "type": "stdio"
        }}})
    );
}

#[test]
fn test_setup_with_secret_flag() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "firecrawl-mcp"])
        .args(["--secret", "firecrawl-mcp=sk-test", "-y"])
        .assert()
        .success();

    assert_eq!(
        project.read_json(".mcp.json")["mcpServers"]["firecrawl-mcp"]["env"],
        json!({ "FIRECRAWL_API_KEY": "sk-test" })
    );
}

#[test]
fn test_secret_from_environment() {
    let project = TestProject::new();

    project
        .command()
        .env("FIRECRAWL_API_KEY", "from-env")
        .args(["setup", "--ide", "copilot", "--server", "firecrawl-mcp", "-y"])
        .assert()
        .success();

    let doc = project.read_json(".vscode/mcp.json");
    assert_eq!(doc["servers"]["firecrawl-mcp"]["env"]["FIRECRAWL_API_KEY"], json!("from-env"));
}

#[test]
fn test_missing_secret_is_reported_not_fatal() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "context7-mcp", "--server", "memory", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped context7-mcp"));

    let doc = project.read_json(".mcp.json");
    assert!(doc["mcpServers"].get("context7-mcp").is_none());
    assert!(doc["mcpServers"].get("memory").is_some());
}

#[test]
fn test_unknown_ide_is_partial_failure() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "emacs", "--ide", "claude", "--server", "memory", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to configure: 1/2 IDEs"))
        .stderr(predicate::str::contains("Unknown IDE: emacs"));

    assert!(project.exists(".mcp.json"));
}

#[test]
fn test_rerun_reports_replaced_file() {
    let project = TestProject::new();
    project.write(".mcp.json", r#"{"mcpServers":{}}"#);

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "memory", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replacing existing .mcp.json"));
}

#[test]
fn test_filesystem_server_defaults_to_project_dir() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "filesystem", "--yes"])
        .assert()
        .success();

    let doc = project.read_json(".mcp.json");
    let last = doc["mcpServers"]["filesystem"]["args"].as_array().unwrap().last().cloned();
    assert_eq!(last, Some(json!(project.path().display().to_string())));
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "cursor", "--ide", "copilot", "--server", "memory"])
        .args(["--yes", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mcpServers\""))
        .stdout(predicate::str::contains("\"servers\""));

    assert!(!project.exists(".cursor"));
    assert!(!project.exists(".vscode"));
}

#[test]
fn test_yes_without_selection_fails() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--server"));

    assert!(!project.exists(".mcp.json"));
}

#[test]
fn test_invalid_secret_syntax_fails() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "memory", "--secret", "novalue", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_closed_stdin_fails_interactive_setup() {
    let project = TestProject::new();

    project
        .command()
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Prompt failed"));
}

#[test]
fn test_interactive_setup_from_stdin() {
    let project = TestProject::new();

    project
        .command()
        .arg("setup")
        .write_stdin("1\nplaywright\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Code configured: .mcp.json"));

    assert!(project.read_json(".mcp.json")["mcpServers"].get("playwright").is_some());
}

#[test]
fn test_declined_confirmation_exits_cleanly() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "claude", "--server", "memory"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup cancelled"));

    assert!(!project.exists(".mcp.json"));
}

#[test]
fn test_list_json() {
    let project = TestProject::new();

    let assert = project.command().args(["list", "--format", "json"]).assert().success();
    let output = assert.get_output().stdout.clone();
    let listing: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let ide_keys: Vec<_> =
        listing["ides"].as_array().unwrap().iter().map(|i| i["key"].clone()).collect();
    assert_eq!(ide_keys, vec![json!("claude"), json!("cursor"), json!("copilot")]);
    assert_eq!(listing["servers"].as_array().unwrap().len(), 14);
}

#[test]
fn test_list_text() {
    let project = TestProject::new();

    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(".vscode/mcp.json"))
        .stdout(predicate::str::contains("serena-mcp"));
}
