//! The `status` command against written and hand-edited files.

use crate::common::TestProject;
use predicates::prelude::*;

#[test]
fn test_status_after_setup() {
    let project = TestProject::new();

    project
        .command()
        .args(["setup", "--ide", "cursor", "--server", "playwright", "--server", "memory", "-y"])
        .assert()
        .success();

    project
        .command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cursor: .cursor/mcp.json (2 server(s))"))
        .stdout(predicate::str::contains("playwright"))
        .stdout(predicate::str::contains("Claude Code: no .mcp.json file found"));
}

#[test]
fn test_status_with_unreadable_file() {
    let project = TestProject::new();
    project.write(".vscode/mcp.json", "{ this is not json");

    project
        .command()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(".vscode/mcp.json exists but could not be read"));
}
