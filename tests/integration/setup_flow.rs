//! Orchestrated setup runs against a scratch project directory.

use crate::common::{TestProject, keys};
use serde_json::json;
use setup_mcp::builders::PresetInputs;
use setup_mcp::registry::{IdeEntry, Registry, builtin_ides, builtin_servers};
use setup_mcp::report::Reporter;
use setup_mcp::setup::{Orchestrator, SetupResult};
use setup_mcp::store::FsConfigStore;
use setup_mcp::test_utils::{ScriptedPrompter, init_test_logging};

async fn run(
    project: &TestProject,
    registry: &Registry,
    ides: &[&str],
    servers: &[&str],
    prompter: &mut ScriptedPrompter,
) -> SetupResult {
    init_test_logging(None);
    let store = FsConfigStore::new(project.path());
    let reporter = Reporter::new(true);
    let mut orchestrator = Orchestrator::new(registry, PresetInputs::new(), &store, &reporter);
    orchestrator.setup_all(&keys(ides), &keys(servers), prompter).await
}

#[tokio::test]
async fn test_cursor_playwright_file() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new();

    let result = run(
        &project,
        &Registry::builtin(),
        &["cursor"],
        &["playwright"],
        &mut prompter,
    )
    .await;

    assert_eq!((result.succeeded, result.failed, result.total), (1, 0, 1));
    assert_eq!(
        project.read_json(".cursor/mcp.json"),
        json!({"mcpServers": {"playwright": {
            "command": "npx",
            "args": ["@playwright/mcp@latest"],
            "type": "stdio"
        }}})
    );
    assert_eq!(
        project.read(".cursor/mcp.json"),
        concat!(
            "{\n",
            "  \"mcpServers\": {\n",
            "    \"playwright\": {\n",
            "      \"command\": \"npx\",\n",
            "      \"args\": [\n",
            "        \"@playwright/mcp@latest\"\n",
            "      ],\n",
            "      \"type\": \"stdio\"\n",
            "    }\n",
            "  }\n",
            "}\n",
        )
    );
}

#[tokio::test]
async fn test_claude_firecrawl_file() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new().with_inputs(["sk-test"]);

    run(&project, &Registry::builtin(), &["claude"], &["firecrawl-mcp"], &mut prompter).await;

    let text = project.read(".mcp.json");
    let compact: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        serde_json::to_string(&compact).unwrap(),
        concat!(
            r#"{"mcpServers":{"firecrawl-mcp":{"command":"npx","args":["-y","firecrawl-mcp"],"#,
            r#""env":{"FIRECRAWL_API_KEY":"sk-test"}}}}"#
        )
    );
}

#[tokio::test]
async fn test_copilot_uses_servers_key() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new();

    run(
        &project,
        &Registry::builtin(),
        &["copilot"],
        &["memory", "shadcn-mcp"],
        &mut prompter,
    )
    .await;

    let doc = project.read_json(".vscode/mcp.json");
    assert!(doc.get("mcpServers").is_none());
    let servers: Vec<_> = doc["servers"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(servers, vec!["memory", "shadcn-mcp"]);
    assert!(doc["servers"]["memory"].get("type").is_none());
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let project = TestProject::new();
    let registry = Registry::builtin();
    let ides = ["claude", "cursor", "copilot"];
    let servers = ["playwright", "context7-mcp", "serena-mcp"];

    let mut first = ScriptedPrompter::new().with_inputs(["key-1", ""]);
    run(&project, &registry, &ides, &servers, &mut first).await;
    let files = [".mcp.json", ".cursor/mcp.json", ".vscode/mcp.json"];
    let snapshot: Vec<String> = files.iter().map(|f| project.read(f)).collect();

    let mut second = ScriptedPrompter::new().with_inputs(["key-1", ""]);
    run(&project, &registry, &ides, &servers, &mut second).await;

    for (file, before) in files.iter().zip(snapshot) {
        assert_eq!(project.read(file), before, "{file} changed between runs");
    }
}

#[tokio::test]
async fn test_existing_file_is_replaced() {
    let project = TestProject::new();
    project.write(".mcp.json", r#"{"mcpServers":{"old":{"command":"x","args":[]}}}"#);
    let mut prompter = ScriptedPrompter::new();

    run(&project, &Registry::builtin(), &["claude"], &["memory"], &mut prompter).await;

    let doc = project.read_json(".mcp.json");
    assert!(doc["mcpServers"].get("old").is_none());
    assert!(doc["mcpServers"].get("memory").is_some());
}

#[tokio::test]
async fn test_partial_failure_with_broken_template() {
    let project = TestProject::new();
    let mut ides = builtin_ides();
    let template = json!({ "tools": [] });
    ides.push(IdeEntry::new("broken", "Broken", ".broken", ".broken/mcp.json", template));
    let registry = Registry::new(ides, builtin_servers());
    let mut prompter = ScriptedPrompter::new();

    let result = run(
        &project,
        &registry,
        &["broken", "claude"],
        &["playwright"],
        &mut prompter,
    )
    .await;

    assert_eq!((result.succeeded, result.failed, result.total), (1, 1, 2));
    assert!(project.exists(".mcp.json"));
    assert!(!project.exists(".broken/mcp.json"));
}

#[tokio::test]
async fn test_unknown_ide_writes_nothing() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new();

    let result = run(
        &project,
        &Registry::builtin(),
        &["not-a-real-ide"],
        &["playwright"],
        &mut prompter,
    )
    .await;

    assert_eq!((result.succeeded, result.failed), (0, 1));
    assert_eq!(std::fs::read_dir(project.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_secret_is_asked_once_for_all_ides() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new().with_inputs(["magic-key"]);

    run(
        &project,
        &Registry::builtin(),
        &["claude", "cursor", "copilot"],
        &["magic-mcp"],
        &mut prompter,
    )
    .await;

    assert_eq!(prompter.input_count(), 1);
    let expected = json!("API_KEY=\"magic-key\"");
    assert_eq!(project.read_json(".mcp.json")["mcpServers"]["magic-mcp"]["args"][2], expected);
    assert_eq!(project.read_json(".vscode/mcp.json")["servers"]["magic-mcp"]["args"][2], expected);
}

#[tokio::test]
async fn test_blank_secret_skips_server_everywhere() {
    let project = TestProject::new();
    let mut prompter = ScriptedPrompter::new().with_inputs([""]);

    let result = run(
        &project,
        &Registry::builtin(),
        &["claude", "cursor"],
        &["firecrawl-mcp", "browsermcp"],
        &mut prompter,
    )
    .await;

    assert_eq!(result.succeeded, 2);
    assert_eq!(prompter.input_count(), 1);
    for file in [".mcp.json", ".cursor/mcp.json"] {
        let doc = project.read_json(file);
        let servers: Vec<_> = doc["mcpServers"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(servers, vec!["browsermcp"]);
    }
}
