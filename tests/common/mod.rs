//! Common test utilities for setup-mcp integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would otherwise leak presets into a test run.
const PRESET_ENV_VARS: &[&str] = &[
    "FIRECRAWL_API_KEY",
    "GITHUB_PERSONAL_ACCESS_TOKEN",
    "GITLAB_PERSONAL_ACCESS_TOKEN",
    "GITLAB_API_URL",
    "BRAVE_API_KEY",
    "SETUP_MCP_PROJECT_DIR",
];

/// A scratch project directory.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.file(relative).exists()
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.file(relative)).expect("read project file")
    }

    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).expect("parse project file")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.file(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write project file");
    }

    /// The `setup-mcp` binary pointed at this project with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("setup-mcp").expect("binary built");
        for var in PRESET_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1").arg("--project-dir").arg(self.path());
        cmd
    }
}

pub fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
