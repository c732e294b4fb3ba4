//! IDE registry entries and the built-in IDE table.

use crate::constants::{CONTEXT_DESKTOP_APP, CONTEXT_IDE_ASSISTANT};
use crate::merge::Template;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

/// Static description of one supported editor or agent target.
///
/// The `template` is the JSON shape the IDE expects. Its servers container
/// (`mcpServers` or `servers`) holds a placeholder entry that tells the merge
/// engine where fragments go and whether entries carry a `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeEntry {
    /// Registry key (`claude`, `cursor`, `copilot`)
    pub key: String,

    /// Human-readable name shown in prompts and summaries
    pub display_name: String,

    /// Directory that must exist before writing; empty means project root
    pub directory_path: String,

    /// Configuration file path relative to the project root
    pub file_path: String,

    /// Context name passed to agents that tailor their tools to the client
    pub agent_context: String,

    /// JSON skeleton of the configuration file
    #[serde(skip_serializing)]
    pub template: Value,
}

impl IdeEntry {
    /// Create an entry with the desktop-app agent context.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        directory_path: impl Into<String>,
        file_path: impl Into<String>,
        template: Value,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            directory_path: directory_path.into(),
            file_path: file_path.into(),
            agent_context: CONTEXT_DESKTOP_APP.to_string(),
            template,
        }
    }

    /// Override the agent context.
    #[must_use]
    pub fn with_agent_context(mut self, context: impl Into<String>) -> Self {
        self.agent_context = context.into();
        self
    }

    /// The directory to create before writing, if any.
    pub fn target_directory(&self) -> Option<&Path> {
        if self.directory_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.directory_path))
        }
    }

    /// The top-level servers key of the template, if recognizable.
    pub fn servers_key(&self) -> Option<&'static str> {
        Template::new(&self.template).servers_key()
    }

    /// Whether server entries in this IDE's file carry a `type` field.
    pub fn uses_typed_entries(&self) -> bool {
        Template::new(&self.template).is_typed()
    }
}

fn placeholder_entry() -> Value {
    json!({
        "command": "COMMAND",
        "args": ["ARG1", "ARG2"],
        "env": {
            "KEY": "VALUE"
        }
    })
}

fn typed_placeholder_entry() -> Value {
    json!({
        "type": "string",
        "command": "COMMAND",
        "args": ["ARG1", "ARG2"],
        "env": {
            "KEY": "VALUE"
        }
    })
}

/// The IDEs supported out of the box, in prompt order.
pub fn builtin_ides() -> Vec<IdeEntry> {
    vec![
        IdeEntry::new(
            "claude",
            "Claude Code",
            "",
            ".mcp.json",
            json!({ "mcpServers": { "name": placeholder_entry() } }),
        ),
        IdeEntry::new(
            "cursor",
            "Cursor",
            ".cursor",
            ".cursor/mcp.json",
            json!({ "mcpServers": { "name": typed_placeholder_entry() } }),
        )
        .with_agent_context(CONTEXT_IDE_ASSISTANT),
        IdeEntry::new(
            "copilot",
            "GitHub Copilot",
            ".vscode",
            ".vscode/mcp.json",
            json!({ "servers": { "name": placeholder_entry() } }),
        )
        .with_agent_context(CONTEXT_IDE_ASSISTANT),
    ]
}
