//! The `status` command.

use super::CliConfig;
use crate::merge::Template;
use crate::registry::{IdeEntry, Registry};
use crate::store::{ConfigStore, FsConfigStore};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

/// State of one IDE's configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeStatus {
    /// No file at the IDE's path
    Missing,
    /// The file exists but is not valid JSON or has no servers container
    Unreadable,
    /// The file lists these server keys
    Configured(Vec<String>),
}

/// Show which IDE configuration files exist and what they configure.
#[derive(Args, Debug, Default, Clone)]
pub struct StatusCommand {}

/// Inspect one IDE's file through `store`.
pub async fn ide_status(store: &dyn ConfigStore, ide: &IdeEntry) -> IdeStatus {
    let path = Path::new(&ide.file_path);
    if !store.file_exists(path).await {
        return IdeStatus::Missing;
    }

    let Some(document) = store.read_json(path).await else {
        return IdeStatus::Unreadable;
    };

    match Template::new(&document).servers_key().and_then(|key| document[key].as_object()) {
        Some(container) => IdeStatus::Configured(container.keys().cloned().collect()),
        None => IdeStatus::Unreadable,
    }
}

impl StatusCommand {
    /// Report the state of every IDE file in the project directory.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let registry = Registry::builtin();
        let store = FsConfigStore::new(&config.project_dir);
        let reporter = config.reporter();

        reporter.output("MCP Server Configuration Status:");
        reporter.output("");

        for ide in registry.ides() {
            match ide_status(&store, ide).await {
                IdeStatus::Missing => reporter.output(&format!(
                    "  {} {}: no {} file found",
                    "✗".red(),
                    ide.display_name,
                    ide.file_path
                )),
                IdeStatus::Unreadable => reporter.output(&format!(
                    "  {} {}: {} exists but could not be read",
                    "⚠".yellow(),
                    ide.display_name,
                    ide.file_path
                )),
                IdeStatus::Configured(servers) => {
                    reporter.output(&format!(
                        "  {} {}: {} ({} server(s))",
                        "✓".green(),
                        ide.display_name,
                        ide.file_path,
                        servers.len()
                    ));
                    for server in servers {
                        reporter.output(&format!("    {} {}", "•".cyan(), server));
                    }
                }
            }
        }

        Ok(())
    }
}
