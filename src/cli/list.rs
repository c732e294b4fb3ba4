//! The `list` command.

use super::CliConfig;
use crate::registry::Registry;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde_json::json;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// List supported IDEs and MCP servers.
#[derive(Args, Debug, Default, Clone)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ListCommand {
    /// Command rendering in `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
        }
    }

    /// Print the listing.
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let reporter = config.reporter();
        reporter.output(&self.render(&Registry::builtin())?);
        Ok(())
    }

    /// The listing as printed.
    pub fn render(&self, registry: &Registry) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let listing = json!({
                    "ides": registry.ides(),
                    "servers": registry.servers(),
                });
                serde_json::to_string_pretty(&listing).context("Failed to serialize listing")
            }
            OutputFormat::Text => Ok(render_text(registry)),
        }
    }
}

fn render_text(registry: &Registry) -> String {
    let mut lines = vec![format!("{}", "IDEs:".bold())];
    for ide in registry.ides() {
        lines.push(format!(
            "  {:<10} {:<16} {}",
            ide.key.cyan(),
            ide.display_name,
            ide.file_path.dimmed()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "MCP servers:".bold()));
    for server in registry.servers() {
        let mut line = format!(
            "  {:<15} {:<14} {} {}",
            server.key.cyan(),
            server.display_name,
            server.command,
            server.args.join(" ")
        );
        if server.requires_api_key {
            line.push_str(&format!(" {}", "(requires API key)".yellow()));
        }
        lines.push(line);
        if let Some(link) = &server.documentation_link {
            lines.push(format!("  {:<15} {}", "", link.dimmed()));
        }
    }

    lines.join("\n")
}
