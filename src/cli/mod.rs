//! Command-line interface for setup-mcp.
//!
//! # Commands
//!
//! - `setup` (default) - pick IDEs and MCP servers, then write each IDE's
//!   configuration file
//! - `list` - show the supported IDEs and servers
//! - `status` - show which IDE files exist and which servers they configure
//!
//! # Examples
//!
//! ```bash
//! # Interactive setup in the current directory
//! setup-mcp
//!
//! # Unattended setup
//! setup-mcp setup --ide cursor --ide claude --server playwright --yes
//!
//! # Secrets without prompting
//! setup-mcp setup --ide claude --server firecrawl-mcp --secret firecrawl-mcp=fc-123 --yes
//!
//! # Preview without writing
//! setup-mcp -C ../other-project setup --ide copilot --server memory --yes --dry-run
//! ```
//!
//! # Global options
//!
//! - `-v, --verbose` / `-q, --quiet`: diagnostic verbosity (`RUST_LOG` wins
//!   when set)
//! - `-C, --project-dir`: directory the configuration files are written to
//!   (also `SETUP_MCP_PROJECT_DIR`)

mod list;
mod setup;
mod status;

pub use list::{ListCommand, OutputFormat};
pub use setup::SetupCommand;
pub use status::{IdeStatus, StatusCommand, ide_status};

use crate::constants::PROJECT_DIR_ENV;
use crate::report::Reporter;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings shared by every command, derived from the global flags.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,

    /// Suppress informational and success lines
    pub quiet: bool,

    /// Directory configuration files are resolved against
    pub project_dir: PathBuf,
}

impl CliConfig {
    /// Configuration rooted at `project_dir` with default verbosity.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_level: "warn".to_string(),
            quiet: false,
            project_dir: project_dir.into(),
        }
    }

    /// A [`Reporter`] honoring the quiet flag.
    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.quiet)
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Configure MCP servers for AI coding tools.
#[derive(Parser, Debug)]
#[command(
    name = "setup-mcp",
    about = "Configure MCP servers for Claude Code, Cursor and GitHub Copilot",
    version,
    long_about = "Select IDEs and MCP servers, and setup-mcp writes each IDE's MCP \
                  configuration file (.mcp.json, .cursor/mcp.json, .vscode/mcp.json) \
                  in the project directory."
)]
pub struct Cli {
    /// Command to run (defaults to `setup`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print warnings, errors and requested output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project directory to write configuration files into
    #[arg(short = 'C', long, global = true, env = PROJECT_DIR_ENV, value_name = "DIR")]
    project_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select IDEs and MCP servers and write their configuration files
    Setup(SetupCommand),

    /// List supported IDEs and MCP servers
    List(ListCommand),

    /// Show which IDE configuration files exist and what they contain
    Status(StatusCommand),
}

impl Cli {
    /// Build the configuration, initialize logging and run the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config()?;
        init_logging(&config.log_level);
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    pub fn build_config(&self) -> Result<CliConfig> {
        let project_dir = match &self.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        Ok(CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            project_dir,
        })
    }

    /// Run the selected command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        tracing::debug!("Project directory: {}", config.project_dir.display());

        match self.command.unwrap_or_else(|| Commands::Setup(SetupCommand::default())) {
            Commands::Setup(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config),
            Commands::Status(cmd) => cmd.execute(&config).await,
        }
    }
}
