//! The `setup` command: select, confirm, write.

use super::CliConfig;
use crate::builders::PresetInputs;
use crate::core::SetupError;
use crate::prompt::{Choice, NonInteractivePrompter, Prompter, TerminalPrompter};
use crate::registry::Registry;
use crate::setup::{Orchestrator, SetupResult};
use crate::store::FsConfigStore;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Select IDEs and MCP servers and write their configuration files.
#[derive(Args, Debug, Default, Clone)]
pub struct SetupCommand {
    /// IDE to configure (repeatable); prompted for when omitted
    #[arg(long = "ide", value_name = "KEY")]
    ides: Vec<String>,

    /// MCP server to add (repeatable); prompted for when omitted
    #[arg(long = "server", value_name = "KEY")]
    servers: Vec<String>,

    /// Value for a server input, as NAME=VALUE (repeatable)
    ///
    /// NAME is a server key (API keys, paths, Serena project) or an
    /// environment variable name (GitHub, GitLab, Brave Search).
    #[arg(long = "secret", value_name = "NAME=VALUE")]
    secrets: Vec<String>,

    /// Don't ask: skip the confirmation and use defaults for optional inputs
    #[arg(short, long)]
    yes: bool,

    /// Print the files that would be written without touching the disk
    #[arg(long)]
    dry_run: bool,
}

/// Split a `NAME=VALUE` assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, String), SetupError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(SetupError::InvalidArgument {
            message: format!("expected NAME=VALUE for --secret, got '{raw}'"),
        }),
    }
}

impl SetupCommand {
    /// Command with explicit selections, as if passed on the command line.
    pub fn new(ides: Vec<String>, servers: Vec<String>) -> Self {
        Self {
            ides,
            servers,
            ..Self::default()
        }
    }

    /// Add a `--secret NAME=VALUE` preset.
    #[must_use]
    pub fn with_secret(mut self, name: &str, value: &str) -> Self {
        self.secrets.push(format!("{name}={value}"));
        self
    }

    /// Skip confirmation and prompts, as `--yes` does.
    #[must_use]
    pub fn with_yes(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    /// Print documents instead of writing them, as `--dry-run` does.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Presets from `--secret`, then from the process environment for
    /// every environment variable a registered server reads.
    fn collect_presets(&self, registry: &Registry) -> Result<PresetInputs, SetupError> {
        let mut presets = PresetInputs::new();
        for raw in &self.secrets {
            let (name, value) = parse_assignment(raw)?;
            presets.insert(name, value);
        }

        for var in registry.servers().iter().flat_map(|server| &server.required_env) {
            match std::env::var(&var.name) {
                Ok(value) if !value.is_empty() => {
                    tracing::debug!("Using {} from the environment", var.name);
                    presets.insert_if_absent(var.name.clone(), value);
                }
                _ => {}
            }
        }

        Ok(presets)
    }

    /// Run the command, prompting on the terminal unless `--yes` was given.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let mut prompter: Box<dyn Prompter> = if self.yes {
            Box::new(NonInteractivePrompter)
        } else {
            Box::new(TerminalPrompter::new())
        };
        self.execute_with_prompter(config, prompter.as_mut()).await.map(|_| ())
    }

    /// Run the command against an explicit prompter.
    ///
    /// Returns `None` when the user declined the confirmation.
    pub async fn execute_with_prompter(
        self,
        config: &CliConfig,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<SetupResult>> {
        let registry = Registry::builtin();
        let reporter = config.reporter();
        let project_dir = std::path::absolute(&config.project_dir)
            .unwrap_or_else(|_| config.project_dir.clone());
        let presets = self.collect_presets(&registry)?.with_project_dir(project_dir);

        if self.ides.is_empty() || self.servers.is_empty() {
            reporter.info(&format!("{}\n", "MCP server setup".bold()));
        }

        let ides = if self.ides.is_empty() {
            let choices: Vec<Choice> = registry
                .ides()
                .iter()
                .map(|ide| {
                    Choice::new(&ide.key, format!("{} ({})", ide.display_name, ide.file_path))
                })
                .collect();
            self.select("Select the IDEs to configure:", &choices, prompter, "--ide").await?
        } else {
            self.ides.clone()
        };

        let servers = if self.servers.is_empty() {
            let choices: Vec<Choice> = registry
                .servers()
                .iter()
                .map(|server| {
                    let label = if server.requires_api_key {
                        format!("{} (requires API key)", server.display_name)
                    } else {
                        server.display_name.clone()
                    };
                    Choice::new(&server.key, label)
                })
                .collect();
            self.select("Select the MCP servers to install:", &choices, prompter, "--server").await?
        } else {
            self.servers.clone()
        };

        let store = FsConfigStore::new(&config.project_dir);
        let mut orchestrator =
            Orchestrator::new(&registry, presets, &store, &reporter).with_dry_run(self.dry_run);

        reporter.info(&orchestrator.summary(&ides, &servers));

        if !self.yes && !prompter.confirm("Proceed with setup?", true).await? {
            reporter.warning("Setup cancelled");
            return Ok(None);
        }

        let result = orchestrator.setup_all(&ides, &servers, prompter).await;

        if result.failed == 0 {
            reporter.success("MCP setup complete");
        } else {
            reporter.warning("MCP setup finished with errors");
        }

        Ok(Some(result))
    }

    async fn select(
        &self,
        prompt: &str,
        choices: &[Choice],
        prompter: &mut dyn Prompter,
        flag: &str,
    ) -> Result<Vec<String>, SetupError> {
        if self.yes {
            return Err(SetupError::InvalidArgument {
                message: format!("no selection given; pass {flag} when using --yes"),
            });
        }
        prompter.select_many(prompt, choices, true).await
    }
}
