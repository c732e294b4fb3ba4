//! Setup orchestration.
//!
//! The [`Orchestrator`] drives one run: for every selected IDE it ensures the
//! target directory, builds the merged document and persists it. A failure
//! while handling one IDE is logged and counted; the next IDE still runs, so
//! [`Orchestrator::setup_all`] always returns a [`SetupResult`].

use crate::builders::PresetInputs;
use crate::core::SetupError;
use crate::merge::{MergeEngine, SkippedServer, render_document};
use crate::prompt::Prompter;
use crate::registry::Registry;
use crate::report::Reporter;
use crate::store::ConfigStore;
use std::fmt::Write as _;
use std::path::Path;

/// What happened to one IDE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeOutcome {
    pub ide: String,
    /// Configuration file written (or previewed), relative to the project
    pub file: Option<String>,
    /// Error that stopped this IDE, if any
    pub error: Option<String>,
    /// Servers written to the file
    pub servers: Vec<String>,
    pub skipped: Vec<SkippedServer>,
}

impl IdeOutcome {
    /// Whether the IDE's file was written (or previewed).
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Tally of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupResult {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<IdeOutcome>,
}

/// Runs setup across the selected IDEs.
pub struct Orchestrator<'a> {
    engine: MergeEngine<'a>,
    store: &'a dyn ConfigStore,
    reporter: &'a Reporter,
    dry_run: bool,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator writing through `store` and reporting through `reporter`.
    pub fn new(
        registry: &'a Registry,
        presets: PresetInputs,
        store: &'a dyn ConfigStore,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            engine: MergeEngine::new(registry, presets),
            store,
            reporter,
            dry_run: false,
        }
    }

    /// Print documents instead of writing them.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Configure every IDE in `ide_keys` with `server_keys`, in order.
    pub async fn setup_all(
        &mut self,
        ide_keys: &[String],
        server_keys: &[String],
        prompter: &mut dyn Prompter,
    ) -> SetupResult {
        let mut result = SetupResult {
            total: ide_keys.len(),
            ..SetupResult::default()
        };

        for ide_key in ide_keys {
            tracing::debug!("Setting up {}", ide_key);

            let outcome = match self.setup_one(ide_key, server_keys, prompter).await {
                Ok(outcome) => {
                    result.succeeded += 1;
                    outcome
                }
                Err(e) => {
                    tracing::warn!("Failed to set up {}: {}", ide_key, e);
                    self.reporter.error(&format!("Failed to set up {ide_key}: {e}"));
                    result.failed += 1;
                    IdeOutcome {
                        ide: ide_key.clone(),
                        file: None,
                        error: Some(e.to_string()),
                        servers: Vec::new(),
                        skipped: Vec::new(),
                    }
                }
            };
            result.outcomes.push(outcome);
        }

        self.reporter.success(&format!(
            "Successfully configured: {}/{} IDEs",
            result.succeeded, result.total
        ));
        if result.failed > 0 {
            self.reporter.warning(&format!(
                "Failed to configure: {}/{} IDEs",
                result.failed, result.total
            ));
        }

        result
    }

    async fn setup_one(
        &mut self,
        ide_key: &str,
        server_keys: &[String],
        prompter: &mut dyn Prompter,
    ) -> Result<IdeOutcome, SetupError> {
        let ide = self.engine.registry().ide(ide_key)?;

        if let Some(dir) = ide.target_directory().filter(|_| !self.dry_run) {
            self.store.ensure_directory(dir).await?;
        }

        let built = self.engine.build_document(ide_key, server_keys, prompter).await?;
        for skipped in &built.skipped {
            self.reporter.warning(&format!(
                "{}: skipped {} ({})",
                ide.display_name, skipped.key, skipped.reason
            ));
        }

        let path = Path::new(&ide.file_path);
        if self.dry_run {
            self.reporter.info(&format!("Would write {}:", ide.file_path));
            self.reporter.output(render_document(&built.document)?.trim_end());
        } else {
            if self.store.file_exists(path).await {
                self.reporter.info(&format!("Replacing existing {}", ide.file_path));
            }
            self.store.write_json(path, &built.document).await?;
            self.reporter.success(&format!("{} configured: {}", ide.display_name, ide.file_path));
        }

        Ok(IdeOutcome {
            ide: ide_key.to_string(),
            file: Some(ide.file_path.clone()),
            error: None,
            servers: built.servers,
            skipped: built.skipped,
        })
    }

    /// Pre-confirmation summary of what a run will configure.
    pub fn summary(&self, ide_keys: &[String], server_keys: &[String]) -> String {
        let registry = self.engine.registry();
        let mut text = String::from("Selected IDEs:\n");

        for key in ide_keys {
            let _ = match registry.ide(key) {
                Ok(ide) => writeln!(text, "  • {}: {}", ide.display_name, ide.file_path),
                Err(_) => writeln!(text, "  • {key}: unknown IDE"),
            };
        }

        text.push_str("\nSelected MCP servers:\n");
        for key in server_keys {
            let _ = match registry.server(key) {
                Ok(server) if server.requires_api_key => {
                    writeln!(text, "  • {} (requires API key)", server.display_name)
                }
                Ok(server) => writeln!(text, "  • {}", server.display_name),
                Err(_) => writeln!(text, "  • {key}: unknown server"),
            };
        }

        text
    }
}
