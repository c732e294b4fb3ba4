//! Per-server configuration builders.
//!
//! Each MCP server kind has a [`ConfigBuilder`] that turns its registry entry
//! into a [`ConfigFragment`] for one IDE. Builders that need user input
//! (API keys, paths, environment values) capture it through the [`Prompter`]
//! the first time they are asked and reuse the answer for every later IDE in
//! the same run.
//!
//! # Builder kinds
//!
//! | Builder | Servers | Output |
//! |---------|---------|--------|
//! | [`StaticBuilder`] | playwright, shadcn-mcp, browsermcp, memory | command and args verbatim |
//! | [`EnvSecretBuilder`] | firecrawl-mcp | API key in `env` |
//! | [`ArgSecretBuilder`] | context7-mcp, magic-mcp | API key substituted into `args` |
//! | [`SerenaBuilder`] | serena-mcp | `--context` and optional `--project` appended |
//! | [`PathArgBuilder`] | filesystem, sqlite, postgres | last argument replaced by a path |
//! | [`EnvPromptBuilder`] | github, gitlab, brave-search | every required env value |
//!
//! The builder is chosen from the entry's [`BuilderKind`] by [`builder_for`]
//! and cached per run by [`BuilderSet`].
//! None of them touches the filesystem, the network or the process
//! environment.

mod prompted;
mod secret;
mod serena;
mod static_args;

pub use prompted::{EnvPromptBuilder, PathArgBuilder};
pub use secret::{ArgSecretBuilder, ArgSubstitution, EnvSecretBuilder, substitute_args};
pub use serena::SerenaBuilder;
pub use static_args::StaticBuilder;

use crate::constants::{API_KEY_ASSIGNMENT, API_KEY_TOKEN, STDIO_TRANSPORT};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::{BuilderKind, IdeEntry, ServerEntry};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// The JSON object written for one server inside an IDE's servers container.
///
/// Fields serialize in declaration order; `env` and `type` are omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFragment {
    pub command: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

impl ConfigFragment {
    /// Fragment with a command and arguments only.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: None,
            transport: None,
        }
    }

    /// Attach environment variables; an empty map leaves `env` absent.
    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = if env.is_empty() {
            None
        } else {
            Some(env)
        };
        self
    }

    /// Apply the IDE's entry shape (`type: "stdio"` for typed templates).
    #[must_use]
    pub fn shaped_for(mut self, ide: &IdeEntry) -> Self {
        self.transport = ide.uses_typed_entries().then(|| STDIO_TRANSPORT.to_string());
        self
    }

    /// Convert to a JSON value for insertion into a document.
    pub fn to_value(&self) -> Result<Value, SetupError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Produces configuration fragments for one MCP server.
#[async_trait]
pub trait ConfigBuilder: Send {
    /// Registry key of the server this builder serves.
    fn server_key(&self) -> &str;

    /// Build the fragment for `ide`, capturing any missing input through
    /// `prompter` on first use.
    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError>;
}

/// Values supplied up front (`--secret NAME=VALUE` or the process
/// environment) so builders can skip the matching prompt.
///
/// Names are server keys for single-value servers and environment variable
/// names for servers that take several values. The project directory, when
/// set, is the default offered for directory arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetInputs {
    values: HashMap<String, String>,
    project_dir: Option<PathBuf>,
}

impl PresetInputs {
    /// Empty preset table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Record a value only if none exists yet.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Look up a value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// First preset found among `names`.
    pub fn first_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Option<String> {
        names.into_iter().find_map(|name| self.get(name)).map(str::to_string)
    }

    /// Set the directory offered as the default for directory arguments.
    #[must_use]
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// The directory offered for directory arguments, if set.
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_dir.as_deref()
    }
}

/// What a [`CapturedInput`] asks for when it is still pending.
#[derive(Debug, Clone)]
pub struct InputRequest {
    pub prompt: String,
    pub default: String,
    /// Blank answers are refused (and remembered as unavailable)
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum CaptureState {
    #[default]
    Pending,
    Captured(String),
    Unavailable(String),
}

/// One user-supplied value, captured at most once per run.
///
/// The first call either takes the preset or prompts; the outcome, success
/// or failure, is remembered so later calls neither prompt again nor change
/// their answer.
#[derive(Debug, Clone, Default)]
pub struct CapturedInput {
    state: CaptureState,
    preset: Option<String>,
}

impl CapturedInput {
    /// Input seeded with an optional preset value.
    pub fn new(preset: Option<String>) -> Self {
        Self {
            state: CaptureState::Pending,
            preset,
        }
    }

    /// Return the captured value, capturing it first if needed.
    ///
    /// Failures surface as [`SetupError::MissingSecret`] for `server`.
    pub async fn obtain(
        &mut self,
        server: &str,
        request: InputRequest,
        prompter: &mut dyn Prompter,
    ) -> Result<String, SetupError> {
        if self.state == CaptureState::Pending {
            self.state = match self.preset.take() {
                Some(value) => Self::accept(value, &request),
                None => match prompter.input_text(&request.prompt, &request.default).await {
                    Ok(answer) => Self::accept(answer, &request),
                    Err(e) => CaptureState::Unavailable(e.to_string()),
                },
            };
            tracing::debug!(
                "Input for {}: {}",
                server,
                if matches!(self.state, CaptureState::Captured(_)) {
                    "captured"
                } else {
                    "unavailable"
                }
            );
        }

        match &self.state {
            CaptureState::Captured(value) => Ok(value.clone()),
            CaptureState::Unavailable(reason) => Err(SetupError::MissingSecret {
                server: server.to_string(),
                reason: reason.clone(),
            }),
            CaptureState::Pending => Err(SetupError::Other {
                message: format!("input for {server} was never captured"),
            }),
        }
    }

    /// Blank values, typed or preset, fall back to the request's default.
    fn accept(value: String, request: &InputRequest) -> CaptureState {
        let value = match value.trim() {
            "" => request.default.trim(),
            trimmed => trimmed,
        };
        if value.is_empty() && request.required {
            CaptureState::Unavailable("no value provided".to_string())
        } else {
            CaptureState::Captured(value.to_string())
        }
    }
}

/// Prompt text for an API key, with the documentation link when known.
pub(crate) fn api_key_prompt(entry: &ServerEntry) -> String {
    match &entry.documentation_link {
        Some(link) => format!("Enter API key for {} (get one at {}):", entry.display_name, link),
        None => format!("Enter API key for {}:", entry.display_name),
    }
}

/// Create the builder for a server entry from its [`BuilderKind`].
///
/// Fails with [`SetupError::NoSecretTarget`] when the entry requires an API
/// key it has no place for.
pub fn builder_for(
    entry: &ServerEntry,
    presets: &PresetInputs,
) -> Result<Box<dyn ConfigBuilder>, SetupError> {
    let builder: Box<dyn ConfigBuilder> = match entry.builder_kind()? {
        BuilderKind::Static => Box::new(StaticBuilder::new(entry)),
        BuilderKind::EnvSecret => Box::new(EnvSecretBuilder::new(entry, presets)),
        BuilderKind::ArgToken => Box::new(ArgSecretBuilder::new(
            entry,
            presets,
            ArgSubstitution::ExactToken(API_KEY_TOKEN),
        )),
        BuilderKind::ArgAssignment => Box::new(ArgSecretBuilder::new(
            entry,
            presets,
            ArgSubstitution::Assignment(API_KEY_ASSIGNMENT),
        )),
        BuilderKind::Serena => Box::new(SerenaBuilder::new(entry, presets)),
        BuilderKind::PathArg {
            default,
        } => {
            let default = default.unwrap_or_else(|| match presets.project_dir() {
                Some(dir) => dir.display().to_string(),
                None => ".".to_string(),
            });
            Box::new(PathArgBuilder::new(entry, presets, default))
        }
        BuilderKind::EnvPrompt => Box::new(EnvPromptBuilder::new(entry, presets)),
    };
    Ok(builder)
}

/// The builders of one run, created lazily and kept for the whole run so
/// captured inputs are shared across IDEs.
pub struct BuilderSet {
    presets: PresetInputs,
    builders: HashMap<String, Box<dyn ConfigBuilder>>,
}

impl BuilderSet {
    /// Empty set; builders are created from `presets` on first request.
    pub fn new(presets: PresetInputs) -> Self {
        Self {
            presets,
            builders: HashMap::new(),
        }
    }

    /// The builder for `entry`, creating it on first request.
    pub fn builder(&mut self, entry: &ServerEntry) -> Result<&mut dyn ConfigBuilder, SetupError> {
        let builder = match self.builders.entry(entry.key.clone()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(builder_for(entry, &self.presets)?),
        };
        Ok(builder.as_mut())
    }
}
