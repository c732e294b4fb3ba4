//! Builders that ask for plain (non-secret) values.

use super::{CapturedInput, ConfigBuilder, ConfigFragment, InputRequest, PresetInputs};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::{EnvVar, IdeEntry, ServerEntry};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Replaces the server's last argument (a path or connection string) with a
/// user-chosen value.
pub struct PathArgBuilder {
    entry: ServerEntry,
    default: String,
    value: CapturedInput,
}

impl PathArgBuilder {
    /// `default` is offered at the prompt; a preset under the server key skips it.
    pub fn new(entry: &ServerEntry, presets: &PresetInputs, default: impl Into<String>) -> Self {
        Self {
            entry: entry.clone(),
            default: default.into(),
            value: CapturedInput::new(presets.get(&entry.key).map(str::to_string)),
        }
    }
}

#[async_trait]
impl ConfigBuilder for PathArgBuilder {
    fn server_key(&self) -> &str {
        &self.entry.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        let request = InputRequest {
            prompt: format!("Value for {}:", self.entry.display_name),
            default: self.default.clone(),
            required: true,
        };
        let value = self.value.obtain(&self.entry.key, request, prompter).await?;

        let mut args = self.entry.args.clone();
        match args.last_mut() {
            Some(last) => *last = value,
            None => args.push(value),
        }

        Ok(ConfigFragment::new(&self.entry.command, args).shaped_for(ide))
    }
}

/// Asks for every required environment variable and writes them into `env`.
///
/// Placeholder defaults must be replaced; real defaults (like an API URL)
/// are offered and kept on an empty answer.
pub struct EnvPromptBuilder {
    entry: ServerEntry,
    inputs: Vec<(EnvVar, CapturedInput)>,
}

impl EnvPromptBuilder {
    /// Presets are looked up by environment variable name.
    pub fn new(entry: &ServerEntry, presets: &PresetInputs) -> Self {
        let inputs = entry
            .required_env
            .iter()
            .map(|var| {
                let preset = presets.get(&var.name).map(str::to_string);
                (var.clone(), CapturedInput::new(preset))
            })
            .collect();

        Self {
            entry: entry.clone(),
            inputs,
        }
    }
}

#[async_trait]
impl ConfigBuilder for EnvPromptBuilder {
    fn server_key(&self) -> &str {
        &self.entry.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        let mut env = BTreeMap::new();

        for (var, input) in &mut self.inputs {
            let placeholder = var.is_placeholder();
            let request = InputRequest {
                prompt: format!("{} for {}:", var.name, self.entry.display_name),
                default: if placeholder {
                    String::new()
                } else {
                    var.default.clone()
                },
                required: placeholder,
            };
            let value = input.obtain(&self.entry.key, request, prompter).await?;
            env.insert(var.name.clone(), value);
        }

        Ok(ConfigFragment::new(&self.entry.command, self.entry.args.clone())
            .with_env(env)
            .shaped_for(ide))
    }
}
