//! Builders for servers that need an API key.

use super::{
    CapturedInput, ConfigBuilder, ConfigFragment, InputRequest, PresetInputs, api_key_prompt,
};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::{IdeEntry, ServerEntry};
use async_trait::async_trait;
use std::collections::BTreeMap;

fn api_key_request(entry: &ServerEntry) -> InputRequest {
    InputRequest {
        prompt: api_key_prompt(entry),
        default: String::new(),
        required: true,
    }
}

/// Passes the API key through the server's environment variables.
pub struct EnvSecretBuilder {
    entry: ServerEntry,
    secret: CapturedInput,
}

impl EnvSecretBuilder {
    /// The preset is looked up by server key, then by env var name.
    pub fn new(entry: &ServerEntry, presets: &PresetInputs) -> Self {
        let names = std::iter::once(entry.key.as_str())
            .chain(entry.required_env.iter().map(|var| var.name.as_str()));
        Self {
            entry: entry.clone(),
            secret: CapturedInput::new(presets.first_of(names)),
        }
    }
}

#[async_trait]
impl ConfigBuilder for EnvSecretBuilder {
    fn server_key(&self) -> &str {
        &self.entry.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        let secret =
            self.secret.obtain(&self.entry.key, api_key_request(&self.entry), prompter).await?;

        let env: BTreeMap<String, String> =
            self.entry.required_env.iter().map(|var| (var.name.clone(), secret.clone())).collect();

        Ok(ConfigFragment::new(&self.entry.command, self.entry.args.clone())
            .with_env(env)
            .shaped_for(ide))
    }
}

/// How an API key is spliced into a server's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSubstitution {
    /// Replace every argument equal to the token
    ExactToken(&'static str),
    /// Replace the argument containing the name with `NAME="<secret>"`
    Assignment(&'static str),
}

/// Apply `substitution` to `args`. The argument count never changes.
///
/// ```rust
/// use setup_mcp::builders::{ArgSubstitution, substitute_args};
///
/// let args = vec!["--api-key".to_string(), "YOUR_API_KEY".to_string()];
/// let out = substitute_args(&args, ArgSubstitution::ExactToken("YOUR_API_KEY"), "abc123");
/// assert_eq!(out, vec!["--api-key", "abc123"]);
/// ```
pub fn substitute_args(
    args: &[String],
    substitution: ArgSubstitution,
    secret: &str,
) -> Vec<String> {
    args.iter()
        .map(|arg| match substitution {
            ArgSubstitution::ExactToken(token) if arg == token => secret.to_string(),
            ArgSubstitution::Assignment(name) if arg.contains(name) => {
                format!("{name}=\"{secret}\"")
            }
            _ => arg.clone(),
        })
        .collect()
}

/// Passes the API key on the command line.
pub struct ArgSecretBuilder {
    entry: ServerEntry,
    substitution: ArgSubstitution,
    secret: CapturedInput,
}

impl ArgSecretBuilder {
    /// The preset is looked up by server key.
    pub fn new(entry: &ServerEntry, presets: &PresetInputs, substitution: ArgSubstitution) -> Self {
        Self {
            entry: entry.clone(),
            substitution,
            secret: CapturedInput::new(presets.get(&entry.key).map(str::to_string)),
        }
    }
}

#[async_trait]
impl ConfigBuilder for ArgSecretBuilder {
    fn server_key(&self) -> &str {
        &self.entry.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        let secret =
            self.secret.obtain(&self.entry.key, api_key_request(&self.entry), prompter).await?;
        let args = substitute_args(&self.entry.args, self.substitution, &secret);

        Ok(ConfigFragment::new(&self.entry.command, args).shaped_for(ide))
    }
}
