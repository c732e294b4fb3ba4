use super::{CapturedInput, ConfigBuilder, ConfigFragment, InputRequest, PresetInputs};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::{IdeEntry, ServerEntry};
use async_trait::async_trait;

/// Serena: tells the agent which client it runs in and, optionally, which
/// project to open.
pub struct SerenaBuilder {
    entry: ServerEntry,
    project: CapturedInput,
}

impl SerenaBuilder {
    /// A preset under the server key is used as the project path.
    pub fn new(entry: &ServerEntry, presets: &PresetInputs) -> Self {
        Self {
            entry: entry.clone(),
            project: CapturedInput::new(presets.get(&entry.key).map(str::to_string)),
        }
    }
}

#[async_trait]
impl ConfigBuilder for SerenaBuilder {
    fn server_key(&self) -> &str {
        &self.entry.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        let request = InputRequest {
            prompt: format!("Project path for {} (leave empty to skip):", self.entry.display_name),
            default: String::new(),
            required: false,
        };
        let project = self.project.obtain(&self.entry.key, request, prompter).await?;

        let mut args = self.entry.args.clone();
        args.extend(["--context".to_string(), ide.agent_context.clone()]);
        if !project.is_empty() {
            args.extend(["--project".to_string(), project]);
        }

        Ok(ConfigFragment::new(&self.entry.command, args).shaped_for(ide))
    }
}
