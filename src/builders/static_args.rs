use super::{ConfigBuilder, ConfigFragment};
use crate::core::SetupError;
use crate::prompt::Prompter;
use crate::registry::{IdeEntry, ServerEntry};
use async_trait::async_trait;

/// Writes the registry's command and arguments unchanged.
pub struct StaticBuilder {
    key: String,
    command: String,
    args: Vec<String>,
}

impl StaticBuilder {
    /// Builder writing `entry` as registered.
    pub fn new(entry: &ServerEntry) -> Self {
        Self {
            key: entry.key.clone(),
            command: entry.command.clone(),
            args: entry.args.clone(),
        }
    }
}

#[async_trait]
impl ConfigBuilder for StaticBuilder {
    fn server_key(&self) -> &str {
        &self.key
    }

    async fn produce_fragment(
        &mut self,
        ide: &IdeEntry,
        _prompter: &mut dyn Prompter,
    ) -> Result<ConfigFragment, SetupError> {
        Ok(ConfigFragment::new(&self.command, self.args.clone()).shaped_for(ide))
    }
}
