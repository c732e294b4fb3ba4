//! Prompter for unattended runs.

use super::{Choice, Prompter};
use crate::core::SetupError;
use async_trait::async_trait;

/// Answers every question without user interaction.
///
/// Confirmations are accepted, text input takes its default, and selections
/// come back empty since they must come from command-line flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

#[async_trait]
impl Prompter for NonInteractivePrompter {
    async fn select_many(
        &mut self,
        prompt: &str,
        _choices: &[Choice],
        _require_one: bool,
    ) -> Result<Vec<String>, SetupError> {
        tracing::debug!("Non-interactive answer for '{}': nothing selected", prompt);
        Ok(Vec::new())
    }

    async fn input_text(&mut self, prompt: &str, default: &str) -> Result<String, SetupError> {
        tracing::debug!("Non-interactive answer for '{}': default", prompt);
        Ok(default.to_string())
    }

    async fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool, SetupError> {
        Ok(true)
    }
}
