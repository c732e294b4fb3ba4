use crate::core::SetupError;
use crate::prompt::{Choice, Prompter};
use async_trait::async_trait;
use std::collections::VecDeque;

/// [`Prompter`] that replays queued answers.
///
/// Each kind of question has its own queue. Asking a question whose queue is
/// empty fails with [`SetupError::PromptError`], which is how a test notices
/// an unexpected prompt. Every question asked is recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    selections: VecDeque<Vec<String>>,
    inputs: VecDeque<String>,
    confirmations: VecDeque<bool>,
    selection_prompts: Vec<String>,
    input_prompts: Vec<String>,
    confirm_prompts: Vec<String>,
}

impl ScriptedPrompter {
    /// Prompter with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one multi-select answer.
    #[must_use]
    pub fn with_selection<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections.push_back(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Queue text answers, one per `input_text` call.
    #[must_use]
    pub fn with_inputs<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(answers.into_iter().map(Into::into));
        self
    }

    /// Queue one confirmation answer.
    #[must_use]
    pub fn with_confirmation(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }

    /// Number of `input_text` questions asked so far.
    pub fn input_count(&self) -> usize {
        self.input_prompts.len()
    }

    pub fn input_prompts(&self) -> &[String] {
        &self.input_prompts
    }

    pub fn selection_prompts(&self) -> &[String] {
        &self.selection_prompts
    }

    pub fn confirm_prompts(&self) -> &[String] {
        &self.confirm_prompts
    }

    fn exhausted(kind: &str, prompt: &str) -> SetupError {
        SetupError::PromptError {
            message: format!("no scripted {kind} answer for '{prompt}'"),
        }
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select_many(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        _require_one: bool,
    ) -> Result<Vec<String>, SetupError> {
        self.selection_prompts.push(prompt.to_string());
        let answer =
            self.selections.pop_front().ok_or_else(|| Self::exhausted("selection", prompt))?;

        // Keep menu order, like the terminal prompter does.
        Ok(choices.iter().filter(|c| answer.contains(&c.key)).map(|c| c.key.clone()).collect())
    }

    async fn input_text(&mut self, prompt: &str, default: &str) -> Result<String, SetupError> {
        self.input_prompts.push(prompt.to_string());
        let answer = self.inputs.pop_front().ok_or_else(|| Self::exhausted("input", prompt))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SetupError> {
        self.confirm_prompts.push(prompt.to_string());
        Ok(self.confirmations.pop_front().unwrap_or(default))
    }
}
