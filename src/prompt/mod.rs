//! Prompting collaborator.
//!
//! The setup engine never talks to the terminal directly. It asks a
//! [`Prompter`] for selections, free-text input and confirmations, and awaits
//! each answer before moving on. Two implementations ship with the crate:
//!
//! - [`TerminalPrompter`] - numbered menus and line input on stdin
//! - [`NonInteractivePrompter`] - answers with defaults, used with `--yes`
//!
//! Tests use `ScriptedPrompter` from `test_utils`.

mod non_interactive;
mod terminal;

pub use non_interactive::NonInteractivePrompter;
pub use terminal::TerminalPrompter;

use crate::core::SetupError;
use async_trait::async_trait;

/// One selectable entry in a multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value returned when selected
    pub key: String,
    /// Text shown to the user
    pub label: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Source of user answers.
///
/// Every method suspends until exactly one answer is available.
#[async_trait]
pub trait Prompter: Send {
    /// Ask the user to pick any number of `choices`; returns their keys in
    /// menu order. With `require_one`, an empty answer is refused and asked again.
    async fn select_many(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        require_one: bool,
    ) -> Result<Vec<String>, SetupError>;

    /// Ask for a line of text; an empty answer yields `default`.
    async fn input_text(&mut self, prompt: &str, default: &str) -> Result<String, SetupError>;

    /// Ask a yes/no question; an empty answer yields `default`.
    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SetupError>;
}

/// Parse a selection answer against a menu.
///
/// Accepts 1-based indices and choice keys separated by commas or
/// whitespace, or `all`. Duplicates are dropped and the result follows menu
/// order. Returns the offending token on failure.
///
/// ```rust
/// use setup_mcp::prompt::{Choice, parse_selection};
///
/// let choices = vec![Choice::new("claude", "Claude Code"), Choice::new("cursor", "Cursor")];
/// assert_eq!(parse_selection("2, claude", &choices).unwrap(), vec!["claude", "cursor"]);
/// assert!(parse_selection("3", &choices).is_err());
/// ```
pub fn parse_selection(input: &str, choices: &[Choice]) -> Result<Vec<String>, String> {
    let mut picked = vec![false; choices.len()];

    for token in input.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        if token.eq_ignore_ascii_case("all") {
            picked.iter_mut().for_each(|p| *p = true);
            continue;
        }

        let index = match token.parse::<usize>() {
            Ok(number) if (1..=choices.len()).contains(&number) => number - 1,
            Ok(_) => return Err(token.to_string()),
            Err(_) => choices
                .iter()
                .position(|choice| choice.key == token)
                .ok_or_else(|| token.to_string())?,
        };
        picked[index] = true;
    }

    Ok(choices
        .iter()
        .zip(picked)
        .filter(|(_, picked)| *picked)
        .map(|(choice, _)| choice.key.clone())
        .collect())
}

/// Interpret a yes/no answer; `None` means the answer was not understood.
pub fn parse_confirmation(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
