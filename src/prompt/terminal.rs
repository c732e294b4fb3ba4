//! Line-based terminal prompts on stdin/stdout.

use super::{Choice, Prompter, parse_confirmation, parse_selection};
use crate::core::SetupError;
use async_trait::async_trait;
use colored::Colorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

/// Prompts on the controlling terminal.
///
/// Questions are printed to stdout; answers are read line by line from stdin
/// through tokio so the runtime is never blocked.
pub struct TerminalPrompter {
    reader: BufReader<Stdin>,
}

impl TerminalPrompter {
    /// Create a prompter reading from the process stdin.
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }

    async fn read_answer(&mut self, question: &str) -> Result<String, SetupError> {
        print!("{} {} ", "?".green().bold(), question);
        io::stdout().flush().map_err(|e| SetupError::PromptError {
            message: e.to_string(),
        })?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await.map_err(|e| SetupError::PromptError {
            message: e.to_string(),
        })?;

        if read == 0 {
            return Err(SetupError::PromptError {
                message: "input stream closed".to_string(),
            });
        }

        Ok(line.trim().to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select_many(
        &mut self,
        prompt: &str,
        choices: &[Choice],
        require_one: bool,
    ) -> Result<Vec<String>, SetupError> {
        println!("{}", prompt.bold());
        for (i, choice) in choices.iter().enumerate() {
            println!("  {:>2}) {} {}", i + 1, choice.label, format!("({})", choice.key).dimmed());
        }

        const HINT: &str = "Enter numbers or keys, separated by commas ('all' selects everything):";
        loop {
            let answer = self.read_answer(HINT).await?;

            match parse_selection(&answer, choices) {
                Ok(selected) if selected.is_empty() && require_one => {
                    println!("{}", "You must select at least one option.".yellow());
                }
                Ok(selected) => return Ok(selected),
                Err(token) => {
                    println!("{}", format!("Not a valid choice: {token}").yellow());
                }
            }
        }
    }

    async fn input_text(&mut self, prompt: &str, default: &str) -> Result<String, SetupError> {
        let question = if default.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt} [{default}]")
        };

        let answer = self.read_answer(&question).await?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SetupError> {
        let hint = if default {
            "(Y/n)"
        } else {
            "(y/N)"
        };

        loop {
            let answer = self.read_answer(&format!("{prompt} {hint}")).await?;
            match parse_confirmation(&answer, default) {
                Some(value) => return Ok(value),
                None => println!("{}", "Please enter 'y' for yes or 'n' for no.".yellow()),
            }
        }
    }
}
