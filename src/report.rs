//! User-facing status lines.
//!
//! Diagnostics go through `tracing`; everything the user is meant to read
//! goes through the [`Reporter`], which prefixes each line with a colored
//! glyph.

use colored::Colorize;

/// Prints progress and results for the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    /// With `quiet`, only warnings, errors and plain output are shown.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }

    /// A green check line; hidden when quiet.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// A yellow warning line on stdout.
    pub fn warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    /// A red error line on stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Plain progress text; hidden when quiet.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Output that is the point of the command (listings, previews); never
    /// suppressed.
    pub fn output(&self, text: &str) {
        println!("{text}");
    }
}
