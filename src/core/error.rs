//! Error handling for setup-mcp
//!
//! This module provides the error taxonomy of the setup flow and the
//! user-facing rendering of top-level failures. It follows two rules:
//! 1. **Strongly-typed errors** ([`SetupError`]) for everything the setup
//!    engine can report about a single IDE or server
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for whatever escapes to `main`
//!
//! # Propagation
//!
//! Errors raised while one IDE is being processed are caught by the
//! orchestrator, logged, and tallied as a failure for that IDE. Only errors
//! raised before any IDE is processed (selection prompts, invalid flags)
//! reach [`user_friendly_error`] and terminate the process.
//!
//! # Examples
//!
//! ```rust,no_run
//! use setup_mcp::core::{SetupError, user_friendly_error};
//!
//! let error = SetupError::UnknownIde {
//!     key: "emacs".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for registry lookups, fragment building, template merging
/// and configuration persistence.
///
/// # Scope of each variant
///
/// - [`UnknownIde`] and [`UnrecognizedTemplateShape`] fail one IDE
/// - [`UnknownServer`], [`MissingSecret`] and [`NoSecretTarget`] fail one
///   server's fragment; the document is still written with the remaining servers
/// - [`FileSystemError`] fails the IDE whose file could not be written
/// - [`PromptError`] and [`InvalidArgument`] are fatal when raised before
///   IDE processing starts
///
/// [`UnknownIde`]: SetupError::UnknownIde
/// [`UnrecognizedTemplateShape`]: SetupError::UnrecognizedTemplateShape
/// [`UnknownServer`]: SetupError::UnknownServer
/// [`MissingSecret`]: SetupError::MissingSecret
/// [`NoSecretTarget`]: SetupError::NoSecretTarget
/// [`FileSystemError`]: SetupError::FileSystemError
/// [`PromptError`]: SetupError::PromptError
/// [`InvalidArgument`]: SetupError::InvalidArgument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The IDE key is not in the registry
    #[error("Unknown IDE: {key}")]
    UnknownIde {
        /// The key that was looked up
        key: String,
    },

    /// The MCP server key is not in the registry
    #[error("Unknown MCP server: {key}")]
    UnknownServer {
        /// The key that was looked up
        key: String,
    },

    /// A server that needs a secret or other required input never obtained one
    ///
    /// Once raised for a server, the same error is returned for every later
    /// IDE in the run without prompting again.
    #[error("Missing required input for MCP server '{server}': {reason}")]
    MissingSecret {
        /// The server whose input is missing
        server: String,
        /// Why the input could not be captured
        reason: String,
    },

    /// A server requires an API key but neither its arguments nor its
    /// environment can carry one
    #[error(
        "MCP server '{server}' requires an API key but has no argument or environment \
         variable to receive it"
    )]
    NoSecretTarget {
        /// The misconfigured server
        server: String,
    },

    /// The IDE template has no `mcpServers` or `servers` object at top level
    #[error("Unknown template format for IDE '{ide}' - no servers key found")]
    UnrecognizedTemplateShape {
        /// The IDE whose template was inspected
        ide: String,
    },

    /// Creating a directory or writing a configuration file failed
    #[error("File system error during {operation}: {path}: {reason}")]
    FileSystemError {
        /// The operation that failed (e.g. "create directory", "write")
        operation: String,
        /// The path involved
        path: String,
        /// The underlying I/O error message
        reason: String,
    },

    /// Reading an answer from the user failed
    #[error("Prompt failed: {message}")]
    PromptError {
        /// What went wrong while prompting
        message: String,
    },

    /// A command-line argument could not be interpreted
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem
        message: String,
    },

    /// A value could not be converted to JSON
    #[error("JSON serialization failed: {message}")]
    Serialization {
        /// The serializer's message
        message: String,
    },

    /// Anything else, already formatted for display
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl SetupError {
    /// Build a [`SetupError::FileSystemError`] from an I/O error.
    pub fn filesystem(
        operation: impl Into<String>,
        path: &std::path::Path,
        error: &std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

/// Error wrapper with optional details and suggestion for terminal display.
///
/// ```rust,no_run
/// use setup_mcp::core::{ErrorContext, SetupError};
///
/// let context = ErrorContext::new(SetupError::PromptError {
///     message: "input stream closed".to_string(),
/// })
/// .with_suggestion("Run with --ide/--server and --yes for non-interactive use");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SetupError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SetupError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error (shown in green).
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (shown in yellow).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Recognizes [`SetupError`] and [`std::io::Error`] anywhere in the chain;
/// everything else is rendered with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(setup_error) = error.downcast_ref::<SetupError>() {
        return create_error_context(setup_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(SetupError::FileSystemError {
                operation: "file access".to_string(),
                path: "unknown".to_string(),
                reason: io_error.to_string(),
            })
            .with_suggestion("Check the ownership and permissions of the project directory");
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SetupError::Other {
        message,
    })
}

fn create_error_context(error: SetupError) -> ErrorContext {
    match &error {
        SetupError::UnknownIde {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'setup-mcp list' to see the supported IDE keys"),
        SetupError::UnknownServer {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'setup-mcp list' to see the supported MCP server keys"),
        SetupError::MissingSecret {
            server,
            ..
        } => {
            let suggestion = format!("Pass the value with --secret {server}=<value>");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        SetupError::PromptError {
            ..
        } => ErrorContext::new(error)
            .with_details("Interactive selection needs a terminal on stdin")
            .with_suggestion("Use --ide, --server and --yes to run without prompts"),
        SetupError::InvalidArgument {
            ..
        } => ErrorContext::new(error).with_suggestion("Run 'setup-mcp setup --help' for usage"),
        SetupError::FileSystemError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the project directory exists and is writable"),
        _ => ErrorContext::new(error),
    }
}
