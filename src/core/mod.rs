//! Core types for setup-mcp
//!
//! Holds the error taxonomy shared by every layer:
//! - [`SetupError`] - strongly-typed failures of registry lookups, builders,
//!   template merging and persistence
//! - [`ErrorContext`] - user-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - converts any top-level error for display
//!
//! ```rust
//! use setup_mcp::core::{SetupError, user_friendly_error};
//!
//! let ctx = user_friendly_error(anyhow::Error::from(SetupError::UnknownIde {
//!     key: "emacs".to_string(),
//! }));
//! assert!(ctx.suggestion.is_some());
//! ```

pub mod error;

pub use error::{ErrorContext, SetupError, user_friendly_error};
