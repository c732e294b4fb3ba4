//! Constants shared across setup-mcp.
//!
//! Placeholder tokens and key names that appear in the registry tables and
//! in the templates. They are matched by exact string comparison, so they
//! live in one place.

/// Top-level keys recognized as a template's servers container, in lookup order.
pub const SERVERS_KEYS: &[&str] = &["mcpServers", "servers"];

/// Field whose presence on a template's placeholder entry marks typed server entries.
pub const TYPE_FIELD: &str = "type";

/// Transport written into typed server entries.
pub const STDIO_TRANSPORT: &str = "stdio";

/// Argument token replaced by the captured API key (exact match).
pub const API_KEY_TOKEN: &str = "YOUR_API_KEY";

/// Marker of `NAME="value"` style arguments that carry an API key.
pub const API_KEY_ASSIGNMENT: &str = "API_KEY";

/// Serena context for desktop chat clients.
pub const CONTEXT_DESKTOP_APP: &str = "desktop-app";

/// Serena context for IDE-embedded assistants.
pub const CONTEXT_IDE_ASSISTANT: &str = "ide-assistant";

/// Environment variable overriding the project directory.
pub const PROJECT_DIR_ENV: &str = "SETUP_MCP_PROJECT_DIR";
