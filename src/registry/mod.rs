//! Static registries of supported IDEs and MCP servers.
//!
//! The registry is the only source of IDE templates and server launch specs.
//! It is built once per process and never mutated; every consumer borrows
//! entries from it. Lookups are pure and synchronous.
//!
//! ```rust
//! use setup_mcp::registry::Registry;
//!
//! let registry = Registry::builtin();
//! let cursor = registry.ide("cursor").unwrap();
//! assert_eq!(cursor.file_path, ".cursor/mcp.json");
//! assert!(registry.server("not-a-server").is_err());
//! ```

mod ide;
mod server;

pub use ide::{IdeEntry, builtin_ides};
pub use server::{BuilderKind, EnvVar, ServerEntry, builtin_servers};

use crate::core::SetupError;

/// Lookup tables for IDEs and MCP servers, in declaration order.
#[derive(Debug, Clone)]
pub struct Registry {
    ides: Vec<IdeEntry>,
    servers: Vec<ServerEntry>,
}

impl Registry {
    /// Build a registry from explicit entries.
    pub fn new(ides: Vec<IdeEntry>, servers: Vec<ServerEntry>) -> Self {
        Self {
            ides,
            servers,
        }
    }

    /// The built-in IDE and server tables.
    pub fn builtin() -> Self {
        Self::new(builtin_ides(), builtin_servers())
    }

    /// Look up an IDE by key.
    pub fn ide(&self, key: &str) -> Result<&IdeEntry, SetupError> {
        self.ides.iter().find(|ide| ide.key == key).ok_or_else(|| SetupError::UnknownIde {
            key: key.to_string(),
        })
    }

    /// Look up an MCP server by key.
    pub fn server(&self, key: &str) -> Result<&ServerEntry, SetupError> {
        self.servers.iter().find(|server| server.key == key).ok_or_else(|| {
            SetupError::UnknownServer {
                key: key.to_string(),
            }
        })
    }

    /// All IDE entries.
    pub fn ides(&self) -> &[IdeEntry] {
        &self.ides
    }

    /// All server entries.
    pub fn servers(&self) -> &[ServerEntry] {
        &self.servers
    }
}
