//! setup-mcp - configure MCP servers for AI coding tools
//!
//! Writes the per-project MCP configuration files that Claude Code
//! (`.mcp.json`), Cursor (`.cursor/mcp.json`) and GitHub Copilot
//! (`.vscode/mcp.json`) read, for a chosen set of MCP servers.
//!
//! # Architecture
//!
//! - [`registry`] - static tables of supported IDEs and servers
//! - [`builders`] - one builder per server kind, producing the JSON fragment
//!   for a server and capturing API keys or paths once per run
//! - [`merge`] - clones an IDE template and fills its servers container
//! - [`setup`] - runs the per-IDE loop, tolerating failures of single IDEs
//! - [`store`] - reads and atomically writes configuration files
//! - [`prompt`] - interactive and non-interactive answer sources
//! - [`cli`] - the `setup-mcp` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use setup_mcp::builders::PresetInputs;
//! use setup_mcp::prompt::NonInteractivePrompter;
//! use setup_mcp::registry::Registry;
//! use setup_mcp::report::Reporter;
//! use setup_mcp::setup::Orchestrator;
//! use setup_mcp::store::FsConfigStore;
//!
//! # async fn example() {
//! let registry = Registry::builtin();
//! let store = FsConfigStore::new(".");
//! let reporter = Reporter::new(false);
//! let mut presets = PresetInputs::new();
//! presets.insert("firecrawl-mcp", "fc-123");
//!
//! let mut orchestrator = Orchestrator::new(&registry, presets, &store, &reporter);
//! let ides = vec!["claude".to_string(), "cursor".to_string()];
//! let servers = vec!["playwright".to_string(), "firecrawl-mcp".to_string()];
//! let result = orchestrator.setup_all(&ides, &servers, &mut NonInteractivePrompter).await;
//! println!("{}/{} IDEs configured", result.succeeded, result.total);
//! # }
//! ```

// Core functionality modules
pub mod cli;
pub mod constants;
pub mod core;

// Setup engine
pub mod builders;
pub mod merge;
pub mod registry;
pub mod setup;

// Collaborators
pub mod prompt;
pub mod report;
pub mod store;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
