//! Test utilities for setup-mcp
//!
//! In-memory stand-ins for the collaborators the setup engine talks to, so
//! setup runs can be exercised without a terminal or a file system:
//!
//! - [`ScriptedPrompter`] replays queued answers and records every question
//! - [`MemoryConfigStore`] keeps written documents in memory and can be told
//!   to fail specific writes
//!
//! # Example
//!
//! ```rust,no_run
//! use setup_mcp::builders::PresetInputs;
//! use setup_mcp::registry::Registry;
//! use setup_mcp::report::Reporter;
//! use setup_mcp::setup::Orchestrator;
//! use setup_mcp::test_utils::{MemoryConfigStore, ScriptedPrompter};
//!
//! # async fn example() {
//! let registry = Registry::builtin();
//! let store = MemoryConfigStore::new();
//! let reporter = Reporter::new(true);
//! let mut prompter = ScriptedPrompter::new().with_inputs(["sk-test"]);
//!
//! let mut orchestrator = Orchestrator::new(&registry, PresetInputs::new(), &store, &reporter);
//! let ides = vec!["claude".to_string()];
//! let servers = vec!["firecrawl-mcp".to_string()];
//! orchestrator.setup_all(&ides, &servers, &mut prompter).await;
//!
//! assert!(store.document(".mcp.json").is_some());
//! # }
//! ```

mod prompter;
mod store;

pub use prompter::ScriptedPrompter;
pub use store::MemoryConfigStore;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=setup_mcp=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
