//! Integration test suite for setup-mcp
//!
//! End-to-end tests of the setup engine against a real project directory and
//! of the `setup-mcp` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **setup_flow**: orchestrated runs against the file system
//! - **cli**: the binary's commands, flags and exit codes
//! - **status**: inspecting previously written files

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod setup_flow;
mod status;
