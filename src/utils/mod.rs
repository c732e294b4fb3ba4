//! Shared helpers.
//!
//! - [`fs`] - async directory creation, atomic writes and JSON file I/O

pub mod fs;

pub use fs::{atomic_write, ensure_dir, read_json_file, to_pretty_json, write_json_file};
