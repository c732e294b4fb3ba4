//! Persistence of IDE configuration files.
//!
//! The orchestrator writes through the [`ConfigStore`] trait so tests can run
//! against an in-memory store. [`FsConfigStore`] is the real implementation:
//! it resolves every relative path against a project root and writes JSON
//! atomically.

use crate::core::SetupError;
use crate::utils::fs;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where configuration documents are read from and written to.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Create a directory and its parents; a no-op if it exists.
    async fn ensure_directory(&self, path: &Path) -> Result<(), SetupError>;

    /// Replace the file at `path` with the pretty-printed `document`.
    async fn write_json(&self, path: &Path, document: &Value) -> Result<(), SetupError>;

    /// Read a JSON document. Missing or unparseable files yield `None`.
    async fn read_json(&self, path: &Path) -> Option<Value>;

    /// Whether a file exists at `path`.
    async fn file_exists(&self, path: &Path) -> bool;
}

/// [`ConfigStore`] backed by the local file system.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    root: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at `root`; relative paths are resolved against it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Absolute location of `path` inside the project.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn filesystem_error(operation: &str, path: &Path, error: &anyhow::Error) -> SetupError {
    SetupError::FileSystemError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: format!("{error:#}"),
    }
}

#[async_trait]
impl ConfigStore for FsConfigStore {
    async fn ensure_directory(&self, path: &Path) -> Result<(), SetupError> {
        let target = self.resolve(path);
        fs::ensure_dir(&target).await.map_err(|e| filesystem_error("create directory", &target, &e))
    }

    async fn write_json(&self, path: &Path, document: &Value) -> Result<(), SetupError> {
        let target = self.resolve(path);
        tracing::debug!("Writing {}", target.display());
        fs::write_json_file(&target, document)
            .await
            .map_err(|e| filesystem_error("write", &target, &e))
    }

    async fn read_json(&self, path: &Path) -> Option<Value> {
        let target = self.resolve(path);
        match fs::read_json_file(&target).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Could not read {}: {:#}", target.display(), e);
                None
            }
        }
    }

    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }
}
