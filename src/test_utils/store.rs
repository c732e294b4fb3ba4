use crate::core::SetupError;
use crate::store::ConfigStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    directories: BTreeSet<String>,
    documents: BTreeMap<String, Value>,
    write_order: Vec<String>,
}

/// [`ConfigStore`] that keeps everything in memory.
///
/// Paths are used as given (forward slashes, relative to the project).
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    state: Mutex<State>,
    failing: HashSet<String>,
}

fn key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl MemoryConfigStore {
    /// Empty store that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail with a permission error.
    #[must_use]
    pub fn fail_writes_to(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    /// Seed an existing file.
    pub fn insert_document(&self, path: &str, document: Value) {
        if let Ok(mut state) = self.state.lock() {
            state.documents.insert(path.to_string(), document);
        }
    }

    /// The document stored at `path`.
    pub fn document(&self, path: &str) -> Option<Value> {
        self.state.lock().ok()?.documents.get(path).cloned()
    }

    /// Paths written through `write_json`, in write order.
    pub fn written_paths(&self) -> Vec<String> {
        self.state.lock().map(|s| s.write_order.clone()).unwrap_or_default()
    }

    /// Directories created, sorted.
    pub fn directories(&self) -> Vec<String> {
        self.state.lock().map(|s| s.directories.iter().cloned().collect()).unwrap_or_default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn ensure_directory(&self, path: &Path) -> Result<(), SetupError> {
        let mut state = self.state.lock().map_err(|e| SetupError::Other {
            message: e.to_string(),
        })?;
        state.directories.insert(key(path));
        Ok(())
    }

    async fn write_json(&self, path: &Path, document: &Value) -> Result<(), SetupError> {
        let path_key = key(path);
        if self.failing.contains(&path_key) {
            let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused");
            return Err(SetupError::filesystem("write", path, &error));
        }

        let mut state = self.state.lock().map_err(|e| SetupError::Other {
            message: e.to_string(),
        })?;
        state.documents.insert(path_key.clone(), document.clone());
        state.write_order.push(path_key);
        Ok(())
    }

    async fn read_json(&self, path: &Path) -> Option<Value> {
        self.document(&key(path))
    }

    async fn file_exists(&self, path: &Path) -> bool {
        self.document(&key(path)).is_some()
    }
}
