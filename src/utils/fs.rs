//! Async file system helpers.
//!
//! Writes go through a temp-file-and-rename so a configuration file is either
//! fully replaced or left untouched.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Create `path` and all missing parents. Succeeds if it already exists.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Atomically replace `path` with `content`.
///
/// The content is written to a hidden sibling temp file, synced, then
/// renamed over the target. Parent directories are created as needed.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let temp_path = temp_path_for(path);
    {
        let mut file = fs::File::create(&temp_path)
            .await
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .await
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().await.context("Failed to sync file to disk")?;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e).with_context(|| format!("Failed to rename temp file to: {}", path.display()));
    }

    Ok(())
}

/// Render a JSON document the way configuration files are stored:
/// two-space indentation and a trailing newline.
pub fn to_pretty_json(document: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(document).context("Failed to serialize JSON")?;
    text.push('\n');
    Ok(text)
}

/// Pretty-print `document` and write it atomically.
pub async fn write_json_file(path: &Path, document: &Value) -> Result<()> {
    let text = to_pretty_json(document)?;
    atomic_write(path, text.as_bytes()).await
}

/// Read and parse a JSON file.
pub async fn read_json_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON: {}", path.display()))
}
