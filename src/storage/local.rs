use crate::domain::WeekStore;
use crate::storage::files::{atomic_write, read_file, remove_file};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The on-disk copy of the whole WeekStore (`tasksByWeek.json`)
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored WeekStore; a missing file is an empty store
    pub fn load(&self) -> Result<WeekStore> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(WeekStore::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse local store: {}", self.path.display()))
    }

    /// Like `load`, but a corrupt or unreadable file is logged and treated as empty
    pub fn load_or_empty(&self) -> WeekStore {
        match self.load() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable local store");
                WeekStore::new()
            }
        }
    }

    /// Write the entire WeekStore
    pub fn save(&self, store: &WeekStore) -> Result<()> {
        let json = serde_json::to_string(store)?;
        atomic_write(&self.path, &json)
    }

    /// Write the entire WeekStore, swallowing failures
    pub fn mirror(&self, store: &WeekStore) {
        if let Err(e) = self.save(store) {
            tracing::debug!(path = %self.path.display(), error = %e, "local mirror write failed");
        }
    }

    /// Delete the file; returns whether one existed
    pub fn reset(&self) -> Result<bool> {
        remove_file(&self.path)
    }
}
