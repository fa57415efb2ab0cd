//! File-backed key-value store.
//!
//! Mirrors the browser's `localStorage` keys in a single JSON file so the
//! CLI reads and writes the same attestation cache format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use nftree_core::{KeyValueStore, StoreError, StoreResult};

use crate::config::{CACHE_FILE_NAME, DEFAULT_CACHE_DIR};

/// On-disk layout of the cache file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    /// Last write
    updated_at: Option<DateTime<Utc>>,
    /// Raw string values, keyed like `localStorage`
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Key-value store persisted to `<dir>/cache.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store in the default directory.
    pub fn new() -> Self {
        Self::with_dir(DEFAULT_CACHE_DIR)
    }

    /// Store in a custom directory. Nothing is created until the first write.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CACHE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<CacheFile> {
        if !self.path.exists() {
            return Ok(CacheFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, mut file: CacheFile) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        file.updated_at = Some(Utc::now());
        let content =
            serde_json::to_string_pretty(&file).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Time of the last write, if the file exists.
    pub fn updated_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        Ok(self.load()?.updated_at)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut file = self.load()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.save(file)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut file = self.load()?;
        if file.entries.remove(key).is_some() {
            self.save(file)?;
        }
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> StoreResult<String>,
    ) -> StoreResult<()> {
        let mut file = self.load()?;
        let next = f(file.entries.get(key).cloned())?;
        file.entries.insert(key.to_string(), next);
        self.save(file)
    }
}
