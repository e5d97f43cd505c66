//! JSON file-based key-value store.
//!
//! This module provides a simple, human-readable storage implementation using JSON
//! serialization. Every operation opens the file, does its work and lets the handle
//! go before returning; nothing is cached between calls. Writes go to a temporary
//! file that is then renamed over the target, so a multi-key update is either fully
//! on disk or not at all.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "token": "eyJhbGciOi...",
//!     "user": "{\"id\":1,\"username\":\"alice\"}"
//!   }
//! }
//! ```

use crate::domain::error::{MealShareError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// # Thread Safety
///
/// This type is `Send` but holds no lock on the file; it assumes a single writer,
/// which the auth gate guarantees for the session keys.
#[derive(Debug, Clone)]
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonStore {
    /// Creates a store backed by `file_path`.
    ///
    /// Parent directories are created automatically. The file itself is created on
    /// the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mealshare::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::new(PathBuf::from("/tmp/mealshare/session.json"))?;
    /// # Ok::<(), mealshare::MealShareError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the file, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn read(&self) -> Result<StorageData> {
        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!("store file missing, treating as empty");
                return Ok(StorageData::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map_err(|e| MealShareError::Storage(format!("failed to parse JSON: {e}")))
    }

    /// Reads the file for a read-modify-write cycle.
    ///
    /// A corrupt file is replaced rather than blocking the write: the caller is about
    /// to overwrite the keys it cares about anyway.
    fn read_for_update(&self) -> Result<StorageData> {
        match self.read() {
            Err(MealShareError::Storage(reason)) => {
                tracing::warn!(path = ?self.file_path, %reason, "discarding unreadable store");
                Ok(StorageData::default())
            }
            other => other,
        }
    }

    /// Saves data to disk using atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn write(&self, data: &StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| MealShareError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(entries = data.entries.len(), "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_get", key = %key).entered();

        let value = self.read()?.entries.get(key).cloned();
        tracing::trace!(found = value.is_some(), "lookup complete");
        Ok(value)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let _span = tracing::debug_span!("json_set_many", count = entries.len()).entered();

        let mut data = self.read_for_update()?;
        for (key, value) in entries {
            data.entries.insert((*key).to_string(), value.clone());
        }
        self.write(&data)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_many", count = keys.len()).entered();

        let mut data = self.read_for_update()?;
        let before = data.entries.len();
        for key in keys {
            data.entries.remove(*key);
        }

        if data.entries.len() == before && self.file_path.exists() {
            tracing::trace!("nothing to remove, skipping save");
            return Ok(());
        }
        self.write(&data)
    }
}
