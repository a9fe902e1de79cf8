//! JSON file-based key-value store.
//!
//! This module provides a human-readable store using JSON serialization. Commits use
//! atomic file writes (write-to-temp + rename) so a crash never leaves a half-written
//! file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Commit**: O(n) - serializes and writes entire dataset
//! - **Best for**: a few hundred keys, infrequent writes

use crate::domain::error::{RecentsError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Suffix appended to a store file that could not be parsed.
const CORRUPT_SUFFIX: &str = ".corrupt";

/// JSON store container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the store format for future migrations.
    version: u32,

    /// All entries. Ordered so that the file diff stays stable between commits.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The entire dataset is kept in memory. Writes are staged until
/// [`commit`](KeyValueStore::commit) and flushed on drop if still pending.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is meant to be owned by a single
/// session on a single thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "recent_repos_20": "octo/alpha,octo/beta"
///   }
/// }
/// ```
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data, loaded on open.
    data: StoreData,

    /// Tracks if data has been modified since the last commit.
    dirty: bool,
}

impl JsonStore {
    /// Opens a JSON store, creating parent directories as needed.
    ///
    /// If the file exists its entries are loaded, otherwise the store starts empty.
    /// A file that is not valid JSON, or was written by a newer format version, is
    /// renamed to `<file>.corrupt` and the store starts empty. Nothing is written
    /// until the first commit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hubrecents::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::open(PathBuf::from("/tmp/hubrecents/store.json"))?;
    /// # Ok::<(), hubrecents::RecentsError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(data) => data,
                Err(RecentsError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(path = ?file_path, error = %e, "store file is corrupt, starting empty");
                    Self::move_aside(&file_path);
                    StoreData::default()
                }
            }
        } else {
            tracing::debug!("initializing new empty store");
            StoreData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store opened");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| RecentsError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(RecentsError::Storage(format!(
                "unsupported store version {} (newest known is {FORMAT_VERSION})",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded store data"
        );

        Ok(data)
    }

    /// Renames an unreadable store file so the next commit does not overwrite it.
    fn move_aside(path: &Path) {
        let mut aside = path.as_os_str().to_owned();
        aside.push(CORRUPT_SUFFIX);
        let aside = PathBuf::from(aside);

        match std::fs::rename(path, &aside) {
            Ok(()) => tracing::warn!(moved_to = ?aside, "corrupt store file moved aside"),
            Err(e) => tracing::error!(error = %e, "failed to move corrupt store file aside"),
        }
    }

    /// Writes to a temporary file, then renames it over the target path.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping commit, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| RecentsError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store committed");
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_put", key = %key).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove", key = %key).entered();

        if self.data.entries.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_commit").entered();
        self.save_to_file()
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("committing dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to commit on drop");
            }
        }
    }
}
