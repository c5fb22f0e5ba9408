//! JSON file store.
//!
//! The whole namespace is one JSON object of string values. Mutations stay in
//! memory until [`JsonFileStore::flush`], which rewrites the file through a
//! temporary file in the same directory followed by a rename, so readers see
//! either the old or the new namespace.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use bozor_core::{MemoryStore, Store, StoreError};

/// A [`Store`] persisted as a JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: MemoryStore,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty namespace.
    ///
    /// A file that is not a JSON object is treated as empty and replaced on
    /// the next write. Non-string values are kept as their JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => decode(&path, &raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: MemoryStore::from_entries(entries),
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current namespace contents.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        self.entries.entries()
    }

    /// Whether there are changes not yet written.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes to the file. Does nothing when clean.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written; the changes stay
    /// pending.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        self.save()?;
        self.dirty = false;
        debug!(path = %self.path.display(), "Store file written");
        Ok(())
    }

    fn save(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let encoded = serde_json::to_vec_pretty(self.entries.entries())?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Write {
            key: self.path.display().to_string(),
            reason: e.error.to_string(),
        })?;
        Ok(())
    }
}

fn decode(path: &Path, raw: &str) -> BTreeMap<String, String> {
    if raw.trim().is_empty() {
        return BTreeMap::new();
    }
    match serde_json::from_str::<BTreeMap<String, Value>>(raw) {
        Ok(map) => map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file is not a JSON object, starting empty");
            BTreeMap::new()
        }
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.set(key, value)?;
        self.dirty = true;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.get(key)?.is_none() {
            return Ok(());
        }
        self.entries.remove(key)?;
        self.dirty = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear()?;
        self.dirty = true;
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        self.entries.scan_prefix(prefix)
    }
}
