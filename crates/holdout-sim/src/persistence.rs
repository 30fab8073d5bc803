//! Preference store — a durable integer key-value map.
//!
//! Holds the gold balance and purchased upgrade tiers across sessions.
//! Backed by a single JSON file, or purely in-memory for tests. The
//! engine flushes after every mutation; a crash between a mutation and
//! its flush loses at most that mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable map of primitive integers keyed by stable identity strings.
#[derive(Debug, Clone)]
pub struct PrefStore {
    values: BTreeMap<String, i64>,
    path: Option<PathBuf>,
}

impl PrefStore {
    /// Open a file-backed store, reading any existing contents.
    /// A missing file starts the store empty; a malformed file is an
    /// error rather than silent data loss.
    pub fn open(path: &Path) -> Result<Self, String> {
        let values = if path.exists() {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read preference file: {e}"))?;
            serde_json::from_str(&json)
                .map_err(|e| format!("Failed to parse preference file: {e}"))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// A store with no backing file; `flush` is a no-op. Used in tests.
    pub fn in_memory() -> Self {
        Self {
            values: BTreeMap::new(),
            path: None,
        }
    }

    pub fn get(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    pub fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Write the full map to the backing file, creating parent
    /// directories as needed.
    pub fn flush(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create preference directory: {e}"))?;
        }
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to serialize preferences: {e}"))?;
        fs::write(path, json).map_err(|e| format!("Failed to write preference file: {e}"))?;
        Ok(())
    }
}
