// Key-value persistence
// Durable string storage for the dismissal date, with an in-memory stand-in

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Durable string key-value storage
///
/// Plays the role of browser local storage: one process-wide namespace of
/// string keys. Values written here survive restarts for durable backends.
pub trait KeyValueStore: Send {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete a value; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store
///
/// Clones share the same map, so tests can inspect writes made by a
/// controller that owns another clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    /// Read a value without going through the trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

const STORE_VERSION: u32 = 1;

/// On-disk layout of a [`FileStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the file format (for future migration support)
    version: u32,
    /// Stored entries
    entries: HashMap<String, String>,
}

/// JSON file backed store
///
/// Every operation reads the file, so several widgets sharing one file see
/// each other's writes. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the default path for the storage file
    /// Returns a path in the user's home directory or current directory
    pub fn default_path() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            let mut path = PathBuf::from(home);
            path.push(".agent-entry");
            path.push("storage.json");
            path
        } else {
            PathBuf::from("agent-entry-storage.json")
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let json = fs::read_to_string(&self.path)?;
        let data: StoreData = serde_json::from_str(&json)?;

        if data.version != STORE_VERSION {
            return Err(StorageError::UnsupportedVersion(data.version));
        }

        Ok(data.entries)
    }

    fn save(&self, entries: HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = StoreData {
            version: STORE_VERSION,
            entries,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&data)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(entries)?;
        }
        Ok(())
    }
}
