//! Preference store port and its implementations.
//!
//! The usage recorder persists through [`PreferenceStore`], a small typed
//! key-value interface. Hosts inject an implementation once per process.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::keys::NAMESPACE;

/// Failure reported by a preference store. Fatal to the operation that
/// triggered it; callers propagate it instead of falling back to defaults.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize preferences: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("preference '{key}' holds a value of the wrong type")]
    TypeMismatch { key: String },
}

/// A typed value written to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Bool(bool),
    I64(i64),
}

impl From<Preference> for Value {
    fn from(value: Preference) -> Self {
        match value {
            Preference::Bool(b) => Value::Bool(b),
            Preference::I64(n) => Value::from(n),
        }
    }
}

/// Typed key-value storage.
///
/// Getters return `Ok(None)` for missing keys. `put_all` applies a batch of
/// writes as one unit: either every entry is stored or none is. `clear`
/// removes every key in the `apprate.` namespace and leaves other keys
/// untouched.
pub trait PreferenceStore {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError>;
    fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError>;
    fn put_all(&mut self, entries: &[(&str, Preference)]) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), StorageError> {
        self.put_all(&[(key, Preference::Bool(value))])
    }

    fn put_i64(&mut self, key: &str, value: i64) -> Result<(), StorageError> {
        self.put_all(&[(key, Preference::I64(value))])
    }
}

fn bool_value(key: &str, value: Option<&Value>) -> Result<Option<bool>, StorageError> {
    match value {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(StorageError::TypeMismatch {
            key: key.to_string(),
        }),
    }
}

fn i64_value(key: &str, value: Option<&Value>) -> Result<Option<i64>, StorageError> {
    match value {
        None => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| StorageError::TypeMismatch {
            key: key.to_string(),
        }),
    }
}

/// In-memory store, for tests and hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        bool_value(key, self.values.get(key))
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError> {
        i64_value(key, self.values.get(key))
    }

    fn put_all(&mut self, entries: &[(&str, Preference)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), Value::from(*value));
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.values.retain(|key, _| !key.starts_with(NAMESPACE));
        Ok(())
    }
}

/// JSON-file store. Every batch replaces the file atomically through a
/// temporary file in the same directory; the in-memory view only changes
/// once the file is written.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFilePreferences {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "Preferences file doesn't exist, starting empty");
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let values: BTreeMap<String, Value> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), keys = values.len(), "Loaded preferences");

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(io_err)?;

        let json = serde_json::to_string_pretty(values)?;
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        bool_value(key, self.values.get(key))
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>, StorageError> {
        i64_value(key, self.values.get(key))
    }

    fn put_all(&mut self, entries: &[(&str, Preference)]) -> Result<(), StorageError> {
        let mut next = self.values.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), Value::from(*value));
        }
        self.flush(&next)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Saved preferences");
        self.values = next;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let mut next = self.values.clone();
        next.retain(|key, _| !key.starts_with(NAMESPACE));
        self.flush(&next)?;
        self.values = next;
        Ok(())
    }
}
