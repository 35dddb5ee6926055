//! Persisted theme preference
//!
//! A single string (the chosen theme id) under one fixed key in a local
//! per-user key/value store. Every failure is reported as a
//! [`StorageError`] and the manager treats it as "no preference".

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::sync::lock;

/// Local key/value store for the theme preference
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        lock(&store.values).insert(key.into(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// JSON object on disk, `{ "key": "value", ... }`.
///
/// A missing file reads as empty. Writes replace the whole file through a
/// temp file renamed into place; a corrupt file is overwritten on write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(src) if src.trim().is_empty() => Ok(IndexMap::new()),
            Ok(src) => Ok(serde_json::from_str(&src)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(IndexMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Existing values to update, and whether the file held corrupt JSON.
    /// A corrupt file starts over from an empty map.
    fn read_for_write(&self) -> Result<(IndexMap<String, String>, bool), StorageError> {
        match self.read_all() {
            Ok(values) => Ok((values, false)),
            Err(StorageError::Corrupt(e)) => {
                warn!(
                    "FileStore - discarding corrupt {}: {}",
                    self.path.display(),
                    e
                );
                Ok((IndexMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, values: &IndexMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!("FileStore - wrote {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = lock(&self.guard);
        Ok(self.read_all()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let (mut values, _) = self.read_for_write()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.guard);
        let (mut values, corrupt) = self.read_for_write()?;
        if values.shift_remove(key).is_some() || corrupt {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// A store that is never available, like browser storage that is disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl PreferenceStore for NullStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("prefs.json"));

        assert_eq!(store.load("theme").unwrap(), None);
        store.save("theme", "nebula-dream").unwrap();
        store.save("other", "x").unwrap();
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("nebula-dream"));

        store.remove("theme").unwrap();
        assert_eq!(store.load("theme").unwrap(), None);
        assert_eq!(store.load("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::new(path).load("theme"),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn save_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme": "nebula-d"#).unwrap();
        let store = FileStore::new(path.clone());

        store.save("theme", "nebula-dream").unwrap();
        assert_eq!(store.load("theme").unwrap().as_deref(), Some("nebula-dream"));
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn remove_resets_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(path.clone());

        store.remove("theme").unwrap();
        assert_eq!(store.load("theme").unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn null_store_is_unavailable() {
        assert!(matches!(NullStore.load("k"), Err(StorageError::Unavailable(_))));
        assert!(NullStore.save("k", "v").is_err());
    }

    #[test]
    fn memory_store_seed() {
        let store = MemoryStore::with_value("k", "v");
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }
}
