//! Storage backend implementations.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Synchronous string key-value store.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::storage("memory storage lock poisoned")
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
    fn name(&self) -> &'static str {
        "memory"
    }
}

/// A JSON object of string values in a single file.
///
/// Every operation re-reads the file, so several processes see each other's
/// writes. Writes go to a sibling temp file that is then renamed over the
/// original. Concurrent writers are last-write-wins.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    fn store(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::storage("file storage lock poisoned"))?;
        let mut map = self.load()?;
        f(&mut map);
        self.store(&map)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|map| {
            map.insert(key.to_string(), Value::String(value.to_string()));
        })
    }
    fn remove_item(&self, key: &str) -> Result<()> {
        if self.get_item(key)?.is_none() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }
    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_set_get_remove() {
        let s = MemoryStorage::new();
        assert_eq!(s.get_item("k").unwrap(), None);
        s.set_item("k", "v1").unwrap();
        s.set_item("k", "v2").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(s.len(), 1);
        s.remove_item("k").unwrap();
        s.remove_item("k").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let first = FileStorage::new(&path);
        first.set_item("access_token", "abc").unwrap();
        first.set_item("predict_form", r#"{"a":1}"#).unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get_item("access_token").unwrap().as_deref(), Some("abc"));
        assert_eq!(
            second.get_item("predict_form").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        second.remove_item("access_token").unwrap();
        assert_eq!(first.get_item("access_token").unwrap(), None);
        assert!(first.get_item("predict_form").unwrap().is_some());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(s.get_item("anything").unwrap(), None);
        s.remove_item("anything").unwrap();
        assert!(!s.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1,2,3]").unwrap();
        let err = FileStorage::new(&path).get_item("k").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Storage);

        fs::write(&path, "{not json").unwrap();
        let err = FileStorage::new(&path).get_item("k").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Serialization);
    }
}
