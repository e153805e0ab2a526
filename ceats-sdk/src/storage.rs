//! Named-record persistence for client-held state.
//!
//! The cart and the auth session live outside the server boundary and must
//! survive process restarts. Rather than reaching for ambient global
//! storage, stateful components take a [`StateStore`] so tests can inject
//! [`MemoryStateStore`] and applications [`FileStateStore`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors produced by a [`StateStore`].
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stored record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous persistence of named JSON records.
///
/// Writes must be durable before `save` returns so that state written just
/// before a crash is visible on the next start.
pub trait StateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError>;
    fn remove(&self, key: &str) -> Result<(), StateStoreError>;

    /// Load and deserialize the record stored under `key`.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StateStoreError> {
        match self.load(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store `value` under `key`.
    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StateStoreError> {
        let raw = serde_json::to_string(value)?;
        self.save(key, &raw)
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StateStoreError> {
        (**self).remove(key)
    }
}

/// File-backed store writing one `<key>.json` per record.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StateStoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        // Write atomically: temp file in the same directory, then rename.
        let path = self.path_for(key);
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StateStoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        let records = self.records.lock().map_err(|_| StateStoreError::Poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        let mut records = self.records.lock().map_err(|_| StateStoreError::Poisoned)?;
        records.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StateStoreError> {
        let mut records = self.records.lock().map_err(|_| StateStoreError::Poisoned)?;
        records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStateStore::new();
        assert!(store.load("missing").unwrap().is_none());
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.load("k").unwrap().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::open(dir.path()).unwrap();
        store.save_json("cart", &vec![1u32, 2, 3]).unwrap();

        let reopened = FileStateStore::open(dir.path()).unwrap();
        let loaded: Option<Vec<u32>> = reopened.load_json("cart").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::open(dir.path()).unwrap();
        store.remove("never-written").unwrap();
    }
}
