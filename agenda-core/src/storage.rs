//! Persistence for the selected-calendar list.
//!
//! The store only ever needs one string slot, but the port is keyed so a
//! single backend can serve several hosts. `FileStorage` keeps one file per
//! key in the data directory; `MemoryStorage` backs tests and embedders that
//! persist elsewhere.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AgendaError, AgendaResult};
use crate::id::CalendarId;

/// String key-value persistence, read and written synchronously.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AgendaResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()>;
}

/// In-process storage. Cloning snapshots the current contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> AgendaResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(AgendaError::InvalidStorageKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// The selected-calendar slot: a JSON array of integer ids under one key.
///
/// Reads and writes never fail from the caller's point of view. A missing,
/// unreadable or malformed value reads as an empty selection; a failed
/// write is logged and dropped.
pub struct SelectionSlot<'a, S: KeyValueStore> {
    storage: &'a mut S,
    key: &'a str,
}

impl<'a, S: KeyValueStore> SelectionSlot<'a, S> {
    pub fn new(storage: &'a mut S, key: &'a str) -> Self {
        SelectionSlot { storage, key }
    }

    pub fn read(&self) -> Vec<CalendarId> {
        read_selection(&*self.storage, self.key)
    }

    pub fn write(&mut self, ids: &[CalendarId]) {
        let content = match serde_json::to_string(ids) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "could not serialize selection");
                return;
            }
        };

        if let Err(e) = self.storage.set(self.key, &content) {
            tracing::warn!(key = self.key, error = %e, "could not persist selection");
        }
    }
}

fn read_selection<S: KeyValueStore>(storage: &S, key: &str) -> Vec<CalendarId> {
    let content = match storage.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return vec![],
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read persisted selection");
            return vec![];
        }
    };

    if content.trim().is_empty() {
        return vec![];
    }

    match serde_json::from_str::<Vec<CalendarId>>(&content) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed persisted selection");
            vec![]
        }
    }
}
