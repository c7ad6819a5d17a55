//! Key/value persistence for the activity log.
//!
//! The whole store lives in a single slot as JSON text. Every save is a full
//! overwrite; there is no versioning and no partial update.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DaylogError, DaylogResult};
use crate::store::ActivityStore;

/// Default slot name for the activity log.
pub const DEFAULT_STORAGE_KEY: &str = "calendarActivities";

const PROBE_KEY: &str = "__daylog_probe";

/// A string key/value store.
pub trait Storage {
    fn get(&self, key: &str) -> DaylogResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> DaylogResult<()>;

    fn remove(&mut self, key: &str) -> DaylogResult<()>;

    /// Check the backend is usable by writing and removing a throwaway key.
    fn probe(&mut self) -> DaylogResult<()> {
        self.set(PROBE_KEY, "probe")
            .and_then(|_| self.remove(PROBE_KEY))
            .map_err(|e| DaylogError::StorageUnavailable(e.to_string()))
    }
}

// =============================================================================
// Backends
// =============================================================================

/// Directory-backed storage: key `k` lives in `<dir>/k.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> DaylogResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> DaylogResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}.json.tmp", key));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DaylogResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> DaylogResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DaylogResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DaylogResult<()> {
        self.slots.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> DaylogResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DaylogResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> DaylogResult<()> {
        (**self).remove(key)
    }

    fn probe(&mut self) -> DaylogResult<()> {
        (**self).probe()
    }
}

// =============================================================================
// Load / save
// =============================================================================

/// Outcome of reading the persisted log.
#[derive(Debug)]
pub enum Loaded {
    /// Nothing was stored yet.
    Fresh(ActivityStore),
    Restored(ActivityStore),
    /// The stored blob could not be read or parsed; starting empty.
    Reset { store: ActivityStore, error: DaylogError },
}

impl Loaded {
    pub fn into_store(self) -> ActivityStore {
        match self {
            Loaded::Fresh(store) | Loaded::Restored(store) => store,
            Loaded::Reset { store, .. } => store,
        }
    }
}

/// Read the store from `key`. Never fails: corruption yields an empty store.
pub fn load(storage: &impl Storage, key: &str) -> Loaded {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored activities, starting empty");
            return Loaded::Fresh(ActivityStore::new());
        }
        Err(error) => {
            tracing::warn!(key, %error, "failed to read stored activities");
            return Loaded::Reset { store: ActivityStore::new(), error };
        }
    };

    match ActivityStore::from_json(&raw) {
        Ok(store) => {
            tracing::debug!(key, dates = store.date_count(), "activities loaded");
            Loaded::Restored(store)
        }
        Err(error) => {
            tracing::warn!(key, %error, "stored activities are corrupted, starting empty");
            Loaded::Reset { store: ActivityStore::new(), error }
        }
    }
}

/// Overwrite `key` with the whole store.
pub fn save(storage: &mut impl Storage, key: &str, store: &ActivityStore) -> DaylogResult<()> {
    let json = store.to_json()?;
    storage.set(key, &json).inspect_err(|error| {
        tracing::error!(key, %error, "failed to save activities");
    })?;
    tracing::debug!(key, dates = store.date_count(), "activities saved");
    Ok(())
}

// =============================================================================
// Export / import files
// =============================================================================

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "calendar-activities.json";

/// Write the store as pretty-printed JSON.
pub fn export_to(path: &Path, store: &ActivityStore) -> DaylogResult<()> {
    let json = store.to_json_pretty()?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a whole export file. The top level must be a JSON object.
pub fn read_import(path: &Path) -> DaylogResult<ActivityStore> {
    let text = std::fs::read_to_string(path)?;
    ActivityStore::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;

    fn sample() -> ActivityStore {
        let mut store = ActivityStore::new();
        store
            .add_activity("2024-03-15".parse::<DateKey>().unwrap(), "Run", 0, 30)
            .unwrap();
        store
    }

    #[test]
    fn load_from_empty_storage_is_fresh() {
        let storage = MemoryStorage::new();
        assert!(matches!(load(&storage, DEFAULT_STORAGE_KEY), Loaded::Fresh(s) if s.is_empty()));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let mut storage = MemoryStorage::new();
        let store = sample();

        save(&mut storage, DEFAULT_STORAGE_KEY, &store).unwrap();
        match load(&storage, DEFAULT_STORAGE_KEY) {
            Loaded::Restored(loaded) => assert_eq!(loaded, store),
            other => panic!("expected restored store, got {:?}", other),
        }
    }

    #[test]
    fn corrupted_blob_resets_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_STORAGE_KEY, "{\"2024-03-15\": [").unwrap();

        match load(&storage, DEFAULT_STORAGE_KEY) {
            Loaded::Reset { store, error } => {
                assert!(store.is_empty());
                assert!(matches!(error, DaylogError::Parse(_)));
            }
            other => panic!("expected reset, got {:?}", other),
        }
    }

    #[test]
    fn memory_probe_succeeds() {
        let mut storage = MemoryStorage::new();
        storage.probe().unwrap();
        assert_eq!(storage.get(PROBE_KEY).unwrap(), None);
    }
}
