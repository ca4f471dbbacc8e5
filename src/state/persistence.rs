use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::drawing::Drawing;
use crate::settings::BrushSettings;

/// Brush and symmetry configuration.
pub const SETTINGS_KEY: &str = "brush-settings";
/// The drawing being worked on, saved after every change.
pub const DRAWING_KEY: &str = "current-project";
/// Names of the drawings saved through the library.
pub const FILES_KEY: &str = "settings.files";

/// Key under which the named drawing `name` is stored.
pub fn file_key(name: &str) -> String {
    format!("file.{name}")
}

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Nothing stored under `{0}`")]
    MissingKey(String),

    #[error("Invalid drawing name: {0:?}")]
    InvalidName(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Flat string key-value storage.
///
/// Writes replace the whole value of a key; there is nothing partial to
/// recover from.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn remove(&mut self, key: &str);
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and look at what the application wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls seen so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        let mut inner = self.inner.lock();
        inner.writes += 1;
        inner.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        let mut inner = self.inner.lock();
        inner.writes += 1;
        inner.values.remove(key);
    }
}

/// Adapter over eframe's storage: local storage on the web, a file on native.
///
/// eframe storage cannot delete keys, so removal stores an empty string and
/// empty values read back as absent.
pub struct EframeStore<'a> {
    storage: &'a mut dyn eframe::Storage,
}

impl<'a> EframeStore<'a> {
    pub fn new(storage: &'a mut dyn eframe::Storage) -> Self {
        Self { storage }
    }
}

impl KeyValueStore for EframeStore<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_string(key).filter(|value| !value.is_empty())
    }

    fn set(&mut self, key: &str, value: String) {
        self.storage.set_string(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.storage.set_string(key, String::new());
    }
}

/// Read-only view of the storage handed to `eframe::App` creation.
pub struct StartupStore<'a> {
    storage: Option<&'a dyn eframe::Storage>,
}

impl<'a> StartupStore<'a> {
    pub fn new(storage: Option<&'a dyn eframe::Storage>) -> Self {
        Self { storage }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.storage?.get_string(key).filter(|value| !value.is_empty())
    }
}

/// Load the brush settings; every missing or broken field gets its default.
pub fn load_settings(stored: Option<String>) -> BrushSettings {
    match stored {
        Some(json) => BrushSettings::from_json(&json),
        None => BrushSettings::default(),
    }
}

/// Load the current drawing; an unreadable blob gives an empty drawing.
pub fn load_drawing(stored: Option<String>) -> Drawing {
    match stored {
        Some(json) => Drawing::from_json_or_empty(&json),
        None => Drawing::default(),
    }
}

pub fn save_settings(store: &mut dyn KeyValueStore, settings: &BrushSettings) -> PersistenceResult<()> {
    store.set(SETTINGS_KEY, settings.to_json()?);
    Ok(())
}

pub fn save_drawing(store: &mut dyn KeyValueStore, drawing: &Drawing) -> PersistenceResult<()> {
    store.set(DRAWING_KEY, drawing.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set("a", "1".to_owned());
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.write_count(), 1);

        writer.remove("a");
        assert!(!store.contains("a"));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn absent_records_load_as_defaults() {
        assert_eq!(load_settings(None), BrushSettings::default());
        assert!(load_drawing(None).is_empty());
        assert!(load_drawing(Some("garbage".to_owned())).is_empty());
    }
}
