//! Persistence adapter: a named-slot key-value store behind an injected
//! trait, with JSON (de)serialization and a swallow-and-log error policy.
//! Callers of [`Storage`] never observe a failure directly.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::AppConfig;

/// Raw slot access. Implementations are synchronous and last-write-wins at
/// the key level.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per slot under the configured data directory.
pub struct FileStore {
    config: AppConfig,
}

impl FileStore {
    pub fn new(config: AppConfig) -> Result<Self> {
        let data_dir = config.data_dir();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        Ok(Self { config })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.config.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read slot at {}", path.display()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.config.slot_path(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write slot at {}", path.display()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.config.slot_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to remove slot at {}", path.display()))
            }
        }
    }
}

/// In-memory double for tests and for environments without a data dir.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().expect("memory store poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("memory store poisoned");
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("memory store poisoned");
        slots.remove(key);
        Ok(())
    }
}

/// Serializing façade over a [`KeyValueStore`]. Failures are logged and
/// masked with the caller-supplied default; cloning is cheap.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn file(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(FileStore::new(config.clone())?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_string(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(key, %err, "failed to serialize value for storage");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &serialized) {
            warn!(key, %err, "failed to write storage slot");
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(key, %err, "failed to read storage slot");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "failed to deserialize storage slot");
                default
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(key, %err, "failed to remove storage slot");
        }
    }
}
