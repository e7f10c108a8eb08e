use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable string-keyed client storage, shaped like the browser's
/// localStorage. The session profile and token live in two slots here;
/// the data service reads the profile slot to resolve the current viewer.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

pub fn get_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> anyhow::Result<Option<T>> {
    match storage.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> anyhow::Result<()> {
    storage.set_item(key, &serde_json::to_string(value)?)
}

/// Process-lifetime storage. Used by tests and by callers that do not
/// want sessions to survive a restart.
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let slots = self.slots.lock().expect("storage lock poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut slots = self.slots.lock().expect("storage lock poisoned");
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut slots = self.slots.lock().expect("storage lock poisoned");
        slots.remove(key);
        Ok(())
    }
}

/// File-backed storage: one JSON object holding every slot, rewritten on
/// each write. Plenty for a two-slot session file.
pub struct FileStorage {
    path: PathBuf,
    slots: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let slots = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HashMap::new()
        };
        Ok(FileStorage {
            path,
            slots: Mutex::new(slots),
        })
    }

    fn flush(&self, slots: &HashMap<String, String>) -> anyhow::Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(slots)?)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let slots = self.slots.lock().expect("storage lock poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut slots = self.slots.lock().expect("storage lock poisoned");
        slots.insert(key.to_string(), value.to_string());
        self.flush(&slots)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut slots = self.slots.lock().expect("storage lock poisoned");
        slots.remove(key);
        self.flush(&slots)
    }
}
