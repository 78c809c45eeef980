use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to write key `{key}`")]
    Write { key: String },
    #[error("failed to serialize value for `{key}`: {message}")]
    Serialize { key: String, message: String },
}

/// String key/value persistence.
///
/// The browser backend is `window.localStorage`; tests use [`MemoryStorage`].
pub(crate) trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    #[cfg(test)]
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    pub fn is_available() -> bool {
        cfg!(target_arch = "wasm32") && Self::storage().is_ok()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write {
                key: key.to_string(),
            })
    }

    #[cfg(test)]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Write {
                key: key.to_string(),
            })
    }
}

/// Process-local store; contents are lost on reload.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Write {
            key: key.to_string(),
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[cfg(test)]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
        Ok(())
    }
}

/// The durable store when the browser provides one, memory otherwise.
pub(crate) fn default_store() -> Arc<dyn KeyValueStore> {
    if LocalStorage::is_available() {
        Arc::new(LocalStorage)
    } else {
        tracing::warn!("localStorage unavailable; drafts will not survive a reload");
        Arc::new(MemoryStorage::default())
    }
}

pub(crate) fn load_json<T: for<'de> Deserialize<'de>>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

pub(crate) fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &json)
}
