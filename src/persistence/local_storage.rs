//! Browser LocalStorage backend

use web_sys::Storage;

use super::{KeyValueStore, check_write};

/// `window.localStorage`, or a no-op store when it is unavailable
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - progress will not be saved");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            check_write(storage.set_item(key, value), "write", key);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            check_write(storage.remove_item(key), "remove", key);
        }
    }
}
