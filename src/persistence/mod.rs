//! Key-value persistence
//!
//! Every record is a whole-value overwrite. Missing or malformed records load
//! as defaults; a corrupt entry never fails a load.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Storage keys
pub mod keys {
    pub const COINS: &str = "circleSurvivorCoins";
    pub const INVENTORY: &str = "circleSurvivorInventory";
    pub const LEADERBOARD: &str = "circleSurvivorLeaderboard";
    pub const SETTINGS: &str = "circleSurvivorSettings";
    pub const USERS: &str = "circleSurvivor_users";
    pub const CURRENT_USER: &str = "circleSurvivor_currentUser";
}

/// Flat string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and the native demo
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Load a JSON record, falling back to `T::default()` when absent or malformed
pub fn load_json<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(json) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring malformed record {key}: {e}");
            T::default()
        }
    }
}

/// Serialize a record as JSON and overwrite the stored value
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::error!("Failed to serialize {key}: {e}"),
    }
}

/// Log a failed backend write or removal; true when it succeeded
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn check_write<E: std::fmt::Debug>(
    result: Result<(), E>,
    action: &str,
    key: &str,
) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to {action} {key}: {e:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_loads_default() {
        let store = MemoryStore::new();
        let scores: Vec<u32> = load_json(&store, "nothing");
        assert!(scores.is_empty());
    }

    #[test]
    fn test_malformed_record_loads_default() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "{not json");
        let coins: u64 = load_json(&store, keys::COINS);
        assert_eq!(coins, 0);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::new();
        save_json(&mut store, keys::COINS, &40u64);
        save_json(&mut store, keys::COINS, &15u64);
        assert_eq!(store.get(keys::COINS).as_deref(), Some("15"));
        let coins: u64 = load_json(&store, keys::COINS);
        assert_eq!(coins, 15);
    }

    #[test]
    fn test_check_write_reports_failures() {
        assert!(check_write(Ok::<(), &str>(()), "write", keys::COINS));
        assert!(!check_write(Err("quota exceeded"), "write", keys::COINS));
        assert!(!check_write(Err("security error"), "remove", keys::CURRENT_USER));
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        store.set(keys::CURRENT_USER, "alice");
        store.remove(keys::CURRENT_USER);
        assert_eq!(store.get(keys::CURRENT_USER), None);
    }
}
