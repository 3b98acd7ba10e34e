//! Local accounts
//!
//! Users live in one record keyed by username; the logged-in name is stored
//! separately so a reload stays logged in. The user table is re-read before
//! every operation, since another page may have written it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PLAYER_COLOR;
use crate::items::Inventory;
use crate::persistence::{KeyValueStore, keys, load_json, save_json};

/// Account failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("username already exists")]
    UsernameTaken,
    /// Deliberately does not say whether the name or the password was wrong
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("no user is logged in")]
    NotLoggedIn,
}

/// A stored account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub password: String,
    pub coins: u64,
    pub inventory: Inventory,
    pub high_score: f32,
    pub level: u32,
    pub color: String,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            password: String::new(),
            coins: 0,
            inventory: Inventory::default(),
            high_score: 0.0,
            level: 1,
            color: PLAYER_COLOR.to_string(),
        }
    }
}

/// Fields to merge into the current user's record; `None` keeps the old value
#[derive(Debug, Clone, Default)]
pub struct UserDataUpdate {
    pub coins: Option<u64>,
    pub inventory: Option<Inventory>,
    pub high_score: Option<f32>,
    pub level: Option<u32>,
    pub color: Option<String>,
}

/// Account manager over a key-value store
pub struct AuthManager<S: KeyValueStore> {
    store: S,
    users: BTreeMap<String, UserRecord>,
    current_user: Option<String>,
}

impl<S: KeyValueStore> AuthManager<S> {
    pub fn new(store: S) -> Self {
        let mut auth = Self {
            store,
            users: BTreeMap::new(),
            current_user: None,
        };
        auth.reload();
        auth
    }

    fn reload(&mut self) {
        self.users = load_json(&self.store, keys::USERS);
        self.current_user = self.store.get(keys::CURRENT_USER);
    }

    fn save_users(&mut self) {
        save_json(&mut self.store, keys::USERS, &self.users);
    }

    /// Create an account. An existing account is never overwritten.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.reload();
        if self.users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }

        self.users.insert(
            username.to_string(),
            UserRecord {
                password: password.to_string(),
                ..Default::default()
            },
        );
        self.save_users();
        log::info!("Registered user {username}");
        Ok(())
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.reload();
        match self.users.get(username) {
            Some(user) if user.password == password => {
                self.current_user = Some(username.to_string());
                self.store.set(keys::CURRENT_USER, username);
                log::info!("Logged in as {username}");
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub fn logout(&mut self) {
        if let Some(name) = self.current_user.take() {
            log::info!("Logged out {name}");
        }
        self.store.remove(keys::CURRENT_USER);
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// The logged-in user's record
    pub fn user_data(&self) -> Option<&UserRecord> {
        self.users.get(self.current_user.as_deref()?)
    }

    /// Merge `update` into the logged-in user's record
    pub fn save_user_data(&mut self, update: UserDataUpdate) -> Result<(), AuthError> {
        self.reload();
        let name = self.current_user.clone().ok_or(AuthError::NotLoggedIn)?;
        let user = self.users.entry(name).or_default();

        if let Some(coins) = update.coins {
            user.coins = coins;
        }
        if let Some(inventory) = update.inventory {
            user.inventory = inventory;
        }
        if let Some(high_score) = update.high_score {
            user.high_score = high_score;
        }
        if let Some(level) = update.level {
            user.level = level;
        }
        if let Some(color) = update.color {
            user.color = color;
        }

        self.save_users();
        Ok(())
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }
}
