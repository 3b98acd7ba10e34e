//! Coin wallet and the item store
//!
//! The wallet is the persistent side of the player: coin balance and
//! inventory. Runs add coins and spend items; the store trades one for the other.

use serde::Serialize;
use thiserror::Error;

use crate::items::{ITEMS, Inventory, ItemKind};
use crate::persistence::{KeyValueStore, keys, load_json, save_json};

/// Purchase failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not enough coins for {item:?}: costs {price}, have {balance}")]
    InsufficientFunds {
        item: ItemKind,
        price: u64,
        balance: u64,
    },
}

/// One row of the store shelf as the host shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub item: ItemKind,
    pub label: &'static str,
    pub price: u64,
    pub owned: u32,
    pub affordable: bool,
}

/// Coin balance and owned items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    pub coins: u64,
    pub inventory: Inventory,
}

impl Wallet {
    /// Load balance and inventory; absent or malformed records start at zero
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let wallet = Self {
            coins: load_json(store, keys::COINS),
            inventory: load_json(store, keys::INVENTORY),
        };
        log::info!("Loaded wallet: {} coins", wallet.coins);
        wallet
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        save_json(store, keys::COINS, &self.coins);
        save_json(store, keys::INVENTORY, &self.inventory);
    }

    pub fn award(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Buy one unit of `item`. On failure nothing changes.
    pub fn buy(&mut self, item: ItemKind) -> Result<(), StoreError> {
        let price = item.price();
        if self.coins < price {
            return Err(StoreError::InsufficientFunds {
                item,
                price,
                balance: self.coins,
            });
        }
        self.coins -= price;
        self.inventory.add(item, 1);
        Ok(())
    }

    /// Every item in table order with this wallet's count and affordability
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        ITEMS
            .iter()
            .map(|spec| CatalogEntry {
                item: spec.kind,
                label: spec.label,
                price: spec.price,
                owned: self.inventory.count(spec.kind),
                affordable: self.coins >= spec.price,
            })
            .collect()
    }
}
