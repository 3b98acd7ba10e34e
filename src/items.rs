//! Store items and the inventory
//!
//! Every item is a row in [`ITEMS`]: price, activation key, and what using it
//! does. Adding an item is a table entry plus a variant, not a new code path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::SHIELD_DURATION;
use crate::sim::{BuffKind, Key};

/// Item kinds, serialized with the names the inventory record uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Shield,
    /// Revive potion
    Potion,
    /// Slow-time
    Timer,
    Shrink,
    Turbo,
    /// Flash bomb, clears the arena
    Bomb,
    Ghost,
    Magnet,
    /// Double coins
    Double,
    /// Permanent luck
    Clover,
    Decoy,
}

/// What using an item does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Gated timed buff
    Buff { buff: BuffKind, secs: f32 },
    /// Gated decoy buff anchored at the player's position
    Decoy { secs: f32 },
    /// Shield bubble, blocked while one is up
    Shield { secs: f32 },
    /// Instant: remove every enemy
    ClearEnemies,
    /// Spent from the game-over screen, never from a key
    Revive,
    /// Passive while owned
    Luck,
}

/// A row of the item table
#[derive(Debug, Clone, Copy)]
pub struct ItemSpec {
    pub kind: ItemKind,
    pub label: &'static str,
    pub price: u64,
    pub key: Option<Key>,
    pub effect: ItemEffect,
}

/// Item table, indexed by `ItemKind as usize`
pub const ITEMS: [ItemSpec; 11] = [
    ItemSpec {
        kind: ItemKind::Shield,
        label: "Shield",
        price: 20,
        key: Some(Key::E),
        effect: ItemEffect::Shield { secs: SHIELD_DURATION },
    },
    ItemSpec {
        kind: ItemKind::Potion,
        label: "Revive",
        price: 40,
        key: None,
        effect: ItemEffect::Revive,
    },
    ItemSpec {
        kind: ItemKind::Timer,
        label: "Slower",
        price: 30,
        key: Some(Key::Q),
        effect: ItemEffect::Buff { buff: BuffKind::SlowTime, secs: 8.0 },
    },
    ItemSpec {
        kind: ItemKind::Shrink,
        label: "Shrink",
        price: 25,
        key: Some(Key::R),
        effect: ItemEffect::Buff { buff: BuffKind::Shrink, secs: 10.0 },
    },
    ItemSpec {
        kind: ItemKind::Turbo,
        label: "Turbo",
        price: 20,
        key: Some(Key::Shift),
        effect: ItemEffect::Buff { buff: BuffKind::Turbo, secs: 10.0 },
    },
    ItemSpec {
        kind: ItemKind::Bomb,
        label: "Bomb",
        price: 50,
        key: Some(Key::F),
        effect: ItemEffect::ClearEnemies,
    },
    ItemSpec {
        kind: ItemKind::Ghost,
        label: "Ghost",
        price: 45,
        key: Some(Key::G),
        effect: ItemEffect::Buff { buff: BuffKind::Ghost, secs: 3.0 },
    },
    ItemSpec {
        kind: ItemKind::Magnet,
        label: "Magnet",
        price: 35,
        key: Some(Key::M),
        effect: ItemEffect::Buff { buff: BuffKind::Magnet, secs: 15.0 },
    },
    ItemSpec {
        kind: ItemKind::Double,
        label: "x2 Coin",
        price: 40,
        key: Some(Key::V),
        effect: ItemEffect::Buff { buff: BuffKind::DoubleCoins, secs: 20.0 },
    },
    ItemSpec {
        kind: ItemKind::Clover,
        label: "Clover",
        price: 60,
        key: None,
        effect: ItemEffect::Luck,
    },
    ItemSpec {
        kind: ItemKind::Decoy,
        label: "Decoy",
        price: 35,
        key: Some(Key::X),
        effect: ItemEffect::Decoy { secs: 5.0 },
    },
];

impl ItemKind {
    pub const ALL: [ItemKind; 11] = [
        ItemKind::Shield,
        ItemKind::Potion,
        ItemKind::Timer,
        ItemKind::Shrink,
        ItemKind::Turbo,
        ItemKind::Bomb,
        ItemKind::Ghost,
        ItemKind::Magnet,
        ItemKind::Double,
        ItemKind::Clover,
        ItemKind::Decoy,
    ];

    /// Table row for this item
    pub fn spec(self) -> &'static ItemSpec {
        &ITEMS[self as usize]
    }

    pub fn price(self) -> u64 {
        self.spec().price
    }

    /// The item activated by a key, if any
    pub fn for_key(key: Key) -> Option<ItemKind> {
        ITEMS.iter().find(|spec| spec.key == Some(key)).map(|spec| spec.kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Shield => "shield",
            ItemKind::Potion => "potion",
            ItemKind::Timer => "timer",
            ItemKind::Shrink => "shrink",
            ItemKind::Turbo => "turbo",
            ItemKind::Bomb => "bomb",
            ItemKind::Ghost => "ghost",
            ItemKind::Magnet => "magnet",
            ItemKind::Double => "double",
            ItemKind::Clover => "clover",
            ItemKind::Decoy => "decoy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        ItemKind::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// Owned item counts, every kind present (zero by default)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Take one unit; false if none owned
    pub fn consume(&mut self, kind: ItemKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

// A missing kind and a zero count are the same inventory
impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        ItemKind::ALL
            .into_iter()
            .all(|kind| self.count(kind) == other.count(kind))
    }
}

impl Eq for Inventory {}

impl From<BTreeMap<String, u32>> for Inventory {
    fn from(raw: BTreeMap<String, u32>) -> Self {
        let mut inventory = Inventory::default();
        for (name, count) in raw {
            match ItemKind::from_str(&name) {
                Some(kind) if count > 0 => inventory.add(kind, count),
                Some(_) => {}
                None => log::warn!("Ignoring unknown inventory item {name:?}"),
            }
        }
        inventory
    }
}

impl From<Inventory> for BTreeMap<String, u32> {
    fn from(inventory: Inventory) -> Self {
        ItemKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str().to_string(), inventory.count(kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(ItemKind::for_key(Key::Shift), Some(ItemKind::Turbo));
        assert_eq!(ItemKind::for_key(Key::F), Some(ItemKind::Bomb));
        assert_eq!(ItemKind::for_key(Key::W), None);
    }

    #[test]
    fn test_consume_stops_at_zero() {
        let mut inv = Inventory::default();
        inv.add(ItemKind::Bomb, 1);
        assert!(inv.consume(ItemKind::Bomb));
        assert!(!inv.consume(ItemKind::Bomb));
        assert_eq!(inv.count(ItemKind::Bomb), 0);
    }

    #[test]
    fn test_load_merges_default_schema() {
        let inv: Inventory = serde_json::from_str(r#"{"turbo":2,"jetpack":9}"#).unwrap();
        assert_eq!(inv.count(ItemKind::Turbo), 2);
        assert_eq!(inv.count(ItemKind::Shield), 0);

        let json = serde_json::to_string(&inv).unwrap();
        let raw: BTreeMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.len(), ItemKind::ALL.len());
        assert_eq!(raw["decoy"], 0);
        assert!(!raw.contains_key("jetpack"));
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(ItemKind::from_str("Magnet"), Some(ItemKind::Magnet));
        assert_eq!(ItemKind::from_str("laser"), None);
    }
}
