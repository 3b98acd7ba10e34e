//! Circle Survivor - an arena survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (player movement, spawning, buffs, collisions)
//! - `game`: Run state machine wiring the simulation to the wallet and leaderboard
//! - `items`: Data-driven item table and inventory
//! - `store`: Coin wallet and purchases
//! - `auth`: Local accounts over the key-value store
//! - `persistence`: Key-value storage capability (memory / LocalStorage)
//! - `render`: Platform-agnostic draw list for the host to paint
//! - `platform`: Browser bindings

pub mod auth;
pub mod game;
pub mod highscores;
pub mod items;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod store;

pub use auth::{AuthError, AuthManager};
pub use game::{Game, GameError};
pub use highscores::HighScores;
pub use items::{Inventory, ItemKind};
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use store::{StoreError, Wallet};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (origin top-left)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 1200.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SHRUNK_RADIUS: f32 = 8.0;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_COLOR: &str = "#00ffff";
    /// Speed multiplier while turbo is active
    pub const TURBO_MULTIPLIER: f32 = 1.4;

    /// Enemy defaults
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_RADIUS_RANGE: f32 = 10.0;
    pub const ENEMY_BASE_SPEED: f32 = 150.0;
    pub const ENEMY_SPEED_RANGE: f32 = 100.0;
    /// Extra enemy speed per second survived
    pub const ENEMY_SPEED_PER_SCORE: f32 = 5.0;
    pub const ENEMY_COLOR: &str = "#ff3333";
    /// Enemies further than this outside the arena are dropped
    pub const ENEMY_DESPAWN_MARGIN: f32 = 50.0;
    /// Speed multiplier sampled at spawn while slow-time is active
    pub const SLOW_TIME_FACTOR: f32 = 0.5;

    /// Enemy spawn pacing
    pub const ENEMY_SPAWN_INTERVAL_START: f32 = 1.0;
    pub const ENEMY_SPAWN_INTERVAL_STEP: f32 = 0.005;
    pub const ENEMY_SPAWN_INTERVAL_MIN: f32 = 0.3;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 12.0;
    pub const COIN_LIFETIME: f32 = 5.0;
    pub const COIN_SPAWN_INTERVAL: f32 = 1.5;
    /// Coins spawn this far inside the arena edge
    pub const COIN_SPAWN_INSET: f32 = 100.0;
    /// Coin interval divisor while the clover is owned
    pub const LUCK_FACTOR: f32 = 1.3;
    pub const COIN_VALUE: u64 = 10;
    pub const COIN_VALUE_DOUBLED: u64 = 20;

    /// Magnet pull
    pub const MAGNET_RANGE: f32 = 150.0;
    pub const MAGNET_PULL_SPEED: f32 = 200.0;

    /// Shield bubble from the shield item
    pub const SHIELD_DURATION: f32 = 5.0;
    /// Invulnerability granted by a revive
    pub const REVIVE_SHIELD_DURATION: f32 = 3.0;

    /// Leaderboard size
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// Center of the arena
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Clamp a circle so it stays fully inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, consts::ARENA_WIDTH - radius),
        pos.y.clamp(radius, consts::ARENA_HEIGHT - radius),
    )
}

/// Whether a point lies more than `margin` outside the arena on any side
#[inline]
pub fn outside_arena(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > consts::ARENA_WIDTH + margin
        || pos.y < -margin
        || pos.y > consts::ARENA_HEIGHT + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_full_radius_inside() {
        let clamped = clamp_to_arena(Vec2::new(-40.0, 5000.0), 15.0);
        assert_eq!(clamped, Vec2::new(15.0, consts::ARENA_HEIGHT - 15.0));
    }

    #[test]
    fn test_outside_arena_margin() {
        assert!(!outside_arena(Vec2::new(-50.0, 600.0), 50.0));
        assert!(outside_arena(Vec2::new(-50.1, 600.0), 50.0));
        assert!(outside_arena(Vec2::new(600.0, consts::ARENA_HEIGHT + 51.0), 50.0));
    }
}
