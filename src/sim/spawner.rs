//! Enemy and coin spawning
//!
//! Two independent accumulators. Difficulty ramps by shortening the enemy
//! inter-arrival time; enemy speed grows with score separately.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{Coin, Enemy};
use crate::consts::*;

/// Which spawns came due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub coin: bool,
    pub enemy: bool,
}

/// Spawn accumulators for one run
#[derive(Debug, Clone, Serialize)]
pub struct Spawner {
    pub coin_timer: f32,
    pub enemy_timer: f32,
    /// Current enemy inter-arrival time
    pub enemy_interval: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            coin_timer: 0.0,
            enemy_timer: 0.0,
            enemy_interval: ENEMY_SPAWN_INTERVAL_START,
        }
    }
}

impl Spawner {
    /// Coin interval, shortened while the clover is owned
    pub fn coin_interval(lucky: bool) -> f32 {
        if lucky {
            COIN_SPAWN_INTERVAL / LUCK_FACTOR
        } else {
            COIN_SPAWN_INTERVAL
        }
    }

    /// Accumulate `dt` and report which spawns are due
    pub fn advance(&mut self, dt: f32, lucky: bool) -> SpawnDue {
        let mut due = SpawnDue::default();

        self.coin_timer += dt;
        if self.coin_timer >= Self::coin_interval(lucky) {
            self.coin_timer = 0.0;
            due.coin = true;
        }

        self.enemy_timer += dt;
        if self.enemy_timer >= self.enemy_interval {
            self.enemy_timer = 0.0;
            self.enemy_interval =
                (self.enemy_interval - ENEMY_SPAWN_INTERVAL_STEP).max(ENEMY_SPAWN_INTERVAL_MIN);
            due.enemy = true;
        }

        due
    }
}

/// Enemy speed at spawn time
pub fn enemy_speed(roll: f32, score: f32, slowed: bool) -> f32 {
    let speed = ENEMY_BASE_SPEED + roll * ENEMY_SPEED_RANGE + score * ENEMY_SPEED_PER_SCORE;
    if slowed { speed * SLOW_TIME_FACTOR } else { speed }
}

/// Spawn an enemy just outside a random arena edge, aimed at `target`.
/// The heading is fixed here and never updated.
pub fn spawn_enemy(rng: &mut impl Rng, target: Vec2, score: f32, slowed: bool) -> Enemy {
    let radius = ENEMY_MIN_RADIUS + rng.random::<f32>() * ENEMY_RADIUS_RANGE;

    let pos = match rng.random_range(0..4) {
        // Top
        0 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, -radius),
        // Right
        1 => Vec2::new(ARENA_WIDTH + radius, rng.random::<f32>() * ARENA_HEIGHT),
        // Bottom
        2 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, ARENA_HEIGHT + radius),
        // Left
        _ => Vec2::new(-radius, rng.random::<f32>() * ARENA_HEIGHT),
    };

    let to_target = target - pos;
    let heading = to_target.y.atan2(to_target.x);
    let speed = enemy_speed(rng.random::<f32>(), score, slowed);

    Enemy {
        pos,
        vel: Vec2::from_angle(heading) * speed,
        radius,
        color: ENEMY_COLOR,
    }
}

/// Spawn a coin at a random spot away from the edges
pub fn spawn_coin(rng: &mut impl Rng) -> Coin {
    let span_x = ARENA_WIDTH - 2.0 * COIN_SPAWN_INSET;
    let span_y = ARENA_HEIGHT - 2.0 * COIN_SPAWN_INSET;
    Coin {
        pos: Vec2::new(
            COIN_SPAWN_INSET + rng.random::<f32>() * span_x,
            COIN_SPAWN_INSET + rng.random::<f32>() * span_y,
        ),
        radius: COIN_RADIUS,
        life: COIN_LIFETIME,
    }
}
