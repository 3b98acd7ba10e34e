//! Per-frame simulation step
//!
//! Advances a running game by the elapsed frame time. Outside
//! [`GamePhase::Running`] the step does nothing.

use super::buffs::BuffKind;
use super::collision::{circles_overlap, pull_toward};
use super::input::TickInput;
use super::spawner::{spawn_coin, spawn_enemy};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::items::{ItemEffect, ItemKind};
use crate::store::Wallet;
use crate::{clamp_to_arena, outside_arena};

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, wallet: &mut Wallet, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.score += dt;

    // Player movement
    let speed = if state.buffs.is_active(BuffKind::Turbo) {
        state.player.speed * TURBO_MULTIPLIER
    } else {
        state.player.speed
    };
    state.player.pos += input.direction() * speed * dt;

    for &item in &input.activate {
        activate_item(state, wallet, item);
    }

    state.player.radius = if state.buffs.is_active(BuffKind::Shrink) {
        PLAYER_SHRUNK_RADIUS
    } else {
        PLAYER_RADIUS
    };
    state.player.pos = clamp_to_arena(state.player.pos, state.player.radius);

    // Spawning
    let due = state.spawner.advance(dt, wallet.inventory.has(ItemKind::Clover));
    if due.coin {
        let coin = spawn_coin(&mut state.rng);
        state.coins.push(coin);
    }
    if due.enemy {
        let target = state.buffs.decoy_anchor().unwrap_or(state.player.pos);
        let slowed = state.buffs.is_active(BuffKind::SlowTime);
        let enemy = spawn_enemy(&mut state.rng, target, state.score, slowed);
        state.enemies.push(enemy);
    }

    // Enemy movement
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * dt;
    }
    state
        .enemies
        .retain(|e| !outside_arena(e.pos, ENEMY_DESPAWN_MARGIN));

    // Enemy collision
    let invulnerable = state.shield.is_active() || state.buffs.is_active(BuffKind::Ghost);
    if !invulnerable {
        let player = &state.player;
        let hit = state
            .enemies
            .iter()
            .any(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius));
        if hit {
            game_over(state, wallet);
            return;
        }
    }

    update_coins(state, wallet, dt);

    state.buffs.tick(dt);
    state.shield.tick(dt);
}

/// Use one unit of an item if its effect can apply right now
fn activate_item(state: &mut GameState, wallet: &mut Wallet, item: ItemKind) {
    if !wallet.inventory.has(item) {
        return;
    }

    let applied = match item.spec().effect {
        ItemEffect::Buff { buff, secs } => state.buffs.activate(buff, secs),
        ItemEffect::Decoy { secs } => state.buffs.activate_decoy(state.player.pos, secs),
        ItemEffect::Shield { secs } => state.shield.raise(secs),
        ItemEffect::ClearEnemies => {
            state.enemies.clear();
            true
        }
        ItemEffect::Revive | ItemEffect::Luck => false,
    };

    if applied {
        wallet.inventory.consume(item);
        log::debug!("Activated {} ({} left)", item.as_str(), wallet.inventory.count(item));
        state.emit(GameEvent::ItemActivated { item });
    }
}

/// Magnet pull, pickup, and expiry
fn update_coins(state: &mut GameState, wallet: &mut Wallet, dt: f32) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let magnet = state.buffs.is_active(BuffKind::Magnet);
    let value = if state.buffs.is_active(BuffKind::DoubleCoins) {
        COIN_VALUE_DOUBLED
    } else {
        COIN_VALUE
    };

    let mut collected = 0;
    state.coins.retain_mut(|coin| {
        if magnet && coin.pos.distance(player_pos) < MAGNET_RANGE {
            coin.pos = pull_toward(coin.pos, player_pos, MAGNET_PULL_SPEED, dt);
        }
        if circles_overlap(player_pos, player_radius, coin.pos, coin.radius) {
            collected += 1;
            return false;
        }
        coin.life -= dt;
        coin.life > 0.0
    });

    for _ in 0..collected {
        wallet.award(value);
        state.emit(GameEvent::CoinCollected { value });
    }
}

/// Fatal collision: end the run, offering a revive when a potion is owned
fn game_over(state: &mut GameState, wallet: &Wallet) {
    let can_revive = wallet.inventory.has(ItemKind::Potion);
    state.phase = if can_revive {
        GamePhase::AwaitingRevive
    } else {
        GamePhase::AwaitingName
    };
    log::info!("Player died at {:.1}s (revive available: {})", state.score, can_revive);
    state.emit(GameEvent::PlayerDied {
        score: state.score,
        can_revive,
    });
}
