//! Game state and core simulation types
//!
//! Everything a run owns lives in [`GameState`]; a new run is a reset, so no
//! state leaks from one run into the next.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::buffs::{BuffBank, Shield};
use super::spawner::Spawner;
use crate::arena_center;
use crate::consts::*;
use crate::items::ItemKind;

/// Run state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No run in progress
    Idle,
    /// Active gameplay
    Running,
    /// Died with a revive potion in the inventory
    AwaitingRevive,
    /// Run over, waiting for a leaderboard name
    AwaitingName,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::AwaitingRevive => "awaiting_revive",
            GamePhase::AwaitingName => "awaiting_name",
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::AwaitingRevive | GamePhase::AwaitingName)
    }
}

/// The player circle
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Base speed in units/sec
    pub speed: f32,
    pub color: String,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: arena_center(),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            color: PLAYER_COLOR.to_string(),
        }
    }
}

/// An enemy flying in a straight line
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Fixed at spawn
    pub vel: Vec2,
    pub radius: f32,
    pub color: &'static str,
}

/// A collectible coin
#[derive(Debug, Clone, Serialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Seconds until it disappears
    pub life: f32,
}

/// Things the host may react to (sounds, HUD flashes)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    RunStarted { seed: u64 },
    CoinCollected { value: u64 },
    ItemActivated { item: ItemKind },
    PlayerDied { score: f32, can_revive: bool },
    Revived,
    ScoreRecorded { name: String, score: f32, rank: Option<usize> },
    Purchased { item: ItemKind },
    PurchaseRejected { item: ItemKind },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds survived
    pub score: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub buffs: BuffBank,
    pub shield: Shield,
    pub spawner: Spawner,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh idle state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0.0,
            player: Player::default(),
            enemies: Vec::new(),
            coins: Vec::new(),
            buffs: BuffBank::new(),
            shield: Shield::default(),
            spawner: Spawner::default(),
            events: Vec::new(),
        }
    }

    /// Reset everything for a new run. Pending events survive so the host
    /// still sees what happened before the reset.
    pub fn reset(&mut self, seed: u64) {
        let events = std::mem::take(&mut self.events);
        *self = Self::new(seed);
        self.events = events;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BuffKind;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.pos, arena_center());
        assert_eq!(state.player.radius, PLAYER_RADIUS);
        assert!(state.enemies.is_empty());
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_reset_clears_run_but_keeps_events() {
        let mut state = GameState::new(7);
        state.score = 42.0;
        state.phase = GamePhase::AwaitingName;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.buffs.activate(BuffKind::Turbo, 10.0);
        state.shield.raise(5.0);
        state.enemies.push(Enemy {
            pos: Vec2::ZERO,
            vel: Vec2::X,
            radius: 10.0,
            color: ENEMY_COLOR,
        });
        state.emit(GameEvent::Revived);

        state.reset(8);

        assert_eq!(state.seed, 8);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.pos, arena_center());
        assert!(!state.buffs.is_active(BuffKind::Turbo));
        assert!(!state.shield.is_active());
        assert!(state.enemies.is_empty());
        assert_eq!(state.events, vec![GameEvent::Revived]);
    }

    #[test]
    fn test_phase_json_matches_as_str() {
        for phase in [
            GamePhase::Idle,
            GamePhase::Running,
            GamePhase::AwaitingRevive,
            GamePhase::AwaitingName,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.as_str()));
        }
        assert!(GamePhase::AwaitingRevive.is_game_over());
        assert!(GamePhase::AwaitingName.is_game_over());
        assert!(!GamePhase::Running.is_game_over());
        assert!(!GamePhase::Idle.is_game_over());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::ItemActivated {
            item: ItemKind::Turbo,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"item_activated","item":"turbo"}"#);
    }
}
