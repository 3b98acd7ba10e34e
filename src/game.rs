//! Run state machine
//!
//! `Game` owns one run's [`GameState`] together with everything that outlives
//! it (wallet, leaderboard, settings) and the store they persist to.
//!
//! ```text
//! Idle ──start──▶ Running ──death──▶ AwaitingRevive ──accept──▶ Running
//!                    │                     │
//!                    │                  decline
//!                    │                     ▼
//!                    └──death (no potion)─▶ AwaitingName ──submit──▶ Idle
//! ```

use thiserror::Error;

use crate::consts::REVIVE_SHIELD_DURATION;
use crate::highscores::HighScores;
use crate::items::ItemKind;
use crate::persistence::KeyValueStore;
use crate::render::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Key, TickInput, tick};
use crate::store::{StoreError, Wallet};

/// Commands rejected by the state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot do that while {actual:?}")]
    WrongPhase { actual: GamePhase },
    #[error("please enter a name")]
    EmptyName,
    #[error("no revive potion left")]
    NoReviveItem,
}

/// A player's game: the current run plus persistent progress
pub struct Game<S: KeyValueStore> {
    state: GameState,
    input: TickInput,
    wallet: Wallet,
    high_scores: HighScores,
    settings: Settings,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Load progress from `store`; starts idle
    pub fn new(store: S, seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            wallet: Wallet::load(&store),
            high_scores: HighScores::load(&store),
            settings: Settings::load(&store),
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                actual: self.state.phase,
            })
        }
    }

    /// Begin a new run. Any unfinished game-over is discarded.
    pub fn start(&mut self, seed: u64) -> Result<(), GameError> {
        if self.state.phase == GamePhase::Running {
            return Err(GameError::WrongPhase {
                actual: GamePhase::Running,
            });
        }
        if self.state.phase.is_game_over() {
            log::info!("Discarding unrecorded run of {:.1}s", self.state.score);
        }
        self.state.reset(seed);
        self.input = TickInput::default();
        self.state.phase = GamePhase::Running;
        self.state.emit(GameEvent::RunStarted { seed });
        log::info!("Run started with seed {seed}");
        Ok(())
    }

    /// Abandon the current run without recording it
    pub fn stop(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Running)?;
        self.state.phase = GamePhase::Idle;
        log::info!("Run stopped at {:.1}s", self.state.score);
        Ok(())
    }

    /// Advance one frame. Does nothing unless running.
    pub fn update(&mut self, dt: f32) {
        if self.state.phase != GamePhase::Running || !dt.is_finite() || dt < 0.0 {
            return;
        }

        let before = self.wallet.clone();
        tick(&mut self.state, &self.input, &mut self.wallet, dt);
        self.input.clear_one_shots();

        if self.wallet != before {
            self.wallet.save(&mut self.store);
        }
    }

    /// Key transition from the host. Unrecognized keys are ignored.
    pub fn handle_input(&mut self, key: &str, pressed: bool) {
        if let Some(key) = Key::from_str(key) {
            self.input.handle_key(key, pressed);
        }
    }

    /// Spend a revive potion and continue the run with a brief shield
    pub fn accept_revive(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::AwaitingRevive)?;
        if !self.wallet.inventory.consume(ItemKind::Potion) {
            return Err(GameError::NoReviveItem);
        }
        self.wallet.save(&mut self.store);

        self.state.shield.force(REVIVE_SHIELD_DURATION);
        self.state.enemies.clear();
        self.input = TickInput::default();
        self.state.phase = GamePhase::Running;
        self.state.emit(GameEvent::Revived);
        log::info!("Revived at {:.1}s", self.state.score);
        Ok(())
    }

    pub fn decline_revive(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::AwaitingRevive)?;
        self.state.phase = GamePhase::AwaitingName;
        Ok(())
    }

    /// Record the finished run on the leaderboard; returns the rank reached
    pub fn submit_name(&mut self, name: &str) -> Result<Option<usize>, GameError> {
        self.expect_phase(GamePhase::AwaitingName)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let score = self.state.score;
        let rank = self.high_scores.add_score(name, score);
        self.high_scores.save(&mut self.store);
        self.state.phase = GamePhase::Idle;
        self.state.emit(GameEvent::ScoreRecorded {
            name: name.to_string(),
            score,
            rank,
        });
        log::info!("Recorded {score:.1}s for {name} (rank {rank:?})");
        Ok(rank)
    }

    /// Buy one item from the store
    pub fn buy(&mut self, item: ItemKind) -> Result<(), StoreError> {
        match self.wallet.buy(item) {
            Ok(()) => {
                self.wallet.save(&mut self.store);
                self.state.emit(GameEvent::Purchased { item });
                log::info!("Bought {} ({} coins left)", item.as_str(), self.wallet.coins);
                Ok(())
            }
            Err(e) => {
                self.state.emit(GameEvent::PurchaseRejected { item });
                log::info!("{e}");
                Err(e)
            }
        }
    }

    /// Flip mute and persist; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.settings.save(&mut self.store);
        muted
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Draw list for the current state
    pub fn frame(&self) -> Frame {
        build_frame(&self.state, self.wallet.coins)
    }
}
