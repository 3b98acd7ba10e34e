//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Variable frame `dt`, driven by the host
//! - Seeded RNG only, so a run replays from its seed
//! - All run state owned by `GameState`

pub mod buffs;
pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use buffs::{BuffBank, BuffKind, Shield};
pub use collision::{circles_overlap, pull_toward};
pub use input::{Key, TickInput};
pub use spawner::{SpawnDue, Spawner, spawn_coin, spawn_enemy};
pub use state::{Coin, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::tick;
