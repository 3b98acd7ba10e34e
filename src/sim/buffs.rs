//! Timed buffs and the shield bubble
//!
//! Timers count remaining seconds; zero means inactive. Decrements floor at zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Timed effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    /// Enemies spawned while active move at half speed
    SlowTime,
    /// Smaller player hitbox
    Shrink,
    /// Faster player movement
    Turbo,
    /// Nearby coins drift toward the player
    Magnet,
    /// Coins are worth double
    DoubleCoins,
    /// Enemies pass through the player
    Ghost,
    /// Enemies aim at a fixed anchor instead of the player
    Decoy,
}

impl BuffKind {
    pub const COUNT: usize = 7;

    pub const ALL: [BuffKind; Self::COUNT] = [
        BuffKind::SlowTime,
        BuffKind::Shrink,
        BuffKind::Turbo,
        BuffKind::Magnet,
        BuffKind::DoubleCoins,
        BuffKind::Ghost,
        BuffKind::Decoy,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Remaining time per buff kind, plus the decoy anchor
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuffBank {
    timers: [f32; BuffKind::COUNT],
    decoy_anchor: Vec2,
}

impl BuffBank {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.timers[kind.index()] > 0.0
    }

    #[inline]
    pub fn remaining(&self, kind: BuffKind) -> f32 {
        self.timers[kind.index()]
    }

    /// Gated activation: starts the buff only if it is not already running.
    /// Returns whether it started.
    pub fn activate(&mut self, kind: BuffKind, secs: f32) -> bool {
        if self.is_active(kind) {
            return false;
        }
        self.timers[kind.index()] = secs;
        true
    }

    /// Set the timer regardless of its current value
    pub fn activate_unconditionally(&mut self, kind: BuffKind, secs: f32) {
        self.timers[kind.index()] = secs;
    }

    /// Gated decoy activation; the anchor is fixed until the next activation
    pub fn activate_decoy(&mut self, anchor: Vec2, secs: f32) -> bool {
        if !self.activate(BuffKind::Decoy, secs) {
            return false;
        }
        self.decoy_anchor = anchor;
        true
    }

    /// Decoy anchor while the decoy is active
    pub fn decoy_anchor(&self) -> Option<Vec2> {
        self.is_active(BuffKind::Decoy).then_some(self.decoy_anchor)
    }

    /// Active buffs with their remaining seconds
    pub fn active(&self) -> impl Iterator<Item = (BuffKind, f32)> + '_ {
        BuffKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .map(|kind| (kind, self.remaining(kind)))
    }

    /// Age every active timer by `dt`
    pub fn tick(&mut self, dt: f32) {
        for timer in self.timers.iter_mut().filter(|t| **t > 0.0) {
            *timer = (*timer - dt).max(0.0);
        }
    }
}

/// Shield bubble. Lives outside the buff bank: it is also granted by a revive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Shield {
    remaining: f32,
}

impl Shield {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Raise the shield unless one is already up
    pub fn raise(&mut self, secs: f32) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining = secs;
        true
    }

    /// Raise the shield, replacing any remaining time
    pub fn force(&mut self, secs: f32) {
        self.remaining = secs;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.remaining = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gated_activation_does_not_extend() {
        let mut bank = BuffBank::new();
        assert!(bank.activate(BuffKind::Turbo, 10.0));
        bank.tick(4.0);
        assert!(!bank.activate(BuffKind::Turbo, 10.0));
        assert!((bank.remaining(BuffKind::Turbo) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_unconditional_activation_overwrites() {
        let mut bank = BuffBank::new();
        bank.activate(BuffKind::Magnet, 15.0);
        bank.activate_unconditionally(BuffKind::Magnet, 2.0);
        assert_eq!(bank.remaining(BuffKind::Magnet), 2.0);
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut bank = BuffBank::new();
        bank.activate(BuffKind::Ghost, 3.0);
        bank.tick(5.0);
        assert_eq!(bank.remaining(BuffKind::Ghost), 0.0);
        assert!(!bank.is_active(BuffKind::Ghost));
        assert_eq!(bank.active().count(), 0);
    }

    #[test]
    fn test_decoy_anchor_only_while_active() {
        let mut bank = BuffBank::new();
        assert_eq!(bank.decoy_anchor(), None);

        assert!(bank.activate_decoy(Vec2::new(100.0, 200.0), 5.0));
        // A second press keeps the original anchor
        assert!(!bank.activate_decoy(Vec2::new(900.0, 900.0), 5.0));
        assert_eq!(bank.decoy_anchor(), Some(Vec2::new(100.0, 200.0)));

        bank.tick(5.0);
        assert_eq!(bank.decoy_anchor(), None);
    }

    #[test]
    fn test_shield_blocks_while_up() {
        let mut shield = Shield::default();
        assert!(shield.raise(5.0));
        assert!(!shield.raise(5.0));
        shield.tick(5.0);
        assert!(!shield.is_active());
        assert!(shield.raise(5.0));
    }

    #[test]
    fn test_shield_force_replaces() {
        let mut shield = Shield::default();
        shield.raise(5.0);
        shield.force(3.0);
        assert_eq!(shield.remaining(), 3.0);
    }
}
