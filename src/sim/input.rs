//! Keyboard input for the simulation
//!
//! Movement keys are level-triggered (held). Item keys are edge-triggered: a
//! press queues one activation, holding the key does not repeat it.

use glam::Vec2;

use crate::items::ItemKind;

/// Recognized keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    E,
    Q,
    R,
    Shift,
    F,
    G,
    M,
    V,
    X,
}

impl Key {
    /// Parse a browser `KeyboardEvent.key` value (case-insensitive)
    pub fn from_str(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "e" => Some(Key::E),
            "q" => Some(Key::Q),
            "r" => Some(Key::R),
            "shift" => Some(Key::Shift),
            "f" => Some(Key::F),
            "g" => Some(Key::G),
            "m" => Some(Key::M),
            "v" => Some(Key::V),
            "x" => Some(Key::X),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Item activations pressed since the last tick
    pub activate: Vec<ItemKind>,
    /// Item keys currently held down
    held: Vec<Key>,
}

impl TickInput {
    /// Apply a key transition
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::W => self.up = pressed,
            Key::S => self.down = pressed,
            Key::A => self.left = pressed,
            Key::D => self.right = pressed,
            _ => {
                let Some(item) = ItemKind::for_key(key) else {
                    return;
                };
                let was_held = self.held.contains(&key);
                if pressed && !was_held {
                    self.held.push(key);
                    self.activate.push(item);
                } else if !pressed {
                    self.held.retain(|k| *k != key);
                }
            }
        }
    }

    /// Unit movement direction (zero when idle). Screen y grows downward.
    pub fn direction(&self) -> Vec2 {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        Vec2::new(dx as f32, dy as f32).normalize_or_zero()
    }

    /// Drop one-shot commands after they have been ticked
    pub fn clear_one_shots(&mut self) {
        self.activate.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!(Key::from_str("W"), Some(Key::W));
        assert_eq!(Key::from_str("Shift"), Some(Key::Shift));
        assert_eq!(Key::from_str("ArrowUp"), None);
        assert_eq!(Key::from_str("Enter"), None);
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let mut input = TickInput::default();
        input.handle_key(Key::W, true);
        input.handle_key(Key::D, true);
        assert!((input.direction().length() - 1.0).abs() < 1e-6);

        input.handle_key(Key::S, true);
        // Up and down cancel
        assert_eq!(input.direction(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_item_press_is_edge_triggered() {
        let mut input = TickInput::default();
        input.handle_key(Key::F, true);
        input.handle_key(Key::F, true); // key repeat
        assert_eq!(input.activate, vec![ItemKind::Bomb]);

        input.clear_one_shots();
        input.handle_key(Key::F, false);
        input.handle_key(Key::F, true);
        assert_eq!(input.activate, vec![ItemKind::Bomb]);
    }
}
