//! Draw list generation
//!
//! Turns the game state into a flat list of 2D primitives in arena
//! coordinates. The host paints them in order (canvas 2D on the web).

use glam::Vec2;
use serde::Serialize;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::{BuffKind, GamePhase, GameState};

const BACKGROUND: &str = "#222";
const OUTLINE: &str = "white";
const SHIELD_STROKE: &str = "#00ffff";
const SHIELD_FILL: &str = "rgba(0, 255, 255, 0.2)";
const DECOY_FILL: &str = "rgba(255, 170, 0, 0.6)";
const DECOY_RADIUS: f32 = 15.0;
const COIN_FILL: &str = "#ffd700";
const COIN_LABEL: &str = "black";
const COIN_FONT: &str = "bold 14px Arial";
/// Shield bubble size relative to the player radius
const SHIELD_SCALE: f32 = 1.8;
const GHOST_ALPHA: f32 = 0.5;

/// A 2D drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        pos: Vec2,
        size: Vec2,
        fill: &'static str,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: String,
        stroke: Option<&'static str>,
        line_width: f32,
        alpha: f32,
    },
    Triangle {
        points: [Vec2; 3],
        fill: &'static str,
    },
    Text {
        pos: Vec2,
        text: &'static str,
        fill: &'static str,
        font: &'static str,
    },
}

/// HUD readout for one active buff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuffReadout {
    pub buff: BuffKind,
    pub remaining: f32,
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: f32,
    pub coins: u64,
    pub shield: f32,
    pub buffs: Vec<BuffReadout>,
    pub shapes: Vec<Shape>,
}

fn circle(center: Vec2, radius: f32, fill: impl Into<String>) -> Shape {
    Shape::Circle {
        center,
        radius,
        fill: fill.into(),
        stroke: Some(OUTLINE),
        line_width: 2.0,
        alpha: 1.0,
    }
}

/// Build the draw list: background, shield, player, decoy, coins, enemies
pub fn build_frame(state: &GameState, coins: u64) -> Frame {
    let mut shapes = Vec::with_capacity(4 + state.coins.len() * 2 + state.enemies.len());

    shapes.push(Shape::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        fill: BACKGROUND,
    });

    let player = &state.player;
    if state.shield.is_active() {
        shapes.push(Shape::Circle {
            center: player.pos,
            radius: player.radius * SHIELD_SCALE,
            fill: SHIELD_FILL.to_string(),
            stroke: Some(SHIELD_STROKE),
            line_width: 4.0,
            alpha: 1.0,
        });
    }

    let mut body = circle(player.pos, player.radius, player.color.as_str());
    if state.buffs.is_active(BuffKind::Ghost) {
        if let Shape::Circle { alpha, .. } = &mut body {
            *alpha = GHOST_ALPHA;
        }
    }
    shapes.push(body);

    if let Some(anchor) = state.buffs.decoy_anchor() {
        shapes.push(circle(anchor, DECOY_RADIUS, DECOY_FILL));
    }

    for coin in &state.coins {
        shapes.push(circle(coin.pos, coin.radius, COIN_FILL));
        shapes.push(Shape::Text {
            pos: coin.pos + Vec2::new(0.0, 5.0),
            text: "$",
            fill: COIN_LABEL,
            font: COIN_FONT,
        });
    }

    // Enemies are drawn as triangles pointing +x; collision stays circular
    for enemy in &state.enemies {
        let (p, r) = (enemy.pos, enemy.radius);
        shapes.push(Shape::Triangle {
            points: [
                p + Vec2::new(r, 0.0),
                p + Vec2::new(-r / 2.0, r),
                p + Vec2::new(-r / 2.0, -r),
            ],
            fill: enemy.color,
        });
    }

    Frame {
        width: ARENA_WIDTH,
        height: ARENA_HEIGHT,
        phase: state.phase,
        score: state.score,
        coins,
        shield: state.shield.remaining(),
        buffs: state
            .buffs
            .active()
            .map(|(buff, remaining)| BuffReadout { buff, remaining })
            .collect(),
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn_coin;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_idle_frame_has_background_and_player() {
        let state = GameState::new(1);
        let frame = build_frame(&state, 7);
        assert_eq!(frame.shapes.len(), 2);
        assert!(matches!(frame.shapes[0], Shape::Rect { .. }));
        assert_eq!(frame.coins, 7);
        assert!(frame.buffs.is_empty());
    }

    #[test]
    fn test_ghost_and_shield_visuals() {
        let mut state = GameState::new(1);
        state.shield.raise(5.0);
        state.buffs.activate(BuffKind::Ghost, 3.0);
        let frame = build_frame(&state, 0);

        match &frame.shapes[1] {
            Shape::Circle { radius, stroke, .. } => {
                assert_eq!(*radius, state.player.radius * SHIELD_SCALE);
                assert_eq!(*stroke, Some(SHIELD_STROKE));
            }
            other => panic!("expected shield bubble, got {other:?}"),
        }
        match &frame.shapes[2] {
            Shape::Circle { alpha, .. } => assert_eq!(*alpha, GHOST_ALPHA),
            other => panic!("expected player, got {other:?}"),
        }
        assert_eq!(frame.buffs.len(), 1);
        assert_eq!(frame.buffs[0].buff, BuffKind::Ghost);

        let json = serde_json::to_string(&frame.buffs[0]).unwrap();
        assert!(json.contains(r#""buff":"ghost""#));
    }

    #[test]
    fn test_coins_and_decoy_drawn() {
        let mut state = GameState::new(1);
        let mut rng = Pcg32::seed_from_u64(5);
        state.coins.push(spawn_coin(&mut rng));
        state.buffs.activate_decoy(Vec2::new(50.0, 60.0), 5.0);
        let frame = build_frame(&state, 0);
        // background, player, decoy, coin, coin label
        assert_eq!(frame.shapes.len(), 5);
        assert!(frame.shapes.iter().any(|s| matches!(s, Shape::Text { text: "$", .. })));
    }

    #[test]
    fn test_frame_serializes() {
        let frame = build_frame(&GameState::new(1), 0);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains(r#""shape":"rect""#));
        assert!(json.contains(r#""phase":"idle""#));
    }
}
