//! Circle overlap and magnet pull

use glam::Vec2;

/// Strict circle-circle overlap (touching edges do not collide)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Move `pos` toward `target` by at most `speed * dt`, stopping on the target
pub fn pull_toward(pos: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let offset = target - pos;
    let dist = offset.length();
    if dist <= f32::EPSILON {
        return target;
    }
    let step = (speed * dt).min(dist);
    pos + offset / dist * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_circles_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(!circles_overlap(a, 15.0, Vec2::new(25.0, 0.0), 10.0));
        assert!(circles_overlap(a, 15.0, Vec2::new(24.9, 0.0), 10.0));
    }

    #[test]
    fn test_pull_moves_at_speed() {
        let pos = pull_toward(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 200.0, 0.1);
        assert!((pos.x - 20.0).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_pull_does_not_overshoot() {
        let target = Vec2::new(5.0, 0.0);
        let pos = pull_toward(Vec2::ZERO, target, 200.0, 1.0);
        assert_eq!(pos, target);
    }
}
