//! Player projectiles
//!
//! Attacks fly horizontally from the player's tile and destroy any enemy they
//! touch. They are not consumed on hit; they stop once they leave the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Facing, Rect, TilePos};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    /// One row tall
    ShortRange,
    /// Covers the player's row and the rows above and below
    WideRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attack {
    pub id: u32,
    pub kind: AttackKind,
    pub pos: Vec2,
    /// Signed horizontal speed; zero once spent
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Attack {
    /// Launch from the player's tile toward `facing`
    pub fn launch(id: u32, kind: AttackKind, from: TilePos, facing: Facing, speed: f32) -> Self {
        let origin = from.to_pixel();
        let (y, height) = match kind {
            AttackKind::ShortRange => (origin.y, SHORT_ATTACK_HEIGHT),
            AttackKind::WideRange => (origin.y - Y_STEP, WIDE_ATTACK_HEIGHT),
        };
        let speed = match facing {
            Facing::Left => -speed.abs(),
            Facing::Right => speed.abs(),
        };
        Self {
            id,
            kind,
            pos: Vec2::new(origin.x, y),
            speed,
            width: ATTACK_WIDTH,
            height,
        }
    }

    pub fn facing(&self) -> Facing {
        Facing::from_speed(self.speed)
    }

    pub fn update(&mut self, dt: f32, speed_mult: f32) {
        self.pos.x += dt * self.speed * speed_mult;
        if self.pos.x > X_RIGHT || self.pos.x < X_LEFT - X_STEP {
            self.speed = 0.0;
        }
    }

    /// Left the play area; removed on the next pass
    pub fn is_spent(&self) -> bool {
        self.speed == 0.0
    }
}

impl Bounded for Attack {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_direction() {
        let a = Attack::launch(1, AttackKind::ShortRange, TilePos::new(3, 4), Facing::Left, 300.0);
        assert_eq!(a.speed, -300.0);
        assert_eq!(a.pos, Vec2::new(303.0, 332.0));
        assert_eq!(a.facing(), Facing::Left);
    }

    #[test]
    fn test_wide_range_spans_three_rows() {
        let a = Attack::launch(1, AttackKind::WideRange, TilePos::new(3, 3), Facing::Right, 300.0);
        let b = a.bounds();
        assert_eq!(b.top, 2.0 * Y_STEP);
        assert_eq!(b.bottom - b.top, 210.0);
    }

    #[test]
    fn test_spent_after_leaving_screen() {
        let mut a = Attack::launch(1, AttackKind::ShortRange, TilePos::new(6, 2), Facing::Right, 300.0);
        a.update(0.1, 1.0);
        assert!(!a.is_spent());
        a.update(0.3, 1.0);
        assert!(a.is_spent());

        let mut b = Attack::launch(2, AttackKind::ShortRange, TilePos::new(0, 2), Facing::Left, 300.0);
        b.update(0.5, 1.0);
        assert!(b.is_spent());
    }
}
