//! The player-controlled character

use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Direction, Rect, TilePos, player_box};
use super::map::Map;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub tile: TilePos,
    pub lives: u8,
    pub max_lives: u8,
    pub has_key: bool,
    /// Enemies die on contact
    pub invincible: bool,
    /// Enemies die on contact, water is harmless, the key is kept between levels
    pub immune: bool,
    /// Hidden key sequence entered; commands and attacks available
    pub dev_mode: bool,
}

impl Player {
    pub fn new(start: TilePos, lives: u8, max_lives: u8) -> Self {
        Self {
            tile: start,
            lives,
            max_lives,
            has_key: false,
            invincible: false,
            immune: false,
            dev_mode: false,
        }
    }

    /// Contact with an enemy kills the enemy instead of the player
    pub fn shrugs_off_enemies(&self) -> bool {
        self.invincible || self.immune
    }

    /// Target of a one-tile step, honoring reversed controls
    pub fn step_target(&self, direction: Direction, reversed: bool) -> TilePos {
        let direction = if reversed { direction.reversed() } else { direction };
        let (dcol, drow) = direction.delta();
        self.tile.offset(dcol, drow)
    }

    /// Whether the player may stand on `target`
    pub fn can_enter(&self, map: &Map, target: TilePos) -> bool {
        map.is_walkable(target) && (target != map.end || self.has_key)
    }

    /// Step one tile; returns false (and stays put) if the move is not allowed
    pub fn try_move(&mut self, map: &Map, direction: Direction, reversed: bool) -> bool {
        let target = self.step_target(direction, reversed);
        if !self.can_enter(map, target) {
            return false;
        }
        self.tile = target;
        true
    }

    pub fn gain_life(&mut self) {
        if self.lives < self.max_lives {
            self.lives += 1;
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        player_box(self.tile)
    }
}
