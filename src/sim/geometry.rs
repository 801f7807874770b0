//! Grid coordinates and axis-aligned hit boxes
//!
//! Stationary things (player, items, map objects) live on tile coordinates.
//! Moving things (enemies, attacks) live in pixel space. Both meet in `Rect`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tile_to_pixel;

/// A tile coordinate on the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub col: i32,
    pub row: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Top-left pixel of this tile
    #[inline]
    pub fn to_pixel(self) -> Vec2 {
        tile_to_pixel(self.col, self.row)
    }

    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// Chebyshev distance in grid units
    pub fn chebyshev(self, other: Self) -> i32 {
        (self.col - other.col).abs().max((self.row - other.row).abs())
    }
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Grid delta `(dcol, drow)` for one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Horizontal facing for sprites that mirror their motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_speed(speed: f32) -> Self {
        if speed < 0.0 { Facing::Left } else { Facing::Right }
    }
}

/// Axis-aligned box in pixel space (edges inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            right: left + width,
            top,
            bottom: top + height,
        }
    }

    /// Horizontal and vertical extents both intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Anything with a hit box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Player hit box when standing on `tile`
pub fn player_box(tile: TilePos) -> Rect {
    let origin = tile.to_pixel();
    Rect::new(
        origin.x + PLAYER_BOX_LEFT,
        origin.y,
        PLAYER_BOX_RIGHT - PLAYER_BOX_LEFT,
        PLAYER_BOX_HEIGHT,
    )
}
