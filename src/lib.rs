//! The Buggening - a tile-grid arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level generation, game state)
//! - `render`: Abstract draw surface and per-frame draw order
//! - `tuning`: Data-driven game balance
//! - `settings`: Runner configuration
//! - `highscores`: Leaderboard of finished runs

pub mod error;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz, one display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical raster size
    pub const CANVAS_WIDTH: f32 = 707.0;
    pub const CANVAS_HEIGHT: f32 = 606.0;

    /// Play bounds (pixels)
    pub const X_LEFT: f32 = 0.0;
    pub const X_RIGHT: f32 = 707.0;
    pub const Y_TOP: f32 = 0.0;
    pub const Y_BOTTOM: f32 = 498.0;

    /// Tile step: the grid spacing every stopping position snaps to
    pub const X_STEP: f32 = 101.0;
    pub const Y_STEP: f32 = 83.0;

    /// Grid dimensions in tiles
    pub const MAP_COLUMNS: i32 = 7;
    pub const MAP_ROWS: i32 = 6;
    /// Row holding the exit, and the row holding the start
    pub const EXIT_ROW: i32 = 0;
    pub const START_ROW: i32 = MAP_ROWS - 1;

    /// Player hit box, relative to the tile origin
    pub const PLAYER_BOX_LEFT: f32 = 20.0;
    pub const PLAYER_BOX_RIGHT: f32 = 60.0;
    pub const PLAYER_BOX_HEIGHT: f32 = 80.0;

    /// Attack hit boxes
    pub const ATTACK_WIDTH: f32 = 80.0;
    pub const SHORT_ATTACK_HEIGHT: f32 = 80.0;
    pub const WIDE_ATTACK_HEIGHT: f32 = 210.0;

    /// Score display switches to a fixed caption above this
    pub const SCORE_DISPLAY_CAP: i64 = 10_000;
}

/// Pixel-space origin of the tile at (col, row)
#[inline]
pub fn tile_to_pixel(col: i32, row: i32) -> Vec2 {
    Vec2::new(col as f32 * consts::X_STEP, row as f32 * consts::Y_STEP)
}
