//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock advances only through `tick`
//! - Seeded RNG only, owned by the `World`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod attack;
pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod input;
pub mod item;
pub mod level;
pub mod map;
pub mod player;
pub mod state;
pub mod tick;
pub mod weights;
pub mod world;

pub use attack::{Attack, AttackKind};
pub use collision::{Contact, collides};
pub use enemy::{Behavior, Enemy, EnemyKind};
pub use geometry::{Bounded, Direction, Facing, Rect, TilePos};
pub use input::{Key, SECRET_CODE};
pub use item::{GemColor, Item, ItemKind};
pub use map::{Map, TileKind};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState, Modifier, Notice, RunSummary};
pub use tick::{TickInput, tick};
pub use world::World;
