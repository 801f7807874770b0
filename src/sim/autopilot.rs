//! Greedy autopilot used by the headless driver
//!
//! Breadth-first search over the grid toward the key, then the exit. The
//! first step of the shortest path is taken unless an enemy is about to
//! cross the destination tile, in which case the pilot waits.

use std::collections::VecDeque;

use super::collision::collides;
use super::geometry::{Direction, Rect, TilePos, player_box};
use super::item::ItemKind;
use super::world::World;
use crate::consts::*;

/// Where the pilot is heading
pub fn goal(world: &World) -> Option<TilePos> {
    if world.player.has_key {
        return Some(world.map.end);
    }
    world
        .items
        .iter()
        .find(|item| item.kind == ItemKind::Key)
        .map(|item| item.tile)
}

/// The key to press this step, if any. Accounts for reversed controls.
pub fn next_step(world: &World) -> Option<Direction> {
    let target = goal(world)?;
    let direction = first_step(world, world.player.tile, target)?;
    let (dcol, drow) = direction.delta();
    if threatened(world, world.player.tile.offset(dcol, drow)) {
        return None;
    }
    if world.state.reversed() {
        Some(direction.reversed())
    } else {
        Some(direction)
    }
}

fn passable(world: &World, pos: TilePos) -> bool {
    world.player.can_enter(&world.map, pos) && (world.player.immune || !world.map.is_water(pos))
}

/// First move of a shortest path from `from` to `to`, exploring in `Direction::ALL` order
fn first_step(world: &World, from: TilePos, to: TilePos) -> Option<Direction> {
    const CELLS: usize = (MAP_COLUMNS * MAP_ROWS) as usize;
    let index = |p: TilePos| (p.row * MAP_COLUMNS + p.col) as usize;

    let mut first: [Option<Direction>; CELLS] = [None; CELLS];
    let mut seen = [false; CELLS];
    let mut queue = VecDeque::new();
    seen[index(from)] = true;
    queue.push_back(from);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            return first[index(pos)];
        }
        for direction in Direction::ALL {
            let (dcol, drow) = direction.delta();
            let next = pos.offset(dcol, drow);
            if world.map.tile_at(next).is_none() || seen[index(next)] || !passable(world, next) {
                continue;
            }
            seen[index(next)] = true;
            first[index(next)] = first[index(pos)].or(Some(direction));
            queue.push_back(next);
        }
    }
    None
}

/// An enemy overlaps the tile or is within one column of it
fn threatened(world: &World, tile: TilePos) -> bool {
    if world.player.shrugs_off_enemies() {
        return false;
    }
    let b = player_box(tile);
    let zone = Rect {
        left: b.left - X_STEP,
        right: b.right + X_STEP,
        top: b.top,
        bottom: b.bottom,
    };
    world.enemies.iter().any(|enemy| collides(&zone, enemy))
}
