//! Level map and procedural generation
//!
//! The six-row layout is fixed: an exit row of water with one stone gap, a
//! grass row, two stone rows, a grass row, and a start row of water with one
//! stone gap. Only the gap columns and the rocks are random.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::TilePos;
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Stone,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: TilePos,
    pub kind: TileKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    /// Row-major, `MAP_COLUMNS * MAP_ROWS` tiles
    pub tiles: Vec<Tile>,
    pub start: TilePos,
    /// The locked exit
    pub end: TilePos,
    pub rocks: Vec<TilePos>,
}

/// Tile type for a grid cell given the start and exit columns
fn tile_kind(pos: TilePos, start_col: i32, end_col: i32) -> TileKind {
    match pos.row {
        EXIT_ROW if pos.col == end_col => TileKind::Stone,
        EXIT_ROW => TileKind::Water,
        START_ROW if pos.col == start_col => TileKind::Stone,
        START_ROW => TileKind::Water,
        1 | 4 => TileKind::Grass,
        _ => TileKind::Stone,
    }
}

impl Map {
    /// Fixed layout with the given start/exit columns and no rocks
    pub fn with_gaps(start_col: i32, end_col: i32) -> Self {
        let mut tiles = Vec::with_capacity((MAP_COLUMNS * MAP_ROWS) as usize);
        for row in 0..MAP_ROWS {
            for col in 0..MAP_COLUMNS {
                let pos = TilePos::new(col, row);
                tiles.push(Tile {
                    pos,
                    kind: tile_kind(pos, start_col, end_col),
                });
            }
        }
        Self {
            tiles,
            start: TilePos::new(start_col, START_ROW),
            end: TilePos::new(end_col, EXIT_ROW),
            rocks: Vec::new(),
        }
    }

    /// Generate the map for `level`
    pub fn generate(level: i32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        // Interior columns only: never the leftmost or rightmost
        let start_col = rng.random_range(1..MAP_COLUMNS - 1);
        let end_col = rng.random_range(1..MAP_COLUMNS - 1);
        let mut map = Self::with_gaps(start_col, end_col);

        if level > tuning.rock_level {
            let (lo, hi) = tuning.rock_count;
            let count = rng.random_range(lo..=hi) as usize;
            let mut candidates: Vec<TilePos> = map
                .tiles
                .iter()
                .filter(|t| {
                    t.kind != TileKind::Water && t.pos.col != map.start.col && t.pos.col != map.end.col
                })
                .map(|t| t.pos)
                .collect();
            map.rocks = take_random(&mut candidates, count, rng);
        }

        log::info!(
            "Level {} map: start col {}, exit col {}, {} rocks",
            level,
            map.start.col,
            map.end.col,
            map.rocks.len()
        );
        map
    }

    pub fn tile_at(&self, pos: TilePos) -> Option<&Tile> {
        if pos.col < 0 || pos.col >= MAP_COLUMNS || pos.row < 0 || pos.row >= MAP_ROWS {
            return None;
        }
        self.tiles.get((pos.row * MAP_COLUMNS + pos.col) as usize)
    }

    pub fn is_water(&self, pos: TilePos) -> bool {
        self.tile_at(pos).is_some_and(|t| t.kind == TileKind::Water)
    }

    pub fn has_rock(&self, pos: TilePos) -> bool {
        self.rocks.contains(&pos)
    }

    /// The tile exists and no rock sits on it (water is walkable, and deadly)
    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.tile_at(pos).is_some() && !self.has_rock(pos)
    }

    /// Whether an item may be placed on `pos`
    pub fn item_spot_allowed(&self, pos: TilePos) -> bool {
        match self.tile_at(pos) {
            None => false,
            Some(tile) => {
                tile.kind != TileKind::Water
                    && pos != self.start
                    && pos != self.end
                    && self.rocks.iter().all(|&rock| rock.chebyshev(pos) > 1)
            }
        }
    }

    /// All tiles that pass `item_spot_allowed`, in grid order
    pub fn item_spots(&self) -> Vec<TilePos> {
        self.tiles
            .iter()
            .map(|t| t.pos)
            .filter(|&p| self.item_spot_allowed(p))
            .collect()
    }
}

/// Draw up to `count` entries without replacement
pub fn take_random<T>(pool: &mut Vec<T>, count: usize, rng: &mut impl Rng) -> Vec<T> {
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let idx = rng.random_range(0..pool.len());
        picked.push(pool.swap_remove(idx));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fixed_layout() {
        let map = Map::with_gaps(2, 4);
        assert_eq!(map.tiles.len(), 42);
        assert_eq!(map.tile_at(TilePos::new(4, 0)).unwrap().kind, TileKind::Stone);
        assert_eq!(map.tile_at(TilePos::new(3, 0)).unwrap().kind, TileKind::Water);
        assert_eq!(map.tile_at(TilePos::new(0, 1)).unwrap().kind, TileKind::Grass);
        assert_eq!(map.tile_at(TilePos::new(0, 2)).unwrap().kind, TileKind::Stone);
        assert_eq!(map.tile_at(TilePos::new(6, 3)).unwrap().kind, TileKind::Stone);
        assert_eq!(map.tile_at(TilePos::new(5, 4)).unwrap().kind, TileKind::Grass);
        assert_eq!(map.tile_at(TilePos::new(2, 5)).unwrap().kind, TileKind::Stone);
        assert_eq!(map.tile_at(TilePos::new(1, 5)).unwrap().kind, TileKind::Water);
        assert!(map.tile_at(TilePos::new(7, 0)).is_none());
        assert!(map.tile_at(TilePos::new(0, -1)).is_none());
    }

    #[test]
    fn test_no_rocks_at_low_levels() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for level in 1..=15 {
            assert!(Map::generate(level, &tuning, &mut rng).rocks.is_empty());
        }
    }

    #[test]
    fn test_item_spot_excludes_rock_neighborhood() {
        let mut map = Map::with_gaps(1, 1);
        map.rocks.push(TilePos::new(4, 2));
        assert!(!map.item_spot_allowed(TilePos::new(3, 1)));
        assert!(!map.item_spot_allowed(TilePos::new(5, 3)));
        assert!(map.item_spot_allowed(TilePos::new(6, 2)));
        assert!(!map.item_spot_allowed(map.start));
        assert!(!map.item_spot_allowed(map.end));
        assert!(!map.item_spot_allowed(TilePos::new(0, 0)));
    }

    #[test]
    fn test_take_random_without_replacement() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pool: Vec<u32> = (0..5).collect();
        let mut picked = take_random(&mut pool, 10, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3, 4]);
        assert!(pool.is_empty());
    }

    proptest! {
        #[test]
        fn prop_generated_map_invariants(seed in any::<u64>(), level in -30i32..60) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let map = Map::generate(level, &tuning, &mut rng);

            prop_assert!(map.start.col > 0 && map.start.col < MAP_COLUMNS - 1);
            prop_assert!(map.end.col > 0 && map.end.col < MAP_COLUMNS - 1);
            prop_assert_eq!(map.start.row, START_ROW);
            prop_assert_eq!(map.end.row, EXIT_ROW);
            prop_assert_eq!(map.tile_at(map.start).unwrap().kind, TileKind::Stone);
            prop_assert_eq!(map.tile_at(map.end).unwrap().kind, TileKind::Stone);

            if level > 15 {
                prop_assert!((1..=3).contains(&map.rocks.len()));
            } else {
                prop_assert!(map.rocks.is_empty());
            }
            for (i, rock) in map.rocks.iter().enumerate() {
                prop_assert!(rock.col != map.start.col && rock.col != map.end.col);
                prop_assert!(!map.is_water(*rock));
                prop_assert!(!map.rocks[i + 1..].contains(rock));
            }
        }
    }
}
