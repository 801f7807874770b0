//! Collectible items
//!
//! Items sit on a tile and are picked up by exact tile match, not by hit box.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::TilePos;
use crate::tuning::{Tuning, ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemColor {
    Blue,
    Green,
    Orange,
}

impl GemColor {
    pub const ALL: [GemColor; 3] = [GemColor::Blue, GemColor::Green, GemColor::Orange];
}

/// Gem lifetime: visible, then fading, then gone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemTimer {
    pub color: GemColor,
    pub fade_at: f64,
    pub expire_at: f64,
    pub fading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Unlocks the exit
    Key,
    /// One extra life, up to the cap
    Heart,
    /// Score bonus; disappears on its own
    Gem(GemTimer),
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Key => "key",
            ItemKind::Heart => "heart",
            ItemKind::Gem(_) => "gem",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub tile: TilePos,
    pub destroyed: bool,
}

impl Item {
    pub fn key(id: u32, tile: TilePos) -> Self {
        Self {
            id,
            kind: ItemKind::Key,
            tile,
            destroyed: false,
        }
    }

    pub fn heart(id: u32, tile: TilePos) -> Self {
        Self {
            id,
            kind: ItemKind::Heart,
            tile,
            destroyed: false,
        }
    }

    /// A gem spawned at `now`, with a random color
    pub fn gem(id: u32, tile: TilePos, now: f64, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let color = GemColor::ALL[rng.random_range(0..GemColor::ALL.len())];
        Self {
            id,
            kind: ItemKind::Gem(GemTimer {
                color,
                fade_at: now + ms(tuning.gem_fade_ms),
                expire_at: now + ms(tuning.gem_expire_ms),
                fading: false,
            }),
            tile,
            destroyed: false,
        }
    }

    /// Advance the item's timers to `now`
    pub fn update(&mut self, now: f64) {
        if let ItemKind::Gem(gem) = &mut self.kind {
            if now >= gem.fade_at {
                gem.fading = true;
            }
            if now >= gem.expire_at {
                self.destroyed = true;
            }
        }
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.kind, ItemKind::Gem(GemTimer { fading: true, .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gem_lifecycle() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let t = 12.0;
        let mut gem = Item::gem(1, TilePos::new(2, 2), t, &tuning, &mut rng);

        gem.update(t + 2.499);
        assert!(!gem.is_fading());
        gem.update(t + 2.5);
        assert!(gem.is_fading());
        assert!(!gem.destroyed);
        gem.update(t + 3.999);
        assert!(!gem.destroyed);
        gem.update(t + 4.0);
        assert!(gem.destroyed);
    }

    #[test]
    fn test_key_and_heart_never_expire() {
        let mut key = Item::key(1, TilePos::new(1, 1));
        let mut heart = Item::heart(2, TilePos::new(2, 1));
        key.update(1.0e6);
        heart.update(1.0e6);
        assert!(!key.destroyed && !heart.destroyed);
        assert!(!key.is_fading());
    }
}
