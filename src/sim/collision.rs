//! Collision detection and response
//!
//! Hit boxes decide player/enemy and attack/enemy contact. Water and item
//! pickups are decided by exact tile match instead.

use super::geometry::Bounded;
use super::item::ItemKind;
use super::state::{GameEvent, Modifier};
use super::world::World;

/// Two entities collide when both their horizontal and vertical extents intersect
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Outcome of the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nothing fatal happened
    Clear,
    /// The player was hit or drowned; one life must be taken
    Fatal,
}

impl World {
    /// Resolve player/enemy, attack/enemy and water contact for this tick.
    /// A fatal contact takes one life and runs the matching reset.
    pub fn resolve_collisions(&mut self) -> Contact {
        let shrugs_off = self.player.shrugs_off_enemies();
        let mut fatal = false;
        let mut destroyed = Vec::new();

        for enemy in &self.enemies {
            if collides(&self.player, enemy) {
                if shrugs_off {
                    destroyed.push(enemy.id);
                } else {
                    fatal = true;
                }
            }
            if self.attacks.iter().any(|attack| collides(enemy, attack)) {
                destroyed.push(enemy.id);
            }
        }

        if !destroyed.is_empty() {
            self.enemies.retain(|e| !destroyed.contains(&e.id));
            destroyed.dedup();
            for id in destroyed {
                log::debug!("enemy {id} destroyed");
                self.emit(GameEvent::EnemyDestroyed { id });
            }
        }

        if self.map.is_water(self.player.tile) && !self.player.immune {
            fatal = true;
        }

        if fatal {
            self.lose_life();
            Contact::Fatal
        } else {
            Contact::Clear
        }
    }

    /// Pick up any item on the player's tile
    pub fn collect_items(&mut self) {
        let tile = self.player.tile;
        let Some(idx) = self.items.iter().position(|item| item.tile == tile) else {
            return;
        };
        let item = self.items.remove(idx);
        match item.kind {
            ItemKind::Key => self.player.has_key = true,
            ItemKind::Heart => self.player.gain_life(),
            ItemKind::Gem(_) => {
                if self.state.has(Modifier::TimeReversal) {
                    self.state.score -= self.tuning.gem_value;
                } else {
                    self.state.score += self.tuning.gem_value;
                }
            }
        }
        log::debug!("collected {} at {:?}", item.kind.as_str(), tile);
        self.emit(GameEvent::ItemCollected(item.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::attack::{Attack, AttackKind};
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::geometry::{Facing, Rect, TilePos};
    use crate::sim::item::Item;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_world() -> World {
        let mut world = World::new(3, Tuning::default());
        world.enemies.clear();
        world.items.clear();
        world
    }

    fn enemy_on_player(world: &mut World) -> u32 {
        let id = world.next_entity_id();
        let mut enemy = Enemy::spawn(id, EnemyKind::Basic, &world.tuning, &mut world.rng, 0.0);
        enemy.pos = world.player.tile.to_pixel();
        enemy.speed = 0.0;
        world.enemies.push(enemy);
        id
    }

    #[test]
    fn test_enemy_hit_costs_a_life() {
        let mut world = quiet_world();
        world.player.tile = TilePos::new(3, 2);
        enemy_on_player(&mut world);
        assert_eq!(world.resolve_collisions(), Contact::Fatal);
        assert_eq!(world.player.lives, 2);
        assert_eq!(world.player.tile, world.map.start);
    }

    #[test]
    fn test_invincible_player_destroys_enemy() {
        let mut world = quiet_world();
        world.player.tile = TilePos::new(3, 2);
        world.player.invincible = true;
        let id = enemy_on_player(&mut world);
        assert_eq!(world.resolve_collisions(), Contact::Clear);
        assert!(world.enemies.is_empty());
        assert_eq!(world.player.lives, 3);
        assert!(world.events().contains(&GameEvent::EnemyDestroyed { id }));
    }

    #[test]
    fn test_attack_destroys_enemy_and_survives() {
        let mut world = quiet_world();
        let id = world.next_entity_id();
        let mut enemy = Enemy::spawn(id, EnemyKind::Centipede, &world.tuning, &mut world.rng, 0.0);
        enemy.pos = Vec2::new(300.0, 2.0 * Y_STEP);
        world.enemies.push(enemy);
        world
            .attacks
            .push(Attack::launch(99, AttackKind::ShortRange, TilePos::new(3, 2), Facing::Right, 300.0));

        world.resolve_collisions();
        assert!(world.enemies.is_empty());
        assert_eq!(world.attacks.len(), 1);
    }

    #[test]
    fn test_water_drowns_unless_immune() {
        let mut world = quiet_world();
        world.player.tile = TilePos::new(0, EXIT_ROW);
        world.player.immune = true;
        assert_eq!(world.resolve_collisions(), Contact::Clear);

        world.player.immune = false;
        world.player.invincible = true; // invincibility does not help in water
        assert_eq!(world.resolve_collisions(), Contact::Fatal);
        assert_eq!(world.player.lives, 2);
    }

    #[test]
    fn test_last_life_triggers_game_over() {
        let mut world = quiet_world();
        world.state.level = 7;
        world.state.score = 420;
        world.player.lives = 1;
        world.player.tile = TilePos::new(3, 2);
        enemy_on_player(&mut world);
        world.resolve_collisions();

        let summary = crate::sim::state::RunSummary { level: 7, score: 420 };
        assert!(world.events().contains(&GameEvent::GameOver(summary)));
        assert_eq!(world.state.level, 1);
        assert_eq!(world.state.score, 0);
        assert_eq!(world.player.lives, 3);
        assert_eq!(world.state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_key_pickup() {
        let mut world = quiet_world();
        let tile = TilePos::new(2, 3);
        world.items.push(Item::key(50, tile));
        world.player.tile = tile;
        world.collect_items();
        assert!(world.player.has_key);
        assert!(world.items.is_empty());
    }

    #[test]
    fn test_adjacent_item_not_collected() {
        let mut world = quiet_world();
        world.items.push(Item::key(50, TilePos::new(2, 3)));
        world.player.tile = TilePos::new(3, 3);
        world.collect_items();
        assert!(!world.player.has_key);
        assert_eq!(world.items.len(), 1);
    }

    #[test]
    fn test_heart_pickup_capped() {
        let mut world = quiet_world();
        let tile = TilePos::new(2, 3);
        world.player.tile = tile;
        world.player.lives = 5;
        world.items.push(Item::heart(50, tile));
        world.collect_items();
        assert_eq!(world.player.lives, 5);
        assert!(world.items.is_empty(), "heart is consumed even at full lives");
    }

    #[test]
    fn test_gem_score_sign() {
        let mut world = quiet_world();
        let tile = TilePos::new(2, 3);
        world.player.tile = tile;
        let gem = Item::gem(50, tile, 0.0, &world.tuning, &mut world.rng);
        world.items.push(gem.clone());
        world.collect_items();
        assert_eq!(world.state.score, 50);

        world.state.modifiers.insert(Modifier::TimeReversal);
        world.items.push(gem);
        world.collect_items();
        assert_eq!(world.state.score, 0);
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-400.0f32..800.0, -200.0f32..700.0, 1.0f32..300.0, 1.0f32..250.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }
    }
}
