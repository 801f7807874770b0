//! Per-frame simulation tick
//!
//! Order: input -> clock -> entity updates -> collisions -> pickups -> level
//! completion. While paused nothing advances, including the clock, so enemy
//! behavior timers and gem lifetimes freeze together with movement.

use super::collision::Contact;
use super::input::Key;
use super::state::GamePhase;
use super::world::World;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys released since the previous tick, in order
    pub keys: Vec<Key>,
}

impl TickInput {
    pub fn key(key: Key) -> Self {
        Self { keys: vec![key] }
    }
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    for &key in &input.keys {
        world.handle_key(key);
    }

    // Don't tick if paused
    if world.state.phase != GamePhase::Playing {
        return;
    }

    world.clock += f64::from(dt);
    update_entities(world, dt);

    if world.resolve_collisions() == Contact::Fatal {
        return;
    }
    world.collect_items();

    if world.level_complete() {
        world.complete_level();
    }
}

/// Run timers and integrate positions; drop expired items and spent attacks
fn update_entities(world: &mut World, dt: f32) {
    let now = world.clock;
    let speed = world.state.speed;

    for enemy in &mut world.enemies {
        enemy.think(now, &world.tuning, &mut world.rng);
        enemy.advance(dt, speed, &mut world.rng);
    }

    for item in &mut world.items {
        item.update(now);
    }
    world.items.retain(|item| !item.destroyed);

    for attack in &mut world.attacks {
        attack.update(dt, speed);
    }
    world.attacks.retain(|attack| !attack.is_spent());

    if world.state.shout_until.is_some_and(|until| now >= until) {
        world.state.shout_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::enemy::{Behavior, Enemy, EnemyKind};
    use crate::sim::geometry::{Direction, TilePos};
    use crate::sim::item::Item;
    use crate::sim::state::Notice;
    use crate::tuning::Tuning;

    fn quiet_world() -> World {
        let mut world = World::new(12345, Tuning::default());
        world.enemies.clear();
        world.items.clear();
        world
    }

    #[test]
    fn test_tick_advances_clock_and_enemies() {
        let mut world = quiet_world();
        let id = world.next_entity_id();
        let mut enemy = Enemy::spawn(id, EnemyKind::Basic, &world.tuning, &mut world.rng, 0.0);
        enemy.pos.x = 0.0;
        enemy.speed = 120.0;
        world.enemies.push(enemy);

        tick(&mut world, &TickInput::default(), 0.5);
        assert_eq!(world.clock, 0.5);
        assert_eq!(world.enemies[0].pos.x, 60.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut world = quiet_world();
        let id = world.next_entity_id();
        let mut enemy = Enemy::spawn(id, EnemyKind::Basic, &world.tuning, &mut world.rng, 0.0);
        enemy.pos.x = 0.0;
        world.enemies.push(enemy);

        tick(&mut world, &TickInput::key(Key::Char('p')), SIM_DT);
        assert_eq!(world.state.phase, GamePhase::Paused);
        assert_eq!(world.notice, Some(Notice::Paused));

        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(world.clock, 0.0);
        assert_eq!(world.enemies[0].pos.x, 0.0);

        world.dismiss_notice();
        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.state.phase, GamePhase::Playing);
        assert!(world.enemies[0].pos.x > 0.0);
    }

    #[test]
    fn test_pause_freezes_behavior_timers() {
        let tuning = Tuning {
            backtracker_chance: -1.0,
            ..Tuning::default()
        };
        let mut world = World::new(8, tuning);
        world.enemies.clear();
        world.items.clear();
        let id = world.next_entity_id();
        let mut enemy = Enemy::spawn(id, EnemyKind::Backtracker, &world.tuning, &mut world.rng, 0.0);
        enemy.pos = glam::Vec2::new(-2.0 * X_STEP, Y_STEP);
        world.enemies.push(enemy);
        let Behavior::Backtracker { next_roll, .. } = world.enemies[0].behavior else {
            panic!("backtracker behavior expected");
        };
        let speed = world.enemies[0].speed;

        world.handle_key(Key::Char('p'));
        // Far longer than any backtracker interval
        for _ in 0..1200 {
            tick(&mut world, &TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(world.enemies[0].speed, speed);
        assert!(world.clock < next_roll);
    }

    #[test]
    fn test_gem_fades_and_expires_on_schedule() {
        let mut world = quiet_world();
        world.clock = 3.0;
        let gem = Item::gem(500, TilePos::new(0, 2), world.clock, &world.tuning, &mut world.rng);
        world.items.push(gem);

        // 2.5s in quarter-second frames
        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), 0.25);
        }
        assert!(world.items[0].is_fading());

        tick(&mut world, &TickInput::default(), 0.25);
        assert_eq!(world.items.len(), 1, "still fading at 2.75s");

        for _ in 0..5 {
            tick(&mut world, &TickInput::default(), 0.25);
        }
        assert!(world.items.is_empty());
    }

    #[test]
    fn test_walk_to_key_then_exit() {
        let mut world = quiet_world();
        world.map = crate::sim::map::Map::with_gaps(3, 3);
        world.player.tile = world.map.start;
        let key_tile = TilePos::new(3, 3);
        world.items.push(Item::key(600, key_tile));

        let up = TickInput::key(Key::Arrow(Direction::Up));
        tick(&mut world, &up, SIM_DT);
        tick(&mut world, &up, SIM_DT);
        assert!(world.player.has_key);
        assert!(world.items.is_empty());

        for _ in 0..3 {
            tick(&mut world, &up, SIM_DT);
        }
        assert_eq!(world.state.level, 2);
        assert_eq!(world.player.tile, world.map.start);
        assert!(!world.player.has_key);
    }

    #[test]
    fn test_exit_blocked_without_key() {
        let mut world = quiet_world();
        world.map = crate::sim::map::Map::with_gaps(2, 2);
        world.player.tile = TilePos::new(2, 1);
        tick(&mut world, &TickInput::key(Key::Arrow(Direction::Up)), SIM_DT);
        assert_eq!(world.player.tile, TilePos::new(2, 1));
        assert_eq!(world.state.level, 1);
    }

    #[test]
    fn test_spent_attacks_removed() {
        let mut world = quiet_world();
        world.player.tile = TilePos::new(6, 2);
        world.fire_attack(crate::sim::attack::AttackKind::ShortRange, crate::sim::geometry::Facing::Right);
        assert!(world.state.shout_active(world.clock));
        for _ in 0..60 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.attacks.is_empty());
        assert!(world.state.shout_until.is_none());
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed and inputs stay identical
        let mut a = World::new(99999, Tuning::default());
        let mut b = World::new(99999, Tuning::default());
        let inputs = [
            TickInput::key(Key::Arrow(Direction::Up)),
            TickInput::default(),
            TickInput::key(Key::Arrow(Direction::Left)),
            TickInput::default(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
                // Keep both runs going through any notices
                a.dismiss_notice();
                b.dismiss_notice();
            }
        }
        assert_eq!(a.clock, b.clock);
        assert_eq!(a.player.tile, b.player.tile);
        assert_eq!(a.state.level, b.state.level);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
