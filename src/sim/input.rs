//! Keyboard input: movement, pause, and the hidden developer controls

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::attack::{Attack, AttackKind};
use super::geometry::{Direction, Facing};
use super::state::{GameEvent, Modifier, Notice};
use super::world::World;

/// A key released by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Arrow(Direction),
    Char(char),
}

/// Up Up Down Down Left Right Left Right B A
pub const SECRET_CODE: [Key; 10] = [
    Key::Arrow(Direction::Up),
    Key::Arrow(Direction::Up),
    Key::Arrow(Direction::Down),
    Key::Arrow(Direction::Down),
    Key::Arrow(Direction::Left),
    Key::Arrow(Direction::Right),
    Key::Arrow(Direction::Left),
    Key::Arrow(Direction::Right),
    Key::Char('b'),
    Key::Char('a'),
];

/// The most recent keys, long enough to spot the secret code
#[derive(Debug, Clone, Default)]
pub struct KeyHistory {
    recent: VecDeque<Key>,
}

impl KeyHistory {
    /// Record a key; returns true when the secret code was just completed
    pub fn push(&mut self, key: Key) -> bool {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.recent.push_back(key);
        if self.recent.len() > SECRET_CODE.len() {
            self.recent.pop_front();
        }
        if self.recent.iter().eq(SECRET_CODE.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }
}

impl World {
    /// Handle one key release
    pub fn handle_key(&mut self, key: Key) {
        if !self.player.dev_mode && self.keys.push(key) {
            self.player.dev_mode = true;
            log::info!("Developer mode unlocked");
            self.emit(GameEvent::DeveloperModeUnlocked);
            self.show_notice(Notice::DeveloperUnlocked);
        }

        if self.state.is_paused() {
            return;
        }

        match key {
            Key::Arrow(direction) => {
                self.try_move(direction);
            }
            Key::Char(c) => match c.to_ascii_lowercase() {
                'p' => self.show_notice(Notice::Paused),
                'c' if self.player.dev_mode => self.show_notice(Notice::CommandPrompt),
                'a' | 'd' if self.player.dev_mode && self.state.has(Modifier::ShortRangeAttack) => {
                    let facing = if c.eq_ignore_ascii_case(&'a') { Facing::Left } else { Facing::Right };
                    self.fire_attack(AttackKind::ShortRange, facing);
                }
                'q' | 'e' if self.player.dev_mode && self.state.has(Modifier::Udacious) => {
                    let facing = if c.eq_ignore_ascii_case(&'q') { Facing::Left } else { Facing::Right };
                    self.fire_attack(AttackKind::WideRange, facing);
                }
                _ => {}
            },
        }
    }

    /// Step the player one tile; false if the move was rejected
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let reversed = self.state.reversed();
        self.player.try_move(&self.map, direction, reversed)
    }

    /// Launch an attack from the player's tile
    pub fn fire_attack(&mut self, kind: AttackKind, facing: Facing) {
        let id = self.next_entity_id();
        let attack = Attack::launch(id, kind, self.player.tile, facing, self.tuning.attack_speed);
        if kind == AttackKind::ShortRange {
            self.state.shout_until = Some(self.clock + crate::tuning::ms(self.tuning.shout_ms));
        }
        self.attacks.push(attack);
    }
}
