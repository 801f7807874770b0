//! The World: every piece of simulation state in one owned value
//!
//! Update, collision and generation all take `&mut World`; nothing lives in
//! globals. The world also owns the seeded RNG, so a run is reproducible from
//! its seed plus its input/dt sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::attack::Attack;
use super::enemy::Enemy;
use super::input::KeyHistory;
use super::item::Item;
use super::map::{Map, take_random};
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState, Modifier, Notice};
use super::weights::{WeightedPool, enemy_weights};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct World {
    pub state: GameState,
    pub map: Map,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub attacks: Vec<Attack>,
    pub tuning: Tuning,
    /// Simulation clock in seconds; frozen while paused
    pub clock: f64,
    /// Clock time the current level began
    pub level_started_at: f64,
    /// Pending blocking message, if any
    pub notice: Option<Notice>,
    pub(crate) keys: KeyHistory,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    seed: u64,
    next_id: u32,
}

impl World {
    /// Start a fresh run with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::default();
        let map = Map::generate(state.level, &tuning, &mut rng);
        let player = Player::new(map.start, tuning.start_lives, tuning.max_lives);

        let mut world = Self {
            state,
            map,
            player,
            enemies: Vec::new(),
            items: Vec::new(),
            attacks: Vec::new(),
            tuning,
            clock: 0.0,
            level_started_at: 0.0,
            notice: None,
            keys: KeyHistory::default(),
            rng,
            events: Vec::new(),
            seed,
            next_id: 1,
        };
        world.spawn_enemies();
        world.spawn_items();
        log::info!("New run (seed {seed})");
        world
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the enemy set with a fresh draw for the current level
    pub fn spawn_enemies(&mut self) {
        let level = self.state.level;
        let pool = WeightedPool::from_weights(&enemy_weights(level, &self.tuning));
        let count = self.tuning.enemy_count(level);

        self.enemies.clear();
        for _ in 0..count {
            let Some(&kind) = pool.sample(&mut self.rng) else {
                break;
            };
            let id = self.next_entity_id();
            let enemy = Enemy::spawn(id, kind, &self.tuning, &mut self.rng, self.clock);
            self.enemies.push(enemy);
        }
        log::debug!(
            "Level {}: spawned {} enemies ({:?})",
            level,
            self.enemies.len(),
            self.enemies.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>()
        );
    }

    /// Replace the item set: one key, one gem, sometimes a heart
    pub fn spawn_items(&mut self) {
        let level = self.state.level;
        let mut spots = self.map.item_spots();
        let wants_heart = level % self.tuning.heart_every.max(1) == 0
            && self.rng.random::<f64>() > self.tuning.heart_chance;
        let wanted = if wants_heart { 3 } else { 2 };
        let picked = take_random(&mut spots, wanted, &mut self.rng);
        if picked.len() < wanted {
            log::warn!("Level {}: only {} item spots available", level, picked.len());
        }

        self.items.clear();
        for (slot, tile) in picked.into_iter().enumerate() {
            let id = self.next_entity_id();
            let item = match slot {
                0 => Item::key(id, tile),
                1 => Item::gem(id, tile, self.clock, &self.tuning, &mut self.rng),
                _ => Item::heart(id, tile),
            };
            self.items.push(item);
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Present a blocking message; the game pauses until it is dismissed
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.state.phase = GamePhase::Paused;
    }

    /// Continuation for every notice except the command prompt, which it cancels
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
        }
    }

    /// Answer the command prompt. A recognized command activates its
    /// modifier and shows a confirmation; anything else resumes play.
    /// Returns whether a modifier was activated.
    pub fn submit_command(&mut self, command: Option<&str>) -> bool {
        if self.notice != Some(Notice::CommandPrompt) {
            return false;
        }
        self.notice = None;
        match command.and_then(Modifier::from_command) {
            Some(modifier) => {
                self.activate_modifier(modifier);
                self.show_notice(Notice::ModifierActivated(modifier));
                true
            }
            None => {
                self.state.phase = GamePhase::Playing;
                false
            }
        }
    }

    /// Turn on a modifier and apply its immediate effects
    pub fn activate_modifier(&mut self, modifier: Modifier) {
        self.state.modifiers.insert(modifier);
        match modifier {
            Modifier::Invincible => self.player.invincible = true,
            Modifier::Udacious => {
                self.player.immune = true;
                self.player.has_key = true;
            }
            Modifier::TimeReversal => self.state.level = -1,
            Modifier::Cows | Modifier::ShortRangeAttack => {}
        }
        log::info!("Modifier activated: {modifier:?}");
        self.emit(GameEvent::ModifierActivated(modifier));
    }
}
