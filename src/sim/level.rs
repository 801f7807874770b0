//! Level and game state machine
//!
//! Playing -> LevelTransition -> Playing when the exit is reached with the key.
//! A fatal contact costs a life and resets the level in place; losing the
//! last life passes through GameOver into a fully rebuilt run.

use super::map::Map;
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState, Modifier, Notice, RunSummary};
use super::world::World;

impl World {
    /// Exit reached while holding the key
    pub fn level_complete(&self) -> bool {
        self.player.tile == self.map.end && self.player.has_key
    }

    /// Score the finished level and build the next one
    pub fn complete_level(&mut self) {
        self.state.phase = GamePhase::LevelTransition;

        let secs = self.clock - self.level_started_at;
        let points = self.tuning.completion_points(secs);
        let reversed = self.state.has(Modifier::TimeReversal);
        if points > 0 {
            if reversed {
                self.state.score -= points;
            } else {
                self.state.score += points;
            }
        }
        let finished = self.state.level;
        self.state.level += if reversed { -1 } else { 1 };
        log::info!(
            "Level {} complete in {:.1}s (+{} points), next level {}",
            finished,
            secs,
            points.max(0),
            self.state.level
        );
        self.emit(GameEvent::LevelCompleted {
            level: finished,
            points,
        });

        if self.state.level > self.tuning.dark_level {
            self.state.speed = (self.state.speed + self.tuning.speed_step).min(self.tuning.max_speed);
        }

        self.level_started_at = self.clock;
        self.map = Map::generate(self.state.level, &self.tuning, &mut self.rng);
        self.player.tile = self.map.start;
        self.spawn_enemies();
        self.spawn_items();
        self.attacks.clear();
        if !self.player.immune {
            self.player.has_key = false;
        }

        self.state.phase = GamePhase::Playing;
    }

    /// Take one life; rebuild the run if none are left
    pub fn lose_life(&mut self) {
        if self.player.lives <= 1 {
            self.reset_game();
        } else {
            self.reset_level();
        }
    }

    /// Life lost with lives to spare: player back to the start, enemies
    /// re-rolled in place. Items, attacks and the key are left as they are.
    pub fn reset_level(&mut self) {
        self.player.lives -= 1;
        self.player.tile = self.map.start;
        let now = self.clock;
        for enemy in &mut self.enemies {
            enemy.respawn(&self.tuning, &mut self.rng, now);
        }
        log::info!("Life lost, {} remaining", self.player.lives);
        let lives_left = self.player.lives;
        self.emit(GameEvent::LifeLost { lives_left });
        self.show_notice(Notice::Death { lives_left });
    }

    /// Last life lost: capture the result, then recreate everything
    pub fn reset_game(&mut self) {
        self.state.phase = GamePhase::GameOver;
        let summary = RunSummary {
            level: self.state.level,
            score: self.state.score,
        };
        log::info!("Game over at level {} with score {}", summary.level, summary.score);
        self.emit(GameEvent::GameOver(summary));

        self.state = GameState::default();
        self.map = Map::generate(self.state.level, &self.tuning, &mut self.rng);
        self.player = Player::new(self.map.start, self.tuning.start_lives, self.tuning.max_lives);
        self.spawn_enemies();
        self.spawn_items();
        self.attacks.clear();
        self.level_started_at = self.clock;

        self.show_notice(Notice::GameOver(summary));
    }
}
