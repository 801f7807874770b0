//! Game balance numbers
//!
//! Every constant the simulation rolls against lives here so a run can be
//! re-balanced from a JSON file without touching code. Missing fields fall
//! back to the shipped defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive numeric range `(min, max)` used for random rolls
pub type Span = (u32, u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub start_lives: u8,
    pub max_lives: u8,

    // === Enemies ===
    /// Speed range (pixels/sec) for Basic, Charger, Sidestepper, Backtracker, Centipede
    pub enemy_speed: Span,
    pub slowpoke_speed: Span,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub centipede_width: f32,

    /// Charger: roll interval (ms), roll must exceed this chance, burst speed, burst length (ms)
    pub charger_interval_ms: Span,
    pub charger_chance: f64,
    pub charger_speed: f32,
    pub charger_burst_ms: u32,

    pub sidestepper_interval_ms: Span,
    pub sidestepper_chance: f64,
    pub sidestep_speed: f32,

    pub backtracker_interval_ms: Span,
    pub backtracker_chance: f64,

    /// Base enemy count, plus one per `enemy_count_divisor` levels
    pub enemy_base_count: u32,
    pub enemy_count_divisor: i32,
    /// Flat enemy count once past `dark_level`
    pub max_enemies: u32,

    /// Level past which Basic's weight starts draining into the other variants
    pub weight_shift_level: i32,

    // === Items ===
    pub gem_fade_ms: u32,
    pub gem_expire_ms: u32,
    pub gem_value: i64,
    pub heart_every: i32,
    pub heart_chance: f64,

    // === Map ===
    /// Rocks appear once the level exceeds this
    pub rock_level: i32,
    pub rock_count: Span,

    // === Escalation ===
    /// Past this level: dark tiles, speed increases, flat enemy count
    pub dark_level: i32,
    pub speed_step: f32,
    pub max_speed: f32,

    // === Scoring ===
    pub level_score_base: f64,
    pub level_score_per_second: f64,

    // === Attacks ===
    pub attack_speed: f32,
    pub shout_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            max_lives: 5,

            enemy_speed: (50, 200),
            slowpoke_speed: (15, 25),
            enemy_width: 90.0,
            enemy_height: 80.0,
            centipede_width: 270.0,

            charger_interval_ms: (2000, 5000),
            charger_chance: 0.5,
            charger_speed: 700.0,
            charger_burst_ms: 500,

            sidestepper_interval_ms: (1000, 3000),
            sidestepper_chance: 0.3,
            sidestep_speed: 100.0,

            backtracker_interval_ms: (5000, 10000),
            backtracker_chance: 0.2,

            enemy_base_count: 2,
            enemy_count_divisor: 5,
            max_enemies: 8,

            weight_shift_level: 5,

            gem_fade_ms: 2500,
            gem_expire_ms: 4000,
            gem_value: 50,
            heart_every: 5,
            heart_chance: 0.5,

            rock_level: 15,
            rock_count: (1, 3),

            dark_level: 25,
            speed_step: 0.05,
            max_speed: 2.5,

            level_score_base: 100.0,
            level_score_per_second: 4.0,

            attack_speed: 300.0,
            shout_ms: 500,
        }
    }
}

impl Tuning {
    /// Number of enemies spawned for a level
    pub fn enemy_count(&self, level: i32) -> u32 {
        if level > self.dark_level {
            return self.max_enemies;
        }
        self.enemy_base_count + level.div_euclid(self.enemy_count_divisor.max(1)).unsigned_abs()
    }

    /// Points for finishing a level in `secs` seconds (may be zero or negative)
    pub fn completion_points(&self, secs: f64) -> i64 {
        (self.level_score_base - self.level_score_per_second * secs).floor() as i64
    }

    /// Parse and validate a (possibly partial) tuning table
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tables the simulation cannot roll against: empty spans, and
    /// behavior intervals of zero (a timer that never advances)
    pub fn validate(&self) -> Result<()> {
        let spans = [
            ("enemy_speed", self.enemy_speed),
            ("slowpoke_speed", self.slowpoke_speed),
            ("rock_count", self.rock_count),
        ];
        let intervals = [
            ("charger_interval_ms", self.charger_interval_ms),
            ("sidestepper_interval_ms", self.sidestepper_interval_ms),
            ("backtracker_interval_ms", self.backtracker_interval_ms),
        ];
        for (field, (lo, hi)) in spans.into_iter().chain(intervals) {
            if lo > hi {
                return Err(Error::InvalidTuning {
                    field,
                    reason: "has min above max",
                });
            }
        }
        for (field, (lo, _)) in intervals {
            if lo == 0 {
                return Err(Error::InvalidTuning {
                    field,
                    reason: "must be at least 1 ms",
                });
            }
        }
        Ok(())
    }
}

/// Milliseconds to simulation seconds
#[inline]
pub fn ms(value: u32) -> f64 {
    f64::from(value) / 1000.0
}
