//! Enemy variants and their movement rules
//!
//! All enemies drift horizontally. The three "thinking" variants (Charger,
//! Sidestepper, Backtracker) also carry a decision timer: every `interval`
//! seconds of simulation time they roll the dice and may change their speed
//! or heading. Timers are plain fields compared against the world clock, so
//! dropping an enemy drops its timer with it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Facing, Rect};
use crate::consts::*;
use crate::tuning::{Span, Tuning, ms};

/// Enemy variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Charger,
    Sidestepper,
    Backtracker,
    Slowpoke,
    Centipede,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Basic,
        EnemyKind::Charger,
        EnemyKind::Backtracker,
        EnemyKind::Sidestepper,
        EnemyKind::Slowpoke,
        EnemyKind::Centipede,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Charger => "charger",
            EnemyKind::Sidestepper => "sidestepper",
            EnemyKind::Backtracker => "backtracker",
            EnemyKind::Slowpoke => "slowpoke",
            EnemyKind::Centipede => "centipede",
        }
    }

    fn speed_span(&self, tuning: &Tuning) -> Span {
        match self {
            EnemyKind::Slowpoke => tuning.slowpoke_speed,
            _ => tuning.enemy_speed,
        }
    }

    fn width(&self, tuning: &Tuning) -> f32 {
        match self {
            EnemyKind::Centipede => tuning.centipede_width,
            _ => tuning.enemy_width,
        }
    }
}

/// A vertical step in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sidestep {
    pub target_y: f32,
    /// Signed vertical speed (positive = down)
    pub speed: f32,
}

/// Per-variant timer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Steady,
    Charger {
        interval: f64,
        next_roll: f64,
        /// Set while bursting; speed reverts when the clock reaches it
        burst_until: Option<f64>,
    },
    Sidestepper {
        interval: f64,
        next_roll: f64,
        step: Option<Sidestep>,
    },
    Backtracker {
        interval: f64,
        next_roll: f64,
    },
}

impl Behavior {
    fn for_kind(kind: EnemyKind, tuning: &Tuning, rng: &mut impl Rng, now: f64) -> Self {
        let mut roll_interval = |span: Span| ms(rng.random_range(span.0..=span.1));
        match kind {
            EnemyKind::Charger => {
                let interval = roll_interval(tuning.charger_interval_ms);
                Behavior::Charger {
                    interval,
                    next_roll: now + interval,
                    burst_until: None,
                }
            }
            EnemyKind::Sidestepper => {
                let interval = roll_interval(tuning.sidestepper_interval_ms);
                Behavior::Sidestepper {
                    interval,
                    next_roll: now + interval,
                    step: None,
                }
            }
            EnemyKind::Backtracker => {
                let interval = roll_interval(tuning.backtracker_interval_ms);
                Behavior::Backtracker {
                    interval,
                    next_roll: now + interval,
                }
            }
            EnemyKind::Basic | EnemyKind::Slowpoke | EnemyKind::Centipede => Behavior::Steady,
        }
    }

    /// Clear transient state and restart the timer from `now`, keeping the interval
    fn rearm(&mut self, now: f64) {
        match self {
            Behavior::Steady => {}
            Behavior::Charger {
                interval,
                next_roll,
                burst_until,
            } => {
                *next_roll = now + *interval;
                *burst_until = None;
            }
            Behavior::Sidestepper {
                interval,
                next_roll,
                step,
            } => {
                *next_roll = now + *interval;
                *step = None;
            }
            Behavior::Backtracker {
                interval,
                next_roll,
            } => {
                *next_roll = now + *interval;
            }
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left of the hit box
    pub pos: Vec2,
    /// Current signed horizontal speed (pixels/sec)
    pub speed: f32,
    /// Speed rolled at spawn; Chargers return to it after a burst
    pub cruise_speed: f32,
    pub width: f32,
    pub height: f32,
    pub behavior: Behavior,
}

impl Enemy {
    /// Spawn an enemy at a random lane position
    pub fn spawn(id: u32, kind: EnemyKind, tuning: &Tuning, rng: &mut impl Rng, now: f64) -> Self {
        let mut enemy = Self {
            id,
            kind,
            pos: Vec2::ZERO,
            speed: 0.0,
            cruise_speed: 0.0,
            width: kind.width(tuning),
            height: tuning.enemy_height,
            behavior: Behavior::for_kind(kind, tuning, rng, now),
        };
        enemy.place(tuning, rng);
        enemy
    }

    /// Re-roll position and speed after the player loses a life
    pub fn respawn(&mut self, tuning: &Tuning, rng: &mut impl Rng, now: f64) {
        self.place(tuning, rng);
        self.behavior.rearm(now);
    }

    fn place(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        self.pos.x = rng.random_range(-3..=4) as f32 * X_STEP;
        self.pos.y = random_lane(rng);
        let (lo, hi) = self.kind.speed_span(tuning);
        self.cruise_speed = rng.random_range(lo..=hi) as f32;
        self.speed = self.cruise_speed;
    }

    pub fn facing(&self) -> Facing {
        Facing::from_speed(self.speed)
    }

    pub fn is_charging(&self) -> bool {
        matches!(
            self.behavior,
            Behavior::Charger {
                burst_until: Some(_),
                ..
            }
        )
    }

    /// Fire any behavior timers that are due at `now`
    pub fn think(&mut self, now: f64, tuning: &Tuning, rng: &mut impl Rng) {
        let y = self.pos.y;
        match &mut self.behavior {
            Behavior::Steady => {}
            Behavior::Charger {
                interval,
                next_roll,
                burst_until,
            } => loop {
                // Process whichever event is due first
                let burst_over = burst_until.is_some_and(|end| end <= now && end <= *next_roll);
                if burst_over {
                    self.speed = self.cruise_speed;
                    *burst_until = None;
                    continue;
                }
                if *next_roll > now {
                    break;
                }
                let fired_at = *next_roll;
                *next_roll += *interval;
                if rng.random::<f64>() > tuning.charger_chance {
                    log::debug!("enemy {} charging", self.id);
                    self.speed = tuning.charger_speed;
                    *burst_until = Some(fired_at + ms(tuning.charger_burst_ms));
                }
            },
            Behavior::Sidestepper {
                interval,
                next_roll,
                step,
            } => {
                while *next_roll <= now {
                    *next_roll += *interval;
                    if rng.random::<f64>() > tuning.sidestepper_chance && step.is_none() {
                        *step = choose_sidestep(y, tuning.sidestep_speed, rng);
                        if let Some(s) = step {
                            log::debug!("enemy {} stepping to y={}", self.id, s.target_y);
                        }
                    }
                }
            }
            Behavior::Backtracker {
                interval,
                next_roll,
            } => {
                while *next_roll <= now {
                    *next_roll += *interval;
                    if rng.random::<f64>() > tuning.backtracker_chance {
                        log::debug!("enemy {} backtracking", self.id);
                        self.speed = -self.speed;
                    }
                }
            }
        }
    }

    /// Integrate position for `dt` seconds at the global speed multiplier
    pub fn advance(&mut self, dt: f32, speed_mult: f32, rng: &mut impl Rng) {
        self.pos.x += dt * self.speed * speed_mult;

        let step = match &self.behavior {
            Behavior::Sidestepper { step, .. } => *step,
            _ => None,
        };
        if let Some(s) = step {
            self.pos.y += dt * s.speed * speed_mult;
            let reached = (s.speed > 0.0 && self.pos.y >= s.target_y)
                || (s.speed < 0.0 && self.pos.y <= s.target_y);
            if reached {
                self.pos.y = s.target_y;
                self.clear_step();
            }
        }

        if self.kind == EnemyKind::Backtracker {
            let bounds = self.bounds();
            if bounds.left > X_RIGHT + 2.0 * X_STEP && self.speed > 0.0 {
                self.speed = -self.speed;
            } else if bounds.right < X_LEFT - 2.0 * X_STEP && self.speed < 0.0 {
                self.speed = -self.speed;
            }
        } else if self.pos.x > X_RIGHT {
            self.pos.x = -3.0 * X_STEP;
            self.pos.y = random_lane(rng);
            self.clear_step();
        }
    }

    fn clear_step(&mut self) {
        if let Behavior::Sidestepper { step, .. } = &mut self.behavior {
            *step = None;
        }
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// Pixel y of a random enemy lane (rows between the exit row and the start row)
fn random_lane(rng: &mut impl Rng) -> f32 {
    rng.random_range(1..START_ROW) as f32 * Y_STEP
}

/// Pick a one-row step that stays out of the exit and start rows
fn choose_sidestep(y: f32, speed: f32, rng: &mut impl Rng) -> Option<Sidestep> {
    let down = rng.random::<f64>() >= 0.5;
    if down && y < Y_BOTTOM - 2.0 * Y_STEP {
        Some(Sidestep {
            target_y: y + Y_STEP,
            speed,
        })
    } else if !down && y > Y_TOP + Y_STEP {
        Some(Sidestep {
            target_y: y - Y_STEP,
            speed: -speed,
        })
    } else {
        None
    }
}
