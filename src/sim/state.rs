//! Game state and the types the host observes
//!
//! `GameState` is the run-level bookkeeping (level, score, speed, modifiers).
//! It is replaced wholesale on a full reset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::item::ItemKind;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Position updates and timers suspended; a notice may be pending
    Paused,
    /// Exit reached; the next level is being built
    LevelTransition,
    /// Lives exhausted; the run is being reinitialized
    GameOver,
}

/// Named game modifiers unlocked through developer commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// Every enemy is drawn as a cow
    Cows,
    /// Enemies die on contact with the player
    Invincible,
    /// Short range attack on `a` / `d`
    ShortRangeAttack,
    /// Immune to enemies and water, key kept across levels, wide attack on `q` / `e`
    Udacious,
    /// Controls reversed, level counts down, score penalized, colors inverted
    TimeReversal,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Cows,
        Modifier::Invincible,
        Modifier::ShortRangeAttack,
        Modifier::Udacious,
        Modifier::TimeReversal,
    ];

    /// The exact command string that activates this modifier
    pub fn command(&self) -> &'static str {
        match self {
            Modifier::Cows => "there is no cow level",
            Modifier::Invincible => "I AM INVINCIBLE!!!",
            Modifier::ShortRangeAttack => "Street fighter is cool",
            Modifier::Udacious => "This game is completely Udacious!!!",
            Modifier::TimeReversal => "Hot tub time machine",
        }
    }

    pub fn from_command(command: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.command() == command)
    }
}

/// Level and score captured at the moment the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub level: i32,
    pub score: i64,
}

/// A blocking message for the host to present. The game stays paused until
/// the host calls the matching continuation on the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    Paused,
    Death { lives_left: u8 },
    GameOver(RunSummary),
    DeveloperUnlocked,
    /// Free-text prompt; answer with `World::submit_command`
    CommandPrompt,
    ModifierActivated(Modifier),
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelCompleted { level: i32, points: i64 },
    LifeLost { lives_left: u8 },
    GameOver(RunSummary),
    ItemCollected(ItemKind),
    EnemyDestroyed { id: u32 },
    ModifierActivated(Modifier),
    DeveloperModeUnlocked,
}

/// Run-level bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level; counts below zero under time reversal
    pub level: i32,
    pub score: i64,
    /// Global speed multiplier, starts at 1
    pub speed: f32,
    pub phase: GamePhase,
    pub modifiers: BTreeSet<Modifier>,
    /// Attack-name overlay stays up until this clock time
    pub shout_until: Option<f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            speed: 1.0,
            phase: GamePhase::Playing,
            modifiers: BTreeSet::new(),
            shout_until: None,
        }
    }
}

impl GameState {
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn reversed(&self) -> bool {
        self.has(Modifier::TimeReversal)
    }

    pub fn shout_active(&self, now: f64) -> bool {
        self.shout_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup() {
        for m in Modifier::ALL {
            assert_eq!(Modifier::from_command(m.command()), Some(m));
        }
        assert_eq!(Modifier::from_command("there is no spoon"), None);
        // Exact match only
        assert_eq!(Modifier::from_command("i am invincible!!!"), None);
    }

    #[test]
    fn test_default_state() {
        let s = GameState::default();
        assert_eq!(s.level, 1);
        assert_eq!(s.speed, 1.0);
        assert!(!s.is_paused());
        assert!(!s.reversed());
    }
}
