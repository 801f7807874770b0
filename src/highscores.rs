//! High score leaderboard system
//!
//! Persisted as a JSON file, tracks the top 10 finished runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::RunSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: i64,
    /// Level reached
    pub level: i32,
    /// Seed of the run, for replays
    pub seed: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Set when the file on disk could not be read; saving is skipped so it
    /// is never clobbered
    #[serde(skip)]
    read_only: bool,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            read_only: false,
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, summary: RunSummary, seed: u64) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: summary.score,
            level: summary.level,
            seed,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard; a missing file is an empty board
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let scores: Self = serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Load the leaderboard, falling back to an empty, read-only board when
    /// the file exists but cannot be read or parsed
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("{e}; this session's scores will not be saved");
                Self {
                    read_only: true,
                    ..Self::new()
                }
            }
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if self.read_only {
            log::warn!("Not saving high scores over unreadable {}", path.display());
            return Ok(());
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
