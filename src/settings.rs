//! Runner settings
//!
//! Loaded from an optional JSON file; every field falls back to its default,
//! so a settings file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Settings for the headless driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
    /// Display frames to simulate before exiting
    pub frames: u64,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Where finished runs are recorded
    pub highscores_path: PathBuf,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            // Five minutes at 60 fps
            frames: 18_000,
            autopilot: true,
            log_filter: "info".to_string(),
            highscores_path: PathBuf::from("highscores.json"),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        settings.tuning.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings and validate the embedded tuning
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }
}
