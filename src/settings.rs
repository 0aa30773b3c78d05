//! Game settings and preferences
//!
//! Stored as JSON beside the game. Anything missing or unreadable falls back
//! to defaults so a broken settings file never stops the game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::highscores::DEFAULT_HIGH_SCORE_FILE;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "dragonfire.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File holding the recorded high score
    pub high_score_path: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Pause after the music fade-out before exiting
    pub fadeout_ms: u64,

    // === Determinism ===
    /// Treasure placement seed; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            fadeout_ms: 2000,

            seed: None,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!(
                    "Settings file {} unavailable ({}), using defaults",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.clamped()
            }
            Err(err) => {
                log::warn!(
                    "Settings file {} is invalid ({}), using defaults",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load settings, first writing the defaults out if there is no file yet
    pub fn load_or_create(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        let settings = Self::default();
        if let Err(err) = settings.save(path) {
            log::warn!("{}, continuing with defaults", err);
        }
        settings
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(GameError::SettingsEncode)?;
        fs::write(path, json).map_err(|source| GameError::SettingsWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Volumes pulled back into 0.0 - 1.0
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }
}
