//! High score persistence
//!
//! A plain text file holding one integer. Read once when the session
//! starts; overwritten at the end only when the record was beaten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GameError;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highScores.txt";

/// The recorded best score and where it lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    path: PathBuf,
    score: u64,
}

impl HighScore {
    /// Read the record. A missing or unparsable file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|source| GameError::HighScoreRead {
            path: path.clone(),
            source,
        })?;
        let score = contents
            .trim()
            .parse::<u64>()
            .map_err(|source| GameError::HighScoreParse {
                path: path.clone(),
                contents: contents.clone(),
                source,
            })?;

        log::info!("Loaded high score {} from {}", score, path.display());
        Ok(Self { path, score })
    }

    /// Write a zero record if no file exists yet. Returns true if created.
    pub fn create_if_missing(path: impl AsRef<Path>) -> Result<bool, GameError> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        Self::write(path, 0)?;
        log::info!("Created high score file {}", path.display());
        Ok(true)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `score` if it beats the record. Returns true if written.
    pub fn record(&mut self, score: u64) -> Result<bool, GameError> {
        if score <= self.score {
            log::debug!("Score {} does not beat high score {}", score, self.score);
            return Ok(false);
        }
        Self::write(&self.path, score)?;
        self.score = score;
        log::info!("New high score {} written to {}", score, self.path.display());
        Ok(true)
    }

    fn write(path: &Path, score: u64) -> Result<(), GameError> {
        fs::write(path, score.to_string()).map_err(|source| GameError::HighScoreWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
