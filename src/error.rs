//! Library error type

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Errors surfaced by the game library
#[derive(Debug)]
pub enum GameError {
    /// High-score file could not be opened or read
    HighScoreRead { path: PathBuf, source: io::Error },
    /// High-score file did not hold a single integer
    HighScoreParse {
        path: PathBuf,
        contents: String,
        source: ParseIntError,
    },
    HighScoreWrite { path: PathBuf, source: io::Error },
    SettingsWrite { path: PathBuf, source: io::Error },
    SettingsEncode(serde_json::Error),
    /// Terminal or other platform I/O failure
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::HighScoreRead { path, .. } => {
                write!(f, "Cannot read high score file {}", path.display())
            }
            GameError::HighScoreParse { path, contents, .. } => write!(
                f,
                "High score file {} does not hold an integer: {:?}",
                path.display(),
                contents
            ),
            GameError::HighScoreWrite { path, .. } => {
                write!(f, "Cannot write high score file {}", path.display())
            }
            GameError::SettingsWrite { path, .. } => {
                write!(f, "Cannot write settings file {}", path.display())
            }
            GameError::SettingsEncode(_) => write!(f, "Cannot encode settings"),
            GameError::Io(_) => write!(f, "Platform I/O failed"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::HighScoreRead { source, .. }
            | GameError::HighScoreWrite { source, .. }
            | GameError::SettingsWrite { source, .. } => Some(source),
            GameError::HighScoreParse { source, .. } => Some(source),
            GameError::SettingsEncode(source) => Some(source),
            GameError::Io(source) => Some(source),
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}
