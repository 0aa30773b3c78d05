//! Dragonfire - a two-stage arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, stage controllers)
//! - `session`: Stage sequencing, score/lives/level bookkeeping
//! - `renderer`: Canvas abstraction plus the terminal canvas
//! - `platform`: Engine context, input sources, frame pacing
//! - `audio`: Fire-and-forget sound cues
//! - `settings` / `highscores`: Configuration and the high-score file

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use highscores::HighScore;
pub use session::{Session, SessionSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 30;

    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;

    /// Stage one drawbridge surface (player bottom when standing)
    pub const GROUND_Y: i32 = 312;
    /// Highest point the player's top edge may reach
    pub const CEILING_Y: i32 = 31;
    /// Lowest point the player's bottom edge may reach in stage two
    pub const STAGE_TWO_FLOOR_Y: i32 = 370;

    /// Player walking speed before the level bonus
    pub const WALK_SPEED: i32 = 8;
    /// Upward velocity granted by a jump
    pub const JUMP_IMPULSE: i32 = 6;
    /// Velocity lost per tick while airborne
    pub const GRAVITY: i32 = 1;

    /// Lives at session start
    pub const STARTING_LIVES: u32 = 7;
    /// Treasures placed in every stage two run
    pub const TREASURE_COUNT: usize = 10;
    /// Completed stage pairs per difficulty level
    pub const PAIRS_PER_LEVEL: u32 = 3;
}
