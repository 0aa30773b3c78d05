//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dragon;
pub mod entity;
pub mod fireball;
pub mod hud;
pub mod input;
pub mod player;
pub mod portal;
pub mod rect;
pub mod sprite;
pub mod stage_one;
pub mod stage_two;
pub mod state;
pub mod tick;
pub mod treasure;

pub use entity::{DrawCommand, Entity, Roster, Slot};
pub use input::{HeldKeys, InputEvent, Key};
pub use rect::Rect;
pub use sprite::{Facing, SpriteKind};
pub use stage_one::StageOne;
pub use stage_two::StageTwo;
pub use state::{GameEvent, StageCommon, StageKind, StageOutcome, StagePhase, StageReport};
pub use tick::{Stage, TickInput, tick};
