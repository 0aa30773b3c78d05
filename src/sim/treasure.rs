//! Treasure scattered around the dragon's room
//!
//! Placement is rejection-sampled against the treasures placed before it.
//! Collected treasure is parked below the playfield instead of removed, so
//! the backing list keeps its length and indices stay valid.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::{SpriteKind, TREASURE_SIZE};

/// Possible treasure values
pub const TREASURE_VALUES: [u32; 5] = [10, 20, 30, 40, 50];
/// Spawn ranges (half-open) for the left and bottom edges
pub const SPAWN_LEFT: std::ops::Range<i32> = 10..500;
pub const SPAWN_BOTTOM: std::ops::Range<i32> = 50..370;
/// Bottom edge of collected treasure, below the visible field
pub const COLLECTED_BOTTOM: i32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub rect: Rect,
    pub value: u32,
    pub collected: bool,
}

impl Treasure {
    /// Place a new treasure clear of every treasure in `existing`
    pub fn spawn<R: Rng>(existing: &[Treasure], rng: &mut R) -> Self {
        let value = TREASURE_VALUES[rng.random_range(0..TREASURE_VALUES.len())];
        let mut rect = random_rect(rng);
        while existing.iter().any(|t| t.rect.intersects(&rect)) {
            rect = random_rect(rng);
        }
        Self {
            rect,
            value,
            collected: false,
        }
    }

    /// Take the treasure out of play; returns its value
    pub fn collect(&mut self) -> u32 {
        self.collected = true;
        self.rect.set_bottom(COLLECTED_BOTTOM);
        self.value
    }

    pub fn sprite(&self) -> SpriteKind {
        SpriteKind::Treasure((self.value / 10) as u8)
    }
}

fn random_rect<R: Rng>(rng: &mut R) -> Rect {
    let left = rng.random_range(SPAWN_LEFT);
    let bottom = rng.random_range(SPAWN_BOTTOM);
    Rect::from_left_bottom(IVec2::new(left, bottom), TREASURE_SIZE)
}

impl Entity for Treasure {
    fn tick(&mut self) {}

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_alive(&self) -> bool {
        !self.collected
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Sprite {
            kind: self.sprite(),
            rect: self.rect,
        });
    }
}
