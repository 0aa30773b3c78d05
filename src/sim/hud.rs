//! Heads-up display projections
//!
//! Score, high score and remaining lives along the bottom of the screen.
//! These carry no gameplay state of their own beyond the numbers they show.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::{LIFE_SIZE, SpriteKind};

pub const SCORE_CENTER: IVec2 = IVec2::new(500, 451);
pub const HIGH_SCORE_CENTER: IVec2 = IVec2::new(150, 451);
/// Life icon n (1-based) sits at left = LIFE_ORIGIN_X + LIFE_SPACING * n
pub const LIFE_ORIGIN_X: i32 = 198;
pub const LIFE_SPACING: i32 = 30;
pub const LIFE_BOTTOM: i32 = 477;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Current,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDisplay {
    pub label: ScoreLabel,
    score: u64,
}

impl ScoreDisplay {
    pub fn new(label: ScoreLabel, score: u64) -> Self {
        Self { label, score }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Credit points; the score only ever grows
    pub fn add(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn text(&self) -> String {
        match self.label {
            ScoreLabel::Current => format!("Score: {}", self.score),
            ScoreLabel::High => format!("High Score: {}", self.score),
        }
    }

    fn center(&self) -> IVec2 {
        match self.label {
            ScoreLabel::Current => SCORE_CENTER,
            ScoreLabel::High => HIGH_SCORE_CENTER,
        }
    }
}

impl Entity for ScoreDisplay {
    fn tick(&mut self) {}

    /// Rough text box: 12px per glyph, 30px tall
    fn bounds(&self) -> Rect {
        let width = self.text().len() as i32 * 12;
        Rect::from_center(self.center(), IVec2::new(width, 30))
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Text {
            text: self.text(),
            center: self.center(),
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeIndicator {
    lives: u32,
}

impl LifeIndicator {
    pub fn new(lives: u32) -> Self {
        Self { lives }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Take one life; never drops below zero. Returns the lives left.
    pub fn lose_one(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Icon rect for life `n` (1-based)
    pub fn icon_rect(n: u32) -> Rect {
        let left = LIFE_ORIGIN_X + LIFE_SPACING * n as i32;
        Rect::from_left_bottom(IVec2::new(left, LIFE_BOTTOM), LIFE_SIZE)
    }
}

impl Entity for LifeIndicator {
    fn tick(&mut self) {}

    fn bounds(&self) -> Rect {
        let first = Self::icon_rect(1);
        Rect::new(
            first.left(),
            first.top(),
            LIFE_SPACING * self.lives as i32,
            first.height(),
        )
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.extend((1..=self.lives).map(|n| DrawCommand::Sprite {
            kind: SpriteKind::Life,
            rect: Self::icon_rect(n),
        }));
    }
}
