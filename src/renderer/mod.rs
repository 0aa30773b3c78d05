//! Rendering
//!
//! The simulation produces a list of draw commands; a `Canvas` turns them
//! into pixels, cells or nothing at all.

pub mod terminal;

use glam::IVec2;

use crate::error::GameError;
use crate::sim::{DrawCommand, Rect, SpriteKind, Stage, StageKind};

pub use terminal::TerminalCanvas;

/// Rendering surface
pub trait Canvas {
    /// Fill with the background image of `stage`
    fn clear(&mut self, stage: StageKind);
    fn draw_sprite(&mut self, kind: SpriteKind, rect: Rect);
    /// Draw `text` centred on `center`
    fn draw_text(&mut self, text: &str, center: IVec2);
    /// Show the finished frame
    fn present(&mut self) -> Result<(), GameError>;
}

/// Background image for each stage
pub fn background_asset(stage: StageKind) -> &'static str {
    match stage {
        StageKind::One => "backgroundStage1.jpg",
        StageKind::Two => "backgroundStage2.png",
    }
}

/// Draw the whole stage, in roster order, and present it
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, stage: &Stage) -> Result<(), GameError> {
    canvas.clear(stage.kind());
    for command in stage.draw_list() {
        match command {
            DrawCommand::Sprite { kind, rect } => canvas.draw_sprite(kind, rect),
            DrawCommand::Text { text, center } => canvas.draw_text(&text, center),
        }
    }
    canvas.present()
}

/// Canvas that keeps the last frame in memory
#[derive(Debug, Default)]
pub struct NullCanvas {
    /// Frames presented so far
    pub frames: u64,
    pub background: Option<StageKind>,
    pending: Vec<DrawCommand>,
    /// Commands of the most recently presented frame
    pub last_frame: Vec<DrawCommand>,
}

impl NullCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for NullCanvas {
    fn clear(&mut self, stage: StageKind) {
        self.background = Some(stage);
        self.pending.clear();
    }

    fn draw_sprite(&mut self, kind: SpriteKind, rect: Rect) {
        self.pending.push(DrawCommand::Sprite { kind, rect });
    }

    fn draw_text(&mut self, text: &str, center: IVec2) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            center,
        });
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.frames += 1;
        self.last_frame = std::mem::take(&mut self.pending);
        Ok(())
    }
}
