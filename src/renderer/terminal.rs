//! Terminal canvas
//!
//! Maps the 640x480 playfield onto an 80x30 grid of character cells, one
//! cell per 8x16 pixels, and repaints the whole grid every frame.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::IVec2;

use super::{Canvas, background_asset};
use crate::consts::{GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::sim::{Rect, SpriteKind, StageKind};

pub const CELL_WIDTH: i32 = 8;
pub const CELL_HEIGHT: i32 = 16;
pub const COLUMNS: usize = (SCREEN_WIDTH / CELL_WIDTH) as usize;
pub const ROWS: usize = (SCREEN_HEIGHT / CELL_HEIGHT) as usize;

const C_BACKGROUND: Color = Color::Reset;
const C_BRIDGE: Color = Color::DarkYellow;
const C_TEXT: Color = Color::White;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: C_BACKGROUND,
};

/// Glyph and colour standing in for each sprite
fn glyph(kind: SpriteKind) -> Option<Cell> {
    let (glyph, color) = match kind {
        SpriteKind::Player { .. } => ('@', Color::White),
        SpriteKind::PlayerCrouched { .. } => ('o', Color::White),
        SpriteKind::SideFireball(_) => ('~', Color::Red),
        SpriteKind::UpFireball(_) => ('^', Color::Red),
        SpriteKind::Dragon { .. } => ('D', Color::Green),
        SpriteKind::DragonShoot { .. } => ('D', Color::DarkRed),
        SpriteKind::PortalHidden => return None,
        SpriteKind::PortalOpen => ('O', Color::Magenta),
        SpriteKind::PortalClosed => ('#', Color::DarkMagenta),
        SpriteKind::Treasure(_) => ('$', Color::Yellow),
        SpriteKind::Life => ('♥', Color::Red),
    };
    Some(Cell { glyph, color })
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cells: Vec<Cell>,
    background: Option<StageKind>,
}

impl TerminalCanvas<BufWriter<Stdout>> {
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: vec![BLANK; COLUMNS * ROWS],
            background: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= COLUMNS as i32 || row >= ROWS as i32 {
            return;
        }
        self.cells[row as usize * COLUMNS + col as usize] = cell;
    }

    /// Text of one row, for inspection
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * COLUMNS..(row + 1) * COLUMNS]
            .iter()
            .map(|c| c.glyph)
            .collect()
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, stage: StageKind) {
        if self.background != Some(stage) {
            log::debug!("Background {}", background_asset(stage));
            self.background = Some(stage);
        }
        self.cells.fill(BLANK);

        // Drawbridge deck under the player's feet
        if stage == StageKind::One {
            let row = GROUND_Y / CELL_HEIGHT;
            for col in 0..COLUMNS as i32 {
                self.put(
                    col,
                    row,
                    Cell {
                        glyph: '=',
                        color: C_BRIDGE,
                    },
                );
            }
        }
    }

    fn draw_sprite(&mut self, kind: SpriteKind, rect: Rect) {
        let Some(cell) = glyph(kind) else {
            return;
        };
        let first_col = rect.left().div_euclid(CELL_WIDTH);
        let last_col = (rect.right() - 1).div_euclid(CELL_WIDTH);
        let first_row = rect.top().div_euclid(CELL_HEIGHT);
        let last_row = (rect.bottom() - 1).div_euclid(CELL_HEIGHT);
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                self.put(col, row, cell);
            }
        }
    }

    fn draw_text(&mut self, text: &str, center: IVec2) {
        let row = center.y.div_euclid(CELL_HEIGHT);
        let start = center.x.div_euclid(CELL_WIDTH) - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(
                start + i as i32,
                row,
                Cell {
                    glyph: ch,
                    color: C_TEXT,
                },
            );
        }
    }

    fn present(&mut self) -> Result<(), GameError> {
        let out = &mut self.out;
        out.queue(terminal::BeginSynchronizedUpdate)?;
        let mut color = None;
        for (row, cells) in self.cells.chunks(COLUMNS).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if color != Some(cell.color) {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                out.queue(Print(cell.glyph))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.queue(terminal::EndSynchronizedUpdate)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::{AnimFrame, Facing, PLAYER_SIZE};

    fn canvas() -> TerminalCanvas<Vec<u8>> {
        TerminalCanvas::new(Vec::new())
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(COLUMNS, 80);
        assert_eq!(ROWS, 30);
    }

    #[test]
    fn test_sprite_covers_its_cells() {
        let mut canvas = canvas();
        canvas.clear(StageKind::Two);
        let rect = Rect::from_left_bottom(IVec2::new(16, 64), PLAYER_SIZE);
        canvas.draw_sprite(
            SpriteKind::Player {
                facing: Facing::Left,
                frame: AnimFrame::First,
            },
            rect,
        );
        // x 16..42 -> cols 2..=5, y 22..64 -> rows 1..=3
        assert_eq!(&canvas.row_text(2)[..7], "  @@@@ ");
        assert_eq!(canvas.row_text(0).trim(), "");
        assert_eq!(canvas.row_text(4).trim(), "");
    }

    #[test]
    fn test_offscreen_sprites_are_clipped() {
        let mut canvas = canvas();
        canvas.clear(StageKind::Two);
        let rect = Rect::from_left_bottom(IVec2::new(700, 500), PLAYER_SIZE);
        canvas.draw_sprite(SpriteKind::Treasure(3), rect);
        assert!((0..ROWS).all(|row| !canvas.row_text(row).contains('$')));
    }

    #[test]
    fn test_text_is_centred() {
        let mut canvas = canvas();
        canvas.clear(StageKind::One);
        canvas.draw_text("Score: 7", IVec2::new(320, 451));
        let row = canvas.row_text(451 / CELL_HEIGHT as usize);
        assert_eq!(row.find("Score: 7"), Some(36));
    }

    #[test]
    fn test_present_writes_frame() {
        let mut canvas = canvas();
        canvas.clear(StageKind::One);
        canvas.draw_text("High Score: 12", IVec2::new(150, 451));
        canvas.present().expect("vec writer");
        let bytes = canvas.into_inner();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("High Score: 12"));
        assert!(text.contains("===="));
    }
}
