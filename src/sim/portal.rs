//! Portals
//!
//! In stage one portals are invisible trigger zones at each end of the
//! drawbridge. In stage two they are visible and the start portal closes
//! while the player hides inside it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::SpriteKind;
use super::state::StageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalLook {
    Hidden,
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub rect: Rect,
    pub look: PortalLook,
}

impl Portal {
    /// Place a portal with its bottom-left corner at `anchor`
    pub fn new(stage: StageKind, anchor: IVec2) -> Self {
        let look = match stage {
            StageKind::One => PortalLook::Hidden,
            StageKind::Two => PortalLook::Open,
        };
        let mut portal = Self {
            rect: Rect::default(),
            look,
        };
        portal.rect = Rect::from_left_bottom(anchor, portal.sprite().size());
        portal
    }

    /// Swap between the open and closed images
    pub fn toggle(&mut self) {
        self.look = match self.look {
            PortalLook::Open => PortalLook::Closed,
            PortalLook::Closed => PortalLook::Open,
            PortalLook::Hidden => PortalLook::Hidden,
        };
    }

    /// Bottom-left corner, the reference point for player spawns
    pub fn anchor(&self) -> IVec2 {
        IVec2::new(self.rect.left(), self.rect.bottom())
    }

    pub fn sprite(&self) -> SpriteKind {
        match self.look {
            PortalLook::Hidden => SpriteKind::PortalHidden,
            PortalLook::Open => SpriteKind::PortalOpen,
            PortalLook::Closed => SpriteKind::PortalClosed,
        }
    }
}

impl Entity for Portal {
    fn tick(&mut self) {}

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        if self.look != PortalLook::Hidden {
            out.push(DrawCommand::Sprite {
                kind: self.sprite(),
                rect: self.rect,
            });
        }
    }
}
