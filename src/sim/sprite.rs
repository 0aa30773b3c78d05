//! Sprite catalogue
//!
//! Every visual an entity can show, with the pixel dimensions of its image.
//! The dimensions double as collision bounds, so they live with the
//! simulation rather than the renderer.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing shared by the player and the dragon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Two-image animation cycle (running player, flickering fireball)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimFrame {
    #[default]
    First,
    Second,
}

impl AnimFrame {
    pub fn toggled(self) -> Self {
        match self {
            AnimFrame::First => AnimFrame::Second,
            AnimFrame::Second => AnimFrame::First,
        }
    }
}

/// Dragon walk cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WalkFrame {
    #[default]
    First,
    Second,
    Third,
}

/// A drawable image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { facing: Facing, frame: AnimFrame },
    PlayerCrouched { facing: Facing },
    SideFireball(AnimFrame),
    UpFireball(AnimFrame),
    Dragon { facing: Facing, frame: WalkFrame },
    DragonShoot { facing: Facing },
    /// Stage one portals are invisible trigger zones
    PortalHidden,
    PortalOpen,
    PortalClosed,
    /// Treasure art tier, 1..=5 (value / 10)
    Treasure(u8),
    Life,
}

pub const PLAYER_SIZE: IVec2 = IVec2::new(26, 42);
pub const PLAYER_CROUCHED_SIZE: IVec2 = IVec2::new(30, 26);
pub const SIDE_FIREBALL_SIZE: IVec2 = IVec2::new(30, 16);
pub const UP_FIREBALL_SIZE: IVec2 = IVec2::new(16, 30);
pub const DRAGON_SIZE: IVec2 = IVec2::new(140, 64);
pub const HIDDEN_PORTAL_SIZE: IVec2 = IVec2::new(20, 35);
pub const PORTAL_SIZE: IVec2 = IVec2::new(48, 64);
pub const TREASURE_SIZE: IVec2 = IVec2::new(24, 24);
pub const LIFE_SIZE: IVec2 = IVec2::new(20, 20);

impl SpriteKind {
    /// Image dimensions in pixels
    pub fn size(&self) -> IVec2 {
        match self {
            SpriteKind::Player { .. } => PLAYER_SIZE,
            SpriteKind::PlayerCrouched { .. } => PLAYER_CROUCHED_SIZE,
            SpriteKind::SideFireball(_) => SIDE_FIREBALL_SIZE,
            SpriteKind::UpFireball(_) => UP_FIREBALL_SIZE,
            SpriteKind::Dragon { .. } | SpriteKind::DragonShoot { .. } => DRAGON_SIZE,
            SpriteKind::PortalHidden => HIDDEN_PORTAL_SIZE,
            SpriteKind::PortalOpen | SpriteKind::PortalClosed => PORTAL_SIZE,
            SpriteKind::Treasure(_) => TREASURE_SIZE,
            SpriteKind::Life => LIFE_SIZE,
        }
    }

    /// Image file an asset loader should resolve for this sprite
    pub fn asset_name(&self) -> &'static str {
        use AnimFrame::{First, Second};
        use Facing::{Left, Right};

        match *self {
            SpriteKind::Player { facing: Left, frame: First } => "playerLeft1.png",
            SpriteKind::Player { facing: Left, frame: Second } => "playerLeft2.png",
            SpriteKind::Player { facing: Right, frame: First } => "playerRight1.png",
            SpriteKind::Player { facing: Right, frame: Second } => "playerRight2.png",
            SpriteKind::PlayerCrouched { facing: Left } => "playerLeftCrouched.png",
            SpriteKind::PlayerCrouched { facing: Right } => "playerRightCrouched.png",
            SpriteKind::SideFireball(First) => "sideFireball1.png",
            SpriteKind::SideFireball(Second) => "sideFireball2.png",
            SpriteKind::UpFireball(First) => "upFireball1.png",
            SpriteKind::UpFireball(Second) => "upFireball2.png",
            SpriteKind::Dragon { facing, frame } => match (facing, frame) {
                (Left, WalkFrame::First) => "dragonLeft1.png",
                (Left, WalkFrame::Second) => "dragonLeft2.png",
                (Left, WalkFrame::Third) => "dragonLeft3.png",
                (Right, WalkFrame::First) => "dragonRight1.png",
                (Right, WalkFrame::Second) => "dragonRight2.png",
                (Right, WalkFrame::Third) => "dragonRight3.png",
            },
            SpriteKind::DragonShoot { facing: Left } => "dragonLeftShoot.png",
            SpriteKind::DragonShoot { facing: Right } => "dragonRightShoot.png",
            SpriteKind::PortalHidden => "",
            SpriteKind::PortalOpen => "openPortal.png",
            SpriteKind::PortalClosed => "closedPortal.png",
            SpriteKind::Treasure(1) => "treasure1.png",
            SpriteKind::Treasure(2) => "treasure2.png",
            SpriteKind::Treasure(3) => "treasure3.png",
            SpriteKind::Treasure(4) => "treasure4.png",
            SpriteKind::Treasure(_) => "treasure5.png",
            SpriteKind::Life => "playerLife.png",
        }
    }
}
