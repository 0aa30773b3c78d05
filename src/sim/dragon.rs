//! The stage two dragon
//!
//! Paces along the bottom of the treasure room. The stage decides when it
//! fires; the dragon only tracks its walk cycle and the shoot pose.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::{DRAGON_SIZE, Facing, SpriteKind, WalkFrame};
use crate::consts::SCREEN_WIDTH;

/// Bottom-left corner at spawn
pub const DRAGON_SPAWN: IVec2 = IVec2::new(100, 424);
/// Horizontal speed before the level bonus
pub const DRAGON_BASE_SPEED: i32 = 10;
/// Ticks a walk frame is held before the next tick refreshes it
pub const WALK_FRAME_HOLD: u32 = 3;
/// Ticks the shoot pose stays on screen
pub const SHOOT_POSE_TICKS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragonMode {
    Walking,
    Shooting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dragon {
    pub rect: Rect,
    pub dx: i32,
    pub facing: Facing,
    pub mode: DragonMode,
    pub frame: WalkFrame,
    /// Wraps 1, 2, 3 every tick; picks the next walk frame
    walk_index: u8,
    walk_counter: u32,
    shoot_counter: u32,
}

impl Dragon {
    pub fn new(level: u32) -> Self {
        Self {
            rect: Rect::from_left_bottom(DRAGON_SPAWN, DRAGON_SIZE),
            dx: DRAGON_BASE_SPEED + level as i32,
            facing: Facing::Right,
            mode: DragonMode::Walking,
            frame: WalkFrame::First,
            walk_index: 1,
            walk_counter: 0,
            shoot_counter: 0,
        }
    }

    /// Hold the shoot pose for the next `SHOOT_POSE_TICKS` ticks
    pub fn set_shooting(&mut self) {
        self.mode = DragonMode::Shooting;
    }

    pub fn is_shooting(&self) -> bool {
        self.mode == DragonMode::Shooting
    }

    /// Whether `x` lies strictly between the dragon's left and right edges
    pub fn spans(&self, x: i32) -> bool {
        x > self.rect.left() && x < self.rect.right()
    }

    /// Bottom-left launch point for a fireball out of the dragon's mouth
    pub fn mouth(&self, launch_y: i32) -> IVec2 {
        let center_x = self.rect.center().x;
        match self.facing {
            Facing::Right => IVec2::new(center_x + 30, launch_y),
            Facing::Left => IVec2::new(center_x - 70, launch_y),
        }
    }

    pub fn sprite(&self) -> SpriteKind {
        match self.mode {
            DragonMode::Shooting => SpriteKind::DragonShoot {
                facing: self.facing,
            },
            DragonMode::Walking => SpriteKind::Dragon {
                facing: self.facing,
                frame: self.frame,
            },
        }
    }

    fn pace(&mut self) {
        self.rect.pos.x += self.dx;
        if self.rect.left() <= 0 {
            self.dx = self.dx.abs();
            self.facing = Facing::Right;
        } else if self.rect.right() >= SCREEN_WIDTH {
            self.dx = -self.dx.abs();
            self.facing = Facing::Left;
        }
    }

    fn animate(&mut self) {
        match self.mode {
            DragonMode::Walking => {
                if self.walk_counter >= WALK_FRAME_HOLD {
                    self.frame = match self.walk_index {
                        1 => WalkFrame::Second,
                        2 => WalkFrame::Third,
                        _ => WalkFrame::First,
                    };
                    self.walk_counter = 0;
                } else {
                    self.walk_counter += 1;
                }
                self.walk_index = self.walk_index % 3 + 1;
            }
            DragonMode::Shooting => {
                if self.shoot_counter == SHOOT_POSE_TICKS {
                    self.mode = DragonMode::Walking;
                    self.walk_index = 1;
                    self.shoot_counter = 0;
                } else {
                    self.shoot_counter += 1;
                }
            }
        }
    }
}

impl Entity for Dragon {
    fn tick(&mut self) {
        self.pace();
        self.animate();
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Sprite {
            kind: self.sprite(),
            rect: self.rect,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_speed_scales_with_level() {
        assert_eq!(Dragon::new(0).dx, 10);
        assert_eq!(Dragon::new(3).dx, 13);
        assert_eq!(Dragon::new(0).rect.bottom(), 424);
    }

    #[test]
    fn test_reverses_at_edges() {
        let mut dragon = Dragon::new(0);
        for _ in 0..40 {
            dragon.tick();
        }
        assert_eq!(dragon.rect.right(), SCREEN_WIDTH);
        assert_eq!(dragon.facing, Facing::Left);
        assert!(dragon.dx < 0);

        for _ in 0..50 {
            dragon.tick();
        }
        assert_eq!(dragon.rect.left(), 0);
        assert_eq!(dragon.facing, Facing::Right);
        assert!(dragon.dx > 0);
    }

    #[test]
    fn test_walk_cycle_visits_every_frame() {
        let mut dragon = Dragon::new(0);
        let mut seen = Vec::new();
        for tick in 1..=12 {
            dragon.tick();
            if tick % 4 == 0 {
                seen.push(dragon.frame);
            }
        }
        assert_eq!(seen, vec![WalkFrame::Second, WalkFrame::Third, WalkFrame::First]);
    }

    #[test]
    fn test_shoot_pose_lasts_six_ticks() {
        let mut dragon = Dragon::new(0);
        dragon.set_shooting();
        for _ in 0..SHOOT_POSE_TICKS {
            dragon.tick();
            assert!(dragon.is_shooting());
            assert!(matches!(dragon.sprite(), SpriteKind::DragonShoot { .. }));
        }
        dragon.tick();
        assert!(!dragon.is_shooting());
        assert_eq!(dragon.walk_index, 1);
    }

    #[test]
    fn test_spans_is_strict() {
        let dragon = Dragon::new(0);
        assert!(!dragon.spans(dragon.rect.left()));
        assert!(dragon.spans(dragon.rect.left() + 1));
        assert!(!dragon.spans(dragon.rect.right()));
    }

    #[test]
    fn test_mouth_follows_facing() {
        let mut dragon = Dragon::new(0);
        let center = dragon.rect.center().x;
        assert_eq!(dragon.mouth(380), IVec2::new(center + 30, 380));
        dragon.facing = Facing::Left;
        assert_eq!(dragon.mouth(380), IVec2::new(center - 70, 380));
    }
}
