//! Fireballs
//!
//! Stage one fires them along two lanes across the drawbridge; stage two has
//! the dragon spit them straight up. A fireball dies when it passes its
//! terminal coordinate or when it hits the player.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::{AnimFrame, SIDE_FIREBALL_SIZE, SpriteKind, UP_FIREBALL_SIZE};
use super::state::StageKind;

/// Lane height that selects the slow divisor
pub const BOTTOM_LANE_Y: i32 = 305;
pub const TOP_LANE_Y: i32 = 280;
/// Stage one lanes end here (just short of the start portal)
pub const LANE_END_X: i32 = 550;
/// Tick divisors for the two stage one lanes
pub const TOP_LANE_TICKS: f32 = 30.0;
pub const BOTTOM_LANE_TICKS: f32 = 70.0;
/// Base upward speed of a dragon fireball
pub const UP_SPEED: f32 = 7.0;
/// Ticks a flicker frame is held before the next tick flips it
pub const FLICKER_HOLD: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub stage: StageKind,
    /// Bottom-left corner, sub-pixel
    pub pos: Vec2,
    pub vel: Vec2,
    /// Despawn coordinate (x in stage one, y in stage two)
    pub end: IVec2,
    pub frame: AnimFrame,
    anim_counter: u32,
    alive: bool,
}

impl Fireball {
    /// Launch from `start` toward `end`
    pub fn spawn(id: u32, stage: StageKind, start: IVec2, end: IVec2, level: u32) -> Self {
        let vel = match stage {
            StageKind::One => {
                let ticks = if start.y == BOTTOM_LANE_Y && end.y == BOTTOM_LANE_Y {
                    BOTTOM_LANE_TICKS
                } else {
                    TOP_LANE_TICKS
                };
                (end - start).as_vec2() / ticks + Vec2::new(level as f32, 0.0)
            }
            StageKind::Two => Vec2::new(0.0, -UP_SPEED - level as f32),
        };

        Self {
            id,
            stage,
            pos: start.as_vec2(),
            vel,
            end,
            frame: AnimFrame::First,
            anim_counter: 0,
            alive: true,
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn sprite(&self) -> SpriteKind {
        match self.stage {
            StageKind::One => SpriteKind::SideFireball(self.frame),
            StageKind::Two => SpriteKind::UpFireball(self.frame),
        }
    }

    fn size(&self) -> IVec2 {
        match self.stage {
            StageKind::One => SIDE_FIREBALL_SIZE,
            StageKind::Two => UP_FIREBALL_SIZE,
        }
    }

    fn reached_end(&self) -> bool {
        let rect = self.bounds();
        match self.stage {
            StageKind::One => rect.left() >= self.end.x,
            StageKind::Two => rect.top() <= self.end.y,
        }
    }
}

impl Entity for Fireball {
    fn tick(&mut self) {
        self.pos += self.vel;
        if self.reached_end() {
            self.alive = false;
        }

        if self.anim_counter >= FLICKER_HOLD {
            self.frame = self.frame.toggled();
            self.anim_counter = 0;
        } else {
            self.anim_counter += 1;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_left_bottom(self.pos.round().as_ivec2(), self.size())
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Sprite {
            kind: self.sprite(),
            rect: self.bounds(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_lane_velocity_and_lifetime() {
        let mut fireball = Fireball::spawn(
            1,
            StageKind::One,
            IVec2::new(100, TOP_LANE_Y),
            IVec2::new(LANE_END_X, TOP_LANE_Y),
            0,
        );
        assert_eq!(fireball.vel, Vec2::new(15.0, 0.0));

        let mut ticks = 0;
        while fireball.is_alive() {
            let before = fireball.bounds();
            fireball.tick();
            ticks += 1;
            assert_eq!(fireball.bounds().left() - before.left(), 15);
            assert_eq!(fireball.bounds().top(), before.top());
        }
        // 100 + 30 * 15 = 550
        assert_eq!(ticks, 30);
        assert!(fireball.bounds().left() >= LANE_END_X);
    }

    #[test]
    fn test_bottom_lane_is_slower() {
        let start = IVec2::new(48, BOTTOM_LANE_Y);
        let end = IVec2::new(LANE_END_X, BOTTOM_LANE_Y);
        let slow = Fireball::spawn(1, StageKind::One, start, end, 0);
        assert!((slow.vel.x - 502.0 / 70.0).abs() < 1e-4);

        let top = Fireball::spawn(
            2,
            StageKind::One,
            IVec2::new(48, TOP_LANE_Y),
            IVec2::new(LANE_END_X, TOP_LANE_Y),
            0,
        );
        assert!(top.vel.x > slow.vel.x);
    }

    #[test]
    fn test_level_adds_speed() {
        let start = IVec2::new(100, TOP_LANE_Y);
        let end = IVec2::new(LANE_END_X, TOP_LANE_Y);
        let fireball = Fireball::spawn(1, StageKind::One, start, end, 2);
        assert_eq!(fireball.vel, Vec2::new(17.0, 0.0));
    }

    #[test]
    fn test_dragon_fireball_rises_until_terminal() {
        let mut fireball = Fireball::spawn(
            1,
            StageKind::Two,
            IVec2::new(200, 380),
            IVec2::new(200, 30),
            1,
        );
        assert_eq!(fireball.vel, Vec2::new(0.0, -8.0));

        while fireball.is_alive() {
            fireball.tick();
            assert_eq!(fireball.bounds().left(), 200);
        }
        assert!(fireball.bounds().top() <= 30);
    }

    #[test]
    fn test_flicker_alternates() {
        let mut fireball = Fireball::spawn(
            1,
            StageKind::One,
            IVec2::new(48, TOP_LANE_Y),
            IVec2::new(LANE_END_X, TOP_LANE_Y),
            0,
        );
        let frames: Vec<_> = (0..6)
            .map(|_| {
                fireball.tick();
                fireball.frame
            })
            .collect();
        assert_eq!(
            frames,
            vec![
                AnimFrame::First,
                AnimFrame::First,
                AnimFrame::Second,
                AnimFrame::Second,
                AnimFrame::Second,
                AnimFrame::First,
            ]
        );
    }

    #[test]
    fn test_killed_fireball_is_dead() {
        let mut fireball = Fireball::spawn(
            1,
            StageKind::Two,
            IVec2::new(200, 380),
            IVec2::new(200, 30),
            0,
        );
        fireball.kill();
        assert!(!fireball.is_alive());
    }
}
