//! The player character
//!
//! Stage one is a side-on drawbridge run with gravity, jumping and crouching.
//! Stage two is a top-down treasure room where the player moves freely on
//! both axes. Vertical velocity is positive upward; screen y grows downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{DrawCommand, Entity};
use super::rect::Rect;
use super::sprite::{AnimFrame, Facing, PLAYER_SIZE, SpriteKind};
use super::state::StageKind;
use crate::consts::*;

/// Ticks a running frame is held before the next tick flips it
pub const RUN_FRAME_HOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Posture {
    #[default]
    Standing,
    Crouched,
}

/// Which velocity component a directional intent writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: IVec2,
    pub facing: Facing,
    pub posture: Posture,
    pub frame: AnimFrame,
    anim_counter: u32,
    pub stage: StageKind,
}

impl Player {
    /// Spawn just left of `spawn` (a portal's bottom-left corner)
    pub fn new(stage: StageKind, spawn: IVec2) -> Self {
        let mut player = Self {
            rect: Rect::from_left_bottom(IVec2::ZERO, PLAYER_SIZE),
            vel: IVec2::ZERO,
            facing: Facing::Left,
            posture: Posture::Standing,
            frame: AnimFrame::First,
            anim_counter: 0,
            stage,
        };
        player.reset(spawn);
        player
    }

    /// Set velocity from a movement key
    ///
    /// Stage one only ever walks horizontally, and a crouched player ignores
    /// walking so the crouched pose stays put.
    pub fn apply_directional_intent(&mut self, vector: IVec2, axis: Axis) {
        match (self.stage, axis) {
            (StageKind::Two, Axis::Vertical) => self.vel.y = vector.y,
            (StageKind::Two, Axis::Horizontal) => self.steer(vector.x),
            (StageKind::One, Axis::Horizontal) if self.posture == Posture::Standing => {
                self.steer(vector.x)
            }
            _ => {}
        }
    }

    fn steer(&mut self, dx: i32) {
        if dx < 0 {
            self.facing = Facing::Left;
            self.frame = AnimFrame::First;
        } else if dx > 0 {
            self.facing = Facing::Right;
            self.frame = AnimFrame::First;
        }
        self.vel.x = dx;
    }

    /// Jump off the drawbridge; ignored unless standing on it
    pub fn jump(&mut self) {
        if self.stage == StageKind::One && self.rect.bottom() == GROUND_Y {
            self.vel.y = JUMP_IMPULSE;
        }
    }

    /// Crouch or stand up, keeping the bottom-left corner in place
    pub fn toggle_crouch(&mut self) {
        if self.stage != StageKind::One {
            return;
        }
        self.posture = match self.posture {
            Posture::Standing => Posture::Crouched,
            Posture::Crouched => Posture::Standing,
        };
        self.rect.resize_from_bottom_left(self.sprite().size());
        let left = self.rect.left().clamp(0, SCREEN_WIDTH - self.rect.width());
        self.rect.set_left(left);
        self.vel.x = 0;
    }

    /// Move back to a spawn point. Posture is left alone.
    pub fn reset(&mut self, spawn: IVec2) {
        self.rect.set_right(spawn.x - 1);
        self.rect.set_bottom(spawn.y);
    }

    pub fn is_crouched(&self) -> bool {
        self.posture == Posture::Crouched
    }

    /// Whether the run cycle should animate this tick
    pub fn is_moving(&self) -> bool {
        self.vel.x != 0 || (self.stage == StageKind::Two && self.vel.y != 0)
    }

    pub fn sprite(&self) -> SpriteKind {
        match self.posture {
            Posture::Crouched => SpriteKind::PlayerCrouched {
                facing: self.facing,
            },
            Posture::Standing => SpriteKind::Player {
                facing: self.facing,
                frame: self.frame,
            },
        }
    }

    fn step_lateral(&mut self) {
        let dx = self.vel.x;
        if (dx < 0 && self.rect.left() > 0) || (dx > 0 && self.rect.right() < SCREEN_WIDTH) {
            let left = (self.rect.left() + dx).clamp(0, SCREEN_WIDTH - self.rect.width());
            self.rect.set_left(left);
        }
    }

    fn step_vertical(&mut self) {
        let rise = self.vel.y;
        if (rise > 0 && self.rect.top() > CEILING_Y)
            || (rise < 0 && self.rect.bottom() < STAGE_TWO_FLOOR_Y)
        {
            self.rect.pos.y -= rise;
        }

        match self.stage {
            StageKind::One => {
                // Gravity integrates the same velocity a second time
                self.rect.pos.y -= rise;
                self.vel.y -= GRAVITY;
                if self.rect.bottom() >= GROUND_Y {
                    self.rect.set_bottom(GROUND_Y);
                    self.vel.y = 0;
                }
            }
            StageKind::Two => {
                if self.rect.bottom() > STAGE_TWO_FLOOR_Y {
                    self.rect.set_bottom(STAGE_TWO_FLOOR_Y);
                }
            }
        }

        if self.rect.top() < CEILING_Y {
            self.rect.set_top(CEILING_Y);
        }
    }

    fn step_animation(&mut self) {
        if self.is_moving() {
            if self.anim_counter >= RUN_FRAME_HOLD {
                self.frame = self.frame.toggled();
                self.anim_counter = 0;
            } else {
                self.anim_counter += 1;
            }
        } else {
            if self.posture == Posture::Standing {
                self.frame = AnimFrame::First;
            }
            self.anim_counter = self.anim_counter.saturating_add(1);
        }
    }
}

impl Entity for Player {
    fn tick(&mut self) {
        self.step_lateral();
        self.step_vertical();
        self.step_animation();
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
    use crate::sim::sprite::PLAYER_CROUCHED_SIZE;
    use proptest::prelude::*;

    fn drawbridge_player() -> Player {
        Player::new(StageKind::One, IVec2::new(599, GROUND_Y))
    }

    #[test]
    fn test_spawns_left_of_portal() {
        let player = drawbridge_player();
        assert_eq!(player.rect.right(), 598);
        assert_eq!(player.rect.bottom(), GROUND_Y);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_rests_on_ground() {
        let mut player = drawbridge_player();
        for _ in 0..10 {
            player.tick();
            assert_eq!(player.rect.bottom(), GROUND_Y);
            assert_eq!(player.vel.y, 0);
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = drawbridge_player();
        player.jump();
        assert_eq!(player.vel.y, JUMP_IMPULSE);

        player.tick();
        assert!(player.rect.bottom() < GROUND_Y);
        let airborne_vel = player.vel.y;

        // Mid-air jump is a no-op
        player.jump();
        assert_eq!(player.vel.y, airborne_vel);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut player = drawbridge_player();
        player.jump();
        let mut apex = GROUND_Y;
        for _ in 0..40 {
            player.tick();
            apex = apex.min(player.rect.bottom());
            assert!(player.rect.bottom() <= GROUND_Y);
            assert!(player.rect.top() >= CEILING_Y);
        }
        assert_eq!(apex, GROUND_Y - 42);
        assert_eq!(player.rect.bottom(), GROUND_Y);
        assert_eq!(player.vel.y, 0);
    }

    #[test]
    fn test_stage_two_cannot_jump() {
        let mut player = Player::new(StageKind::Two, IVec2::new(560, GROUND_Y));
        player.jump();
        assert_eq!(player.vel.y, 0);
    }

    #[test]
    fn test_crouch_swaps_bounds_and_stops() {
        let mut player = drawbridge_player();
        player.apply_directional_intent(IVec2::new(-8, 0), Axis::Horizontal);
        let left = player.rect.left();

        player.toggle_crouch();
        assert!(player.is_crouched());
        assert_eq!(player.vel.x, 0);
        assert_eq!(player.rect.left(), left);
        assert_eq!(player.rect.bottom(), GROUND_Y);
        assert_eq!(player.rect.size, PLAYER_CROUCHED_SIZE);

        // Walking is ignored while crouched
        player.apply_directional_intent(IVec2::new(-8, 0), Axis::Horizontal);
        assert_eq!(player.vel.x, 0);

        player.toggle_crouch();
        assert!(!player.is_crouched());
        assert_eq!(player.rect.size, PLAYER_SIZE);
        assert_eq!(player.rect.bottom(), GROUND_Y);
    }

    #[test]
    fn test_crouch_ignored_in_stage_two() {
        let mut player = Player::new(StageKind::Two, IVec2::new(560, 270));
        player.toggle_crouch();
        assert_eq!(player.posture, Posture::Standing);
    }

    #[test]
    fn test_reset_keeps_posture() {
        let mut player = drawbridge_player();
        player.toggle_crouch();
        player.rect.set_left(200);
        player.reset(IVec2::new(599, GROUND_Y));
        assert!(player.is_crouched());
        assert_eq!(player.rect.right(), 598);
        assert_eq!(player.rect.bottom(), GROUND_Y);
    }

    #[test]
    fn test_lateral_clamp_left_edge() {
        let mut player = Player::new(StageKind::One, IVec2::new(40, GROUND_Y));
        player.apply_directional_intent(IVec2::new(-8, 0), Axis::Horizontal);
        for _ in 0..5 {
            player.tick();
        }
        assert_eq!(player.rect.left(), 0);
    }

    #[test]
    fn test_lateral_clamp_right_edge() {
        let mut player = Player::new(StageKind::One, IVec2::new(639, GROUND_Y));
        player.apply_directional_intent(IVec2::new(8, 0), Axis::Horizontal);
        for _ in 0..5 {
            player.tick();
        }
        assert_eq!(player.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_stage_two_vertical_bounds() {
        let mut player = Player::new(StageKind::Two, IVec2::new(560, 270));
        player.apply_directional_intent(IVec2::new(0, 8), Axis::Vertical);
        for _ in 0..60 {
            player.tick();
        }
        assert_eq!(player.rect.top(), CEILING_Y);

        player.apply_directional_intent(IVec2::new(0, -8), Axis::Vertical);
        for _ in 0..60 {
            player.tick();
        }
        assert_eq!(player.rect.bottom(), STAGE_TWO_FLOOR_Y);
    }

    #[test]
    fn test_run_cycle_flips_on_third_tick() {
        let mut player = drawbridge_player();
        player.apply_directional_intent(IVec2::new(-8, 0), Axis::Horizontal);
        player.tick();
        player.tick();
        assert_eq!(player.frame, AnimFrame::First);
        player.tick();
        assert_eq!(player.frame, AnimFrame::Second);

        // Stopping reverts to the idle pose
        player.apply_directional_intent(IVec2::ZERO, Axis::Horizontal);
        player.tick();
        assert_eq!(player.frame, AnimFrame::First);
    }

    #[test]
    fn test_vertical_movement_animates_in_stage_two_only() {
        let mut player = Player::new(StageKind::Two, IVec2::new(560, 270));
        player.apply_directional_intent(IVec2::new(0, 8), Axis::Vertical);
        assert!(player.is_moving());

        let mut drawbridge = drawbridge_player();
        drawbridge.apply_directional_intent(IVec2::new(0, 8), Axis::Vertical);
        assert_eq!(drawbridge.vel.y, 0);
        assert!(!drawbridge.is_moving());
    }

    proptest! {
        #[test]
        fn prop_stage_one_stays_in_bounds(ops in prop::collection::vec(0u8..6, 0..300)) {
            let mut player = drawbridge_player();
            for op in ops {
                match op {
                    0 => player.apply_directional_intent(IVec2::new(-8, 0), Axis::Horizontal),
                    1 => player.apply_directional_intent(IVec2::new(8, 0), Axis::Horizontal),
                    2 => player.apply_directional_intent(IVec2::ZERO, Axis::Horizontal),
                    3 => player.jump(),
                    4 => player.toggle_crouch(),
                    _ => {}
                }
                player.tick();
                prop_assert!(player.rect.left() >= 0);
                prop_assert!(player.rect.right() <= SCREEN_WIDTH);
                prop_assert!(player.rect.bottom() <= GROUND_Y);
                prop_assert!(player.rect.top() >= CEILING_Y);
            }
        }

        #[test]
        fn prop_stage_two_stays_in_bounds(ops in prop::collection::vec(0u8..6, 0..300)) {
            let mut player = Player::new(StageKind::Two, IVec2::new(560, 270));
            for op in ops {
                match op {
                    0 => player.apply_directional_intent(IVec2::new(-11, 0), Axis::Horizontal),
                    1 => player.apply_directional_intent(IVec2::new(11, 0), Axis::Horizontal),
                    2 => player.apply_directional_intent(IVec2::new(0, 11), Axis::Vertical),
                    3 => player.apply_directional_intent(IVec2::new(0, -11), Axis::Vertical),
                    4 => player.apply_directional_intent(IVec2::ZERO, Axis::Vertical),
                    _ => {}
                }
                player.tick();
                prop_assert!(player.rect.left() >= 0);
                prop_assert!(player.rect.right() <= SCREEN_WIDTH);
                prop_assert!(player.rect.top() >= CEILING_Y);
                prop_assert!(player.rect.bottom() <= STAGE_TWO_FLOOR_Y);
            }
        }
    }
}
