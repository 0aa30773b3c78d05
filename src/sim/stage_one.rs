//! Stage one: the drawbridge
//!
//! The player walks from the start portal on the right to the end portal on
//! the left while fireballs roll along two lanes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::{DrawCommand, Entity, Slot};
use super::fireball::{BOTTOM_LANE_Y, LANE_END_X, TOP_LANE_Y};
use super::input::{HeldKeys, InputEvent, Key};
use super::player::{Axis, Posture};
use super::portal::Portal;
use super::sprite::Facing;
use super::state::{StageCommon, StageKind};
use super::tick::TickInput;
use crate::consts::GROUND_Y;

pub const START_PORTAL_ANCHOR: IVec2 = IVec2::new(599, GROUND_Y);
pub const END_PORTAL_ANCHOR: IVec2 = IVec2::new(28, GROUND_Y);

/// Lane timers, in ticks
pub const TOP_LANE_FIRST_COUNT: u32 = 30;
pub const BOTTOM_LANE_FIRST_COUNT: u32 = 80;
pub const TOP_LANE_PERIOD: u32 = 60;
pub const BOTTOM_LANE_PERIOD: u32 = 110;

/// Counters that launch a fireball down each lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneTimers {
    pub top: u32,
    pub bottom: u32,
}

impl LaneTimers {
    pub fn new() -> Self {
        Self {
            top: TOP_LANE_FIRST_COUNT,
            bottom: BOTTOM_LANE_FIRST_COUNT,
        }
    }

    /// Advance both counters; returns (top fires, bottom fires)
    pub fn advance(&mut self, level: u32) -> (bool, bool) {
        let top = Self::step(&mut self.top, TOP_LANE_PERIOD.saturating_sub(level));
        let bottom = Self::step(&mut self.bottom, BOTTOM_LANE_PERIOD.saturating_sub(level));
        (top, bottom)
    }

    fn step(counter: &mut u32, threshold: u32) -> bool {
        if *counter >= threshold {
            *counter = 0;
            true
        } else {
            *counter += 1;
            false
        }
    }
}

impl Default for LaneTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOne {
    pub common: StageCommon,
    pub end_portal: Portal,
    pub lanes: LaneTimers,
}

impl StageOne {
    pub fn new(score: u64, high_score: u64, lives: u32, level: u32) -> Self {
        let start_portal = Portal::new(StageKind::One, START_PORTAL_ANCHOR);
        let mut common =
            StageCommon::new(StageKind::One, start_portal, score, high_score, lives, level);
        common.roster.push(Slot::EndPortal);
        common.roster.push(Slot::Player);

        log::info!("Stage one started at level {} with {} lives", level, lives);
        Self {
            common,
            end_portal: Portal::new(StageKind::One, END_PORTAL_ANCHOR),
            lanes: LaneTimers::new(),
        }
    }

    /// Where the player reappears after a hit or when leaving the portal
    pub fn spawn_point(&self) -> IVec2 {
        self.common.start_portal.anchor()
    }

    pub fn tick(&mut self, input: &TickInput) {
        for event in &input.events {
            self.handle_event(*event, input.held);
        }
        self.spawn_lane_fireballs();
        self.advance_entities();
        let spawn = self.spawn_point();
        collision::resolve_fireball_hits(&mut self.common, spawn);
        self.check_transitions();
    }

    fn handle_event(&mut self, event: InputEvent, held: HeldKeys) {
        let speed = self.common.speed();
        let player = &mut self.common.player;
        match event {
            InputEvent::Quit => self.common.request_quit(),
            InputEvent::KeyDown(Key::Left) => {
                if self.common.player_hidden {
                    let spawn = self.spawn_point();
                    self.common.reveal_player(spawn);
                }
                self.common
                    .player
                    .apply_directional_intent(IVec2::new(-speed, 0), Axis::Horizontal);
            }
            InputEvent::KeyDown(Key::Right) => {
                player.apply_directional_intent(IVec2::new(speed, 0), Axis::Horizontal);
            }
            InputEvent::KeyDown(Key::Up | Key::Space) => player.jump(),
            InputEvent::KeyDown(Key::Down) => player.toggle_crouch(),
            InputEvent::KeyUp(Key::Down) => {
                // A press carried over from the previous stage must not crouch
                if player.posture == Posture::Crouched {
                    player.toggle_crouch();
                }
                if held.is_held(Key::Left) {
                    player.apply_directional_intent(IVec2::new(-speed, 0), Axis::Horizontal);
                }
                if held.is_held(Key::Right) {
                    player.apply_directional_intent(IVec2::new(speed, 0), Axis::Horizontal);
                }
            }
            InputEvent::KeyUp(Key::Left) => {
                if player.facing == Facing::Left {
                    player.apply_directional_intent(IVec2::ZERO, Axis::Horizontal);
                }
            }
            InputEvent::KeyUp(Key::Right) => {
                if player.facing == Facing::Right {
                    player.apply_directional_intent(IVec2::ZERO, Axis::Horizontal);
                }
            }
            InputEvent::KeyUp(Key::Up | Key::Space) => {}
        }
    }

    fn spawn_lane_fireballs(&mut self) {
        let (top, bottom) = self.lanes.advance(self.common.level);
        let from_x = self.end_portal.rect.right();
        if top {
            self.common.spawn_fireball(
                IVec2::new(from_x, TOP_LANE_Y),
                IVec2::new(LANE_END_X, TOP_LANE_Y),
            );
        }
        if bottom {
            self.common.spawn_fireball(
                IVec2::new(from_x, BOTTOM_LANE_Y),
                IVec2::new(LANE_END_X, BOTTOM_LANE_Y),
            );
        }
    }

    fn advance_entities(&mut self) {
        for slot in self.common.roster.order() {
            if let Some(entity) = self.entity_mut(slot) {
                entity.tick();
            }
        }
        self.common.prune_fireballs();
    }

    fn check_transitions(&mut self) {
        let common = &mut self.common;
        if !common.player_hidden && common.player.rect.right() >= common.start_portal.rect.left() {
            common.player.rect.set_top(0);
            common.hide_player();
        }
        let reached_exit = common.player.rect.left() <= self.end_portal.rect.right();
        common.conclude(reached_exit);
    }

    fn entity(&self, slot: Slot) -> Option<&dyn Entity> {
        match slot {
            Slot::EndPortal => Some(&self.end_portal),
            _ => self.common.entity(slot),
        }
    }

    fn entity_mut(&mut self, slot: Slot) -> Option<&mut dyn Entity> {
        match slot {
            Slot::EndPortal => Some(&mut self.end_portal),
            _ => self.common.entity_mut(slot),
        }
    }

    /// Roster contents in draw order
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        for slot in self.common.roster.iter() {
            if let Some(entity) = self.entity(*slot) {
                entity.draw(&mut out);
            }
        }
        out
    }
}
