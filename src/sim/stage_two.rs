//! Stage two: the dragon's lair
//!
//! Ten treasures are scattered around the room. The dragon paces along the
//! bottom and breathes fire upward whenever the player passes over it. Once
//! every treasure is taken an exit portal opens in the top-left corner.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision;
use super::dragon::Dragon;
use super::entity::{DrawCommand, Entity, Slot};
use super::input::{HeldKeys, InputEvent, Key};
use super::player::Axis;
use super::portal::Portal;
use super::state::{GameEvent, StageCommon, StageKind};
use super::tick::TickInput;
use super::treasure::Treasure;
use crate::consts::TREASURE_COUNT;

pub const START_PORTAL_ANCHOR: IVec2 = IVec2::new(560, 270);
pub const END_PORTAL_ANCHOR: IVec2 = IVec2::new(40, 80);
/// Hidden players are parked off the right edge
pub const HIDDEN_LEFT: i32 = 700;
pub const FIRE_COOLDOWN_TICKS: u32 = 10;
/// Fireballs leave the dragon's mouth with this bottom edge
pub const FIRE_LAUNCH_Y: i32 = 380;
/// And burn out once their top reaches this line
pub const FIRE_CEILING_Y: i32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTwo {
    pub common: StageCommon,
    pub dragon: Dragon,
    /// Ticks until the dragon may breathe again
    pub fire_cooldown: u32,
    pub treasures: Vec<Treasure>,
    /// Appears once all treasure is collected
    pub end_portal: Option<Portal>,
}

impl StageTwo {
    pub fn new<R: Rng>(score: u64, high_score: u64, lives: u32, level: u32, rng: &mut R) -> Self {
        let start_portal = Portal::new(StageKind::Two, START_PORTAL_ANCHOR);
        let mut common =
            StageCommon::new(StageKind::Two, start_portal, score, high_score, lives, level);

        let mut treasures = Vec::with_capacity(TREASURE_COUNT);
        for _ in 0..TREASURE_COUNT {
            let treasure = Treasure::spawn(&treasures, rng);
            treasures.push(treasure);
        }

        common.roster.push(Slot::Dragon);
        for index in 0..treasures.len() {
            common.roster.push(Slot::Treasure(index));
        }
        common.roster.push(Slot::Player);

        log::info!("Stage two started at level {} with {} lives", level, lives);
        Self {
            common,
            dragon: Dragon::new(level),
            fire_cooldown: 0,
            treasures,
            end_portal: None,
        }
    }

    /// Respawn point after a hit: inside the start portal, so the player
    /// comes back hidden
    pub fn respawn_point(&self) -> IVec2 {
        let portal = &self.common.start_portal.rect;
        IVec2::new(portal.right(), portal.bottom())
    }

    pub fn treasures_remaining(&self) -> usize {
        self.treasures.iter().filter(|t| !t.collected).count()
    }

    pub fn tick(&mut self, input: &TickInput) {
        for event in &input.events {
            self.handle_event(*event, input.held);
        }
        self.dragon_fire();
        self.advance_entities();

        let respawn = self.respawn_point();
        collision::resolve_fireball_hits(&mut self.common, respawn);
        if !self.common.player_hidden {
            let common = &mut self.common;
            let collected = collision::collect_treasures(
                &common.player.rect,
                &mut self.treasures,
                &mut common.score,
                &mut common.events,
            );
            if collected > 0 {
                let treasures = &self.treasures;
                common.roster.retain(|slot| match slot {
                    Slot::Treasure(index) => !treasures[*index].collected,
                    _ => true,
                });
            }
        }

        self.check_transitions();
    }

    fn handle_event(&mut self, event: InputEvent, held: HeldKeys) {
        let speed = self.common.speed();
        match event {
            InputEvent::Quit => self.common.request_quit(),
            InputEvent::KeyDown(Key::Left) => {
                if self.common.player_hidden {
                    let spawn = self.common.start_portal.anchor();
                    self.common.reveal_player(spawn);
                    self.common.start_portal.toggle();
                }
                self.walk(-speed);
            }
            InputEvent::KeyDown(Key::Right) => self.walk(speed),
            InputEvent::KeyDown(Key::Up) => self.climb(speed),
            InputEvent::KeyDown(Key::Down) => self.climb(-speed),
            InputEvent::KeyUp(Key::Left) => {
                let dx = if held.is_held(Key::Right) { speed } else { 0 };
                self.walk(dx);
            }
            InputEvent::KeyUp(Key::Right) => {
                let dx = if held.is_held(Key::Left) { -speed } else { 0 };
                self.walk(dx);
            }
            InputEvent::KeyUp(Key::Up | Key::Down) => self.climb(0),
            InputEvent::KeyDown(Key::Space) | InputEvent::KeyUp(Key::Space) => {}
        }
    }

    fn walk(&mut self, dx: i32) {
        self.common
            .player
            .apply_directional_intent(IVec2::new(dx, 0), Axis::Horizontal);
    }

    fn climb(&mut self, dy: i32) {
        self.common
            .player
            .apply_directional_intent(IVec2::new(0, dy), Axis::Vertical);
    }

    /// Breathe fire when the player is over the dragon and the cooldown
    /// has run out
    fn dragon_fire(&mut self) {
        if self.fire_cooldown > 0 {
            self.fire_cooldown -= 1;
        }
        if self.fire_cooldown > 0 || self.common.player_hidden {
            return;
        }
        if !self.dragon.spans(self.common.player.rect.center().x) {
            return;
        }

        let start = self.dragon.mouth(FIRE_LAUNCH_Y);
        let end = IVec2::new(start.x, FIRE_CEILING_Y);
        self.common.spawn_fireball(start, end);
        self.dragon.set_shooting();
        self.fire_cooldown = FIRE_COOLDOWN_TICKS;
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
        if !common.player_hidden && common.player.rect.intersects(&common.start_portal.rect) {
            common.player.rect.set_left(HIDDEN_LEFT);
            common.hide_player();
            common.start_portal.toggle();
        }

        if self.end_portal.is_none() && self.treasures.iter().all(|t| t.collected) {
            self.end_portal = Some(Portal::new(StageKind::Two, END_PORTAL_ANCHOR));
            common.roster.push(Slot::EndPortal);
            common.events.push(GameEvent::EndPortalOpened);
            log::info!("All treasure collected, exit portal open");
        }

        let reached_exit = match &self.end_portal {
            Some(portal) => !common.player_hidden && common.player.rect.intersects(&portal.rect),
            None => false,
        };
        common.conclude(reached_exit);
    }

    fn entity(&self, slot: Slot) -> Option<&dyn Entity> {
        match slot {
            Slot::Dragon => Some(&self.dragon),
            Slot::EndPortal => self.end_portal.as_ref().map(|p| p as &dyn Entity),
            Slot::Treasure(index) => self.treasures.get(index).map(|t| t as &dyn Entity),
            _ => self.common.entity(slot),
        }
    }

    fn entity_mut(&mut self, slot: Slot) -> Option<&mut dyn Entity> {
        match slot {
            Slot::Dragon => Some(&mut self.dragon),
            Slot::EndPortal => self.end_portal.as_mut().map(|p| p as &mut dyn Entity),
            Slot::Treasure(index) => self.treasures.get_mut(index).map(|t| t as &mut dyn Entity),
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
