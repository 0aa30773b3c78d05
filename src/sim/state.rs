//! Stage state shared by both stages
//!
//! Everything a stage run mutates lives here or in the stage-specific
//! structs that embed it. Nothing outside the stage controller writes to it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Roster, Slot};
use super::fireball::Fireball;
use super::hud::{LifeIndicator, ScoreDisplay, ScoreLabel};
use super::player::Player;
use super::portal::Portal;
use crate::consts::WALK_SPEED;

/// Which of the two stages is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// Drawbridge run with lane fireballs
    One,
    /// Dragon's treasure room
    Two,
}

/// How a stage run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageOutcome {
    /// Reached the end portal
    Won,
    /// Ran out of lives
    Killed,
    /// Player asked to quit
    Quit,
}

impl StageOutcome {
    /// Whether the session stops after this outcome
    pub fn ends_session(self) -> bool {
        !matches!(self, StageOutcome::Won)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagePhase {
    Running,
    Terminating(StageOutcome),
}

/// Things that happened during a tick, drained by the session
/// (audio cues, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FireballShot,
    PlayerKilled { lives_remaining: u32 },
    TreasureCollected { value: u32 },
    PlayerHidden,
    PlayerRevealed,
    EndPortalOpened,
    StageEnded(StageOutcome),
}

/// What a finished stage hands back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub outcome: StageOutcome,
    pub score: u64,
    pub lives: u32,
}

/// State common to both stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCommon {
    pub kind: StageKind,
    /// Difficulty level for this run
    pub level: u32,
    pub phase: StagePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: ScoreDisplay,
    pub high_score: ScoreDisplay,
    pub lives: LifeIndicator,
    pub start_portal: Portal,
    pub player: Player,
    /// Player is tucked inside the start portal (off the roster)
    pub player_hidden: bool,
    /// Live fireballs, in spawn order
    pub fireballs: Vec<Fireball>,
    pub roster: Roster,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    quit_requested: bool,
    next_id: u32,
}

impl StageCommon {
    /// Set up the HUD, the start portal and a player beside it
    ///
    /// The roster starts as score, high score, lives, start portal; stages
    /// append their own entities after that.
    pub fn new(
        kind: StageKind,
        start_portal: Portal,
        score: u64,
        high_score: u64,
        lives: u32,
        level: u32,
    ) -> Self {
        let player = Player::new(kind, start_portal.anchor());
        let mut roster = Roster::new();
        roster.push(Slot::Score);
        roster.push(Slot::HighScore);
        roster.push(Slot::Lives);
        roster.push(Slot::StartPortal);

        Self {
            kind,
            level,
            phase: StagePhase::Running,
            time_ticks: 0,
            score: ScoreDisplay::new(ScoreLabel::Current, score),
            high_score: ScoreDisplay::new(ScoreLabel::High, high_score),
            lives: LifeIndicator::new(lives),
            start_portal,
            player,
            player_hidden: false,
            fireballs: Vec::new(),
            roster,
            events: Vec::new(),
            quit_requested: false,
            next_id: 1,
        }
    }

    /// Walking speed at the current level
    pub fn speed(&self) -> i32 {
        WALK_SPEED + self.level as i32
    }

    pub fn is_running(&self) -> bool {
        self.phase == StagePhase::Running
    }

    /// Launch a fireball and put it on top of the roster
    pub fn spawn_fireball(&mut self, start: IVec2, end: IVec2) {
        let id = self.next_id;
        self.next_id += 1;
        self.fireballs
            .push(Fireball::spawn(id, self.kind, start, end, self.level));
        self.roster.push(Slot::Fireball(id));
        self.events.push(GameEvent::FireballShot);
        log::debug!("Fireball {} launched from {:?} toward {:?}", id, start, end);
    }

    /// Drop dead fireballs from storage and the roster
    pub fn prune_fireballs(&mut self) {
        self.fireballs.retain(|f| f.is_alive());
        let fireballs = &self.fireballs;
        self.roster.retain(|slot| match slot {
            Slot::Fireball(id) => fireballs.iter().any(|f| f.id == *id),
            _ => true,
        });
    }

    /// Take the player off the roster; the caller parks the rect
    pub fn hide_player(&mut self) {
        self.player_hidden = true;
        self.roster.remove(Slot::Player);
        self.events.push(GameEvent::PlayerHidden);
    }

    /// Bring a hidden player back at `spawn`, drawn on top
    pub fn reveal_player(&mut self, spawn: IVec2) {
        self.player_hidden = false;
        self.player.reset(spawn);
        self.roster.push(Slot::Player);
        self.events.push(GameEvent::PlayerRevealed);
    }

    /// Remember a quit; honoured once the tick's updates are done
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Settle the end-of-tick outcome: defeat over quit over victory
    pub fn conclude(&mut self, reached_exit: bool) {
        let outcome = if self.lives.lives() == 0 {
            Some(StageOutcome::Killed)
        } else if self.quit_requested {
            Some(StageOutcome::Quit)
        } else if reached_exit {
            Some(StageOutcome::Won)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.terminate(outcome);
        }
    }

    /// Move to Terminating; later calls are ignored
    pub fn terminate(&mut self, outcome: StageOutcome) {
        if self.phase != StagePhase::Running {
            return;
        }
        self.phase = StagePhase::Terminating(outcome);
        self.events.push(GameEvent::StageEnded(outcome));
        log::info!(
            "Stage {:?} ended after {} ticks: {:?} (score {}, lives {})",
            self.kind,
            self.time_ticks,
            outcome,
            self.score.score(),
            self.lives.lives()
        );
    }

    /// Outcome plus the numbers carried into the next stage
    pub fn report(&self) -> Option<StageReport> {
        match self.phase {
            StagePhase::Running => None,
            StagePhase::Terminating(outcome) => Some(StageReport {
                outcome,
                score: self.score.score(),
                lives: self.lives.lives(),
            }),
        }
    }

    /// Entities every stage owns
    pub fn entity(&self, slot: Slot) -> Option<&dyn Entity> {
        match slot {
            Slot::Score => Some(&self.score),
            Slot::HighScore => Some(&self.high_score),
            Slot::Lives => Some(&self.lives),
            Slot::StartPortal => Some(&self.start_portal),
            Slot::Player => Some(&self.player),
            Slot::Fireball(id) => self
                .fireballs
                .iter()
                .find(|f| f.id == id)
                .map(|f| f as &dyn Entity),
            _ => None,
        }
    }

    pub fn entity_mut(&mut self, slot: Slot) -> Option<&mut dyn Entity> {
        match slot {
            Slot::Score => Some(&mut self.score),
            Slot::HighScore => Some(&mut self.high_score),
            Slot::Lives => Some(&mut self.lives),
            Slot::StartPortal => Some(&mut self.start_portal),
            Slot::Player => Some(&mut self.player),
            Slot::Fireball(id) => self
                .fireballs
                .iter_mut()
                .find(|f| f.id == id)
                .map(|f| f as &mut dyn Entity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common() -> StageCommon {
        let portal = Portal::new(StageKind::One, IVec2::new(599, 312));
        StageCommon::new(StageKind::One, portal, 0, 100, 7, 0)
    }

    #[test]
    fn test_terminates_once() {
        let mut state = common();
        state.terminate(StageOutcome::Killed);
        state.terminate(StageOutcome::Won);
        assert_eq!(state.phase, StagePhase::Terminating(StageOutcome::Killed));
        let ended = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::StageEnded(_)))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_conclude_prefers_defeat_then_quit() {
        let mut state = common();
        state.request_quit();
        state.conclude(true);
        assert_eq!(state.phase, StagePhase::Terminating(StageOutcome::Quit));

        let mut state = common();
        state.request_quit();
        while state.lives.lives() > 0 {
            state.lives.lose_one();
        }
        state.conclude(true);
        assert_eq!(state.phase, StagePhase::Terminating(StageOutcome::Killed));
    }

    #[test]
    fn test_prune_drops_dead_fireball_slots() {
        let mut state = common();
        state.spawn_fireball(IVec2::new(48, 280), IVec2::new(550, 280));
        state.spawn_fireball(IVec2::new(48, 305), IVec2::new(550, 305));
        assert!(state.roster.contains(Slot::Fireball(1)));
        state.fireballs[0].kill();
        state.prune_fireballs();
        assert_eq!(state.fireballs.len(), 1);
        assert!(!state.roster.contains(Slot::Fireball(1)));
        assert!(state.roster.contains(Slot::Fireball(2)));
    }

    #[test]
    fn test_hide_and_reveal_move_player_slot() {
        let mut state = common();
        state.roster.push(Slot::Player);
        state.hide_player();
        assert!(state.player_hidden);
        assert!(!state.roster.contains(Slot::Player));

        state.spawn_fireball(IVec2::new(48, 280), IVec2::new(550, 280));
        state.reveal_player(IVec2::new(599, 312));
        assert!(!state.player_hidden);
        assert_eq!(state.roster.order().last(), Some(&Slot::Player));
        assert_eq!(state.player.rect.right(), 598);
    }

    #[test]
    fn test_report_only_after_termination() {
        let mut state = common();
        assert!(state.report().is_none());
        state.terminate(StageOutcome::Won);
        let report = state.report().expect("terminated stage reports");
        assert_eq!(report.outcome, StageOutcome::Won);
        assert_eq!(report.lives, 7);
        assert_eq!(report.score, 0);
    }
}
