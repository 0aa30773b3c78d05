//! Fixed timestep simulation tick
//!
//! One call advances whichever stage is running by exactly one 1/30 s step.

use serde::{Deserialize, Serialize};

use super::entity::DrawCommand;
use super::input::{HeldKeys, InputEvent};
use super::stage_one::StageOne;
use super::stage_two::StageTwo;
use super::state::{GameEvent, StageCommon, StageKind, StagePhase, StageReport};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
    /// Keys held before any of `events` were applied
    pub held: HeldKeys,
}

impl TickInput {
    pub fn quit() -> Self {
        Self {
            events: vec![InputEvent::Quit],
            held: HeldKeys::none(),
        }
    }

    pub fn wants_quit(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

/// The stage currently being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stage {
    One(StageOne),
    Two(StageTwo),
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        self.common().kind
    }

    pub fn common(&self) -> &StageCommon {
        match self {
            Stage::One(stage) => &stage.common,
            Stage::Two(stage) => &stage.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut StageCommon {
        match self {
            Stage::One(stage) => &mut stage.common,
            Stage::Two(stage) => &mut stage.common,
        }
    }

    pub fn phase(&self) -> StagePhase {
        self.common().phase
    }

    pub fn is_running(&self) -> bool {
        self.common().is_running()
    }

    /// Frame contents in roster order
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        match self {
            Stage::One(stage) => stage.draw_list(),
            Stage::Two(stage) => stage.draw_list(),
        }
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.common_mut().events)
    }

    pub fn report(&self) -> Option<StageReport> {
        self.common().report()
    }
}

/// Advance the stage by one fixed timestep
///
/// A stage that has stopped running ignores further ticks.
pub fn tick(stage: &mut Stage, input: &TickInput) {
    if !stage.is_running() {
        return;
    }
    stage.common_mut().time_ticks += 1;

    match stage {
        Stage::One(stage) => stage.tick(input),
        Stage::Two(stage) => stage.tick(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Key;
    use crate::sim::state::StageOutcome;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tick_counts_time() {
        let mut stage = Stage::One(StageOne::new(0, 0, 7, 0));
        for _ in 0..5 {
            tick(&mut stage, &TickInput::default());
        }
        assert_eq!(stage.common().time_ticks, 5);
        assert_eq!(stage.kind(), StageKind::One);
    }

    #[test]
    fn test_quit_stops_ticking() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut stage = Stage::Two(StageTwo::new(0, 0, 7, 0, &mut rng));
        tick(&mut stage, &TickInput::quit());
        assert_eq!(stage.phase(), StagePhase::Terminating(StageOutcome::Quit));

        let before = stage.common().time_ticks;
        tick(&mut stage, &TickInput::default());
        assert_eq!(stage.common().time_ticks, before);
        assert_eq!(stage.report().map(|r| r.outcome), Some(StageOutcome::Quit));
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut stage = Stage::One(StageOne::new(0, 0, 7, 0));
        tick(&mut stage, &TickInput::quit());
        let events = stage.drain_events();
        assert_eq!(events, vec![GameEvent::StageEnded(StageOutcome::Quit)]);
        assert!(stage.drain_events().is_empty());
    }

    #[test]
    fn test_wants_quit() {
        assert!(TickInput::quit().wants_quit());
        let input = TickInput {
            events: vec![InputEvent::KeyDown(Key::Left)],
            held: HeldKeys::none().with(Key::Left),
        };
        assert!(!input.wants_quit());
    }

    #[test]
    fn test_snapshot_serializes() {
        let stage = Stage::One(StageOne::new(10, 20, 3, 1));
        let json = serde_json::to_string(&stage).expect("stage serializes");
        assert!(json.contains("\"lives\":3"));
    }
}
