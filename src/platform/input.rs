//! Input sources
//!
//! A source produces one `TickInput` per frame: the events that arrived
//! since the last poll plus the held-key snapshot from before them.

use std::collections::VecDeque;

use crate::error::GameError;
use crate::sim::TickInput;

pub trait InputSource {
    /// Collect input for the next tick without blocking
    fn poll(&mut self) -> Result<TickInput, GameError>;
}

/// Replays a fixed script, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    polled: u64,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polled: 0,
        }
    }

    /// `ticks` frames with no input
    pub fn idle(ticks: usize) -> Self {
        Self::new(std::iter::repeat_n(TickInput::default(), ticks))
    }

    /// Frames handed out so far
    pub fn polled(&self) -> u64 {
        self.polled
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<TickInput, GameError> {
        self.polled += 1;
        Ok(self.script.pop_front().unwrap_or_else(TickInput::quit))
    }
}
