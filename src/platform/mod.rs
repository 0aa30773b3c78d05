//! Platform abstraction layer
//!
//! Handles the outside world for the session:
//! - Time/ticks (blocking frame limiter)
//! - Input events (terminal or scripted)
//! - The engine context that bundles canvas, input and audio

pub mod input;
pub mod terminal;
pub mod time;

use std::time::Duration;

use crate::audio::{AudioManager, Cue};
use crate::renderer::Canvas;

pub use input::{InputSource, ScriptedInput};
pub use terminal::{TerminalGuard, TerminalInput};
pub use time::FrameLimiter;

/// Everything the session needs from the platform, created once per
/// process and torn down with `shutdown`
pub struct Engine<C: Canvas, I: InputSource> {
    pub canvas: C,
    pub input: I,
    pub audio: AudioManager,
    pub limiter: FrameLimiter,
}

impl<C: Canvas, I: InputSource> Engine<C, I> {
    pub fn new(canvas: C, input: I, audio: AudioManager, limiter: FrameLimiter) -> Self {
        Self {
            canvas,
            input,
            audio,
            limiter,
        }
    }

    /// Fade the music out and wait for it before handing the canvas back
    pub fn shutdown(mut self, fadeout: Duration) -> C {
        log::info!("Shutting down, fading music over {} ms", fadeout.as_millis());
        self.audio.play(Cue::MusicFadeOut);
        self.limiter.pause(fadeout);
        self.canvas
    }
}
