//! Frame pacing

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::TICK_HZ;

/// Blocks so that successive frames start one tick period apart
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Option<Duration>,
    frame_start: Instant,
}

impl FrameLimiter {
    /// Limiter running at the fixed simulation rate
    pub fn new() -> Self {
        Self::with_rate(TICK_HZ)
    }

    pub fn with_rate(hz: u32) -> Self {
        Self {
            period: Some(Duration::from_secs(1) / hz.max(1)),
            frame_start: Instant::now(),
        }
    }

    /// Never sleeps; for tests and replays
    pub fn unthrottled() -> Self {
        Self {
            period: None,
            frame_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Sleep out the rest of the current frame, then start the next one
    pub fn wait(&mut self) {
        if let Some(period) = self.period {
            let elapsed = self.frame_start.elapsed();
            if elapsed < period {
                thread::sleep(period - elapsed);
            }
        }
        self.frame_start = Instant::now();
    }

    /// Hold for a fixed delay (music fade-out); skipped when unthrottled
    pub fn pause(&self, delay: Duration) {
        if self.period.is_some() && !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}
