use std::time::{Duration, Instant};

/// Decides, once per rendered frame, whether a simulation tick is due.
///
/// Fires at most once per call no matter how late the frame arrives, so a
/// stalled terminal slows the game down instead of snapping the snake
/// forward. The reference instant resets when the clock fires and whenever
/// the game resumes or restarts.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Returns true if at least `interval` has elapsed since the last tick.
    pub fn should_tick(&mut self, now: Instant, interval: Duration) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) => {
                if now.duration_since(last) >= interval {
                    self.last_tick = Some(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Forget the reference instant, e.g. on pause/resume or reset
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
