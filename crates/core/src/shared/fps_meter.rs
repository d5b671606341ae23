use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second estimate refreshed once per elapsed second.
pub struct FpsMeter {
    window_start: Instant,
    frames: usize,
    current: f64,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            current: 0.0,
        }
    }

    /// Count one frame at `now` and return the latest estimate.
    pub fn tick(&mut self, now: Instant) -> f64 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed > WINDOW {
            self.current = self.frames as f64 / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}
