use std::time::{Duration, Instant};

/// Longest delta a single tick may report, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Frame timer producing the per-tick delta fed into
/// [`AnimationSystem::update`](crate::animation::AnimationSystem::update).
///
/// `Instant` is monotonic, so deltas are never negative. Long stalls (window
/// drags, breakpoints) are clamped to `max_delta` so the animation does not
/// jump ahead by whole segments after a hitch.
pub struct FrameTimer {
    start: Instant,
    last_tick: Instant,
    max_delta: f32,
    /// Clamped delta of the last tick, in seconds
    pub delta: f32,
    /// Unclamped wall-clock time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            max_delta: DEFAULT_MAX_DELTA,
            delta: 0.0,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    /// Advances the timer and returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        if raw > self.max_delta {
            log::debug!("Frame delta {raw:.3}s clamped to {:.3}s", self.max_delta);
        }
        self.delta = raw.min(self.max_delta);
        self.elapsed = now.duration_since(self.start);
        self.last_tick = now;
        self.frame_count += 1;
        self.delta
    }
}
