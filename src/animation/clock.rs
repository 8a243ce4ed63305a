use crate::animation::timeline::wrap_time;

/// Accumulating animation clock.
///
/// Fed one non-negative delta per tick by the render loop; reports the
/// accumulated time wrapped into the loop period.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    elapsed: f64,
    loop_period: f32,
}

impl AnimationClock {
    #[must_use]
    pub fn new(loop_period: f32) -> Self {
        Self {
            elapsed: 0.0,
            loop_period,
        }
    }

    /// Adds `dt` and returns the looped time.
    ///
    /// Negative or non-finite deltas break the monotonic contract and are
    /// dropped.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt >= 0.0 {
            self.elapsed += f64::from(dt);
        } else {
            log::warn!("Ignoring invalid animation delta {dt}");
        }
        self.looped()
    }

    /// Total accumulated time in seconds.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Accumulated time wrapped into `[0, loop_period)`.
    #[must_use]
    pub fn looped(&self) -> f32 {
        // Wrap in f64 first so precision does not decay over long sessions
        let period = f64::from(self.loop_period);
        wrap_time(self.elapsed.rem_euclid(period) as f32, self.loop_period)
    }

    /// Full loop periods completed so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        (self.elapsed / f64::from(self.loop_period)).floor() as u64
    }

    #[inline]
    #[must_use]
    pub fn loop_period(&self) -> f32 {
        self.loop_period
    }
}
