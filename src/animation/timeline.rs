use crate::animation::pose::{Keyframe, Pose};
use crate::errors::{AnimatorError, Result};

/// Ordered keyframes plus a fixed loop period, owned by one animator.
///
/// Keyframes are sorted by time on construction (stable, so keyframes that
/// share a timestamp keep their authored order). Everything is immutable
/// afterwards except the first keyframe's pose, which [`Timeline::bootstrap`]
/// replaces exactly once with the skeleton's live rotations.
#[derive(Debug, Clone)]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
    loop_period: f32,
    bootstrapped: bool,
}

impl Timeline {
    /// Builds a timeline from keyframes in any order.
    ///
    /// `loop_period` is independent of the keyframe times and is usually at
    /// least the last keyframe's time; time past the last keyframe holds the
    /// last pose until the loop wraps.
    pub fn new(mut keyframes: Vec<Keyframe>, loop_period: f32) -> Result<Self> {
        if !loop_period.is_finite() || loop_period <= 0.0 {
            return Err(AnimatorError::InvalidLoopPeriod(loop_period));
        }

        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));

        if let Some(last) = keyframes.last()
            && last.time > loop_period
        {
            log::debug!(
                "Keyframe at {:.3}s lies past loop period {loop_period:.3}s and is never reached",
                last.time
            );
        }

        Ok(Self {
            keyframes,
            loop_period,
            bootstrapped: false,
        })
    }

    /// Keyframes in non-decreasing time order.
    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn loop_period(&self) -> f32 {
        self.loop_period
    }

    /// Time of the last keyframe, or 0 for an empty timeline.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    #[inline]
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Wraps an accumulated clock into `[0, loop_period)`.
    #[must_use]
    pub fn wrap(&self, clock: f32) -> f32 {
        wrap_time(clock, self.loop_period)
    }

    /// Replaces the first keyframe's pose with the captured live pose.
    ///
    /// May succeed only once per timeline. On an empty timeline the captured
    /// pose becomes a keyframe at time 0.
    pub fn bootstrap(&mut self, pose: Pose) -> Result<()> {
        if self.bootstrapped {
            return Err(AnimatorError::AlreadyBootstrapped);
        }

        match self.keyframes.first_mut() {
            Some(first) => first.pose = pose,
            None => self.keyframes.push(Keyframe::new(0.0, pose)),
        }
        self.bootstrapped = true;
        Ok(())
    }

    /// Allows the next [`Timeline::bootstrap`] to replace the first pose again.
    ///
    /// Used when the skeleton instance behind an animator is swapped out.
    pub fn clear_bootstrap(&mut self) {
        self.bootstrapped = false;
    }
}

/// Floating-point remainder of `clock` by `period`, always in `[0, period)`.
#[must_use]
pub fn wrap_time(clock: f32, period: f32) -> f32 {
    let t = clock.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs
    if t >= period { 0.0 } else { t }
}
