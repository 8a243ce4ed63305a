//! Animator Settings
//!
//! Configuration shared by every animator an [`AnimationSystem`] drives.
//!
//! ```rust,ignore
//! use skelanim::settings::{AnimatorSettings, RetryPolicy};
//!
//! let settings = AnimatorSettings {
//!     retry: RetryPolicy { max_attempts: 20, delay: 0.05 },
//!     ..Default::default()
//! };
//! let system = AnimationSystem::new(settings);
//! ```
//!
//! [`AnimationSystem`]: crate::animation::AnimationSystem

use crate::animation::easing::Easing;

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// Bounded fixed-delay retry for skeletons that are not ready yet.
///
/// Retries run inside [`AnimationSystem::update`] on the caller's thread;
/// nothing is spawned.
///
/// [`AnimationSystem::update`]: crate::animation::AnimationSystem::update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total bootstrap attempts, including the first one made at attach time.
    pub max_attempts: u32,
    /// Seconds of animation-loop time between attempts.
    pub delay: f32,
}

impl Default for RetryPolicy {
    #[inline]
    fn default() -> Self {
        Self {
            max_attempts: 50,
            delay: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Gives up after the first failed attempt.
    #[must_use]
    pub fn never() -> Self {
        Self {
            max_attempts: 1,
            delay: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AnimatorSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatorSettings {
    pub retry: RetryPolicy,
    /// Curve used by [`AnimationSystem::attach`] when none is given.
    ///
    /// [`AnimationSystem::attach`]: crate::animation::AnimationSystem::attach
    pub default_easing: Easing,
}

impl AnimatorSettings {
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }
}
