//! Easing curves
//!
//! Pure functions reshaping normalized segment progress in `[0, 1]`. The
//! back, elastic and overshoot curves leave `[0, 1]` on purpose near the end
//! of a segment; callers must not clamp their output.

use std::f32::consts::PI;

/// Back curve tension.
pub const BACK_C1: f32 = 1.70158;
/// Back curve cubic coefficient.
pub const BACK_C3: f32 = BACK_C1 + 1.0;
/// In-out back tension.
pub const BACK_C2: f32 = BACK_C1 * 1.525;
/// Elastic period term.
pub const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
/// Default amount for [`ease_out_overshoot`].
pub const DEFAULT_OVERSHOOT: f32 = 0.3;

/// Identity curve.
#[inline]
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}

/// `0.5 * (1 - cos(t*π))`. Monotonic, stays in `[0, 1]`.
#[inline]
#[must_use]
pub fn ease_in_out_cosine(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    0.5 * (1.0 - (t * PI).cos())
}

/// `1 + c3*(t-1)^3 + c1*(t-1)^2`. Overshoots above 1 before settling.
///
/// `c3 = c1 + 1` is rounded in f32, so `t = 0` is pinned explicitly.
#[inline]
#[must_use]
pub fn ease_out_back(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    let s = t - 1.0;
    1.0 + BACK_C3 * s * s * s + BACK_C1 * s * s
}

/// Symmetric back curve, split at `t = 0.5`. Undershoots below 0 near the
/// start and overshoots above 1 near the end.
#[inline]
#[must_use]
pub fn ease_in_out_back(t: f32) -> f32 {
    if t < 0.5 {
        let u = 2.0 * t;
        (u * u * ((BACK_C2 + 1.0) * u - BACK_C2)) / 2.0
    } else {
        let u = 2.0 * t - 2.0;
        (u * u * ((BACK_C2 + 1.0) * u + BACK_C2) + 2.0) / 2.0
    }
}

/// `2^(-10t) * sin((10t - 0.75) * c4) + 1`, exact at both ends.
#[inline]
#[must_use]
pub fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

/// `1 + (1+o)*s^3 + o*s^2` with `s = t - 1`.
#[inline]
#[must_use]
pub fn ease_out_overshoot(t: f32, amount: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    let s = t - 1.0;
    1.0 + (1.0 + amount) * s * s * s + amount * s * s
}

/// Easing curve selected for a timeline.
///
/// One curve is active per animator; it is chosen at attach time and never
/// switched while the animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    #[default]
    InOutCosine,
    OutBack,
    InOutBack,
    OutElastic,
    OutOvershoot {
        amount: f32,
    },
}

impl Easing {
    /// [`Easing::OutOvershoot`] with the default amount.
    #[must_use]
    pub fn out_overshoot() -> Self {
        Self::OutOvershoot {
            amount: DEFAULT_OVERSHOOT,
        }
    }

    /// Maps linear progress to eased progress.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => linear(t),
            Self::InOutCosine => ease_in_out_cosine(t),
            Self::OutBack => ease_out_back(t),
            Self::InOutBack => ease_in_out_back(t),
            Self::OutElastic => ease_out_elastic(t),
            Self::OutOvershoot { amount } => ease_out_overshoot(t, amount),
        }
    }

    /// Whether the curve may leave `[0, 1]`.
    #[must_use]
    pub fn overshoots(self) -> bool {
        !matches!(self, Self::Linear | Self::InOutCosine)
    }
}
