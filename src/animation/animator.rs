use crate::animation::binder::Binder;
use crate::animation::binding::JointIndexBinding;
use crate::animation::clock::AnimationClock;
use crate::animation::easing::Easing;
use crate::animation::interpolate::slerp_rotation;
use crate::animation::resolver::{KeyframeCursor, resolve_with_cursor};
use crate::animation::timeline::Timeline;
use crate::errors::Result;
use crate::scene::SkeletonRig;
use crate::utils::JointId;

/// Lifecycle of an [`Animator`]. There is no paused or stopped state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    /// No skeleton bound yet; ticks are no-ops.
    Unbound,
    /// Bound and bootstrap pose captured; waiting for the first tick.
    Bootstrapped,
    /// Ticking.
    Running,
}

/// Per-tick bookkeeping returned by [`Animator::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Looped time the pose was sampled at
    pub time: f32,
    /// Eased segment progress used for interpolation
    pub eased: f32,
    /// Joints whose rotation was written
    pub driven: usize,
    /// Bound joints left untouched because a bracketing keyframe lacks them
    pub held: usize,
}

/// Drives one skeleton from one timeline.
///
/// Owns its [`Timeline`] copy, so several skeletons can play the same
/// authored content with independent bootstrap poses.
#[derive(Debug, Clone)]
pub struct Animator {
    timeline: Timeline,
    easing: Easing,
    clock: AnimationClock,
    required: Vec<JointId>,
    binding: Option<JointIndexBinding>,
    cursor: KeyframeCursor,
    ticks: u64,
}

impl Animator {
    #[must_use]
    pub fn new(timeline: Timeline, easing: Easing, required: Vec<JointId>) -> Self {
        let clock = AnimationClock::new(timeline.loop_period());
        Self {
            timeline,
            easing,
            clock,
            required,
            binding: None,
            cursor: KeyframeCursor::default(),
            ticks: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AnimatorPhase {
        match (&self.binding, self.ticks) {
            (None, _) => AnimatorPhase::Unbound,
            (Some(_), 0) => AnimatorPhase::Bootstrapped,
            (Some(_), _) => AnimatorPhase::Running,
        }
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[inline]
    #[must_use]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    #[inline]
    #[must_use]
    pub fn binding(&self) -> Option<&JointIndexBinding> {
        self.binding.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn required_joints(&self) -> &[JointId] {
        &self.required
    }

    /// Binds the required joints and captures the bootstrap pose.
    ///
    /// Safe to call repeatedly: failures leave the animator untouched, and
    /// once bound further calls return `Ok` without recapturing.
    pub fn bootstrap<R>(&mut self, rig: &R) -> Result<()>
    where
        R: SkeletonRig + ?Sized,
    {
        if self.binding.is_some() {
            return Ok(());
        }

        let bound = Binder::bind(rig, &self.required)?;
        self.timeline.bootstrap(bound.live_pose)?;
        self.binding = Some(bound.binding);
        Ok(())
    }

    /// Drops the joint binding so the next [`Animator::bootstrap`] rebinds
    /// against a new skeleton instance and recaptures its live pose.
    ///
    /// The clock restarts from zero.
    pub fn unbind(&mut self) {
        if self.binding.take().is_some() {
            log::debug!("Animator unbound from skeleton");
        }
        self.timeline.clear_bootstrap();
        self.clock = AnimationClock::new(self.timeline.loop_period());
        self.cursor = KeyframeCursor::default();
        self.ticks = 0;
    }

    /// Advances the clock by `dt` and writes the interpolated pose.
    ///
    /// No-op until [`Animator::bootstrap`] has succeeded.
    pub fn tick<R>(&mut self, dt: f32, rig: &mut R) -> TickStats
    where
        R: SkeletonRig + ?Sized,
    {
        if self.binding.is_none() {
            return TickStats::default();
        }

        let time = self.clock.advance(dt);
        self.ticks += 1;
        self.sample(time, rig)
    }

    /// Writes the pose at `time` (already looped) without touching the clock.
    pub fn sample<R>(&mut self, time: f32, rig: &mut R) -> TickStats
    where
        R: SkeletonRig + ?Sized,
    {
        let mut stats = TickStats {
            time,
            ..TickStats::default()
        };

        let Some(binding) = &self.binding else {
            return stats;
        };
        let Some(segment) = resolve_with_cursor(&self.timeline, time, &mut self.cursor) else {
            return stats;
        };

        let eased = self.easing.apply(segment.progress);
        stats.eased = eased;

        for bound in binding.iter() {
            let (Some(from), Some(to)) = (
                segment.prev.pose.get(bound.joint),
                segment.next.pose.get(bound.joint),
            ) else {
                log::trace!("Joint '{}' missing from keyframe, holding", bound.joint);
                stats.held += 1;
                continue;
            };

            let Some(transform) = rig.joint_transform(bound.index) else {
                stats.held += 1;
                continue;
            };

            let rotation = slerp_rotation(from, to, eased);
            rig.set_joint_transform(bound.index, transform.with_rotation(rotation));
            stats.driven += 1;
        }

        stats
    }
}
