use slotmap::{SlotMap, new_key_type};

use crate::animation::animator::{Animator, TickStats};
use crate::animation::easing::Easing;
use crate::animation::timeline::Timeline;
use crate::errors::{AnimatorError, Result};
use crate::scene::{RigStatus, SkeletonKey, SkeletonRig};
use crate::settings::AnimatorSettings;
use crate::utils::JointId;

new_key_type! {
    /// Subscription of one animator to the per-frame update feed.
    pub struct AnimationHandle;
}

#[derive(Debug, Clone, Copy)]
enum Playback {
    /// Skeleton was not ready; retry once `wait` reaches zero.
    Pending { attempts: u32, wait: f32 },
    Active,
}

#[derive(Debug)]
struct Subscription {
    skeleton: SkeletonKey,
    animator: Animator,
    playback: Playback,
}

/// Outcome of one retry attempt, applied after the borrow of the
/// subscription ends.
enum Retry {
    Wait(Playback),
    Started,
    Release(AnimatorError),
}

/// Animation driver.
///
/// Owns every attached [`Animator`] and advances them from the render loop's
/// per-frame delta. Skeletons stay owned by the scene and are passed in on
/// each call. Everything runs on the caller's thread: bootstrap retries are
/// counted down inside [`AnimationSystem::update`] instead of being spawned.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    settings: AnimatorSettings,
    subscriptions: SlotMap<AnimationHandle, Subscription>,
    failures: Vec<(AnimationHandle, AnimatorError)>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            subscriptions: SlotMap::with_key(),
            failures: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    /// [`attach_and_animate`](Self::attach_and_animate) with the default easing.
    pub fn attach<S>(
        &mut self,
        rigs: &SlotMap<SkeletonKey, S>,
        skeleton: SkeletonKey,
        timeline: Timeline,
        required_joints: &[&str],
    ) -> Result<AnimationHandle>
    where
        S: SkeletonRig,
    {
        let easing = self.settings.default_easing;
        self.attach_and_animate(rigs, skeleton, timeline, easing, required_joints)
    }

    /// Starts animating `skeleton` with `timeline` (which carries the loop period).
    ///
    /// Bootstrap is attempted immediately. If the skeleton is still loading the
    /// subscription is kept and bootstrap is retried from [`update`](Self::update)
    /// under the configured [`RetryPolicy`](crate::settings::RetryPolicy).
    /// A skeleton whose asset failed to load, or a handle that does not refer to
    /// a skeleton, is an error and nothing is subscribed.
    pub fn attach_and_animate<S>(
        &mut self,
        rigs: &SlotMap<SkeletonKey, S>,
        skeleton: SkeletonKey,
        timeline: Timeline,
        easing: Easing,
        required_joints: &[&str],
    ) -> Result<AnimationHandle>
    where
        S: SkeletonRig,
    {
        let rig = rigs.get(skeleton).ok_or(AnimatorError::SkeletonMissing)?;
        let required = required_joints.iter().map(|p| JointId::new(p)).collect();
        let mut animator = Animator::new(timeline, easing, required);

        let playback = match animator.bootstrap(rig) {
            Ok(()) => Playback::Active,
            Err(AnimatorError::SkeletonNotReady) => {
                let retry = self.settings.retry;
                if retry.max_attempts <= 1 {
                    return Err(AnimatorError::RetryExhausted { attempts: 1 });
                }
                log::debug!("Skeleton not ready, retrying in {:.3}s", retry.delay);
                Playback::Pending {
                    attempts: 1,
                    wait: retry.delay,
                }
            }
            Err(err) => {
                log::error!("Failed to attach animator: {err}");
                return Err(err);
            }
        };

        let handle = self.subscriptions.insert(Subscription {
            skeleton,
            animator,
            playback,
        });
        if matches!(playback, Playback::Active) {
            log::info!("Animator {handle:?} started");
        }
        Ok(handle)
    }

    /// Releases a subscription. Returns the animator if it was still attached.
    pub fn detach(&mut self, handle: AnimationHandle) -> Option<Animator> {
        self.subscriptions.remove(handle).map(|sub| sub.animator)
    }

    /// Releases every subscription driving `skeleton`.
    ///
    /// Call before removing or replacing the skeleton instance.
    pub fn detach_skeleton(&mut self, skeleton: SkeletonKey) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|_, sub| sub.skeleton != skeleton);
        before - self.subscriptions.len()
    }

    #[must_use]
    pub fn contains(&self, handle: AnimationHandle) -> bool {
        self.subscriptions.contains_key(handle)
    }

    /// `true` once bootstrap has succeeded and the animator is being ticked.
    #[must_use]
    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.subscriptions
            .get(handle)
            .is_some_and(|sub| matches!(sub.playback, Playback::Active))
    }

    #[must_use]
    pub fn animator(&self, handle: AnimationHandle) -> Option<&Animator> {
        self.subscriptions.get(handle).map(|sub| &sub.animator)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drains subscriptions that were released because of a fatal error
    /// (asset failure, retry budget exhausted).
    pub fn take_failures(&mut self) -> Vec<(AnimationHandle, AnimatorError)> {
        std::mem::take(&mut self.failures)
    }

    /// Advances every subscription by `dt` seconds.
    ///
    /// Active animators tick; pending ones count down and retry bootstrap.
    /// Subscriptions whose skeleton no longer exists are released before they
    /// can touch it. An active subscription whose skeleton reports `Loading`
    /// again (a new instance in the same slot) is unbound and retried.
    pub fn update<S>(&mut self, rigs: &mut SlotMap<SkeletonKey, S>, dt: f32)
    where
        S: SkeletonRig,
    {
        let retry = self.settings.retry;
        let step = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut released: Vec<AnimationHandle> = Vec::new();

        for (handle, sub) in &mut self.subscriptions {
            let Some(rig) = rigs.get_mut(sub.skeleton) else {
                log::warn!("Skeleton of animator {handle:?} was removed, releasing");
                released.push(handle);
                continue;
            };

            let (attempts, wait) = match sub.playback {
                Playback::Active => match rig.status() {
                    RigStatus::Ready => {
                        sub.animator.tick(dt, rig);
                        continue;
                    }
                    RigStatus::Loading => {
                        // A new instance is streaming into the slot; the old indices are void
                        log::info!("Skeleton of animator {handle:?} is reloading, rebinding");
                        sub.animator.unbind();
                        sub.playback = Playback::Pending {
                            attempts: 1,
                            wait: retry.delay,
                        };
                        continue;
                    }
                    RigStatus::Failed(reason) => {
                        let err = AnimatorError::AssetLoad(reason);
                        log::error!("Animator {handle:?} released: {err}");
                        self.failures.push((handle, err));
                        released.push(handle);
                        continue;
                    }
                },
                Playback::Pending { attempts, wait } => (attempts, wait - step),
            };

            let outcome = if wait > 0.0 {
                Retry::Wait(Playback::Pending { attempts, wait })
            } else {
                let attempts = attempts + 1;
                match sub.animator.bootstrap(&*rig) {
                    Ok(()) => Retry::Started,
                    Err(AnimatorError::SkeletonNotReady) if attempts < retry.max_attempts => {
                        log::debug!(
                            "Skeleton for animator {handle:?} not ready (attempt {attempts}/{})",
                            retry.max_attempts
                        );
                        Retry::Wait(Playback::Pending {
                            attempts,
                            wait: retry.delay,
                        })
                    }
                    Err(AnimatorError::SkeletonNotReady) => {
                        Retry::Release(AnimatorError::RetryExhausted { attempts })
                    }
                    Err(err) => Retry::Release(err),
                }
            };

            match outcome {
                Retry::Wait(playback) => sub.playback = playback,
                Retry::Started => {
                    log::info!("Animator {handle:?} started");
                    sub.playback = Playback::Active;
                }
                Retry::Release(err) => {
                    log::error!("Animator {handle:?} released: {err}");
                    self.failures.push((handle, err));
                    released.push(handle);
                }
            }
        }

        for handle in released {
            self.subscriptions.remove(handle);
        }
    }

    /// Ticks a single subscription, for callers that drive animators individually.
    pub fn update_one<S>(
        &mut self,
        handle: AnimationHandle,
        rigs: &mut SlotMap<SkeletonKey, S>,
        dt: f32,
    ) -> Option<TickStats>
    where
        S: SkeletonRig,
    {
        let sub = self.subscriptions.get_mut(handle)?;
        if !matches!(sub.playback, Playback::Active) {
            return None;
        }
        let rig = rigs.get_mut(sub.skeleton)?;
        if rig.status() != RigStatus::Ready {
            return None;
        }
        Some(sub.animator.tick(dt, rig))
    }
}
