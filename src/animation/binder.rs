use crate::animation::binding::JointIndexBinding;
use crate::animation::pose::Pose;
use crate::errors::{AnimatorError, Result};
use crate::scene::{RigStatus, SkeletonRig};
use crate::utils::JointId;

/// Result of binding a joint list to a live skeleton.
#[derive(Debug, Clone)]
pub struct BoundRig {
    pub binding: JointIndexBinding,
    /// Live rotations of every bound joint at bind time
    pub live_pose: Pose,
}

/// Joint registry: resolves required joint paths against a live skeleton.
pub struct Binder;

impl Binder {
    /// Binds `required` joints to `rig` and captures their current rotations.
    ///
    /// Joints the skeleton lacks are left out silently; animating onto a
    /// skeleton with fewer joints degrades instead of failing.
    ///
    /// Fails with [`AnimatorError::SkeletonNotReady`] while the rig is still
    /// loading (callers retry) and [`AnimatorError::AssetLoad`] if it never
    /// will load.
    pub fn bind<R>(rig: &R, required: &[JointId]) -> Result<BoundRig>
    where
        R: SkeletonRig + ?Sized,
    {
        match rig.status() {
            RigStatus::Ready => {}
            RigStatus::Loading => return Err(AnimatorError::SkeletonNotReady),
            RigStatus::Failed(reason) => return Err(AnimatorError::AssetLoad(reason)),
        }

        let mut binding = JointIndexBinding::new();

        for &joint in required {
            let Some(index) = rig.resolve_joint_index(joint) else {
                log::debug!("Joint '{joint}' not found in skeleton, skipping");
                continue;
            };
            if rig.joint_transform(index).is_none() {
                log::debug!("Joint '{joint}' resolved to unreadable index {index}, skipping");
                continue;
            }
            binding.push(joint, index);
        }

        let live_pose: Pose = binding
            .iter()
            .filter_map(|bound| {
                rig.joint_transform(bound.index)
                    .map(|transform| (bound.joint, transform.rotation))
            })
            .collect();

        log::debug!("Bound {}/{} required joints", binding.len(), required.len());

        Ok(BoundRig { binding, live_pose })
    }
}
