//! Skeletal keyframe animator.
//!
//! Given a skeleton whose joints are identified by stable paths and a looping
//! timeline of timestamped partial poses, produces eased, spherically
//! interpolated joint rotations every frame and writes them back into the
//! skeleton, leaving translation and scale untouched.
//!
//! ```rust,ignore
//! use skelanim::prelude::*;
//!
//! let mut rigs: SlotMap<SkeletonKey, Skeleton> = SlotMap::with_key();
//! let key = rigs.insert(skeleton);
//!
//! let timeline = Timeline::new(keyframes, 4.0)?;
//! let mut system = AnimationSystem::default();
//! system.attach_and_animate(&rigs, key, timeline, Easing::InOutCosine, &["Root/Arm"])?;
//!
//! loop {
//!     system.update(&mut rigs, timer.tick());
//! }
//! ```

pub mod animation;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{
    AnimationHandle, AnimationSystem, Animator, Easing, Keyframe, Pose, Timeline,
};
pub use errors::{AnimatorError, Result};
pub use scene::{JointTransform, RigStatus, Skeleton, SkeletonKey, SkeletonRig};
pub use settings::{AnimatorSettings, RetryPolicy};
pub use utils::JointId;

pub mod prelude {
    pub use crate::animation::{
        AnimationHandle, AnimationSystem, Animator, Easing, Keyframe, Pose, Timeline,
    };
    pub use crate::errors::{AnimatorError, Result};
    pub use crate::scene::{JointTransform, RigStatus, Skeleton, SkeletonKey, SkeletonRig};
    pub use crate::settings::{AnimatorSettings, RetryPolicy};
    pub use crate::utils::{FrameTimer, JointId};
    pub use slotmap::SlotMap;
}
